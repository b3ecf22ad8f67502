// Preference, continuity and fairness rules.

use chrono::NaiveDate;
use smallvec::SmallVec;
use uuid::Uuid;

use rosterforge_core::{EntityTarget, Period, Schedule};

use super::{distinct_dates, weights};
use crate::rule::{StaffGroup, Tally};

fn rank_points(table: &[i64], rank: Option<u8>) -> i64 {
    rank.and_then(|r| table.get(usize::from(r).checked_sub(1)?).copied())
        .unwrap_or(0)
}

pub(super) fn physician_preference(schedule: &Schedule, target: EntityTarget) -> i64 {
    let EntityTarget::Slot(i) = target else {
        return 0;
    };
    let Some(staff) = schedule.slots[i].staff else {
        return 0;
    };
    let shift = schedule.shift_of(i);
    let rank = schedule.staff[staff].best_physician_priority(&shift.physicians);
    rank_points(&weights::PHYSICIAN_RANK_POINTS, rank)
}

pub(super) fn skill_preference(schedule: &Schedule, target: EntityTarget) -> i64 {
    let EntityTarget::Slot(i) = target else {
        return 0;
    };
    let Some(staff) = schedule.slots[i].staff else {
        return 0;
    };
    let rank = schedule
        .shift_of(i)
        .skill
        .and_then(|skill| schedule.staff[staff].skill_priority(&skill));
    rank_points(&weights::SKILL_RANK_POINTS, rank)
}

// (date, period, location, site) of each clinical slot in the group.
type Placement = (NaiveDate, Period, Option<Uuid>, Option<Uuid>);

fn placements(schedule: &Schedule, group: StaffGroup<'_>) -> SmallVec<[Placement; 16]> {
    group
        .work_slots(schedule)
        .map(|i| {
            let shift = schedule.shift_of(i);
            (shift.date, shift.period, shift.location, shift.site)
        })
        .collect()
}

fn works_full_day(schedule: &Schedule, group: StaffGroup<'_>) -> bool {
    group
        .assigned_slots(schedule)
        .any(|i| schedule.slots[i].full_day_worked)
}

// Days on which some location is covered both in the morning and in the
// afternoon. Counted once per day.
pub(super) fn same_location_days(schedule: &Schedule, group: StaffGroup<'_>) -> Tally {
    if !works_full_day(schedule, group) {
        return Tally::NONE;
    }
    let placements = placements(schedule, group);
    let days = distinct_dates(
        placements
            .iter()
            .filter(|(date, period, location, _)| {
                location.is_some()
                    && period.covers(Period::Morning)
                    && placements.iter().any(|(d, p, l, _)| {
                        d == date && p.covers(Period::Afternoon) && l == location
                    })
            })
            .map(|(date, ..)| *date),
    );
    Tally::count(days)
}

// Days on which the morning and afternoon are spent on different sites.
pub(super) fn site_change_days(schedule: &Schedule, group: StaffGroup<'_>) -> Tally {
    if !works_full_day(schedule, group) {
        return Tally::NONE;
    }
    let placements = placements(schedule, group);
    let days = distinct_dates(
        placements
            .iter()
            .filter(|(date, period, _, site)| {
                site.is_some()
                    && period.covers(Period::Morning)
                    && placements.iter().any(|(d, p, _, s)| {
                        d == date && p.covers(Period::Afternoon) && s.is_some() && s != site
                    })
            })
            .map(|(date, ..)| *date),
    );
    Tally::count(days)
}

pub(super) fn flexible_work_days(schedule: &Schedule, group: StaffGroup<'_>) -> Tally {
    if !schedule.staff[group.staff].flexible {
        return Tally::NONE;
    }
    match group.work_slots(schedule).next() {
        Some(first) => Tally::single(i64::from(schedule.slots[first].work_day_count)),
        None => Tally::NONE,
    }
}

// Combined load: closing tiers held plus repeated days at the high-demand
// site for staff who do not rank that site first. Penalized quadratically.
pub(super) fn workload(schedule: &Schedule, group: StaffGroup<'_>) -> Tally {
    let closing_load: i64 = group
        .closings
        .iter()
        .map(|&c| schedule.closings[c].tier.load())
        .sum();

    let site_load = match schedule.high_demand_site {
        Some(site) if schedule.staff[group.staff].site_priority(&site) != Some(1) => {
            let days = distinct_dates(
                group
                    .work_slots(schedule)
                    .map(|i| schedule.shift_of(i))
                    .filter(|shift| shift.site == Some(site))
                    .map(|shift| shift.date),
            ) as i64;
            (days - 1).max(0) * weights::HIGH_DEMAND_EXTRA_DAY_LOAD
        }
        _ => 0,
    };

    let load = closing_load + site_load;
    if load == 0 {
        return Tally::NONE;
    }
    Tally::new(1, load * load / weights::WORKLOAD_DAMPING)
}
