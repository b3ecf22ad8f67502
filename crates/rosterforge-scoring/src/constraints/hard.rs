// Feasibility rules.

use smallvec::SmallVec;

use rosterforge_core::{ClosingTier, EntityTarget, Period, Schedule};

use crate::rule::{StaffGroup, Tally};

// Pairs of the staff member's slots on the same date with overlapping
// periods. Full-day slots overlap both half-days.
pub(super) fn double_booking(schedule: &Schedule, group: StaffGroup<'_>) -> Tally {
    let slots: SmallVec<[usize; 16]> = group.assigned_slots(schedule).collect();
    let mut pairs = 0;
    for (n, &a) in slots.iter().enumerate() {
        let first = schedule.shift_of(a);
        for &b in &slots[n + 1..] {
            let second = schedule.shift_of(b);
            if first.date == second.date && first.period.overlaps(second.period) {
                pairs += 1;
            }
        }
    }
    Tally::count(pairs)
}

pub(super) fn unavailable(schedule: &Schedule, target: EntityTarget) -> i64 {
    let EntityTarget::Slot(i) = target else {
        return 0;
    };
    let Some(staff) = schedule.slots[i].staff else {
        return 0;
    };
    let shift = schedule.shift_of(i);
    i64::from(!schedule.staff[staff].is_available_on(shift.date, shift.period))
}

pub(super) fn missing_skill(schedule: &Schedule, target: EntityTarget) -> i64 {
    let EntityTarget::Slot(i) = target else {
        return 0;
    };
    let Some(staff) = schedule.slots[i].staff else {
        return 0;
    };
    let shift = schedule.shift_of(i);
    if shift.is_fallback() {
        return 0;
    }
    match &shift.skill {
        Some(skill) => i64::from(!schedule.staff[staff].has_skill(skill)),
        None => 0,
    }
}

pub(super) fn forbidden_site(schedule: &Schedule, target: EntityTarget) -> i64 {
    let EntityTarget::Slot(i) = target else {
        return 0;
    };
    let Some(staff) = schedule.slots[i].staff else {
        return 0;
    };
    let shift = schedule.shift_of(i);
    if shift.is_fallback() {
        return 0;
    }
    match &shift.site {
        Some(site) => i64::from(!schedule.staff[staff].can_work_at_site(site)),
        None => 0,
    }
}

// First-tier and second-tier responsibilities held together at one
// location on one date.
pub(super) fn first_and_second_tier(schedule: &Schedule, group: StaffGroup<'_>) -> Tally {
    let mut pairs = 0;
    for &a in group.closings {
        let first = &schedule.closings[a];
        if first.tier != ClosingTier::First {
            continue;
        }
        pairs += group
            .closings
            .iter()
            .map(|&b| &schedule.closings[b])
            .filter(|second| {
                second.tier == ClosingTier::Second
                    && second.location == first.location
                    && second.date == first.date
            })
            .count();
    }
    Tally::count(pairs)
}

// One match per half-day in which the holder of a closing responsibility
// does not cover that location.
pub(super) fn closing_without_presence(schedule: &Schedule, group: StaffGroup<'_>) -> Tally {
    let mut missing = 0;
    for &c in group.closings {
        let closing = &schedule.closings[c];
        for half in Period::HALVES {
            let present = group.work_slots(schedule).any(|i| {
                let shift = schedule.shift_of(i);
                shift.location == Some(closing.location)
                    && shift.date == closing.date
                    && shift.period.covers(half)
            });
            if !present {
                missing += 1;
            }
        }
    }
    Tally::count(missing)
}

// Empty administrative slots of a staff member who has no other
// non-administrative coverage in that period.
pub(super) fn idle_without_fallback(schedule: &Schedule, group: StaffGroup<'_>) -> Tally {
    let mut idle = 0;
    for d in group.designated_slots(schedule) {
        let admin = schedule.shift_of(d);
        if schedule.slots[d].staff.is_some() || !admin.is_admin() {
            continue;
        }
        let covered = group.assigned_slots(schedule).any(|i| {
            let shift = schedule.shift_of(i);
            !shift.is_admin() && shift.date == admin.date && shift.period.overlaps(admin.period)
        });
        if !covered {
            idle += 1;
        }
    }
    Tally::count(idle)
}
