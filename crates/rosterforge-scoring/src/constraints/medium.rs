// Coverage rules.

use rosterforge_core::{EntityTarget, NeedType, Schedule};

use crate::rule::{StaffGroup, Tally};

// Distance between a flexible staff member's worked days and their weekly
// target. Staff with no clinical coverage at all are not counted; their
// idle capacity already shows up as uncovered slots.
pub(super) fn flexible_day_gap(schedule: &Schedule, group: StaffGroup<'_>) -> Tally {
    let member = &schedule.staff[group.staff];
    if !member.flexible {
        return Tally::NONE;
    }
    let Some(target) = member.days_per_week else {
        return Tally::NONE;
    };
    let Some(first) = group.work_slots(schedule).next() else {
        return Tally::NONE;
    };
    let worked = i64::from(schedule.slots[first].work_day_count);
    Tally::single((worked - i64::from(target)).abs())
}

fn uncovered_slot_of(schedule: &Schedule, target: EntityTarget, need: NeedType) -> i64 {
    match target {
        EntityTarget::Slot(i) => {
            i64::from(schedule.slots[i].staff.is_none() && schedule.shift_of(i).need == need)
        }
        EntityTarget::Closing(_) => 0,
    }
}

pub(super) fn uncovered_surgical(schedule: &Schedule, target: EntityTarget) -> i64 {
    uncovered_slot_of(schedule, target, NeedType::Surgical)
}

pub(super) fn uncovered_consultation(schedule: &Schedule, target: EntityTarget) -> i64 {
    uncovered_slot_of(schedule, target, NeedType::Consultation)
}

pub(super) fn uncovered_closing(schedule: &Schedule, target: EntityTarget) -> i64 {
    match target {
        EntityTarget::Closing(i) => i64::from(schedule.closings[i].staff.is_none()),
        EntityTarget::Slot(_) => 0,
    }
}
