// Derived attributes of coverage slots.
//
// Both attributes are pure functions of the assignment state of one staff
// member. The director recomputes them for the previous and the new staff
// member after every assignment change.

use chrono::NaiveDate;

use rosterforge_core::{Period, Schedule};

use crate::constraints::distinct_dates;

// Distinct dates with non-fallback coverage among `slots`.
pub fn work_day_count(schedule: &Schedule, slots: &[usize]) -> u32 {
    distinct_dates(
        slots
            .iter()
            .map(|&i| schedule.shift_of(i))
            .filter(|shift| !shift.is_fallback())
            .map(|shift| shift.date),
    ) as u32
}

// Whether `slots` cover both half-days of `date`.
pub fn covers_full_day(schedule: &Schedule, slots: &[usize], date: NaiveDate) -> bool {
    Period::HALVES.iter().all(|&half| {
        slots.iter().any(|&i| {
            let shift = schedule.shift_of(i);
            shift.date == date && shift.period.covers(half)
        })
    })
}

// Slots currently assigned to each staff member.
pub fn slots_by_staff(schedule: &Schedule) -> Vec<Vec<usize>> {
    let mut by_staff = vec![Vec::new(); schedule.staff.len()];
    for (i, slot) in schedule.slots.iter().enumerate() {
        if let Some(staff) = slot.staff {
            by_staff[staff].push(i);
        }
    }
    by_staff
}

// Expected (work_day_count, full_day_worked) of slot `slot`.
pub fn expected_attributes(schedule: &Schedule, by_staff: &[Vec<usize>], slot: usize) -> (u32, bool) {
    match schedule.slots[slot].staff {
        Some(staff) => {
            let slots = &by_staff[staff];
            (
                work_day_count(schedule, slots),
                covers_full_day(schedule, slots, schedule.shift_of(slot).date),
            )
        }
        None => (0, false),
    }
}
