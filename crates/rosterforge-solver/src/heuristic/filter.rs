//! Structural move filters.
//!
//! Only static eligibility facts are consulted: skill, site, availability and
//! the designated staff of 1:1 administrative slots. Anything that depends on
//! the rest of the assignment state is left to scoring.

use rosterforge_core::{EntityTarget, Period, Schedule};

use super::ranges::CandidateRanges;

/// Whether `staff` may ever cover slot `slot`.
pub fn slot_accepts(schedule: &Schedule, slot: usize, staff: usize) -> bool {
    let shift = schedule.shift_of(slot);
    let member = &schedule.staff[staff];
    if shift.is_rest() {
        return false;
    }
    if let Some(designated) = shift.designated_staff {
        return designated == staff;
    }
    if !member.is_available_on(shift.date, shift.period) {
        return false;
    }
    if shift.is_fallback() {
        return true;
    }
    shift.skill.map_or(true, |skill| member.has_skill(&skill))
        && shift.site.map_or(true, |site| member.can_work_at_site(&site))
}

/// Whether `staff` may ever hold closing responsibility `closing`: available
/// for the whole day and allowed on the location's site.
pub fn closing_accepts(schedule: &Schedule, closing: usize, staff: usize) -> bool {
    let closing = &schedule.closings[closing];
    let member = &schedule.staff[staff];
    member.is_available_on(closing.date, Period::FullDay)
        && closing.site.map_or(true, |site| member.can_work_at_site(&site))
}

/// Pure predicate over candidate moves, backed by precomputed ranges.
#[derive(Debug, Clone, Copy)]
pub struct MoveFilter<'a> {
    ranges: &'a CandidateRanges,
}

impl<'a> MoveFilter<'a> {
    pub fn new(ranges: &'a CandidateRanges) -> Self {
        Self { ranges }
    }

    /// Unassignment is always allowed; any other value must be in range.
    pub fn accepts_reassign(&self, target: EntityTarget, to: Option<usize>) -> bool {
        match to {
            None => true,
            Some(staff) => self.ranges.contains(target, staff),
        }
    }

    /// Both staff members must be eligible for the other slot after the swap.
    pub fn accepts_swap(&self, schedule: &Schedule, a: usize, b: usize) -> bool {
        if a == b {
            return false;
        }
        let left = schedule.slots[a].staff;
        let right = schedule.slots[b].staff;
        if left == right {
            return false;
        }
        right.map_or(true, |s| self.ranges.contains(EntityTarget::Slot(a), s))
            && left.map_or(true, |s| self.ranges.contains(EntityTarget::Slot(b), s))
    }
}
