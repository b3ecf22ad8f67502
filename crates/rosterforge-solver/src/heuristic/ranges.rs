//! Statically eligible staff per entity.

use rosterforge_core::{EntityTarget, Schedule};

use super::filter::{closing_accepts, slot_accepts};

/// Candidate staff indices per slot and per closing responsibility,
/// computed once per fact set. Each range is sorted ascending.
///
/// Also indexes the administrative slots designated to each staff member.
#[derive(Debug, Clone, Default)]
pub struct CandidateRanges {
    slots: Vec<Vec<usize>>,
    closings: Vec<Vec<usize>>,
    movable: Vec<EntityTarget>,
    fallbacks: Vec<Vec<usize>>,
}

impl CandidateRanges {
    pub fn build(schedule: &Schedule) -> Self {
        let staff = 0..schedule.staff.len();
        let slots: Vec<Vec<usize>> = (0..schedule.slots.len())
            .map(|slot| {
                staff
                    .clone()
                    .filter(|&s| slot_accepts(schedule, slot, s))
                    .collect()
            })
            .collect();
        let closings: Vec<Vec<usize>> = (0..schedule.closings.len())
            .map(|closing| {
                staff
                    .clone()
                    .filter(|&s| closing_accepts(schedule, closing, s))
                    .collect()
            })
            .collect();

        let movable = schedule
            .entity_targets()
            .filter(|&t| {
                let range = match t {
                    EntityTarget::Slot(i) => &slots[i],
                    EntityTarget::Closing(i) => &closings[i],
                };
                !range.is_empty() || schedule.assigned(t).is_some()
            })
            .collect();

        let mut fallbacks = vec![Vec::new(); schedule.staff.len()];
        for slot in 0..schedule.slots.len() {
            let shift = schedule.shift_of(slot);
            if let (true, Some(staff)) = (shift.is_admin(), shift.designated_staff) {
                if let Some(own) = fallbacks.get_mut(staff) {
                    own.push(slot);
                }
            }
        }

        Self {
            slots,
            closings,
            movable,
            fallbacks,
        }
    }

    pub fn of(&self, target: EntityTarget) -> &[usize] {
        match target {
            EntityTarget::Slot(i) => &self.slots[i],
            EntityTarget::Closing(i) => &self.closings[i],
        }
    }

    #[inline]
    pub fn contains(&self, target: EntityTarget, staff: usize) -> bool {
        self.of(target).binary_search(&staff).is_ok()
    }

    /// Entities with at least one candidate value besides their current one.
    pub fn movable(&self) -> &[EntityTarget] {
        &self.movable
    }

    /// Administrative slots designated to `staff`, ascending.
    pub fn fallback_slots(&self, staff: usize) -> &[usize] {
        self.fallbacks.get(staff).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of slots whose range is non-empty.
    pub fn movable_slot_count(&self) -> usize {
        self.slots.iter().filter(|r| !r.is_empty()).count()
    }
}
