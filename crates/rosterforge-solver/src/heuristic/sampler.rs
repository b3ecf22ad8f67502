//! Random move sampling for local search.

use rand::Rng;

use rosterforge_core::EntityTarget;
use rosterforge_scoring::ScheduleDirector;

use super::fallback::fallback_changes;
use super::filter::MoveFilter;
use super::moves::{Move, ReassignMove, RosterMove, SwapMove};
use super::ranges::CandidateRanges;

/// Draws a reassign move or, with `swap_probability`, a swap of two slots.
///
/// Draws that are not doable or that the filter rejects are retried up to
/// `max_attempts` times. Every slot move carries the companion changes on
/// the designated administrative slots of the staff it moves.
#[derive(Debug, Clone)]
pub struct MoveSampler {
    swap_probability: f64,
    max_attempts: usize,
}

impl Default for MoveSampler {
    fn default() -> Self {
        Self::new(0.3)
    }
}

impl MoveSampler {
    pub fn new(swap_probability: f64) -> Self {
        Self {
            swap_probability: swap_probability.clamp(0.0, 1.0),
            max_attempts: 64,
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn swap_probability(&self) -> f64 {
        self.swap_probability
    }

    /// Returns a doable, filter-surviving move, or `None` if none was found
    /// within the attempt budget.
    pub fn sample<R: Rng>(
        &self,
        director: &ScheduleDirector,
        ranges: &CandidateRanges,
        rng: &mut R,
    ) -> Option<RosterMove> {
        let filter = MoveFilter::new(ranges);
        let schedule = director.working_solution();
        let movable = ranges.movable();
        if movable.is_empty() {
            return None;
        }

        for _ in 0..self.max_attempts {
            let candidate: RosterMove =
                if schedule.slots.len() >= 2 && rng.random_bool(self.swap_probability) {
                    let a = rng.random_range(0..schedule.slots.len());
                    let b = rng.random_range(0..schedule.slots.len());
                    if !filter.accepts_swap(schedule, a, b) {
                        continue;
                    }
                    let left = schedule.slots[a].staff;
                    let right = schedule.slots[b].staff;
                    let fallback =
                        fallback_changes(director, ranges, &[(a, left, right), (b, right, left)]);
                    SwapMove::new(a, b).with_fallback(fallback).into()
                } else {
                    let target: EntityTarget = movable[rng.random_range(0..movable.len())];
                    let range = ranges.of(target);
                    // index == len stands for "unassigned"
                    let pick = rng.random_range(0..=range.len());
                    let to = range.get(pick).copied();
                    if !filter.accepts_reassign(target, to) {
                        continue;
                    }
                    let from = schedule.assigned(target);
                    let m = ReassignMove::new(target, from, to);
                    match target {
                        EntityTarget::Slot(slot) => m
                            .with_fallback(fallback_changes(director, ranges, &[(slot, from, to)]))
                            .into(),
                        EntityTarget::Closing(_) => m.into(),
                    }
                };

            if candidate.is_doable(director) {
                return Some(candidate);
            }
        }
        None
    }
}
