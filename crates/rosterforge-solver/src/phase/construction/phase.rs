//! Best-fit construction phase.

use std::fmt::Debug;

use tracing::{debug, info, trace};

use rosterforge_core::EntityTarget;

use super::construction_order;
use crate::heuristic::CandidateRanges;
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::{Termination, TimeTermination};

/// Assigns every unassigned entity, one at a time, to the value with the
/// best resulting score.
///
/// Leaving the entity unassigned is evaluated first, then each candidate in
/// ascending staff order. A candidate wins only if strictly better, so ties
/// keep the earlier value. The termination is checked between placements;
/// entities not reached when it fires stay unassigned.
pub struct ConstructionPhase<'a, T = Option<TimeTermination>> {
    ranges: &'a CandidateRanges,
    termination: T,
}

impl<'a> ConstructionPhase<'a> {
    /// A phase that only stops early on request.
    pub fn new(ranges: &'a CandidateRanges) -> Self {
        Self {
            ranges,
            termination: None,
        }
    }
}

impl<'a, T: Termination> ConstructionPhase<'a, T> {
    pub fn with_termination<U: Termination>(self, termination: U) -> ConstructionPhase<'a, U> {
        ConstructionPhase {
            ranges: self.ranges,
            termination,
        }
    }

    fn should_stop(&self, solver_scope: &SolverScope) -> bool {
        solver_scope.is_terminate_early() || self.termination.is_terminated(solver_scope)
    }

    fn place(&self, solver_scope: &mut SolverScope, target: EntityTarget) -> Option<usize> {
        let director = solver_scope.director_mut();
        let mut best_value = None;
        let mut best_score = director.calculate_score();

        for &staff in self.ranges.of(target) {
            let score = director.change(target, Some(staff));
            director.change(target, None);
            if score > best_score {
                best_score = score;
                best_value = Some(staff);
            }
        }

        if best_value.is_some() {
            director.change(target, best_value);
        }
        trace!(
            event = "placed",
            target = ?target,
            staff = ?best_value,
            score = %best_score,
        );
        best_value
    }
}

impl<T: Debug> Debug for ConstructionPhase<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstructionPhase")
            .field("movable", &self.ranges.movable().len())
            .field("termination", &self.termination)
            .finish()
    }
}

impl<T: Termination> Phase for ConstructionPhase<'_, T> {
    fn solve(&mut self, solver_scope: &mut SolverScope) {
        let order = construction_order(solver_scope.working_solution(), self.ranges);
        let total = order.len();
        info!(event = "phase_start", phase = self.phase_type_name(), entities = total);

        let mut assigned = 0usize;
        for (done, target) in order.into_iter().enumerate() {
            if self.should_stop(solver_scope) {
                debug!(event = "construction_interrupted", placed = done, total);
                break;
            }
            if self.place(solver_scope, target).is_some() {
                assigned += 1;
            }
            if (done + 1) % 100 == 0 {
                debug!(
                    event = "construction_progress",
                    placed = done + 1,
                    total,
                    score = %solver_scope.director().get_score(),
                );
            }
        }

        solver_scope.update_best_solution();
        solver_scope.assert_step();
        info!(
            event = "phase_end",
            phase = self.phase_type_name(),
            assigned,
            score = %solver_scope.director().get_score(),
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "Construction"
    }
}
