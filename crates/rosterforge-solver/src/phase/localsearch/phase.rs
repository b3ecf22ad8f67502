//! Late-acceptance local search phase.

use std::fmt::Debug;

use tracing::{info, trace};

use super::Acceptor;
use crate::heuristic::{CandidateRanges, Move, MoveSampler};
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::Termination;

/// Improves the working solution one sampled move at a time.
///
/// Each step draws a move from the sampler, applies it and asks the
/// acceptor about the new score; rejected moves are undone. The phase ends
/// when the termination fires, an early stop is requested, or the sampler
/// finds nothing doable.
pub struct LocalSearchPhase<'a, A, T> {
    acceptor: A,
    sampler: MoveSampler,
    ranges: &'a CandidateRanges,
    termination: T,
}

impl<'a, A, T> LocalSearchPhase<'a, A, T>
where
    A: Acceptor,
    T: Termination,
{
    pub fn new(
        acceptor: A,
        sampler: MoveSampler,
        ranges: &'a CandidateRanges,
        termination: T,
    ) -> Self {
        Self {
            acceptor,
            sampler,
            ranges,
            termination,
        }
    }

    fn should_stop(&self, solver_scope: &SolverScope) -> bool {
        solver_scope.is_terminate_early() || self.termination.is_terminated(solver_scope)
    }
}

impl<A: Debug, T: Debug> Debug for LocalSearchPhase<'_, A, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearchPhase")
            .field("acceptor", &self.acceptor)
            .field("sampler", &self.sampler)
            .field("termination", &self.termination)
            .finish()
    }
}

impl<A, T> Phase for LocalSearchPhase<'_, A, T>
where
    A: Acceptor,
    T: Termination,
{
    fn solve(&mut self, solver_scope: &mut SolverScope) {
        let mut last_step_score = solver_scope.calculate_score();
        self.acceptor.phase_started(&last_step_score);
        info!(
            event = "phase_start",
            phase = self.phase_type_name(),
            score = %last_step_score,
        );

        let mut accepted = 0u64;
        let mut steps = 0u64;
        while !self.should_stop(solver_scope) {
            let candidate = {
                let (director, rng) = solver_scope.director_and_rng();
                self.sampler.sample(director, self.ranges, rng)
            };
            let Some(m) = candidate else {
                break;
            };

            let director = solver_scope.director_mut();
            m.do_move(director);
            let move_score = director.calculate_score();
            let keep = self.acceptor.is_accepted(&last_step_score, &move_score);
            if keep {
                last_step_score = move_score;
                accepted += 1;
            } else {
                m.undo(director);
            }
            trace!(event = "step", mv = ?m, score = %move_score, accepted = keep);

            self.acceptor.step_ended(&last_step_score);
            if keep {
                solver_scope.update_best_solution();
            }
            solver_scope.assert_step();
            solver_scope.increment_step_count();
            steps += 1;
        }

        self.acceptor.phase_ended();
        info!(
            event = "phase_end",
            phase = self.phase_type_name(),
            steps,
            accepted,
            best_score = ?solver_scope.best_score(),
        );
    }

    fn phase_type_name(&self) -> &'static str {
        "LocalSearch"
    }
}
