//! Solver-level scope.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use rosterforge_core::{HardMediumSoftScore, Schedule};
use rosterforge_scoring::ScheduleDirector;

/// Top-level scope for one solving run.
///
/// Owns the score director, the best solution seen so far and the random
/// source. Phases borrow it mutably one after another.
pub struct SolverScope {
    director: ScheduleDirector,
    best_solution: Option<Schedule>,
    best_score: Option<HardMediumSoftScore>,
    rng: ChaCha8Rng,
    start_time: Option<Instant>,
    last_improvement: Option<Instant>,
    total_step_count: u64,
    terminate_early_flag: Option<Arc<AtomicBool>>,
    full_assert: bool,
}

impl SolverScope {
    pub fn new(director: ScheduleDirector) -> Self {
        Self::with_rng(director, ChaCha8Rng::from_os_rng())
    }

    pub fn with_seed(director: ScheduleDirector, seed: u64) -> Self {
        Self::with_rng(director, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(director: ScheduleDirector, rng: ChaCha8Rng) -> Self {
        Self {
            director,
            best_solution: None,
            best_score: None,
            rng,
            start_time: None,
            last_improvement: None,
            total_step_count: 0,
            terminate_early_flag: None,
            full_assert: false,
        }
    }

    pub fn set_terminate_early_flag(&mut self, flag: Arc<AtomicBool>) {
        self.terminate_early_flag = Some(flag);
    }

    /// Checks the director against a full rescore after every step.
    pub fn set_full_assert(&mut self, enabled: bool) {
        self.full_assert = enabled;
    }

    pub fn start_solving(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.last_improvement = Some(now);
        self.total_step_count = 0;
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|t| t.elapsed())
    }

    /// Time since the best score last improved, or since solving started.
    pub fn time_since_improvement(&self) -> Option<Duration> {
        self.last_improvement.map(|t| t.elapsed())
    }

    pub fn director(&self) -> &ScheduleDirector {
        &self.director
    }

    pub fn director_mut(&mut self) -> &mut ScheduleDirector {
        &mut self.director
    }

    /// Splits the scope into the director and the random source.
    pub fn director_and_rng(&mut self) -> (&mut ScheduleDirector, &mut ChaCha8Rng) {
        (&mut self.director, &mut self.rng)
    }

    pub fn working_solution(&self) -> &Schedule {
        self.director.working_solution()
    }

    pub fn calculate_score(&mut self) -> HardMediumSoftScore {
        self.director.calculate_score()
    }

    pub fn best_solution(&self) -> Option<&Schedule> {
        self.best_solution.as_ref()
    }

    pub fn best_score(&self) -> Option<HardMediumSoftScore> {
        self.best_score
    }

    /// Records the working solution as best if it beats the current best.
    /// Returns true on improvement.
    pub fn update_best_solution(&mut self) -> bool {
        let current = self.director.calculate_score();
        let improved = match self.best_score {
            None => true,
            Some(best) => current > best,
        };
        if improved {
            self.best_solution = Some(self.director.clone_working_solution());
            self.best_score = Some(current);
            self.last_improvement = Some(Instant::now());
            debug!(
                event = "new_best",
                score = %current,
                step = self.total_step_count,
            );
        }
        improved
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn increment_step_count(&mut self) -> u64 {
        self.total_step_count += 1;
        self.total_step_count
    }

    pub fn total_step_count(&self) -> u64 {
        self.total_step_count
    }

    /// Returns true if an early stop was requested from outside.
    pub fn is_terminate_early(&self) -> bool {
        self.terminate_early_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Panics if the director drifted, when full assertion is enabled.
    pub fn assert_step(&self) {
        if self.full_assert {
            self.director.assert_consistent();
        }
    }

    /// Makes the best solution the working one again.
    pub fn restore_best(&mut self) {
        if let Some(best) = &self.best_solution {
            let current = self.director.calculate_score();
            if Some(current) != self.best_score {
                self.director.replace_solution(best.clone());
            }
        }
    }

    /// Consumes the scope, returning the best solution if one was recorded
    /// and the working solution otherwise.
    pub fn take_best_or_working_solution(self) -> Schedule {
        match self.best_solution {
            Some(best) => best,
            None => self.director.take_solution(),
        }
    }
}

impl std::fmt::Debug for SolverScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolverScope")
            .field("best_score", &self.best_score)
            .field("total_step_count", &self.total_step_count)
            .field("full_assert", &self.full_assert)
            .finish()
    }
}
