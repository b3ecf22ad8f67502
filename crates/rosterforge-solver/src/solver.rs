//! Solver driver.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use rosterforge_config::{EnvironmentMode, SolverConfig};
use rosterforge_core::{HardMediumSoftScore, Result, RosterForgeError, Schedule};
use rosterforge_scoring::{create_rules, names, ConstraintWeightOverrides, RuleTable, ScheduleDirector};

use crate::heuristic::{CandidateRanges, MoveSampler};
use crate::phase::construction::ConstructionPhase;
use crate::phase::localsearch::{LateAcceptanceAcceptor, LocalSearchPhase};
use crate::phase::Phase;
use crate::scope::SolverScope;
use crate::termination::{self, Termination, TimeTermination};

/// Lifecycle of one solve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SolverPhase {
    #[default]
    Uninitialized,
    Constructing,
    LocalSearching,
    Terminated,
}

impl fmt::Display for SolverPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolverPhase::Uninitialized => "uninitialized",
            SolverPhase::Constructing => "constructing",
            SolverPhase::LocalSearching => "local_searching",
            SolverPhase::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

/// Outcome of [`Solver::solve`].
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Best schedule found, with its score set.
    pub schedule: Schedule,
    pub score: HardMediumSoftScore,
    pub state: SolverPhase,
    /// Local search steps taken.
    pub steps: u64,
    pub elapsed: Duration,
}

impl SolveResult {
    pub fn is_feasible(&self) -> bool {
        self.score.hard() >= 0
    }
}

/// Thread-safe handle for stopping a running solve.
///
/// Clones share state with the solver they came from.
#[derive(Debug, Clone, Default)]
pub struct SolverHandle {
    terminate_early: Arc<AtomicBool>,
    solving: Arc<AtomicBool>,
}

impl SolverHandle {
    /// Asks a running solve to stop after its current move. Returns false
    /// if nothing is solving.
    pub fn terminate_early(&self) -> bool {
        if self.solving.load(Ordering::SeqCst) {
            self.terminate_early.store(true, Ordering::SeqCst);
            true
        } else {
            false
        }
    }

    pub fn is_solving(&self) -> bool {
        self.solving.load(Ordering::SeqCst)
    }
}

/// Runs construction then late-acceptance local search on a schedule.
///
/// ```
/// use rosterforge_config::SolverConfig;
/// use rosterforge_solver::{Solver, SolverPhase};
/// use rosterforge_test::small_clinic;
///
/// let (schedule, _) = small_clinic();
/// let config = SolverConfig::new().with_random_seed(1).with_step_count_limit(100);
/// let mut solver = Solver::new(config);
///
/// let result = solver.solve(schedule).unwrap();
/// assert_eq!(result.state, SolverPhase::Terminated);
/// assert_eq!(result.score.hard(), 0);
/// ```
pub struct Solver {
    config: SolverConfig,
    state: SolverPhase,
    handle: SolverHandle,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            state: SolverPhase::Uninitialized,
            handle: SolverHandle::default(),
        }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    pub fn state(&self) -> SolverPhase {
        self.state
    }

    pub fn handle(&self) -> SolverHandle {
        self.handle.clone()
    }

    /// Requests early termination. See [`SolverHandle::terminate_early`].
    pub fn terminate_early(&self) -> bool {
        self.handle.terminate_early()
    }

    pub fn is_solving(&self) -> bool {
        self.handle.is_solving()
    }

    /// Solves `schedule` and returns the best schedule found.
    ///
    /// Invalid configuration or facts are rejected before any search. An
    /// infeasible result is not an error; it shows up in the score.
    pub fn solve(&mut self, mut schedule: Schedule) -> Result<SolveResult> {
        self.config
            .validate()
            .map_err(|e| RosterForgeError::Config(e.to_string()))?;
        if let Some(site) = self.config.scoring.high_demand_site {
            schedule.high_demand_site = Some(site);
        }
        schedule.validate()?;
        let rules = self.build_rules()?;
        let ranges = CandidateRanges::build(&schedule);

        self.state = SolverPhase::Uninitialized;
        self.handle.terminate_early.store(false, Ordering::SeqCst);
        self.handle.solving.store(true, Ordering::SeqCst);
        let result = self.run(schedule, rules, &ranges);
        self.handle.solving.store(false, Ordering::SeqCst);
        Ok(result)
    }

    fn build_rules(&self) -> Result<RuleTable> {
        let weights = self
            .config
            .scoring
            .parsed_weights()
            .map_err(|e| RosterForgeError::Config(e.to_string()))?;
        if let Some((unknown, _)) = weights.iter().find(|(n, _)| !names::ALL.contains(&n.as_str())) {
            return Err(RosterForgeError::Config(format!("unknown rule '{}'", unknown)));
        }
        Ok(create_rules(&ConstraintWeightOverrides::from_pairs(weights)))
    }

    fn seed(&self) -> Option<u64> {
        match (self.config.random_seed, self.config.environment_mode) {
            (Some(seed), _) => Some(seed),
            (None, EnvironmentMode::Reproducible) => Some(0),
            (None, _) => None,
        }
    }

    fn run(&mut self, schedule: Schedule, rules: RuleTable, ranges: &CandidateRanges) -> SolveResult {
        let entities = schedule.entity_count();
        let staff = schedule.staff.len();
        let director = ScheduleDirector::new(schedule, rules);
        let seed = self.seed();
        let mut scope = match seed {
            Some(seed) => SolverScope::with_seed(director, seed),
            None => SolverScope::new(director),
        };
        scope.set_terminate_early_flag(self.handle.terminate_early.clone());
        scope.set_full_assert(self.config.environment_mode.is_asserted());
        scope.start_solving();

        let initial = scope.calculate_score();
        info!(
            event = "solve_start",
            entities,
            staff,
            movable = ranges.movable().len(),
            seed = ?seed,
            score = %initial,
        );

        if self.config.construction.enabled {
            self.state = SolverPhase::Constructing;
            let budget = self.config.termination.time_limit().map(TimeTermination::new);
            ConstructionPhase::new(ranges)
                .with_termination(budget)
                .solve(&mut scope);
        }
        scope.update_best_solution();

        let termination = termination::from_config(&self.config.termination);
        if scope.is_terminate_early() || termination.is_terminated(&scope) {
            debug!(event = "local_search_skipped");
        } else {
            self.state = SolverPhase::LocalSearching;
            let local_search = &self.config.local_search;
            let mut phase = LocalSearchPhase::new(
                LateAcceptanceAcceptor::new(local_search.late_acceptance_size),
                MoveSampler::new(local_search.swap_probability),
                ranges,
                termination,
            );
            phase.solve(&mut scope);
        }

        self.state = SolverPhase::Terminated;
        scope.restore_best();
        let score = match scope.best_score() {
            Some(score) => score,
            None => scope.calculate_score(),
        };
        let steps = scope.total_step_count();
        let elapsed = scope.elapsed().unwrap_or_default();
        let mut schedule = scope.take_best_or_working_solution();
        schedule.score = Some(score);

        info!(
            event = "solve_end",
            score = %score,
            steps,
            elapsed_ms = elapsed.as_millis() as u64,
            feasible = score.hard() >= 0,
        );
        SolveResult {
            schedule,
            score,
            state: self.state,
            steps,
            elapsed,
        }
    }
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
#[path = "solver_tests.rs"]
mod tests;
