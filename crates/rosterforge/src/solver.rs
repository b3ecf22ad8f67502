//! One-call entry points.

use std::path::Path;

use tracing::warn;

use rosterforge_config::{ConfigError, SolverConfig};
use rosterforge_core::{HardMediumSoftScore, Result, RosterForgeError, Schedule};
use rosterforge_scoring::{ScheduleDirector, ScoreExplanation};
use rosterforge_solver::{SolveResult, Solver};

/// Solves `schedule` with `config`.
///
/// ```
/// use rosterforge::{solve, SolverConfig};
/// use rosterforge_test::small_clinic;
///
/// let (schedule, _) = small_clinic();
/// let config = SolverConfig::new().with_random_seed(3).with_step_count_limit(200);
/// let result = solve(schedule, &config).unwrap();
/// assert_eq!(result.score.hard(), 0);
/// ```
pub fn solve(schedule: Schedule, config: &SolverConfig) -> Result<SolveResult> {
    Solver::new(config.clone()).solve(schedule)
}

/// Loads the configuration at `path`, or the defaults when no such file
/// exists. A file that exists but does not parse is an error.
pub fn load_config(path: impl AsRef<Path>) -> Result<SolverConfig> {
    let path = path.as_ref();
    match SolverConfig::load(path) {
        Ok(config) => Ok(config),
        Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(event = "config_missing", path = %path.display());
            Ok(SolverConfig::default())
        }
        Err(e) => Err(RosterForgeError::Config(e.to_string())),
    }
}

/// Solves with the configuration at `path`; see [`load_config`].
pub fn solve_with_config_file(schedule: Schedule, path: impl AsRef<Path>) -> Result<SolveResult> {
    let config = load_config(path)?;
    solve(schedule, &config)
}

/// Per-rule breakdown of a schedule's score under the default weights.
pub fn explain(schedule: Schedule) -> ScoreExplanation<HardMediumSoftScore> {
    let mut director = ScheduleDirector::with_default_rules(schedule);
    director.calculate_score();
    director.explain()
}
