//! Termination conditions for the solver phases.

mod composite;
mod step_count;
mod time;
mod unimproved;

use std::fmt::Debug;

use rosterforge_config::TerminationConfig;

use crate::scope::SolverScope;

pub use composite::OrTermination;
pub use step_count::StepCountTermination;
pub use time::TimeTermination;
pub use unimproved::UnimprovedTimeTermination;

/// Trait for determining when to stop solving.
pub trait Termination: Send + Debug {
    /// Returns true if solving should terminate.
    fn is_terminated(&self, solver_scope: &SolverScope) -> bool;
}

/// An absent condition never fires.
impl<T: Termination> Termination for Option<T> {
    fn is_terminated(&self, solver_scope: &SolverScope) -> bool {
        self.as_ref().is_some_and(|t| t.is_terminated(solver_scope))
    }
}

/// The termination a [`TerminationConfig`] describes: any configured limit
/// ends the search.
pub type ConfiguredTermination = OrTermination<(
    Option<TimeTermination>,
    Option<UnimprovedTimeTermination>,
    Option<StepCountTermination>,
)>;

/// Builds the termination for a configuration section.
pub fn from_config(config: &TerminationConfig) -> ConfiguredTermination {
    OrTermination((
        config.time_limit().map(TimeTermination::new),
        config
            .unimproved_time_limit()
            .map(UnimprovedTimeTermination::new),
        config.step_count_limit.map(StepCountTermination::new),
    ))
}

#[cfg(test)]
mod tests;
