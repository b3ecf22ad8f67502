//! Step count termination.

use super::Termination;
use crate::scope::SolverScope;

/// Terminates after a number of local search steps.
///
/// ```
/// use rosterforge_solver::termination::StepCountTermination;
///
/// let term = StepCountTermination::new(1000);
/// assert_eq!(term.limit(), 1000);
/// ```
#[derive(Debug, Clone)]
pub struct StepCountTermination {
    limit: u64,
}

impl StepCountTermination {
    pub fn new(limit: u64) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl Termination for StepCountTermination {
    fn is_terminated(&self, solver_scope: &SolverScope) -> bool {
        solver_scope.total_step_count() >= self.limit
    }
}
