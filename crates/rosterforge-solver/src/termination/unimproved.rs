//! Termination on a stalled best score.

use std::time::Duration;

use super::Termination;
use crate::scope::SolverScope;

/// Terminates once the best score has not improved for `limit`.
///
/// The clock restarts at every new best solution, and at solve start.
#[derive(Debug, Clone)]
pub struct UnimprovedTimeTermination {
    limit: Duration,
}

impl UnimprovedTimeTermination {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    pub fn seconds(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }

    pub fn millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }
}

impl Termination for UnimprovedTimeTermination {
    fn is_terminated(&self, solver_scope: &SolverScope) -> bool {
        solver_scope
            .time_since_improvement()
            .is_some_and(|e| e >= self.limit)
    }
}
