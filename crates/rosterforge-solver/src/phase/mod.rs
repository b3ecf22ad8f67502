//! Solver phases.
//!
//! - `ConstructionPhase`: best-fit assignment of every unassigned entity
//! - `LocalSearchPhase`: late-acceptance improvement of the result

pub mod construction;
pub mod localsearch;

use std::fmt::Debug;

use crate::scope::SolverScope;

/// A phase of the solving process.
///
/// Phases run in sequence against the same scope. Each one leaves the
/// best solution recorded in the scope up to date.
pub trait Phase: Send + Debug {
    fn solve(&mut self, solver_scope: &mut SolverScope);

    /// Returns the name of this phase type.
    fn phase_type_name(&self) -> &'static str;
}
