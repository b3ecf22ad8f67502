//! RosterForge solver engine.
//!
//! This crate provides:
//! - Candidate ranges and structural move filters
//! - Reassign and swap moves, and a random move sampler
//! - Best-fit construction ordered by entity difficulty
//! - Late-acceptance local search
//! - Termination conditions
//! - The `Solver` state machine and assignment export

pub mod export;
pub mod heuristic;
pub mod phase;
pub mod scope;
pub mod solver;
pub mod termination;

pub use export::{
    export_assignments, summarize, AssignmentRecord, Coverage, FlexibleWorkload, ScheduleSummary,
};
pub use heuristic::{
    CandidateRanges, FallbackChange, Move, MoveFilter, MoveSampler, ReassignMove, RosterMove,
    SwapMove,
};
pub use phase::construction::{construction_order, ConstructionPhase};
pub use phase::localsearch::{Acceptor, LateAcceptanceAcceptor, LocalSearchPhase};
pub use phase::Phase;
pub use scope::SolverScope;
pub use solver::{SolveResult, Solver, SolverHandle, SolverPhase};
pub use termination::{
    ConfiguredTermination, OrTermination, StepCountTermination, Termination, TimeTermination,
    UnimprovedTimeTermination,
};
