//! RosterForge - medical staff scheduling.
//!
//! Assigns staff to coverage slots and closing responsibilities over a
//! planning horizon. Hard rules keep the roster legal, medium rules keep it
//! covered, soft rules keep people happy.
//!
//! # Example
//!
//! ```rust
//! use rosterforge::prelude::*;
//!
//! let score = HardMediumSoftScore::of(0, -10_000, 250);
//! assert!(score.is_feasible());
//! assert_eq!(score.medium(), -10_000);
//! ```

// Score types and the domain model
pub use rosterforge_core::{
    Absence, ClosingFlags, ClosingResponsibility, ClosingTier, EntityTarget, HardMediumSoftScore,
    Location, NeedType, Period, Result, RosterForgeError, Schedule, Score, Shift, ShiftSlot, Site,
    Skill, Staff,
};

// Fact set preparation
pub use rosterforge_core::domain::materialize;

// Scoring, for diagnostics
pub use rosterforge_scoring::{names, ScheduleDirector, ScoreExplanation};

pub use rosterforge_config::{EnvironmentMode, SolverConfig};
pub use rosterforge_solver::{
    export_assignments, summarize, AssignmentRecord, ScheduleSummary, SolveResult, Solver,
    SolverHandle, SolverPhase,
};

mod logging;
mod solver;

pub use logging::init_tracing;
pub use solver::{explain, load_config, solve, solve_with_config_file};

pub mod prelude {
    pub use super::{
        ClosingTier, EntityTarget, HardMediumSoftScore, NeedType, Period, Schedule, Score, Shift,
        Staff,
    };
    pub use super::{solve, SolveResult, SolverConfig};
}
