//! Incremental rule scoring for RosterForge.
//!
//! This crate provides:
//! - The `IncrementalConstraint` / `ConstraintSet` protocol (retract before a
//!   change, insert after it, score delta = sum of both)
//! - A small rule interpreter: per-entity rules and per-staff grouped rules
//! - The staff scheduling rule table with its default weights
//! - `ScheduleDirector`, which keeps the cached score and the slots'
//!   derived attributes consistent with every assignment change

pub mod api;
pub mod constraints;
pub mod director;
pub mod rule;

pub use api::analysis::{ConstraintAnalysis, ScoreExplanation};
pub use api::constraint_set::{ConstraintResult, ConstraintSet, IncrementalConstraint};
pub use api::weight_overrides::{ConstraintWeightOverrides, WeightProvider};
pub use constraints::{create_rules, default_rules, names};
pub use director::ScheduleDirector;
pub use rule::{EntityRule, Rule, RuleTable, StaffGroup, StaffRule, Tally};
