//! Scoring protocol and its supporting types.
//!
//! - `IncrementalConstraint` and `ConstraintSet` for incremental scoring
//! - Analysis types for per-rule score breakdowns
//! - Runtime weight overrides

pub mod analysis;
pub mod constraint_set;
pub mod weight_overrides;
