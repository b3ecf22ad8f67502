//! Score types for representing schedule quality
//!
//! Scores are compared lexicographically level by level. Every score type is
//! an immutable value supporting addition, subtraction and negation so that
//! rule contributions can be summed and deltas computed.

mod hard_medium_soft;
mod traits;

#[cfg(test)]
mod tests;

pub use hard_medium_soft::HardMediumSoftScore;
pub use traits::{Score, ScoreParseError};

/// Score level representing different constraint priorities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoreLevel {
    /// Must be satisfied for feasibility
    Hard,
    /// Coverage objectives
    Medium,
    /// Preference and fairness objectives
    Soft,
}
