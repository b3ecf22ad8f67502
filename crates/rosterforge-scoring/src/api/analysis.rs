//! Per-rule score breakdown.
//!
//! A `ScoreExplanation` is what external reporters consume: the total score
//! and, for each rule in table order, its contribution and match count.

use std::fmt;

use rosterforge_core::score::Score;
use rosterforge_core::ConstraintRef;

/// Breakdown entry for one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintAnalysis<Sc: Score> {
    pub constraint_ref: ConstraintRef,
    /// Score of one unit of match.
    pub weight: Sc,
    /// Total score from this rule.
    pub score: Sc,
    pub match_count: usize,
    pub is_hard: bool,
}

/// Score with its per-rule breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreExplanation<Sc: Score> {
    pub score: Sc,
    pub constraints: Vec<ConstraintAnalysis<Sc>>,
}

impl<Sc: Score> ScoreExplanation<Sc> {
    pub fn new(constraints: Vec<ConstraintAnalysis<Sc>>) -> Self {
        let score = constraints
            .iter()
            .fold(Sc::zero(), |total, c| total + c.score);
        Self { score, constraints }
    }

    /// Looks a rule up by name.
    pub fn get(&self, name: &str) -> Option<&ConstraintAnalysis<Sc>> {
        self.constraints
            .iter()
            .find(|c| c.constraint_ref.name == name)
    }

    /// Rules that changed the score.
    pub fn non_zero(&self) -> impl Iterator<Item = &ConstraintAnalysis<Sc>> {
        self.constraints.iter().filter(|c| c.score != Sc::zero())
    }

    /// Hard rules that fired, i.e. why the schedule is infeasible.
    pub fn hard_violations(&self) -> Vec<&ConstraintAnalysis<Sc>> {
        self.non_zero().filter(|c| c.is_hard).collect()
    }

    pub fn total_match_count(&self) -> usize {
        self.constraints.iter().map(|c| c.match_count).sum()
    }
}

impl<Sc: Score> fmt::Display for ScoreExplanation<Sc> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        for c in self.non_zero() {
            writeln!(
                f,
                "  {:<36} {:>28} ({} matches)",
                c.constraint_ref.name, c.score.to_string(), c.match_count
            )?;
        }
        Ok(())
    }
}
