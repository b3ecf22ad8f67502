//! Rule interpreter.
//!
//! Every scoring rule is a small piece of data: a name, an impact direction,
//! a weight and a plain function deciding how many weight units a match is
//! worth. Two shapes cover the whole rule table:
//!
//! - `EntityRule`: looks at one slot or closing responsibility at a time.
//! - `StaffRule`: groups entities by staff member and aggregates over the
//!   group (pairs, distinct days, loads).
//!
//! `RuleTable` is the ordered list the score director drives through the
//! incremental protocol.

mod entity;
mod staff;


pub use entity::{EntityMatcher, EntityRule};
pub use staff::{GroupAggregator, StaffGroup, StaffRule, Tally};

use rosterforge_core::{ConstraintRef, HardMediumSoftScore, Schedule, ScoreLevel};

use crate::api::analysis::{ConstraintAnalysis, ScoreExplanation};
use crate::api::constraint_set::{ConstraintResult, ConstraintSet, IncrementalConstraint};

/// One entry of the rule table.
#[derive(Debug)]
pub enum Rule {
    Entity(EntityRule),
    Staff(StaffRule),
}

impl Rule {
    /// Replaces the weight of one unit of match.
    pub fn set_weight(&mut self, weight: HardMediumSoftScore) {
        match self {
            Rule::Entity(r) => r.set_weight(weight),
            Rule::Staff(r) => r.set_weight(weight),
        }
    }

    /// Level the rule was declared at, independent of later weight changes.
    pub fn level(&self) -> ScoreLevel {
        match self {
            Rule::Entity(r) => r.level(),
            Rule::Staff(r) => r.level(),
        }
    }
}

/// Most significant level at which `weight` is non-zero; soft for zero.
pub(crate) fn level_of(weight: HardMediumSoftScore) -> ScoreLevel {
    if weight.hard() != 0 {
        ScoreLevel::Hard
    } else if weight.medium() != 0 {
        ScoreLevel::Medium
    } else {
        ScoreLevel::Soft
    }
}

impl From<EntityRule> for Rule {
    fn from(rule: EntityRule) -> Self {
        Rule::Entity(rule)
    }
}

impl From<StaffRule> for Rule {
    fn from(rule: StaffRule) -> Self {
        Rule::Staff(rule)
    }
}

macro_rules! dispatch {
    ($self:ident, $r:ident => $body:expr) => {
        match $self {
            Rule::Entity($r) => $body,
            Rule::Staff($r) => $body,
        }
    };
}

impl IncrementalConstraint<Schedule, HardMediumSoftScore> for Rule {
    fn evaluate(&self, solution: &Schedule) -> HardMediumSoftScore {
        dispatch!(self, r => r.evaluate(solution))
    }

    fn match_count(&self, solution: &Schedule) -> usize {
        dispatch!(self, r => r.match_count(solution))
    }

    fn initialize(&mut self, solution: &Schedule) -> HardMediumSoftScore {
        dispatch!(self, r => r.initialize(solution))
    }

    fn on_insert(
        &mut self,
        solution: &Schedule,
        entity_index: usize,
        descriptor_index: usize,
    ) -> HardMediumSoftScore {
        dispatch!(self, r => r.on_insert(solution, entity_index, descriptor_index))
    }

    fn on_retract(
        &mut self,
        solution: &Schedule,
        entity_index: usize,
        descriptor_index: usize,
    ) -> HardMediumSoftScore {
        dispatch!(self, r => r.on_retract(solution, entity_index, descriptor_index))
    }

    fn reset(&mut self) {
        dispatch!(self, r => r.reset())
    }

    fn name(&self) -> &str {
        dispatch!(self, r => r.name())
    }

    fn is_hard(&self) -> bool {
        dispatch!(self, r => r.is_hard())
    }

    fn constraint_ref(&self) -> ConstraintRef {
        dispatch!(self, r => r.constraint_ref())
    }

    fn weight(&self) -> HardMediumSoftScore {
        dispatch!(self, r => r.weight())
    }
}

/// Ordered list of rules.
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn push(&mut self, rule: impl Into<Rule>) {
        self.rules.push(rule.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Rule> {
        self.rules.iter_mut().find(|r| r.name() == name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// From-scratch breakdown of the schedule's score, one entry per rule.
    pub fn explain(&self, solution: &Schedule) -> ScoreExplanation<HardMediumSoftScore> {
        let constraints = self
            .rules
            .iter()
            .map(|r| ConstraintAnalysis {
                constraint_ref: r.constraint_ref(),
                weight: r.weight(),
                score: r.evaluate(solution),
                match_count: r.match_count(solution),
                is_hard: r.is_hard(),
            })
            .collect();
        ScoreExplanation::new(constraints)
    }
}

impl ConstraintSet<Schedule, HardMediumSoftScore> for RuleTable {
    fn evaluate_all(&self, solution: &Schedule) -> HardMediumSoftScore {
        self.rules.evaluate_all(solution)
    }

    fn constraint_count(&self) -> usize {
        self.rules.len()
    }

    fn evaluate_each(&self, solution: &Schedule) -> Vec<ConstraintResult<HardMediumSoftScore>> {
        self.rules.evaluate_each(solution)
    }

    fn initialize_all(&mut self, solution: &Schedule) -> HardMediumSoftScore {
        self.rules.initialize_all(solution)
    }

    fn on_insert_all(
        &mut self,
        solution: &Schedule,
        entity_index: usize,
        descriptor_index: usize,
    ) -> HardMediumSoftScore {
        self.rules
            .on_insert_all(solution, entity_index, descriptor_index)
    }

    fn on_retract_all(
        &mut self,
        solution: &Schedule,
        entity_index: usize,
        descriptor_index: usize,
    ) -> HardMediumSoftScore {
        self.rules
            .on_retract_all(solution, entity_index, descriptor_index)
    }

    fn reset_all(&mut self) {
        self.rules.reset_all()
    }
}
