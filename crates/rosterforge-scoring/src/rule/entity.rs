//! Rules over a single planning entity.

use rosterforge_core::{
    ConstraintRef, EntityTarget, HardMediumSoftScore, ImpactType, Schedule, Score, ScoreLevel,
};

use super::level_of;
use crate::api::constraint_set::IncrementalConstraint;

/// Number of weight units an entity is worth to a rule; 0 means no match.
pub type EntityMatcher = fn(&Schedule, EntityTarget) -> i64;

/// Rule that scores every slot and closing responsibility independently.
///
/// Stateless: an entity's contribution only depends on the entity itself, so
/// retracting and inserting it is enough to keep the score exact.
#[derive(Debug, Clone)]
pub struct EntityRule {
    constraint_ref: ConstraintRef,
    impact: ImpactType,
    weight: HardMediumSoftScore,
    level: ScoreLevel,
    matcher: EntityMatcher,
}

impl EntityRule {
    pub fn new(
        name: &str,
        impact: ImpactType,
        weight: HardMediumSoftScore,
        matcher: EntityMatcher,
    ) -> Self {
        Self {
            constraint_ref: ConstraintRef::new("", name),
            impact,
            weight,
            level: level_of(weight),
            matcher,
        }
    }

    pub fn penalize(name: &str, weight: HardMediumSoftScore, matcher: EntityMatcher) -> Self {
        Self::new(name, ImpactType::Penalty, weight, matcher)
    }

    pub fn reward(name: &str, weight: HardMediumSoftScore, matcher: EntityMatcher) -> Self {
        Self::new(name, ImpactType::Reward, weight, matcher)
    }

    /// Overrides the level taken from the construction weight.
    pub fn with_level(mut self, level: ScoreLevel) -> Self {
        self.level = level;
        self
    }

    /// Replaces the weight. The level stays the one fixed at construction.
    pub fn set_weight(&mut self, weight: HardMediumSoftScore) {
        self.weight = weight;
    }

    pub fn level(&self) -> ScoreLevel {
        self.level
    }

    #[inline]
    fn score_of(&self, schedule: &Schedule, target: EntityTarget) -> HardMediumSoftScore {
        let units = (self.matcher)(schedule, target);
        if units == 0 {
            return HardMediumSoftScore::ZERO;
        }
        self.weight.scaled(self.impact.signed(units))
    }

    fn target(&self, entity_index: usize, descriptor_index: usize) -> Option<EntityTarget> {
        EntityTarget::from_descriptor(descriptor_index, entity_index)
    }
}

impl IncrementalConstraint<Schedule, HardMediumSoftScore> for EntityRule {
    fn evaluate(&self, solution: &Schedule) -> HardMediumSoftScore {
        solution
            .entity_targets()
            .fold(HardMediumSoftScore::ZERO, |total, t| total + self.score_of(solution, t))
    }

    fn match_count(&self, solution: &Schedule) -> usize {
        solution
            .entity_targets()
            .filter(|t| (self.matcher)(solution, *t) != 0)
            .count()
    }

    fn initialize(&mut self, solution: &Schedule) -> HardMediumSoftScore {
        self.evaluate(solution)
    }

    fn on_insert(
        &mut self,
        solution: &Schedule,
        entity_index: usize,
        descriptor_index: usize,
    ) -> HardMediumSoftScore {
        match self.target(entity_index, descriptor_index) {
            Some(t) => self.score_of(solution, t),
            None => HardMediumSoftScore::ZERO,
        }
    }

    fn on_retract(
        &mut self,
        solution: &Schedule,
        entity_index: usize,
        descriptor_index: usize,
    ) -> HardMediumSoftScore {
        match self.target(entity_index, descriptor_index) {
            Some(t) => -self.score_of(solution, t),
            None => HardMediumSoftScore::ZERO,
        }
    }

    fn reset(&mut self) {}

    fn name(&self) -> &str {
        &self.constraint_ref.name
    }

    fn is_hard(&self) -> bool {
        self.level == ScoreLevel::Hard
    }

    fn constraint_ref(&self) -> ConstraintRef {
        self.constraint_ref.clone()
    }

    fn weight(&self) -> HardMediumSoftScore {
        self.weight
    }
}
