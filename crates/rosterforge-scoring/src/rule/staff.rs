//! Rules grouped by staff member.
//!
//! A slot joins the group of its assigned staff member and, for 1:1
//! administrative slots, the group of its designated staff member as well. A
//! closing responsibility joins the group of its assigned staff member. Each
//! group's tally is cached; a change to one entity only re-aggregates the
//! groups the entity left or joined.

use smallvec::SmallVec;

use rosterforge_core::{
    ConstraintRef, EntityTarget, HardMediumSoftScore, ImpactType, Schedule, Score, ScoreLevel,
};

use super::level_of;
use crate::api::constraint_set::IncrementalConstraint;

type Keys = SmallVec<[usize; 2]>;

/// Aggregated result of a rule over one group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub matches: usize,
    /// Weight units; the rule's score is `weight * units`.
    pub units: i64,
}

impl Tally {
    pub const NONE: Tally = Tally { matches: 0, units: 0 };

    pub fn new(matches: usize, units: i64) -> Self {
        Self { matches, units }
    }

    /// `n` matches worth one unit each.
    pub fn count(n: usize) -> Self {
        Self::new(n, n as i64)
    }

    /// A single match worth `units`, or nothing when `units` is zero.
    pub fn single(units: i64) -> Self {
        if units == 0 {
            Self::NONE
        } else {
            Self::new(1, units)
        }
    }
}

/// Entities currently grouped under one staff member.
#[derive(Debug, Clone, Copy)]
pub struct StaffGroup<'a> {
    pub staff: usize,
    pub slots: &'a [usize],
    pub closings: &'a [usize],
}

impl<'a> StaffGroup<'a> {
    /// Slots actually assigned to this staff member.
    pub fn assigned_slots(self, schedule: &'a Schedule) -> impl Iterator<Item = usize> + 'a {
        let staff = self.staff;
        self.slots
            .iter()
            .copied()
            .filter(move |&i| schedule.slots[i].staff == Some(staff))
    }

    /// Assigned slots of clinical (non-fallback) requirements.
    pub fn work_slots(self, schedule: &'a Schedule) -> impl Iterator<Item = usize> + 'a {
        self.assigned_slots(schedule)
            .filter(move |&i| !schedule.shift_of(i).is_fallback())
    }

    /// Administrative slots reserved for this staff member.
    pub fn designated_slots(self, schedule: &'a Schedule) -> impl Iterator<Item = usize> + 'a {
        let staff = self.staff;
        self.slots
            .iter()
            .copied()
            .filter(move |&i| schedule.shift_of(i).designated_staff == Some(staff))
    }
}

/// Aggregates one staff member's group into a tally.
pub type GroupAggregator = fn(&Schedule, StaffGroup<'_>) -> Tally;

fn slot_keys(schedule: &Schedule, slot: usize) -> Keys {
    let mut keys = Keys::new();
    if let Some(staff) = schedule.slots[slot].staff {
        keys.push(staff);
    }
    if let Some(designated) = schedule.shift_of(slot).designated_staff {
        if !keys.contains(&designated) {
            keys.push(designated);
        }
    }
    keys
}

/// Membership of entities in staff groups.
#[derive(Debug, Clone, Default)]
struct GroupIndex {
    slots: Vec<Vec<usize>>,
    closings: Vec<Vec<usize>>,
    slot_keys: Vec<Keys>,
    closing_keys: Vec<Option<usize>>,
}

impl GroupIndex {
    fn sized_for(schedule: &Schedule) -> Self {
        Self {
            slots: vec![Vec::new(); schedule.staff.len()],
            closings: vec![Vec::new(); schedule.staff.len()],
            slot_keys: vec![Keys::new(); schedule.slots.len()],
            closing_keys: vec![None; schedule.closings.len()],
        }
    }

    fn build(schedule: &Schedule) -> Self {
        let mut index = Self::sized_for(schedule);
        for target in schedule.entity_targets() {
            index.insert(schedule, target);
        }
        index
    }

    fn fits(&self, schedule: &Schedule) -> bool {
        self.slots.len() == schedule.staff.len()
            && self.slot_keys.len() == schedule.slots.len()
            && self.closing_keys.len() == schedule.closings.len()
    }

    fn insert(&mut self, schedule: &Schedule, target: EntityTarget) -> Keys {
        match target {
            EntityTarget::Slot(i) => {
                let keys = slot_keys(schedule, i);
                for &k in &keys {
                    self.slots[k].push(i);
                }
                self.slot_keys[i] = keys.clone();
                keys
            }
            EntityTarget::Closing(i) => {
                let key = schedule.closings[i].staff;
                if let Some(k) = key {
                    self.closings[k].push(i);
                }
                self.closing_keys[i] = key;
                key.into_iter().collect()
            }
        }
    }

    fn retract(&mut self, target: EntityTarget) -> Keys {
        match target {
            EntityTarget::Slot(i) => {
                let keys = std::mem::take(&mut self.slot_keys[i]);
                for &k in &keys {
                    remove_member(&mut self.slots[k], i);
                }
                keys
            }
            EntityTarget::Closing(i) => {
                let key = self.closing_keys[i].take();
                if let Some(k) = key {
                    remove_member(&mut self.closings[k], i);
                }
                key.into_iter().collect()
            }
        }
    }

    fn group(&self, staff: usize) -> StaffGroup<'_> {
        StaffGroup {
            staff,
            slots: &self.slots[staff],
            closings: &self.closings[staff],
        }
    }
}

fn remove_member(members: &mut Vec<usize>, entity: usize) {
    if let Some(pos) = members.iter().position(|&e| e == entity) {
        members.swap_remove(pos);
    }
}

/// Rule aggregating over each staff member's group.
pub struct StaffRule {
    constraint_ref: ConstraintRef,
    impact: ImpactType,
    weight: HardMediumSoftScore,
    level: ScoreLevel,
    aggregator: GroupAggregator,
    index: GroupIndex,
    tallies: Vec<Tally>,
    // Groups whose tally was withdrawn and must be re-aggregated on insert.
    pending: SmallVec<[usize; 4]>,
}

impl StaffRule {
    pub fn new(
        name: &str,
        impact: ImpactType,
        weight: HardMediumSoftScore,
        aggregator: GroupAggregator,
    ) -> Self {
        Self {
            constraint_ref: ConstraintRef::new("", name),
            impact,
            weight,
            level: level_of(weight),
            aggregator,
            index: GroupIndex::default(),
            tallies: Vec::new(),
            pending: SmallVec::new(),
        }
    }

    pub fn penalize(name: &str, weight: HardMediumSoftScore, aggregator: GroupAggregator) -> Self {
        Self::new(name, ImpactType::Penalty, weight, aggregator)
    }

    pub fn reward(name: &str, weight: HardMediumSoftScore, aggregator: GroupAggregator) -> Self {
        Self::new(name, ImpactType::Reward, weight, aggregator)
    }

    pub fn with_level(mut self, level: ScoreLevel) -> Self {
        self.level = level;
        self
    }

    /// Replaces the weight; the level is left alone.
    pub fn set_weight(&mut self, weight: HardMediumSoftScore) {
        self.weight = weight;
    }

    pub fn level(&self) -> ScoreLevel {
        self.level
    }

    #[inline]
    fn score_of(&self, tally: Tally) -> HardMediumSoftScore {
        if tally.units == 0 {
            return HardMediumSoftScore::ZERO;
        }
        self.weight.scaled(self.impact.signed(tally.units))
    }

    fn tallies_from_scratch(&self, schedule: &Schedule) -> Vec<Tally> {
        let index = GroupIndex::build(schedule);
        (0..schedule.staff.len())
            .map(|k| (self.aggregator)(schedule, index.group(k)))
            .collect()
    }

    // Withdraws a group's cached tally until the next flush.
    fn withdraw(&mut self, staff: usize) -> HardMediumSoftScore {
        if self.pending.contains(&staff) {
            return HardMediumSoftScore::ZERO;
        }
        self.pending.push(staff);
        let tally = std::mem::take(&mut self.tallies[staff]);
        -self.score_of(tally)
    }
}

impl std::fmt::Debug for StaffRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaffRule")
            .field("name", &self.constraint_ref.name)
            .field("impact", &self.impact)
            .field("weight", &self.weight)
            .finish()
    }
}

impl IncrementalConstraint<Schedule, HardMediumSoftScore> for StaffRule {
    fn evaluate(&self, solution: &Schedule) -> HardMediumSoftScore {
        self.tallies_from_scratch(solution)
            .into_iter()
            .fold(HardMediumSoftScore::ZERO, |total, t| total + self.score_of(t))
    }

    fn match_count(&self, solution: &Schedule) -> usize {
        self.tallies_from_scratch(solution)
            .iter()
            .map(|t| t.matches)
            .sum()
    }

    fn initialize(&mut self, solution: &Schedule) -> HardMediumSoftScore {
        self.index = GroupIndex::build(solution);
        self.tallies = (0..solution.staff.len())
            .map(|k| (self.aggregator)(solution, self.index.group(k)))
            .collect();
        self.pending.clear();
        self.tallies
            .iter()
            .fold(HardMediumSoftScore::ZERO, |total, t| total + self.score_of(*t))
    }

    fn on_insert(
        &mut self,
        solution: &Schedule,
        entity_index: usize,
        descriptor_index: usize,
    ) -> HardMediumSoftScore {
        let Some(target) = EntityTarget::from_descriptor(descriptor_index, entity_index) else {
            return HardMediumSoftScore::ZERO;
        };
        if !self.index.fits(solution) {
            // not initialized for this schedule
            return HardMediumSoftScore::ZERO;
        }

        let mut delta = HardMediumSoftScore::ZERO;
        for k in self.index.insert(solution, target) {
            delta = delta + self.withdraw(k);
        }
        let pending = std::mem::take(&mut self.pending);
        for &k in &pending {
            let tally = (self.aggregator)(solution, self.index.group(k));
            self.tallies[k] = tally;
            delta = delta + self.score_of(tally);
        }
        delta
    }

    fn on_retract(
        &mut self,
        solution: &Schedule,
        entity_index: usize,
        descriptor_index: usize,
    ) -> HardMediumSoftScore {
        let Some(target) = EntityTarget::from_descriptor(descriptor_index, entity_index) else {
            return HardMediumSoftScore::ZERO;
        };
        if !self.index.fits(solution) {
            // not initialized for this schedule
            return HardMediumSoftScore::ZERO;
        }

        let mut delta = HardMediumSoftScore::ZERO;
        for k in self.index.retract(target) {
            delta = delta + self.withdraw(k);
        }
        delta
    }

    fn reset(&mut self) {
        self.index = GroupIndex::default();
        self.tallies.clear();
        self.pending.clear();
    }

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
