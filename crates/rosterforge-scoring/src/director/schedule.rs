//! `ScheduleDirector` - incremental scoring with derived-attribute upkeep.

use smallvec::SmallVec;
use tracing::debug;

use rosterforge_core::{EntityTarget, HardMediumSoftScore, RosterForgeError, Schedule};

use super::shadow;
use crate::api::analysis::ScoreExplanation;
use crate::api::constraint_set::{ConstraintResult, ConstraintSet};
use crate::constraints::default_rules;
use crate::rule::RuleTable;

/// Incremental score director for a `Schedule`.
///
/// # Example
///
/// ```
/// use rosterforge_core::{EntityTarget, HardMediumSoftScore, NeedType, Period, Schedule, Shift};
/// use rosterforge_scoring::ScheduleDirector;
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let shift = Shift::new(Uuid::from_u128(1), date, Period::Morning, NeedType::Consultation);
/// let schedule = Schedule::new(vec![], vec![], vec![], vec![], vec![shift]);
///
/// let mut director = ScheduleDirector::with_default_rules(schedule);
/// // One uncovered consultation slot
/// assert_eq!(director.calculate_score(), HardMediumSoftScore::of_medium(-10_000));
/// ```
pub struct ScheduleDirector {
    working_solution: Schedule,
    rules: RuleTable,
    cached_score: HardMediumSoftScore,
    initialized: bool,
    slots_by_staff: Vec<Vec<usize>>,
    // Target and previous staff of the change in progress.
    retracted: Option<(EntityTarget, Option<usize>)>,
    shadow_writes: u64,
}

impl ScheduleDirector {
    pub fn new(schedule: Schedule, rules: RuleTable) -> Self {
        Self {
            working_solution: schedule,
            rules,
            cached_score: HardMediumSoftScore::ZERO,
            initialized: false,
            slots_by_staff: Vec::new(),
            retracted: None,
            shadow_writes: 0,
        }
    }

    pub fn with_default_rules(schedule: Schedule) -> Self {
        Self::new(schedule, default_rules())
    }

    #[inline]
    pub fn working_solution(&self) -> &Schedule {
        &self.working_solution
    }

    /// Returns the current score, initializing on first call.
    ///
    /// Initialization recomputes every derived attribute and then scores the
    /// schedule from scratch; afterwards the score is maintained
    /// incrementally and this call is O(1).
    pub fn calculate_score(&mut self) -> HardMediumSoftScore {
        if !self.initialized {
            self.slots_by_staff = shadow::slots_by_staff(&self.working_solution);
            for i in 0..self.working_solution.slots.len() {
                let (days, full_day) =
                    shadow::expected_attributes(&self.working_solution, &self.slots_by_staff, i);
                let slot = &mut self.working_solution.slots[i];
                slot.work_day_count = days;
                slot.full_day_worked = full_day;
            }
            self.cached_score = self.rules.initialize_all(&self.working_solution);
            self.initialized = true;
            debug!(
                event = "director_initialized",
                score = %self.cached_score,
                rules = self.rules.len(),
                entities = self.working_solution.entity_count(),
            );
        }
        self.cached_score
    }

    /// Must be called before changing the planning variable of `target`.
    pub fn before_variable_changed(&mut self, target: EntityTarget) {
        if !self.initialized {
            return;
        }
        self.retracted = Some((target, self.working_solution.assigned(target)));
        let delta = self.rules.on_retract_all(
            &self.working_solution,
            target.entity_index(),
            target.descriptor_index(),
        );
        self.cached_score = self.cached_score + delta;
    }

    /// Must be called after changing the planning variable of `target`.
    ///
    /// Re-inserts the entity into every rule, then refreshes the derived
    /// attributes of the previous and the new staff member's slots.
    pub fn after_variable_changed(&mut self, target: EntityTarget) {
        if !self.initialized {
            return;
        }
        let delta = self.rules.on_insert_all(
            &self.working_solution,
            target.entity_index(),
            target.descriptor_index(),
        );
        self.cached_score = self.cached_score + delta;

        let EntityTarget::Slot(slot) = target else {
            self.retracted = None;
            return;
        };
        let previous = match self.retracted.take() {
            Some((t, previous)) if t == target => previous,
            _ => self
                .slots_by_staff
                .iter()
                .position(|members| members.contains(&slot)),
        };
        let current = self.working_solution.slots[slot].staff;
        if previous == current {
            return;
        }

        if let Some(p) = previous {
            if let Some(pos) = self.slots_by_staff[p].iter().position(|&s| s == slot) {
                self.slots_by_staff[p].swap_remove(pos);
            }
        }
        if let Some(c) = current {
            self.slots_by_staff[c].push(slot);
        }

        if current.is_none() {
            self.refresh_attributes(slot);
        }
        for staff in [previous, current].into_iter().flatten() {
            let members: SmallVec<[usize; 16]> =
                self.slots_by_staff[staff].iter().copied().collect();
            for member in members {
                self.refresh_attributes(member);
            }
        }
    }

    // Rewrites whichever derived attribute of `slot` is stale, reporting the
    // write to the rules as a change of that slot.
    fn refresh_attributes(&mut self, slot: usize) {
        let (days, full_day) =
            shadow::expected_attributes(&self.working_solution, &self.slots_by_staff, slot);
        let current = &self.working_solution.slots[slot];
        if current.work_day_count == days && current.full_day_worked == full_day {
            return;
        }

        let delta = self.rules.on_retract_all(
            &self.working_solution,
            slot,
            EntityTarget::SLOT_DESCRIPTOR,
        );
        self.cached_score = self.cached_score + delta;

        let current = &mut self.working_solution.slots[slot];
        if current.work_day_count != days {
            current.work_day_count = days;
        }
        if current.full_day_worked != full_day {
            current.full_day_worked = full_day;
        }
        self.shadow_writes += 1;

        let delta = self.rules.on_insert_all(
            &self.working_solution,
            slot,
            EntityTarget::SLOT_DESCRIPTOR,
        );
        self.cached_score = self.cached_score + delta;
    }

    /// Assigns `staff` to `target` through the full change protocol and
    /// returns the new score.
    pub fn change(&mut self, target: EntityTarget, staff: Option<usize>) -> HardMediumSoftScore {
        self.calculate_score();
        self.before_variable_changed(target);
        self.working_solution.set_assigned(target, staff);
        self.after_variable_changed(target);
        self.cached_score
    }

    /// Returns the cached score without recalculation.
    #[inline]
    pub fn get_score(&self) -> HardMediumSoftScore {
        self.cached_score
    }

    /// Scores the working schedule from scratch, ignoring all caches.
    pub fn full_score(&self) -> HardMediumSoftScore {
        self.rules.evaluate_all(&self.working_solution)
    }

    /// Per-rule contributions, in rule table order.
    pub fn constraint_results(&self) -> Vec<ConstraintResult<HardMediumSoftScore>> {
        self.rules.evaluate_each(&self.working_solution)
    }

    pub fn explain(&self) -> ScoreExplanation<HardMediumSoftScore> {
        self.rules.explain(&self.working_solution)
    }

    /// Checks the caches against a from-scratch recomputation.
    pub fn verify(&self) -> Result<(), RosterForgeError> {
        if !self.initialized {
            return Ok(());
        }
        let by_staff = shadow::slots_by_staff(&self.working_solution);
        for (i, slot) in self.working_solution.slots.iter().enumerate() {
            let expected = shadow::expected_attributes(&self.working_solution, &by_staff, i);
            if (slot.work_day_count, slot.full_day_worked) != expected {
                return Err(RosterForgeError::Internal(format!(
                    "slot {} has derived attributes ({}, {}), expected ({}, {})",
                    i, slot.work_day_count, slot.full_day_worked, expected.0, expected.1
                )));
            }
        }
        let full = self.full_score();
        if full != self.cached_score {
            return Err(RosterForgeError::Internal(format!(
                "incremental score {} differs from full score {}",
                self.cached_score, full
            )));
        }
        Ok(())
    }

    /// Panics if the caches have drifted from the assignment state.
    pub fn assert_consistent(&self) {
        if let Err(e) = self.verify() {
            panic!("score director corrupted: {}", e);
        }
    }

    /// Drops all incremental state; the next `calculate_score` starts over.
    pub fn reset(&mut self) {
        self.rules.reset_all();
        self.initialized = false;
        self.retracted = None;
        self.slots_by_staff.clear();
        self.cached_score = HardMediumSoftScore::ZERO;
    }

    /// Replaces the working schedule, e.g. to restore a best solution.
    pub fn replace_solution(&mut self, schedule: Schedule) -> HardMediumSoftScore {
        self.working_solution = schedule;
        self.reset();
        self.calculate_score()
    }

    /// Clones the working schedule with its score filled in.
    pub fn clone_working_solution(&self) -> Schedule {
        let mut schedule = self.working_solution.clone();
        if self.initialized {
            schedule.score = Some(self.cached_score);
        }
        schedule
    }

    /// Consumes the director and returns the working schedule with its score.
    pub fn take_solution(self) -> Schedule {
        let mut schedule = self.working_solution;
        if self.initialized {
            schedule.score = Some(self.cached_score);
        }
        schedule
    }

    /// Slots currently assigned to `staff`.
    pub fn staff_slots(&self, staff: usize) -> &[usize] {
        self.slots_by_staff
            .get(staff)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of derived-attribute writes since creation.
    pub fn shadow_writes(&self) -> u64 {
        self.shadow_writes
    }
}

impl std::fmt::Debug for ScheduleDirector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleDirector")
            .field("initialized", &self.initialized)
            .field("cached_score", &self.cached_score)
            .field("rule_count", &self.rules.len())
            .finish()
    }
}
