//! Difficulty order for construction.

use chrono::NaiveDate;

use rosterforge_core::{EntityTarget, Period, Schedule};

use crate::heuristic::CandidateRanges;

/// Coarse entity class, visited in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntityClass {
    /// Consultation or surgical slot.
    Clinical,
    /// Administrative or rest slot.
    Fallback,
    Closing,
}

/// Sort key of one entity. Smaller keys are harder and go first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DifficultyKey {
    pub class: EntityClass,
    /// Some candidate is a flexible staff member.
    pub flexible: bool,
    pub date: NaiveDate,
    pub period_rank: u8,
    pub candidates: usize,
    pub index: usize,
}

pub fn difficulty_key(
    schedule: &Schedule,
    ranges: &CandidateRanges,
    target: EntityTarget,
) -> DifficultyKey {
    let candidates = ranges.of(target);
    let flexible = candidates.iter().any(|&s| schedule.staff[s].flexible);
    let (class, period) = match target {
        EntityTarget::Slot(i) => {
            let shift = schedule.shift_of(i);
            let class = if shift.is_fallback() {
                EntityClass::Fallback
            } else {
                EntityClass::Clinical
            };
            (class, shift.period)
        }
        EntityTarget::Closing(_) => (EntityClass::Closing, Period::FullDay),
    };

    DifficultyKey {
        class,
        flexible,
        date: schedule.date_of(target),
        period_rank: period.rank(),
        candidates: candidates.len(),
        index: target.entity_index(),
    }
}

/// Unassigned entities in construction order.
///
/// Clinical slots come first, then administrative and rest slots, then
/// closing responsibilities. Within a class, entities without flexible
/// candidates precede the others; ties fall to date, period (full day,
/// morning, afternoon) and the number of eligible staff, fewest first.
pub fn construction_order(schedule: &Schedule, ranges: &CandidateRanges) -> Vec<EntityTarget> {
    let mut keyed: Vec<(DifficultyKey, EntityTarget)> = schedule
        .entity_targets()
        .filter(|&t| schedule.assigned(t).is_none())
        .map(|t| (difficulty_key(schedule, ranges, t), t))
        .collect();
    keyed.sort_unstable_by(|a, b| a.0.cmp(&b.0));
    keyed.into_iter().map(|(_, t)| t).collect()
}
