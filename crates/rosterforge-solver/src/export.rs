//! Reportable output of a solved schedule.
//!
//! Administrative and rest slots are operational fallbacks; they never
//! appear in exported assignments.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use rosterforge_core::{ClosingTier, HardMediumSoftScore, NeedType, Period, Schedule};
use rosterforge_scoring::director::shadow;

/// One persisted assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum AssignmentRecord {
    Coverage {
        staff: Uuid,
        shift: Uuid,
        date: NaiveDate,
        period: Period,
        need: NeedType,
    },
    Closing {
        staff: Uuid,
        location: Uuid,
        date: NaiveDate,
        tier: ClosingTier,
    },
}

impl AssignmentRecord {
    pub fn staff(&self) -> Uuid {
        match self {
            AssignmentRecord::Coverage { staff, .. } | AssignmentRecord::Closing { staff, .. } => {
                *staff
            }
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            AssignmentRecord::Coverage { date, .. } | AssignmentRecord::Closing { date, .. } => *date,
        }
    }
}

/// Assigned clinical slots in slot order, then assigned closing
/// responsibilities.
pub fn export_assignments(schedule: &Schedule) -> Vec<AssignmentRecord> {
    let coverage = schedule.slots.iter().enumerate().filter_map(|(i, slot)| {
        let staff = slot.staff?;
        let shift = schedule.shift_of(i);
        if shift.is_fallback() {
            return None;
        }
        Some(AssignmentRecord::Coverage {
            staff: schedule.staff[staff].id,
            shift: shift.id,
            date: shift.date,
            period: shift.period,
            need: shift.need,
        })
    });
    let closings = schedule.closings.iter().filter_map(|closing| {
        let staff = closing.staff?;
        Some(AssignmentRecord::Closing {
            staff: schedule.staff[staff].id,
            location: closing.location,
            date: closing.date,
            tier: closing.tier,
        })
    });
    coverage.chain(closings).collect()
}

/// Filled and empty positions of one kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coverage {
    pub total: usize,
    pub assigned: usize,
}

impl Coverage {
    pub fn uncovered(&self) -> usize {
        self.total - self.assigned
    }

    fn count(&mut self, assigned: bool) {
        self.total += 1;
        if assigned {
            self.assigned += 1;
        }
    }
}

/// Worked days of a flexible staff member against their weekly target.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FlexibleWorkload {
    pub staff: Uuid,
    pub name: String,
    pub work_days: u32,
    pub target: Option<u32>,
}

/// Aggregate view of a schedule for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleSummary {
    pub slots: BTreeMap<NeedType, Coverage>,
    pub closings: BTreeMap<ClosingTier, Coverage>,
    pub flexible: Vec<FlexibleWorkload>,
    pub score: Option<HardMediumSoftScore>,
}

impl ScheduleSummary {
    /// Uncovered clinical slots.
    pub fn uncovered_clinical(&self) -> usize {
        self.slots
            .iter()
            .filter(|(need, _)| !need.is_fallback())
            .map(|(_, c)| c.uncovered())
            .sum()
    }
}

pub fn summarize(schedule: &Schedule) -> ScheduleSummary {
    let mut slots: BTreeMap<NeedType, Coverage> = BTreeMap::new();
    for (i, slot) in schedule.slots.iter().enumerate() {
        slots
            .entry(schedule.shift_of(i).need)
            .or_default()
            .count(slot.is_assigned());
    }

    let mut closings: BTreeMap<ClosingTier, Coverage> = BTreeMap::new();
    for closing in &schedule.closings {
        closings
            .entry(closing.tier)
            .or_default()
            .count(closing.staff.is_some());
    }

    let by_staff = shadow::slots_by_staff(schedule);
    let flexible = schedule
        .staff
        .iter()
        .enumerate()
        .filter(|(_, member)| member.flexible)
        .map(|(idx, member)| FlexibleWorkload {
            staff: member.id,
            name: member.name.clone(),
            work_days: shadow::work_day_count(schedule, &by_staff[idx]),
            target: member.days_per_week,
        })
        .collect();

    ScheduleSummary {
        slots,
        closings,
        flexible,
        score: schedule.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rosterforge_core::EntityTarget;
    use rosterforge_scoring::ScheduleDirector;
    use rosterforge_test::small_clinic;

    fn assign(schedule: Schedule, changes: &[(EntityTarget, usize)]) -> Schedule {
        let mut director = ScheduleDirector::with_default_rules(schedule);
        for &(target, staff) in changes {
            director.change(target, Some(staff));
        }
        director.take_solution()
    }

    fn first_admin_slot(schedule: &Schedule) -> usize {
        (0..schedule.slots.len())
            .find(|&i| schedule.shift_of(i).is_admin())
            .unwrap()
    }

    #[test]
    fn test_export_skips_fallback_and_unassigned() {
        let (schedule, _) = small_clinic();
        let admin = first_admin_slot(&schedule);
        let designated = schedule.shift_of(admin).designated_staff.unwrap();
        let solved = assign(
            schedule,
            &[
                (EntityTarget::Slot(0), 0),
                (EntityTarget::Slot(2), 2),
                (EntityTarget::Slot(admin), designated),
                (EntityTarget::Closing(0), 1),
            ],
        );

        let records = export_assignments(&solved);
        assert_eq!(records.len(), 3);
        assert!(matches!(
            records[0],
            AssignmentRecord::Coverage { need: NeedType::Surgical, period: Period::Morning, .. }
        ));
        assert_eq!(records[0].staff(), solved.staff[0].id);
        assert!(matches!(
            records[1],
            AssignmentRecord::Coverage { need: NeedType::Consultation, .. }
        ));
        assert!(matches!(records[2], AssignmentRecord::Closing { .. }));
        assert_eq!(records[2].staff(), solved.staff[1].id);
        assert_eq!(records[2].date(), solved.closings[0].date);
    }

    #[test]
    fn test_summary_counts() {
        let (schedule, _) = small_clinic();
        // Elena is the flexible member; slots 2 and 10 are Monday and
        // Tuesday morning consultations
        let solved = assign(
            schedule,
            &[
                (EntityTarget::Slot(0), 0),
                (EntityTarget::Slot(2), 4),
                (EntityTarget::Slot(10), 4),
                (EntityTarget::Closing(1), 1),
            ],
        );
        let summary = summarize(&solved);

        let surgical = summary.slots[&NeedType::Surgical];
        assert_eq!(surgical, Coverage { total: 20, assigned: 1 });
        assert_eq!(summary.slots[&NeedType::Consultation].total, 20);
        assert_eq!(summary.slots[&NeedType::Consultation].assigned, 2);
        assert_eq!(summary.slots[&NeedType::Admin].uncovered(), 40);
        assert_eq!(summary.uncovered_clinical(), 19 + 18);

        let assigned_closings: usize = summary.closings.values().map(|c| c.assigned).sum();
        assert_eq!(assigned_closings, 1);
        assert_eq!(summary.closings.values().map(|c| c.total).sum::<usize>(), 10);

        assert_eq!(summary.flexible.len(), 1);
        assert_eq!(summary.flexible[0].name, "Elena");
        assert_eq!(summary.flexible[0].work_days, 2);
        assert_eq!(summary.flexible[0].target, Some(3));
        assert!(summary.score.is_some());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_records_serialize_with_kind_tag() {
        let (schedule, _) = small_clinic();
        let solved = assign(schedule, &[(EntityTarget::Slot(0), 0), (EntityTarget::Closing(0), 0)]);
        let yaml = serde_yaml::to_string(&export_assignments(&solved)).unwrap();

        assert!(yaml.contains("kind: coverage"));
        assert!(yaml.contains("kind: closing"));
        assert!(yaml.contains("need: surgical"));
        let back: Vec<AssignmentRecord> = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, export_assignments(&solved));
    }
}
