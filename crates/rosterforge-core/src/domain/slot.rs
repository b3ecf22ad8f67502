//! Planning entities: coverage slots and closing responsibilities.

use chrono::NaiveDate;
use uuid::Uuid;

use super::ClosingTier;

/// One unit of coverage for a `Shift` (planning entity).
///
/// `staff` is the planning variable; `None` means uncovered.
/// `work_day_count` and `full_day_worked` are derived from the assignment
/// state and only written by the score director.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShiftSlot {
    /// Index of the requirement in `Schedule::shifts`.
    pub shift: usize,
    /// Position among the sibling slots of the same requirement.
    pub index: u32,
    pub staff: Option<usize>,
    /// Distinct dates on which the assigned staff has non-fallback coverage.
    pub work_day_count: u32,
    /// Whether the assigned staff covers both half-days of this slot's date.
    pub full_day_worked: bool,
}

impl ShiftSlot {
    pub fn new(shift: usize, index: u32) -> Self {
        Self {
            shift,
            index,
            staff: None,
            work_day_count: 0,
            full_day_worked: false,
        }
    }

    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.staff.is_some()
    }
}

/// End-of-day responsibility at a location on a date (planning entity).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosingResponsibility {
    pub location: Uuid,
    pub site: Option<Uuid>,
    pub date: NaiveDate,
    pub tier: ClosingTier,
    pub staff: Option<usize>,
}

impl ClosingResponsibility {
    pub fn new(location: Uuid, site: Option<Uuid>, date: NaiveDate, tier: ClosingTier) -> Self {
        Self {
            location,
            site,
            date,
            tier,
            staff: None,
        }
    }
}
