//! Turns requirements into planning entities.
//!
//! Data loaders call these once per planning run. Capacity becomes
//! structural: a requirement for N units yields N independent slots.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use uuid::Uuid;

use super::{ClosingResponsibility, ClosingTier, Location, NeedType, Period, Shift, ShiftSlot, Staff};

/// One slot per unit of quantity. Fallback requirements yield a single slot
/// whatever quantity they nominally carry.
pub fn expand_slots(shifts: &[Shift]) -> Vec<ShiftSlot> {
    let mut slots = Vec::new();
    for (shift_idx, shift) in shifts.iter().enumerate() {
        let units = if shift.is_fallback() {
            1
        } else {
            shift.quantity.max(0) as u32
        };
        slots.extend((0..units).map(|unit| ShiftSlot::new(shift_idx, unit)));
    }
    slots
}

/// Administrative fallback requirements: one per non-flexible staff member,
/// per weekday date in `start..=end`, per half-day the member is available.
///
/// Each requirement designates its staff member, so its slot accepts nobody
/// else. Flexible staff get none; their idle days are implicit rest.
pub fn admin_shifts(staff: &[Staff], start: NaiveDate, end: NaiveDate) -> Vec<Shift> {
    let mut shifts = Vec::new();
    for date in start.iter_days().take_while(|d| *d <= end) {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            continue;
        }
        for period in Period::HALVES {
            for (idx, member) in staff.iter().enumerate() {
                if member.flexible || !member.is_available_on(date, period) {
                    continue;
                }
                shifts.push(Shift::new(Uuid::new_v4(), date, period, NeedType::Admin).designated(idx));
            }
        }
    }
    shifts
}

#[derive(Default)]
struct LocationDay {
    site: Option<Uuid>,
    morning: i64,
    afternoon: i64,
    has_morning: bool,
    has_afternoon: bool,
    tiers: [bool; 3],
}

/// Closing responsibilities per (location, date).
///
/// A location-day qualifies when its clinical requirements carry the closing
/// flag, cover both half-days, and need more than one person in at least one
/// half-day. One responsibility is created per tier any of those
/// requirements asks for.
pub fn closing_responsibilities(
    shifts: &[Shift],
    locations: &[Location],
) -> Vec<ClosingResponsibility> {
    let mut days: BTreeMap<(NaiveDate, Uuid), LocationDay> = BTreeMap::new();

    for shift in shifts {
        let Some(location) = shift.location else {
            continue;
        };
        if !shift.closing.has_closing || shift.is_fallback() {
            continue;
        }

        let day = days.entry((shift.date, location)).or_default();
        if day.site.is_none() {
            day.site = locations
                .iter()
                .find(|l| l.id == location)
                .map(|l| l.site)
                .or(shift.site);
        }
        let quantity = i64::from(shift.quantity);
        if shift.period.covers(Period::Morning) {
            day.has_morning = true;
            day.morning += quantity;
        }
        if shift.period.covers(Period::Afternoon) {
            day.has_afternoon = true;
            day.afternoon += quantity;
        }
        day.tiers[0] |= shift.closing.needs_first;
        day.tiers[1] |= shift.closing.needs_second;
        day.tiers[2] |= shift.closing.needs_third;
    }

    let mut closings = Vec::new();
    for ((date, location), day) in days {
        if !day.has_morning || !day.has_afternoon {
            continue;
        }
        if day.morning <= 1 && day.afternoon <= 1 {
            continue;
        }
        for (tier, wanted) in ClosingTier::ALL.into_iter().zip(day.tiers) {
            if wanted {
                closings.push(ClosingResponsibility::new(location, day.site, date, tier));
            }
        }
    }
    closings
}
