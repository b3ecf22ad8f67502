//! Companion changes on designated administrative slots.
//!
//! A staff member with a designated administrative slot is expected to be
//! either on clinical work or on that slot for the half-day. When a move
//! hands a clinical slot from one staff member to another, the old holder
//! may become idle and the new one may end up double booked; the companion
//! changes computed here fill or release their administrative slots so the
//! move lands on a consistent state in one step.

use smallvec::SmallVec;

use rosterforge_scoring::ScheduleDirector;

use super::ranges::CandidateRanges;

/// One administrative slot change carried along with a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackChange {
    pub slot: usize,
    pub from: Option<usize>,
    pub to: Option<usize>,
}

pub type FallbackChanges = SmallVec<[FallbackChange; 4]>;

/// A pending change of one slot's staff, as `(slot, from, to)`.
pub type SlotChange = (usize, Option<usize>, Option<usize>);

/// Computes the administrative slot changes that follow `primary`.
///
/// For every staff member leaving or joining a clinical slot, each of their
/// designated administrative slots overlapping that slot's half-days is set
/// to them if they are left without clinical work there, and cleared
/// otherwise. Slots already holding the wanted value yield no change.
pub fn fallback_changes(
    director: &ScheduleDirector,
    ranges: &CandidateRanges,
    primary: &[SlotChange],
) -> FallbackChanges {
    let schedule = director.working_solution();
    let mut changes = FallbackChanges::new();

    for &(slot, from, to) in primary {
        let shift = schedule.shift_of(slot);
        if shift.is_fallback() {
            continue;
        }
        for staff in [from, to].into_iter().flatten() {
            for &admin in ranges.fallback_slots(staff) {
                let admin_shift = schedule.shift_of(admin);
                if admin_shift.date != shift.date || !admin_shift.period.overlaps(shift.period) {
                    continue;
                }
                if primary.iter().any(|c| c.0 == admin) || changes.iter().any(|c| c.slot == admin) {
                    continue;
                }
                let current = schedule.slots[admin].staff;
                let wanted = if has_clinical_work_after(director, primary, staff, admin) {
                    None
                } else {
                    Some(staff)
                };
                if current != wanted {
                    changes.push(FallbackChange {
                        slot: admin,
                        from: current,
                        to: wanted,
                    });
                }
            }
        }
    }
    changes
}

// Whether `staff` holds a clinical slot overlapping administrative slot
// `admin` once `primary` is applied.
fn has_clinical_work_after(
    director: &ScheduleDirector,
    primary: &[SlotChange],
    staff: usize,
    admin: usize,
) -> bool {
    let schedule = director.working_solution();
    let admin_shift = schedule.shift_of(admin);
    let overlaps = |slot: usize| {
        let shift = schedule.shift_of(slot);
        !shift.is_fallback()
            && shift.date == admin_shift.date
            && shift.period.overlaps(admin_shift.period)
    };
    let holds_after = |slot: usize| match primary.iter().find(|c| c.0 == slot) {
        Some(&(_, _, to)) => to == Some(staff),
        None => true,
    };

    director
        .staff_slots(staff)
        .iter()
        .copied()
        .any(|slot| overlaps(slot) && holds_after(slot))
        || primary
            .iter()
            .any(|&(slot, _, to)| to == Some(staff) && overlaps(slot))
}
