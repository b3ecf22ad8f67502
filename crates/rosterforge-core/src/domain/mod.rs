//! Scheduling domain model.
//!
//! Facts (`Staff`, `Shift`, `Site`, `Location`, `Skill`) are loaded once per
//! planning run and never mutated. Planning entities (`ShiftSlot`,
//! `ClosingResponsibility`) are materialized from the facts; during search
//! only their assigned-staff field changes, and the derived attributes on
//! `ShiftSlot` are rewritten by the score director.

mod calendar;
pub mod materialize;
mod schedule;
mod shift;
mod slot;
mod staff;
mod validate;

#[cfg(test)]
mod tests;

pub use calendar::{ClosingTier, NeedType, Period};
pub use schedule::{EntityTarget, Schedule};
pub use shift::{ClosingFlags, Location, Shift, Site, Skill};
pub use slot::{ClosingResponsibility, ShiftSlot};
pub use staff::{Absence, Staff};
