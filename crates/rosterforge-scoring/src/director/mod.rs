//! Score director for schedules.
//!
//! The director owns the working schedule and is the only component allowed
//! to change its planning variables. Every change goes through the
//! incremental protocol so that the cached score and the derived slot
//! attributes stay consistent with the assignment state.

mod schedule;
pub mod shadow;

#[cfg(test)]
mod tests;

pub use schedule::ScheduleDirector;
