//! RosterForge Core - score types, errors and the scheduling domain model
//!
//! This crate provides the fundamental pieces every other RosterForge crate
//! builds on:
//! - `HardMediumSoftScore` and the `Score` trait
//! - `ConstraintRef` / `ImpactType` for identifying scoring rules
//! - The fact/entity model (`Staff`, `Shift`, `ShiftSlot`,
//!   `ClosingResponsibility`, `Schedule`) and its validation
//! - Requirement materialization helpers used by data loaders

pub mod constraint;
pub mod domain;
pub mod error;
pub mod score;

pub use constraint::{ConstraintRef, ImpactType};
pub use domain::{
    Absence, ClosingFlags, ClosingResponsibility, ClosingTier, EntityTarget, Location, NeedType, Period,
    Schedule, Shift, ShiftSlot, Site, Skill, Staff,
};
pub use error::{Result, RosterForgeError};
pub use score::{HardMediumSoftScore, Score, ScoreLevel, ScoreParseError};
