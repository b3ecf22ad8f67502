//! Shared test fixtures for RosterForge crates.
//!
//! This crate only depends on `rosterforge-core` so that the scoring and
//! solver crates can both use it as a dev-dependency.
//!
//! - [`calendar`] - fixed dates and deterministic ids
//! - [`fixture`] - incremental schedule builder
//! - [`clinic`] - a small, fully populated clinic week
//! - [`handover`] - one day where greedy placement strands a skill
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! rosterforge-test = { workspace = true }
//! ```

pub mod calendar;
pub mod clinic;
pub mod fixture;
pub mod handover;

pub use calendar::{day, id, monday};
pub use clinic::{small_clinic, Clinic};
pub use fixture::RosterFixture;
pub use handover::handover_day;
