//! Construction heuristic.
//!
//! Entities are visited hardest first (see [`construction_order`]) and each
//! one receives the value with the best immediate score.

mod difficulty;
mod phase;

pub use difficulty::{construction_order, difficulty_key, DifficultyKey, EntityClass};
pub use phase::ConstructionPhase;

#[cfg(test)]
mod tests;
