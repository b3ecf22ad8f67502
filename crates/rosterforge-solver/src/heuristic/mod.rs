//! Move model: candidate ranges, filters, moves and sampling.

mod fallback;
mod filter;
mod moves;
mod ranges;
mod sampler;


pub use fallback::{fallback_changes, FallbackChange, FallbackChanges, SlotChange};
pub use filter::{closing_accepts, slot_accepts, MoveFilter};
pub use moves::{Move, ReassignMove, RosterMove, SwapMove};
pub use ranges::CandidateRanges;
pub use sampler::MoveSampler;
