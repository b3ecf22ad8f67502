//! Local search.
//!
//! One sampled move per step, kept or undone by an [`Acceptor`].

mod acceptor;
mod phase;

pub use acceptor::{Acceptor, LateAcceptanceAcceptor};
pub use phase::LocalSearchPhase;
