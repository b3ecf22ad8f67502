//! Reassign and swap moves.

use std::fmt::Debug;

use rosterforge_core::EntityTarget;
use rosterforge_scoring::ScheduleDirector;

use super::fallback::{FallbackChange, FallbackChanges};

/// A change to one or two planning variables.
///
/// Moves go through the score director so the cached score and derived
/// attributes follow every mutation; `undo` restores the state seen before
/// `do_move`.
pub trait Move: Send + Sync + Debug {
    /// Returns true if this move changes something in the current state.
    fn is_doable(&self, director: &ScheduleDirector) -> bool;

    fn do_move(&self, director: &mut ScheduleDirector);

    fn undo(&self, director: &mut ScheduleDirector);
}

fn fallbacks_hold(fallback: &[FallbackChange], director: &ScheduleDirector) -> bool {
    let slots = &director.working_solution().slots;
    fallback.iter().all(|c| slots[c.slot].staff == c.from)
}

fn apply_fallbacks(fallback: &[FallbackChange], director: &mut ScheduleDirector) {
    for c in fallback {
        director.change(EntityTarget::Slot(c.slot), c.to);
    }
}

fn revert_fallbacks(fallback: &[FallbackChange], director: &mut ScheduleDirector) {
    for c in fallback.iter().rev() {
        director.change(EntityTarget::Slot(c.slot), c.from);
    }
}

/// Assigns `to` (or nobody) to one slot or closing responsibility.
///
/// `from` is the value the move was generated against; the move is only
/// doable while the entity still holds it. Administrative slots listed in
/// `fallback` change together with the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignMove {
    pub target: EntityTarget,
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub fallback: FallbackChanges,
}

impl ReassignMove {
    pub fn new(target: EntityTarget, from: Option<usize>, to: Option<usize>) -> Self {
        Self {
            target,
            from,
            to,
            fallback: FallbackChanges::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackChanges) -> Self {
        self.fallback = fallback;
        self
    }
}

impl Move for ReassignMove {
    fn is_doable(&self, director: &ScheduleDirector) -> bool {
        self.from != self.to
            && director.working_solution().assigned(self.target) == self.from
            && fallbacks_hold(&self.fallback, director)
    }

    fn do_move(&self, director: &mut ScheduleDirector) {
        director.change(self.target, self.to);
        apply_fallbacks(&self.fallback, director);
    }

    fn undo(&self, director: &mut ScheduleDirector) {
        revert_fallbacks(&self.fallback, director);
        director.change(self.target, self.from);
    }
}

/// Exchanges the staff of two slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapMove {
    pub a: usize,
    pub b: usize,
    pub fallback: FallbackChanges,
}

impl SwapMove {
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            a,
            b,
            fallback: FallbackChanges::new(),
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackChanges) -> Self {
        self.fallback = fallback;
        self
    }

    fn exchange(&self, director: &mut ScheduleDirector) {
        let schedule = director.working_solution();
        let left = schedule.slots[self.a].staff;
        let right = schedule.slots[self.b].staff;
        director.change(EntityTarget::Slot(self.a), right);
        director.change(EntityTarget::Slot(self.b), left);
    }
}

impl Move for SwapMove {
    fn is_doable(&self, director: &ScheduleDirector) -> bool {
        let slots = &director.working_solution().slots;
        self.a != self.b
            && slots[self.a].staff != slots[self.b].staff
            && fallbacks_hold(&self.fallback, director)
    }

    fn do_move(&self, director: &mut ScheduleDirector) {
        self.exchange(director);
        apply_fallbacks(&self.fallback, director);
    }

    // The exchange itself is self-inverse.
    fn undo(&self, director: &mut ScheduleDirector) {
        revert_fallbacks(&self.fallback, director);
        self.exchange(director);
    }
}

/// Either move kind, for samplers that mix them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RosterMove {
    Reassign(ReassignMove),
    Swap(SwapMove),
}

impl Move for RosterMove {
    fn is_doable(&self, director: &ScheduleDirector) -> bool {
        match self {
            RosterMove::Reassign(m) => m.is_doable(director),
            RosterMove::Swap(m) => m.is_doable(director),
        }
    }

    fn do_move(&self, director: &mut ScheduleDirector) {
        match self {
            RosterMove::Reassign(m) => m.do_move(director),
            RosterMove::Swap(m) => m.do_move(director),
        }
    }

    fn undo(&self, director: &mut ScheduleDirector) {
        match self {
            RosterMove::Reassign(m) => m.undo(director),
            RosterMove::Swap(m) => m.undo(director),
        }
    }
}

impl From<ReassignMove> for RosterMove {
    fn from(m: ReassignMove) -> Self {
        RosterMove::Reassign(m)
    }
}

impl From<SwapMove> for RosterMove {
    fn from(m: SwapMove) -> Self {
        RosterMove::Swap(m)
    }
}
