//! Move acceptance.

use std::fmt::Debug;

use rosterforge_core::HardMediumSoftScore;

/// Decides whether a move is kept, given the score it leads to.
pub trait Acceptor: Send + Debug {
    /// Returns true if a move resulting in `move_score` should be kept,
    /// given the previous step's score.
    fn is_accepted(&self, last_step_score: &HardMediumSoftScore, move_score: &HardMediumSoftScore)
        -> bool;

    fn phase_started(&mut self, _initial_score: &HardMediumSoftScore) {}

    fn phase_ended(&mut self) {}

    /// Called once per step with the score the step ended on, whether or
    /// not its move was kept.
    fn step_ended(&mut self, _step_score: &HardMediumSoftScore) {}
}

/// Late acceptance: a move is kept if it improves on the last step, or if
/// it is no worse than the step score recorded `size` steps ago.
///
/// ```
/// use rosterforge_core::HardMediumSoftScore;
/// use rosterforge_solver::{Acceptor, LateAcceptanceAcceptor};
///
/// let mut acceptor = LateAcceptanceAcceptor::new(2);
/// acceptor.phase_started(&HardMediumSoftScore::of_soft(-10));
/// assert!(acceptor.is_accepted(&HardMediumSoftScore::of_soft(-5), &HardMediumSoftScore::of_soft(-10)));
/// assert!(!acceptor.is_accepted(&HardMediumSoftScore::of_soft(-5), &HardMediumSoftScore::of_soft(-11)));
/// ```
#[derive(Debug, Clone)]
pub struct LateAcceptanceAcceptor {
    late_acceptance_size: usize,
    score_history: Vec<Option<HardMediumSoftScore>>,
    current_index: usize,
}

impl LateAcceptanceAcceptor {
    pub fn new(late_acceptance_size: usize) -> Self {
        let size = late_acceptance_size.max(1);
        Self {
            late_acceptance_size: size,
            score_history: vec![None; size],
            current_index: 0,
        }
    }

    pub fn late_acceptance_size(&self) -> usize {
        self.late_acceptance_size
    }
}

impl Default for LateAcceptanceAcceptor {
    fn default() -> Self {
        Self::new(400)
    }
}

impl Acceptor for LateAcceptanceAcceptor {
    fn is_accepted(
        &self,
        last_step_score: &HardMediumSoftScore,
        move_score: &HardMediumSoftScore,
    ) -> bool {
        if move_score > last_step_score {
            return true;
        }
        match &self.score_history[self.current_index] {
            Some(late_score) => move_score >= late_score,
            None => true,
        }
    }

    fn phase_started(&mut self, initial_score: &HardMediumSoftScore) {
        self.score_history.fill(Some(*initial_score));
        self.current_index = 0;
    }

    fn phase_ended(&mut self) {
        self.score_history.fill(None);
        self.current_index = 0;
    }

    fn step_ended(&mut self, step_score: &HardMediumSoftScore) {
        self.score_history[self.current_index] = Some(*step_score);
        self.current_index = (self.current_index + 1) % self.late_acceptance_size;
    }
}
