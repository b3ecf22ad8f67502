// Incremental constraint protocol.
//
// A constraint keeps whatever bookkeeping it needs to answer "how much did
// the score move" when a single entity changes, without rescoring the whole
// solution.

use rosterforge_core::score::Score;
use rosterforge_core::ConstraintRef;

// A single constraint with incremental scoring capability.
//
// # Incremental Protocol
//
// 1. Call `initialize` once to populate internal state
// 2. Before changing an entity's variable: call `on_retract` with old state
// 3. After changing the variable: call `on_insert` with new state
// 4. Score delta = retract delta + insert delta
//
// `evaluate` never touches internal state, so it can serve as the
// from-scratch reference for the incremental path.
pub trait IncrementalConstraint<S, Sc: Score>: Send + Sync {
    // Full evaluation of this constraint.
    fn evaluate(&self, solution: &S) -> Sc;

    // Returns the number of matches for this constraint.
    fn match_count(&self, solution: &S) -> usize;

    // Initializes internal state by inserting all entities.
    //
    // Returns the total score from initialization.
    fn initialize(&mut self, solution: &S) -> Sc;

    // Called after an entity's variable changed (or when it is first seen).
    //
    // * `entity_index` - Index of the entity within its class
    // * `descriptor_index` - Index of the entity class being modified
    fn on_insert(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc;

    // Called before an entity's variable changes.
    fn on_retract(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc;

    // Resets internal state for a new solving session.
    fn reset(&mut self);

    // Returns the constraint name.
    fn name(&self) -> &str;

    // Returns true if this constraint affects the hard level.
    fn is_hard(&self) -> bool {
        false
    }

    // Returns the constraint reference (package + name).
    fn constraint_ref(&self) -> ConstraintRef {
        ConstraintRef::new("", self.name())
    }

    // Returns the score of one unit of match.
    fn weight(&self) -> Sc {
        Sc::zero()
    }
}

// Result of evaluating a single constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintResult<Sc> {
    pub name: String,
    // Score contribution from this constraint.
    pub score: Sc,
    pub match_count: usize,
    pub is_hard: bool,
}

// An ordered set of constraints evaluated together.
pub trait ConstraintSet<S, Sc: Score>: Send + Sync {
    // Evaluates all constraints from scratch and returns the total score.
    fn evaluate_all(&self, solution: &S) -> Sc;

    fn constraint_count(&self) -> usize;

    // Evaluates each constraint individually, in set order.
    fn evaluate_each(&self, solution: &S) -> Vec<ConstraintResult<Sc>>;

    // Initializes all constraints. Must be called before the incremental
    // methods; returns the total score.
    fn initialize_all(&mut self, solution: &S) -> Sc;

    // Total score delta of inserting an entity into every constraint.
    fn on_insert_all(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc;

    // Total score delta of retracting an entity from every constraint.
    fn on_retract_all(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc;

    fn reset_all(&mut self);
}

impl<S, Sc, C> ConstraintSet<S, Sc> for Vec<C>
where
    S: Send + Sync,
    Sc: Score,
    C: IncrementalConstraint<S, Sc>,
{
    fn evaluate_all(&self, solution: &S) -> Sc {
        self.iter()
            .fold(Sc::zero(), |total, c| total + c.evaluate(solution))
    }

    #[inline]
    fn constraint_count(&self) -> usize {
        self.len()
    }

    fn evaluate_each(&self, solution: &S) -> Vec<ConstraintResult<Sc>> {
        self.iter()
            .map(|c| ConstraintResult {
                name: c.name().to_string(),
                score: c.evaluate(solution),
                match_count: c.match_count(solution),
                is_hard: c.is_hard(),
            })
            .collect()
    }

    fn initialize_all(&mut self, solution: &S) -> Sc {
        self.iter_mut()
            .fold(Sc::zero(), |total, c| total + c.initialize(solution))
    }

    fn on_insert_all(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
        self.iter_mut().fold(Sc::zero(), |total, c| {
            total + c.on_insert(solution, entity_index, descriptor_index)
        })
    }

    fn on_retract_all(&mut self, solution: &S, entity_index: usize, descriptor_index: usize) -> Sc {
        self.iter_mut().fold(Sc::zero(), |total, c| {
            total + c.on_retract(solution, entity_index, descriptor_index)
        })
    }

    fn reset_all(&mut self) {
        for c in self.iter_mut() {
            c.reset();
        }
    }
}
