//! The successor state generator.
//!
//! Canonicalizes states and computes successors. States are interned in an
//! insertion-ordered set keyed by their fluent bitset, so two successor
//! generations that produce the same fluent atoms yield the same state
//! index — and the axiom fixed point runs only for states seen for the
//! first time. Insertion is the last step of successor construction, so a
//! cancelled search never observes a partially built state.

use indexmap::IndexSet;

use crate::error::{PlanningError, Result};
use crate::formalism::Fluent;

use super::bitset::FactBitset;
use super::generator::GeneratorOps;
use super::ground_action::GroundActionId;
use super::state::{State, StateData, StateId};

/// The canonical store of all states of one search.
#[derive(Default)]
pub struct StateRepository {
    states: IndexSet<StateData>,
}

impl StateRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn data(&self, id: StateId) -> &StateData {
        &self.states[id.index()]
    }

    pub fn state(&self, id: StateId) -> State<'_> {
        State::new(id, self.data(id))
    }

    /// Build and canonicalize the initial state from the problem's fluent
    /// initial literals. A negated initial literal is a hard error.
    pub fn initial_state<G: GeneratorOps>(&mut self, generator: &mut G) -> Result<StateId> {
        let literals = generator.problem().fluent_initial_literals.clone();
        let mut fluent = FactBitset::new();
        for literal in literals {
            let data = generator.factories().ground_literal_data(literal);
            if data.negated {
                return Err(PlanningError::InitialState(
                    generator.factories().display_ground_atom(data.atom),
                ));
            }
            fluent.insert(data.atom);
        }
        Ok(self.get_or_create_state(fluent, generator))
    }

    /// Canonicalize a fluent bitset into a state.
    ///
    /// If a state with these fluent atoms exists, its index is returned and
    /// no axiom evaluation runs; otherwise the derived fixed point is
    /// computed, the state is inserted, and the fresh index is returned.
    pub fn get_or_create_state<G: GeneratorOps>(
        &mut self,
        fluent: FactBitset<Fluent>,
        generator: &mut G,
    ) -> StateId {
        let probe = StateData::from_fluent(fluent);
        if let Some(index) = self.states.get_index_of(&probe) {
            return StateId::new(index as u32);
        }

        let StateData {
            fluent,
            mut derived,
        } = probe;
        generator.evaluate_axioms(&fluent, &mut derived);

        let (index, inserted) = self.states.insert_full(StateData { fluent, derived });
        debug_assert!(inserted, "state equality is keyed on the fluent bitset");
        StateId::new(index as u32)
    }

    /// Compute the canonical successor of `(state, action)`.
    ///
    /// The STRIPS effect applies first, then each conditional effect in
    /// declaration order. Conditional-effect preconditions are evaluated
    /// against the pre-application state, so an effect cannot trigger on an
    /// effect produced by the same action.
    pub fn successor_state<G: GeneratorOps>(
        &mut self,
        state: StateId,
        action: GroundActionId,
        generator: &mut G,
    ) -> StateId {
        let fluent = {
            let current = &self.states[state.index()];
            let action_data = generator.action(action);

            let mut fluent = current.fluent.clone();
            fluent.difference_with(&action_data.effect.negative);
            fluent.union_with(&action_data.effect.positive);

            let static_atoms = &generator.problem().static_atoms;
            for conditional in &action_data.conditional_effects {
                if conditional.fires(current, static_atoms) {
                    if conditional.effect.negated {
                        fluent.remove(conditional.effect.atom);
                    } else {
                        fluent.insert(conditional.effect.atom);
                    }
                }
            }
            fluent
        };

        self.get_or_create_state(fluent, generator)
    }
}
