//! Packed ground actions.
//!
//! A ground action carries everything needed to test applicability against
//! a state and to apply the action: the six precondition bitsets (positive
//! and negative across the three categories), the two STRIPS effect
//! bitsets, and an ordered list of conditional-effect records. Identity is
//! the (schema, binding) pair.

use std::hash::{Hash, Hasher};

use crate::formalism::{ActionSchemaId, Derived, Fluent, GroundAtomId, ObjectId, Static};

use super::bitset::FactBitset;
use super::state::StateData;

/// Dense index of a ground action in its generator's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroundActionId(pub(crate) u32);

impl GroundActionId {
    pub fn new(index: u32) -> Self {
        GroundActionId(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Positive and negative precondition bitsets across all three categories.
#[derive(Debug, Clone, Default)]
pub struct StripsPrecondition {
    pub positive_static: FactBitset<Static>,
    pub negative_static: FactBitset<Static>,
    pub positive_fluent: FactBitset<Fluent>,
    pub negative_fluent: FactBitset<Fluent>,
    pub positive_derived: FactBitset<Derived>,
    pub negative_derived: FactBitset<Derived>,
}

impl StripsPrecondition {
    /// The applicability test: positive parts must be subsets, negative
    /// parts disjoint, with static atoms taken from the problem.
    pub fn holds(&self, state: &StateData, static_atoms: &FactBitset<Static>) -> bool {
        self.holds_on(&state.fluent, &state.derived, static_atoms)
    }

    /// Same test over loose fluent and derived bitsets, used mid-fixed-point
    /// where no canonical state exists yet.
    pub fn holds_on(
        &self,
        fluent: &FactBitset<Fluent>,
        derived: &FactBitset<Derived>,
        static_atoms: &FactBitset<Static>,
    ) -> bool {
        fluent.is_superset_of(&self.positive_fluent)
            && fluent.is_disjoint_with(&self.negative_fluent)
            && derived.is_superset_of(&self.positive_derived)
            && derived.is_disjoint_with(&self.negative_derived)
            && static_atoms.is_superset_of(&self.positive_static)
            && static_atoms.is_disjoint_with(&self.negative_static)
    }

    /// The static part of the test alone, used to discard groundings that
    /// can never become applicable.
    pub fn statically_holds(&self, static_atoms: &FactBitset<Static>) -> bool {
        static_atoms.is_superset_of(&self.positive_static)
            && static_atoms.is_disjoint_with(&self.negative_static)
    }
}

/// Unconditional add and delete fluent bitsets.
#[derive(Debug, Clone, Default)]
pub struct StripsEffect {
    pub positive: FactBitset<Fluent>,
    pub negative: FactBitset<Fluent>,
}

/// A single add or delete of one fluent atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimpleEffect {
    pub atom: GroundAtomId<Fluent>,
    pub negated: bool,
}

/// One conditional effect of a ground action: fire the simple effect when
/// the precondition holds on the pre-application state.
#[derive(Debug, Clone)]
pub struct ConditionalEffectData {
    pub precondition: StripsPrecondition,
    pub effect: SimpleEffect,
}

impl ConditionalEffectData {
    pub fn fires(&self, state: &StateData, static_atoms: &FactBitset<Static>) -> bool {
        self.precondition.holds(state, static_atoms)
    }
}

/// A fully grounded action.
///
/// Produced lazily by the lifted generator (through its grounding cache) or
/// in bulk by the grounded generator during setup; immutable afterwards.
#[derive(Debug, Clone)]
pub struct GroundActionData {
    pub schema: ActionSchemaId,
    pub binding: Vec<ObjectId>,
    pub cost: i32,
    pub precondition: StripsPrecondition,
    pub effect: StripsEffect,
    /// Conditional effects in declaration order; application order matters.
    pub conditional_effects: Vec<ConditionalEffectData>,
}

impl GroundActionData {
    pub fn is_applicable(&self, state: &StateData, static_atoms: &FactBitset<Static>) -> bool {
        self.precondition.holds(state, static_atoms)
    }

    pub fn is_statically_applicable(&self, static_atoms: &FactBitset<Static>) -> bool {
        self.precondition.statically_holds(static_atoms)
    }
}

impl PartialEq for GroundActionData {
    fn eq(&self, other: &Self) -> bool {
        self.schema == other.schema && self.binding == other.binding
    }
}

impl Eq for GroundActionData {}

impl Hash for GroundActionData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.schema.hash(state);
        self.binding.hash(state);
    }
}
