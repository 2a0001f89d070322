//! Packed states.
//!
//! A state is a pair of fact bitsets: the fluent atoms, set by action
//! effects, and the derived atoms, a pure function of the fluent atoms
//! computed by axiom evaluation. Identity is the fluent bitset alone — the
//! derived part is redundant for equality and hashing, which is what lets
//! the state repository canonicalize before running the axiom fixed point.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::formalism::{Category, Derived, Fluent, GroundAtomId, GroundLiteralData};

use super::bitset::FactBitset;

/// Dense index of a canonicalized state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) u32);

impl StateId {
    pub fn new(index: u32) -> Self {
        StateId(index)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// The owned representation of a state, stored in the state repository.
#[derive(Debug, Clone, Default)]
pub struct StateData {
    pub fluent: FactBitset<Fluent>,
    pub derived: FactBitset<Derived>,
}

impl StateData {
    pub fn from_fluent(fluent: FactBitset<Fluent>) -> Self {
        StateData {
            fluent,
            derived: FactBitset::new(),
        }
    }
}

impl PartialEq for StateData {
    fn eq(&self, other: &Self) -> bool {
        self.fluent == other.fluent
    }
}

impl Eq for StateData {}

impl Hash for StateData {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fluent.hash(state);
    }
}

/// Categories whose atoms are part of a state (static atoms live in the
/// problem instead).
pub trait StateCategory: Category {
    fn atoms(data: &StateData) -> &FactBitset<Self>;
}

impl StateCategory for Fluent {
    fn atoms(data: &StateData) -> &FactBitset<Self> {
        &data.fluent
    }
}

impl StateCategory for Derived {
    fn atoms(data: &StateData) -> &FactBitset<Self> {
        &data.derived
    }
}

/// A borrowed view of a canonicalized state.
#[derive(Debug, Clone, Copy)]
pub struct State<'a> {
    id: StateId,
    data: &'a StateData,
}

impl<'a> State<'a> {
    pub fn new(id: StateId, data: &'a StateData) -> Self {
        State { id, data }
    }

    pub fn id(self) -> StateId {
        self.id
    }

    pub fn data(self) -> &'a StateData {
        self.data
    }

    pub fn fluent_atoms(self) -> &'a FactBitset<Fluent> {
        &self.data.fluent
    }

    pub fn derived_atoms(self) -> &'a FactBitset<Derived> {
        &self.data.derived
    }

    pub fn contains<C: StateCategory>(self, atom: GroundAtomId<C>) -> bool {
        C::atoms(self.data).contains(atom)
    }

    pub fn literal_holds<C: StateCategory>(self, literal: GroundLiteralData<C>) -> bool {
        self.contains(literal.atom) != literal.negated
    }

    pub fn literals_hold<C: StateCategory>(
        self,
        literals: impl IntoIterator<Item = GroundLiteralData<C>>,
    ) -> bool {
        literals
            .into_iter()
            .all(|literal| self.literal_holds(literal))
    }
}
