//! Atoms, literals, and their ground counterparts.
//!
//! All four kinds are interned per category. A ground atom's index doubles
//! as its bit position in the fact bitsets of states, preconditions, and
//! effects of that category.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use super::category::Category;
use super::factory::FactoryIndex;
use super::predicate::PredicateId;
use super::term::{ObjectId, Term};

// =============================================================================
// Identifier types
// =============================================================================

/// Index of an interned atom, in its category's namespace.
pub struct AtomId<C: Category>(u32, PhantomData<C>);

/// Index of an interned literal, in its category's namespace.
pub struct LiteralId<C: Category>(u32, PhantomData<C>);

/// Index of an interned ground atom; doubles as its bitset position.
pub struct GroundAtomId<C: Category>(u32, PhantomData<C>);

/// Index of an interned ground literal.
pub struct GroundLiteralId<C: Category>(u32, PhantomData<C>);

macro_rules! impl_category_index {
    ($name:ident, $label:literal) => {
        impl<C: Category> $name<C> {
            pub fn new(index: u32) -> Self {
                $name(index, PhantomData)
            }

            pub fn index(self) -> usize {
                self.0 as usize
            }

            pub fn raw_bit(self) -> u32 {
                self.0
            }
        }

        impl<C: Category> Clone for $name<C> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<C: Category> Copy for $name<C> {}

        impl<C: Category> PartialEq for $name<C> {
            fn eq(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }

        impl<C: Category> Eq for $name<C> {}

        impl<C: Category> PartialOrd for $name<C> {
            fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl<C: Category> Ord for $name<C> {
            fn cmp(&self, other: &Self) -> std::cmp::Ordering {
                self.0.cmp(&other.0)
            }
        }

        impl<C: Category> Hash for $name<C> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl<C: Category> fmt::Debug for $name<C> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "<{}>({})"), C::NAME, self.0)
            }
        }

        impl<C: Category> FactoryIndex for $name<C> {
            fn from_raw(raw: u32) -> Self {
                $name::new(raw)
            }

            fn raw(self) -> u32 {
                self.0
            }
        }
    };
}

impl_category_index!(AtomId, "AtomId");
impl_category_index!(LiteralId, "LiteralId");
impl_category_index!(GroundAtomId, "GroundAtomId");
impl_category_index!(GroundLiteralId, "GroundLiteralId");

// =============================================================================
// Data types
// =============================================================================

/// A predicate applied to an ordered list of terms.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AtomData<C: Category> {
    pub predicate: PredicateId<C>,
    pub terms: Vec<Term>,
}

impl<C: Category> AtomData<C> {
    pub fn new(predicate: PredicateId<C>, terms: Vec<Term>) -> Self {
        AtomData { predicate, terms }
    }

    /// Whether the atom mentions no variables.
    pub fn is_ground(&self) -> bool {
        self.terms
            .iter()
            .all(|term| matches!(term, Term::Object(_)))
    }

    /// Whether the atom has no terms at all.
    pub fn is_nullary(&self) -> bool {
        self.terms.is_empty()
    }
}

/// An atom with a negation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiteralData<C: Category> {
    pub atom: AtomId<C>,
    pub negated: bool,
}

impl<C: Category> LiteralData<C> {
    pub fn positive(atom: AtomId<C>) -> Self {
        LiteralData {
            atom,
            negated: false,
        }
    }

    pub fn negative(atom: AtomId<C>) -> Self {
        LiteralData {
            atom,
            negated: true,
        }
    }
}

/// A predicate applied to an ordered list of objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroundAtomData<C: Category> {
    pub predicate: PredicateId<C>,
    pub objects: Vec<ObjectId>,
}

impl<C: Category> GroundAtomData<C> {
    pub fn new(predicate: PredicateId<C>, objects: Vec<ObjectId>) -> Self {
        GroundAtomData { predicate, objects }
    }
}

/// A ground atom with a negation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroundLiteralData<C: Category> {
    pub atom: GroundAtomId<C>,
    pub negated: bool,
}

impl<C: Category> GroundLiteralData<C> {
    pub fn positive(atom: GroundAtomId<C>) -> Self {
        GroundLiteralData {
            atom,
            negated: false,
        }
    }

    pub fn negative(atom: GroundAtomId<C>) -> Self {
        GroundLiteralData {
            atom,
            negated: true,
        }
    }
}
