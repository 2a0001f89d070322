//! Predicate categories.
//!
//! Every predicate belongs to exactly one of three categories:
//! - `Static`: true in the initial state or never, and never modified.
//! - `Fluent`: modified by action effects.
//! - `Derived`: defined by axioms and recomputed per state.
//!
//! The categories are zero-sized marker types so that identifiers and
//! bitsets over ground atoms are segregated by category at the type level:
//! a fluent bitset cannot be probed with a derived atom index.

use std::fmt::Debug;
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Static {}
    impl Sealed for super::Fluent {}
    impl Sealed for super::Derived {}
}

/// Marker trait for predicate categories.
///
/// Sealed: the only implementations are [`Static`], [`Fluent`], [`Derived`].
pub trait Category:
    sealed::Sealed + Copy + Clone + Debug + Default + PartialEq + Eq + Hash + 'static
{
    /// Category name used in diagnostics.
    const NAME: &'static str;
}

/// Predicates evaluated once against the initial state.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Static;

/// Predicates modified by action effects.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fluent;

/// Predicates defined by axioms.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Derived;

impl Category for Static {
    const NAME: &'static str = "static";
}

impl Category for Fluent {
    const NAME: &'static str = "fluent";
}

impl Category for Derived {
    const NAME: &'static str = "derived";
}
