//! Shared grounding helpers for the lifted generator and axiom evaluator.

use crate::formalism::{CategoryStore, Derived, Factories, Fluent, LiteralId};

use super::bitset::FactBitset;

/// Ground a split condition list under a binding, filling the positive and
/// negative bitsets of the category.
pub(crate) fn ground_literals_into<C: CategoryStore>(
    factories: &mut Factories,
    literals: &[LiteralId<C>],
    binding: &[crate::formalism::ObjectId],
    positive: &mut FactBitset<C>,
    negative: &mut FactBitset<C>,
) {
    for &literal in literals {
        let grounded = factories.ground_literal(literal, binding);
        if grounded.negated {
            negative.insert(grounded.atom);
        } else {
            positive.insert(grounded.atom);
        }
    }
}

/// Test the nullary (variable-free, zero-arity) literals of a fluent
/// condition list against the given fluent atoms.
///
/// Nullary literals never constrain the consistency graphs, so schemas are
/// screened on them up front before any binding enumeration.
pub(crate) fn nullary_fluent_literals_hold(
    factories: &mut Factories,
    literals: &[LiteralId<Fluent>],
    fluent: &FactBitset<Fluent>,
) -> bool {
    nullary_literals_hold_in(factories, literals, |atom| fluent.contains(atom))
}

/// Nullary screening for derived condition lists.
pub(crate) fn nullary_derived_literals_hold(
    factories: &mut Factories,
    literals: &[LiteralId<Derived>],
    derived: &FactBitset<Derived>,
) -> bool {
    nullary_literals_hold_in(factories, literals, |atom| derived.contains(atom))
}

fn nullary_literals_hold_in<C: CategoryStore>(
    factories: &mut Factories,
    literals: &[LiteralId<C>],
    contains: impl Fn(crate::formalism::GroundAtomId<C>) -> bool,
) -> bool {
    for &literal_id in literals {
        let literal = factories.literal(literal_id);
        if !factories.atom(literal.atom).is_nullary() {
            continue;
        }
        let grounded = factories.ground_literal(literal_id, &[]);
        if contains(grounded.atom) == grounded.negated {
            return false;
        }
    }
    true
}
