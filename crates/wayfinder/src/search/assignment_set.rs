//! Assignment sets.
//!
//! An assignment set is a precomputed table answering, in O(1), whether some
//! ground atom of a category is consistent with a partial parameter binding:
//! a single `(position, object)` assignment or a pair of them. The lifted
//! generator uses one set per category to prune vertices and edges of the
//! consistency graphs before clique enumeration.
//!
//! The table is flat per predicate. A partial assignment of up to two
//! `(position, object)` pairs is ranked into the table by a mixed-radix
//! encoding over `(arity + 1)` position slots and `(num_objects + 1)` object
//! slots, with "unassigned" occupying the zero slot of each radix.

use crate::formalism::{CategoryStore, Factories, GroundAtomId, LiteralId, ObjectId, Term};

/// A partial binding of schema parameters to objects.
pub trait ParameterAssignment {
    fn object_for(&self, parameter_index: usize) -> Option<ObjectId>;
}

fn rank(
    first_position: Option<usize>,
    second_position: Option<usize>,
    first_object: Option<ObjectId>,
    second_object: Option<ObjectId>,
    arity: usize,
    num_objects: usize,
) -> usize {
    let first = 1;
    let second = first * (arity + 1);
    let third = second * (arity + 1);
    let fourth = third * (num_objects + 1);
    first * first_position.map_or(0, |p| p + 1)
        + second * second_position.map_or(0, |p| p + 1)
        + third * first_object.map_or(0, |o| o.index() + 1)
        + fourth * second_object.map_or(0, |o| o.index() + 1)
}

fn table_size(arity: usize, num_objects: usize) -> usize {
    let first = 1;
    let second = first * (arity + 1);
    let third = second * (arity + 1);
    let fourth = third * (num_objects + 1);
    first * arity + second * arity + third * num_objects + fourth * num_objects + 1
}

/// Per-category table of consistent partial assignments.
pub struct AssignmentSet<C: CategoryStore> {
    num_objects: usize,
    tables: Vec<Vec<bool>>,
    _category: std::marker::PhantomData<C>,
}

impl<C: CategoryStore> AssignmentSet<C> {
    /// Build the set from the given ground atoms of category `C`.
    pub fn new(
        factories: &Factories,
        atoms: impl IntoIterator<Item = GroundAtomId<C>>,
    ) -> Self {
        let num_objects = factories.object_count();
        let mut tables: Vec<Vec<bool>> = (0..factories.predicate_count::<C>())
            .map(|_| Vec::new())
            .collect();

        for atom_id in atoms {
            let atom = factories.ground_atom(atom_id);
            let arity = atom.objects.len();
            if arity == 0 {
                continue;
            }

            let table = &mut tables[atom.predicate.index()];
            if table.is_empty() {
                table.resize(table_size(arity, num_objects), false);
            }

            for (i, &first_object) in atom.objects.iter().enumerate() {
                table[rank(Some(i), None, Some(first_object), None, arity, num_objects)] = true;
                for (j, &second_object) in atom.objects.iter().enumerate().skip(i + 1) {
                    table[rank(
                        Some(i),
                        Some(j),
                        Some(first_object),
                        Some(second_object),
                        arity,
                        num_objects,
                    )] = true;
                }
            }
        }

        AssignmentSet {
            num_objects,
            tables,
            _category: std::marker::PhantomData,
        }
    }

    /// Whether every literal is consistent with the partial assignment.
    ///
    /// For each literal, the first two `(position, object)` pairs induced by
    /// the assignment (constants count) are ranked and looked up. A positive
    /// literal needs a consistent atom to exist; a negative literal with a
    /// FULL induced assignment needs it to not exist. Negative literals of
    /// arity above two can never be fully induced here and are skipped.
    pub fn literals_consistent<A: ParameterAssignment>(
        &self,
        factories: &Factories,
        literals: &[LiteralId<C>],
        assignment: &A,
    ) -> bool {
        for &literal_id in literals {
            let literal = factories.literal(literal_id);
            let atom = factories.atom(literal.atom);
            let arity = atom.terms.len();

            if literal.negated && arity != 1 && arity != 2 {
                continue;
            }

            let mut first: Option<(usize, ObjectId)> = None;
            let mut second: Option<(usize, ObjectId)> = None;
            let mut bound = 0usize;

            for (position, term) in atom.terms.iter().enumerate() {
                let object = match term {
                    Term::Object(object) => Some(*object),
                    Term::Variable(variable) => {
                        assignment.object_for(factories.variable(*variable).parameter_index)
                    }
                };
                if let Some(object) = object {
                    bound += 1;
                    if first.is_none() {
                        first = Some((position, object));
                    } else if second.is_none() {
                        second = Some((position, object));
                    }
                }
            }

            let Some((first_position, first_object)) = first else {
                continue;
            };

            let table = &self.tables[atom.predicate.index()];
            let consistent = if table.is_empty() {
                // No atom of this predicate exists at all.
                false
            } else {
                let index = rank(
                    Some(first_position),
                    second.map(|(p, _)| p),
                    Some(first_object),
                    second.map(|(_, o)| o),
                    arity,
                    self.num_objects,
                );
                table[index]
            };

            if !literal.negated && !consistent {
                return false;
            }
            if literal.negated && consistent && bound == arity {
                return false;
            }
        }
        true
    }
}
