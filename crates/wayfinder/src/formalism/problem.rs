//! Domains and problem instances.

use crate::error::{PlanningError, Result};
use crate::search::bitset::FactBitset;

use super::action::ActionSchemaId;
use super::atom::GroundLiteralId;
use super::axiom::AxiomId;
use super::category::{Derived, Fluent, Static};
use super::factories::Factories;
use super::function::{FunctionExpression, FunctionSkeletonId, GroundFunctionId};
use super::predicate::PredicateId;
use super::term::ObjectId;

/// Direction of the optimization metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricDirection {
    Minimize,
    Maximize,
}

/// The optimization metric of a problem, e.g. `minimize (total-cost)`.
#[derive(Debug, Clone)]
pub struct OptimizationMetric {
    pub direction: MetricDirection,
    pub expression: FunctionExpression,
}

/// A planning domain: the predicate, function, and action vocabulary.
///
/// The hidden equality predicate is interned in the factories but never
/// listed here.
#[derive(Debug, Clone, Default)]
pub struct Domain {
    pub name: String,
    pub static_predicates: Vec<PredicateId<Static>>,
    pub fluent_predicates: Vec<PredicateId<Fluent>>,
    pub derived_predicates: Vec<PredicateId<Derived>>,
    pub function_skeletons: Vec<FunctionSkeletonId>,
    pub actions: Vec<ActionSchemaId>,
}

/// A concrete problem instance over a domain.
///
/// All references into the factories are indices; the generator owns the
/// problem and its factories together, so the indices stay valid for the
/// run. `static_atoms` is filled by [`Problem::finalize`].
#[derive(Debug, Clone, Default)]
pub struct Problem {
    pub name: String,
    pub domain: Domain,
    pub objects: Vec<ObjectId>,
    pub static_initial_literals: Vec<GroundLiteralId<Static>>,
    pub fluent_initial_literals: Vec<GroundLiteralId<Fluent>>,
    /// Ground function values, the source of action costs.
    pub numeric_fluents: Vec<(GroundFunctionId, f64)>,
    pub static_goal: Vec<GroundLiteralId<Static>>,
    pub fluent_goal: Vec<GroundLiteralId<Fluent>>,
    pub derived_goal: Vec<GroundLiteralId<Derived>>,
    pub metric: Option<OptimizationMetric>,
    pub axioms: Vec<AxiomId>,
    /// Positive static atoms of the initial state, including the reflexive
    /// equality atoms. Evaluated once; never modified afterwards.
    pub static_atoms: FactBitset<Static>,
}

impl Problem {
    /// Validate the initial state and compute the static atom bitset.
    ///
    /// Rejects negated literals in either initial literal list, interns the
    /// reflexive equality atoms over the object universe, and records every
    /// positive static initial atom. Must be called once before a generator
    /// is built on this problem.
    pub fn finalize(mut self, factories: &mut Factories) -> Result<Self> {
        for &literal in &self.fluent_initial_literals {
            let data = factories.ground_literal_data(literal);
            if data.negated {
                return Err(PlanningError::InitialState(
                    factories.display_ground_atom(data.atom),
                ));
            }
        }

        let mut static_atoms = FactBitset::new();
        for &literal in &self.static_initial_literals {
            let data = factories.ground_literal_data(literal);
            if data.negated {
                return Err(PlanningError::InitialState(
                    factories.display_ground_atom(data.atom),
                ));
            }
            static_atoms.insert(data.atom);
        }

        // The equality predicate holds exactly on the reflexive pairs.
        let equality = factories.equality_predicate();
        for &object in &self.objects {
            let atom = factories.get_or_create_ground_atom(equality, vec![object, object]);
            static_atoms.insert(atom);
        }

        self.static_atoms = static_atoms;
        Ok(self)
    }

    /// Whether the problem has any derived predicates or axioms.
    pub fn has_axioms(&self) -> bool {
        !self.axioms.is_empty()
    }
}
