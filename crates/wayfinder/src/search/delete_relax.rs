//! Delete relaxation.
//!
//! Produces a copy of the problem in which nothing is ever destroyed:
//! delete effects are dropped, and negated fluent and derived conditions
//! are dropped with them so that applicability stays monotone as the atom
//! set grows. Static conditions are kept in full — the static state never
//! changes, so they filter soundly. Actions and axioms whose effects become
//! empty are preserved; the grounded generator needs their groundings.
//!
//! Structural interning can merge two schemas that relax to the same data,
//! so the origin maps are one-to-many from relaxed back to original.

use std::collections::{HashMap, HashSet};

use crate::formalism::{
    ActionSchemaData, ActionSchemaId, AxiomData, AxiomId, CategoryStore, Factories, LiteralId,
    Problem,
};

/// The relaxed problem plus the maps back to the unrelaxed schemas.
pub struct DeleteRelaxation {
    pub problem: Problem,
    pub schema_origins: HashMap<ActionSchemaId, Vec<ActionSchemaId>>,
    pub axiom_origins: HashMap<AxiomId, Vec<AxiomId>>,
}

/// Build the delete-relaxed copy of a problem.
pub fn delete_relax(problem: &Problem, factories: &mut Factories) -> DeleteRelaxation {
    let mut schema_origins: HashMap<ActionSchemaId, Vec<ActionSchemaId>> = HashMap::new();
    let mut relaxed_actions = Vec::new();
    let mut seen_actions = HashSet::new();

    for &schema_id in &problem.domain.actions {
        let schema = factories.action_schema(schema_id).clone();
        let relaxed = relax_schema(factories, &schema);
        let relaxed_id = factories.get_or_create_action_schema(relaxed);
        schema_origins.entry(relaxed_id).or_default().push(schema_id);
        if seen_actions.insert(relaxed_id) {
            relaxed_actions.push(relaxed_id);
        }
    }

    let mut axiom_origins: HashMap<AxiomId, Vec<AxiomId>> = HashMap::new();
    let mut relaxed_axioms = Vec::new();
    let mut seen_axioms = HashSet::new();

    for &axiom_id in &problem.axioms {
        let axiom = factories.axiom(axiom_id).clone();
        let relaxed = relax_axiom(factories, &axiom);
        let relaxed_id = factories.get_or_create_axiom(relaxed);
        axiom_origins.entry(relaxed_id).or_default().push(axiom_id);
        if seen_axioms.insert(relaxed_id) {
            relaxed_axioms.push(relaxed_id);
        }
    }

    let mut relaxed_problem = problem.clone();
    relaxed_problem.domain.actions = relaxed_actions;
    relaxed_problem.axioms = relaxed_axioms;

    DeleteRelaxation {
        problem: relaxed_problem,
        schema_origins,
        axiom_origins,
    }
}

fn positives_only<C: CategoryStore>(
    factories: &Factories,
    literals: &[LiteralId<C>],
) -> Vec<LiteralId<C>> {
    literals
        .iter()
        .copied()
        .filter(|&literal| !factories.literal(literal).negated)
        .collect()
}

fn relax_schema(factories: &Factories, schema: &ActionSchemaData) -> ActionSchemaData {
    let conditional_effects = schema
        .conditional_effects
        .iter()
        .filter(|conditional| !factories.literal(conditional.effect).negated)
        .map(|conditional| crate::formalism::ConditionalEffectSchema {
            static_conditions: conditional.static_conditions.clone(),
            fluent_conditions: positives_only(factories, &conditional.fluent_conditions),
            derived_conditions: positives_only(factories, &conditional.derived_conditions),
            effect: conditional.effect,
        })
        .collect();

    let universal_effects = schema
        .universal_effects
        .iter()
        .filter(|universal| !factories.literal(universal.effect).negated)
        .map(|universal| crate::formalism::UniversalEffectSchema {
            parameters: universal.parameters.clone(),
            static_conditions: universal.static_conditions.clone(),
            fluent_conditions: positives_only(factories, &universal.fluent_conditions),
            derived_conditions: positives_only(factories, &universal.derived_conditions),
            effect: universal.effect,
        })
        .collect();

    ActionSchemaData {
        name: schema.name.clone(),
        original_arity: schema.original_arity,
        parameters: schema.parameters.clone(),
        static_conditions: schema.static_conditions.clone(),
        fluent_conditions: positives_only(factories, &schema.fluent_conditions),
        derived_conditions: positives_only(factories, &schema.derived_conditions),
        strips_effects: positives_only(factories, &schema.strips_effects),
        conditional_effects,
        universal_effects,
        cost: schema.cost.clone(),
    }
}

fn relax_axiom(factories: &Factories, axiom: &AxiomData) -> AxiomData {
    AxiomData {
        parameters: axiom.parameters.clone(),
        head: axiom.head,
        static_conditions: axiom.static_conditions.clone(),
        fluent_conditions: positives_only(factories, &axiom.fluent_conditions),
        derived_conditions: positives_only(factories, &axiom.derived_conditions),
    }
}
