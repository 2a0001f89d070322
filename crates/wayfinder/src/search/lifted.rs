//! The lifted applicable-action generator.
//!
//! Enumerates the ground actions applicable in a state without grounding
//! the problem up front. Per schema, a static consistency graph is built
//! once against the problem's static atoms; per query, the graph is
//! restricted by assignment sets over the state's fluent and derived atoms
//! and its k-cliques become candidate bindings. Grounding a (schema,
//! binding) pair happens at most once per generator lifetime through the
//! per-schema grounding tables.
//!
//! This is the clique-based successor generation of Stahlberg (ECAI 2023).

use std::collections::HashMap;

use crate::error::{PlanningError, Result};
use crate::formalism::{
    ActionSchemaId, AxiomId, Derived, Factories, Fluent, FunctionExpression, GroundFunctionId,
    LiteralId, ObjectId, Problem, Static,
};

use super::assignment_set::AssignmentSet;
use super::axiom_evaluator::{AxiomEvaluator, AxiomPartition};
use super::bitset::FactBitset;
use super::consistency_graph::{consistent_bindings, for_each_combination, ConsistencyGraph};
use super::event_handlers::SharedEventHandler;
use super::ground_action::{
    ConditionalEffectData, GroundActionData, GroundActionId, SimpleEffect, StripsEffect,
    StripsPrecondition,
};
use super::ground_axiom::{GroundAxiomData, GroundAxiomId};
use super::grounding::{
    ground_literals_into, nullary_derived_literals_hold, nullary_fluent_literals_hold,
};
use super::state::StateData;

/// The static consistency graphs of one schema: one for the precondition,
/// one per universal effect (those only contribute their object partitions
/// for the quantifier expansion).
struct SchemaGraphs {
    precondition: ConsistencyGraph,
    universal_effects: Vec<ConsistencyGraph>,
}

/// Lifted generator: owns the problem, its factories, the ground-action
/// arena, and the axiom evaluator.
pub struct LiftedGenerator {
    problem: Problem,
    factories: Factories,
    handler: SharedEventHandler,
    actions: Vec<GroundActionData>,
    groundings: HashMap<ActionSchemaId, HashMap<Vec<ObjectId>, GroundActionId>>,
    graphs: HashMap<ActionSchemaId, SchemaGraphs>,
    function_values: HashMap<GroundFunctionId, f64>,
    axiom_evaluator: AxiomEvaluator,
}

impl LiftedGenerator {
    /// Build the generator: validates the initial state, loads the ground
    /// function values, and constructs the per-schema consistency graphs
    /// and the stratified axiom evaluator.
    pub fn new(
        problem: Problem,
        factories: Factories,
        handler: SharedEventHandler,
    ) -> Result<Self> {
        for &literal in &problem.fluent_initial_literals {
            let data = factories.ground_literal_data(literal);
            if data.negated {
                return Err(PlanningError::InitialState(
                    factories.display_ground_atom(data.atom),
                ));
            }
        }
        for &literal in &problem.static_initial_literals {
            let data = factories.ground_literal_data(literal);
            if data.negated {
                return Err(PlanningError::InitialState(
                    factories.display_ground_atom(data.atom),
                ));
            }
        }

        let function_values: HashMap<GroundFunctionId, f64> =
            problem.numeric_fluents.iter().copied().collect();

        let static_set = AssignmentSet::<Static>::new(&factories, problem.static_atoms.iter());

        let mut graphs = HashMap::new();
        for &schema_id in &problem.domain.actions {
            let schema = factories.action_schema(schema_id);
            let precondition = ConsistencyGraph::new(
                &factories,
                &problem.objects,
                schema.arity(),
                0,
                &schema.static_conditions,
                &static_set,
            );
            let universal_effects = schema
                .universal_effects
                .iter()
                .map(|universal| {
                    ConsistencyGraph::new(
                        &factories,
                        &problem.objects,
                        universal.arity(),
                        schema.arity(),
                        &universal.static_conditions,
                        &static_set,
                    )
                })
                .collect();
            graphs.insert(
                schema_id,
                SchemaGraphs {
                    precondition,
                    universal_effects,
                },
            );
        }

        let axiom_evaluator = AxiomEvaluator::new(&problem, &factories, &static_set)?;

        tracing::debug!(
            num_schemas = problem.domain.actions.len(),
            num_objects = problem.objects.len(),
            "built lifted generator"
        );

        Ok(LiftedGenerator {
            problem,
            factories,
            handler,
            actions: Vec::new(),
            groundings: HashMap::new(),
            graphs,
            function_values,
            axiom_evaluator,
        })
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn factories(&self) -> &Factories {
        &self.factories
    }

    pub fn factories_mut(&mut self) -> &mut Factories {
        &mut self.factories
    }

    pub fn handler(&self) -> &SharedEventHandler {
        &self.handler
    }

    pub fn action(&self, id: GroundActionId) -> &GroundActionData {
        &self.actions[id.index()]
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn axiom(&self, id: GroundAxiomId) -> &GroundAxiomData {
        self.axiom_evaluator.axiom(id)
    }

    pub fn axiom_partitions(&self) -> &[AxiomPartition] {
        self.axiom_evaluator.partitions()
    }

    /// Ground axioms observed applicable so far, in first-seen order.
    pub fn applicable_axioms(&self) -> &[GroundAxiomId] {
        self.axiom_evaluator.applicable_axioms()
    }

    /// Recover the problem and factories, consuming the generator.
    pub fn into_parts(self) -> (Problem, Factories) {
        (self.problem, self.factories)
    }

    /// Ground an action schema under a binding, with at-most-once semantics
    /// per (schema, binding) pair across the generator's lifetime.
    pub fn ground_action(
        &mut self,
        schema_id: ActionSchemaId,
        binding: Vec<ObjectId>,
    ) -> Result<GroundActionId> {
        if let Some(&cached) = self
            .groundings
            .get(&schema_id)
            .and_then(|table| table.get(&binding))
        {
            self.handler.borrow_mut().on_ground_action_cache_hit();
            return Ok(cached);
        }
        self.handler.borrow_mut().on_ground_action_cache_miss();

        let schema = self.factories.action_schema(schema_id).clone();

        let cost = evaluate_function_expression(
            &schema.cost,
            &binding,
            &mut self.factories,
            &self.function_values,
        )?;

        let mut precondition = StripsPrecondition::default();
        ground_literals_into(
            &mut self.factories,
            &schema.static_conditions,
            &binding,
            &mut precondition.positive_static,
            &mut precondition.negative_static,
        );
        ground_literals_into(
            &mut self.factories,
            &schema.fluent_conditions,
            &binding,
            &mut precondition.positive_fluent,
            &mut precondition.negative_fluent,
        );
        ground_literals_into(
            &mut self.factories,
            &schema.derived_conditions,
            &binding,
            &mut precondition.positive_derived,
            &mut precondition.negative_derived,
        );

        let mut effect = StripsEffect::default();
        for &literal in &schema.strips_effects {
            let grounded = self.factories.ground_literal(literal, &binding);
            if grounded.negated {
                effect.negative.insert(grounded.atom);
            } else {
                effect.positive.insert(grounded.atom);
            }
        }

        let mut conditional_effects = Vec::with_capacity(schema.conditional_effects.len());
        for conditional in &schema.conditional_effects {
            conditional_effects.push(ground_conditional(
                &mut self.factories,
                &conditional.static_conditions,
                &conditional.fluent_conditions,
                &conditional.derived_conditions,
                conditional.effect,
                &binding,
            ));
        }

        // Universal effects expand into one conditional effect per full
        // binding of the quantified variables. The extended binding keeps
        // the action binding as its prefix; the original binding stays the
        // cache key.
        if !schema.universal_effects.is_empty() {
            let graphs = &self.graphs[&schema_id];
            let factories = &mut self.factories;
            let mut extended = binding.clone();
            for (universal, graph) in schema
                .universal_effects
                .iter()
                .zip(&graphs.universal_effects)
            {
                for_each_combination(graph.objects_by_parameter(), |combination| {
                    extended.truncate(binding.len());
                    extended.extend_from_slice(combination);
                    conditional_effects.push(ground_conditional(
                        factories,
                        &universal.static_conditions,
                        &universal.fluent_conditions,
                        &universal.derived_conditions,
                        universal.effect,
                        &extended,
                    ));
                });
            }
        }

        let id = GroundActionId::new(self.actions.len() as u32);
        self.actions.push(GroundActionData {
            schema: schema_id,
            binding: binding.clone(),
            cost: cost as i32,
            precondition,
            effect,
            conditional_effects,
        });
        self.groundings
            .entry(schema_id)
            .or_default()
            .insert(binding, id);
        Ok(id)
    }

    /// Ground an axiom under a binding through the axiom evaluator's cache.
    pub fn ground_axiom(&mut self, axiom_id: AxiomId, binding: Vec<ObjectId>) -> GroundAxiomId {
        let axiom = self.factories.axiom(axiom_id).clone();
        self.axiom_evaluator.ground_axiom(
            axiom_id,
            &axiom,
            binding,
            &mut self.factories,
            &self.handler,
        )
    }

    /// Enumerate all ground actions applicable in the state.
    pub fn applicable_actions(
        &mut self,
        state: &StateData,
        out: &mut Vec<GroundActionId>,
    ) -> Result<()> {
        out.clear();

        let fluent_set = AssignmentSet::<Fluent>::new(&self.factories, state.fluent.iter());
        let derived_set = AssignmentSet::<Derived>::new(&self.factories, state.derived.iter());

        let schemas = self.problem.domain.actions.clone();
        for schema_id in schemas {
            let schema = self.factories.action_schema(schema_id).clone();

            // Nullary literals never restrict the graphs; screen them first.
            if !nullary_fluent_literals_hold(
                &mut self.factories,
                &schema.fluent_conditions,
                &state.fluent,
            ) || !nullary_derived_literals_hold(
                &mut self.factories,
                &schema.derived_conditions,
                &state.derived,
            ) {
                continue;
            }

            let bindings = consistent_bindings(
                &self.factories,
                &self.graphs[&schema_id].precondition,
                schema.arity(),
                &schema.fluent_conditions,
                &schema.derived_conditions,
                &fluent_set,
                &derived_set,
            );

            for binding in bindings {
                let id = self.ground_action(schema_id, binding)?;
                if self.actions[id.index()].is_applicable(state, &self.problem.static_atoms) {
                    out.push(id);
                } else {
                    self.handler.borrow_mut().on_inapplicable_grounded_action();
                }
            }
        }
        Ok(())
    }

    /// Compute the derived fixed point of `fluent` into `derived`.
    pub fn evaluate_axioms(&mut self, fluent: &FactBitset<Fluent>, derived: &mut FactBitset<Derived>) {
        self.axiom_evaluator.evaluate(
            &self.problem,
            &mut self.factories,
            &self.handler,
            fluent,
            derived,
        );
    }
}

fn ground_conditional(
    factories: &mut Factories,
    static_conditions: &[LiteralId<Static>],
    fluent_conditions: &[LiteralId<Fluent>],
    derived_conditions: &[LiteralId<Derived>],
    effect: LiteralId<Fluent>,
    binding: &[ObjectId],
) -> ConditionalEffectData {
    let mut precondition = StripsPrecondition::default();
    ground_literals_into(
        factories,
        static_conditions,
        binding,
        &mut precondition.positive_static,
        &mut precondition.negative_static,
    );
    ground_literals_into(
        factories,
        fluent_conditions,
        binding,
        &mut precondition.positive_fluent,
        &mut precondition.negative_fluent,
    );
    ground_literals_into(
        factories,
        derived_conditions,
        binding,
        &mut precondition.positive_derived,
        &mut precondition.negative_derived,
    );
    let grounded = factories.ground_literal(effect, binding);
    ConditionalEffectData {
        precondition,
        effect: SimpleEffect {
            atom: grounded.atom,
            negated: grounded.negated,
        },
    }
}

/// Fold a cost expression to a value under a binding.
///
/// Function terms resolve against the problem's ground function values; a
/// missing entry is a fatal evaluation error.
fn evaluate_function_expression(
    expression: &FunctionExpression,
    binding: &[ObjectId],
    factories: &mut Factories,
    values: &HashMap<GroundFunctionId, f64>,
) -> Result<f64> {
    match expression {
        FunctionExpression::Number(number) => Ok(*number),
        FunctionExpression::Minus(inner) => {
            Ok(-evaluate_function_expression(inner, binding, factories, values)?)
        }
        FunctionExpression::Binary { op, left, right } => {
            let left = evaluate_function_expression(left, binding, factories, values)?;
            let right = evaluate_function_expression(right, binding, factories, values)?;
            Ok(op.apply(left, right))
        }
        FunctionExpression::Multi { op, operands } => {
            let mut accumulator = op.identity();
            for operand in operands {
                let value = evaluate_function_expression(operand, binding, factories, values)?;
                accumulator = op.apply(accumulator, value);
            }
            Ok(accumulator)
        }
        FunctionExpression::Function(function_id) => {
            let (skeleton, terms) = {
                let function = factories.function(*function_id);
                (function.skeleton, function.terms.clone())
            };
            let objects = factories.ground_terms(&terms, binding);
            let ground = factories.get_or_create_ground_function(skeleton, objects);
            values
                .get(&ground)
                .copied()
                .ok_or_else(|| PlanningError::Evaluation(factories.display_ground_function(ground)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formalism::{BinaryOperator, Term};

    #[test]
    fn test_evaluate_constant_expression() {
        let mut factories = Factories::new();
        let values = HashMap::new();

        let expression = FunctionExpression::Binary {
            op: BinaryOperator::Add,
            left: Box::new(FunctionExpression::Number(2.0)),
            right: Box::new(FunctionExpression::Minus(Box::new(
                FunctionExpression::Number(0.5),
            ))),
        };
        let value =
            evaluate_function_expression(&expression, &[], &mut factories, &values).unwrap();
        assert_eq!(value, 1.5);
    }

    #[test]
    fn test_evaluate_function_lookup() {
        let mut factories = Factories::new();
        let skeleton = factories.get_or_create_function_skeleton("distance", 2);
        let x = factories.get_or_create_variable("x", 0);
        let y = factories.get_or_create_variable("y", 1);
        let function =
            factories.get_or_create_function(skeleton, vec![Term::Variable(x), Term::Variable(y)]);

        let a = factories.get_or_create_object("a");
        let b = factories.get_or_create_object("b");
        let ground = factories.get_or_create_ground_function(skeleton, vec![a, b]);

        let mut values = HashMap::new();
        values.insert(ground, 7.0);

        let expression = FunctionExpression::Function(function);
        let value =
            evaluate_function_expression(&expression, &[a, b], &mut factories, &values).unwrap();
        assert_eq!(value, 7.0);

        // Unknown ground function is a hard error.
        let result = evaluate_function_expression(&expression, &[b, a], &mut factories, &values);
        assert!(matches!(result, Err(PlanningError::Evaluation(_))));
    }
}
