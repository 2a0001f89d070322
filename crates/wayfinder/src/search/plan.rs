//! Plans and their textual form.

use serde::Serialize;

use super::generator::GeneratorOps;
use super::ground_action::GroundActionId;

/// A solution: the ground actions from the initial state to a goal state,
/// and their total cost.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub actions: Vec<GroundActionId>,
    pub cost: u64,
}

impl Plan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn clear(&mut self) {
        self.actions.clear();
        self.cost = 0;
    }
}

/// Serializable form of a plan: one rendered step per action.
#[derive(Debug, Clone, Serialize)]
pub struct PlanDocument {
    pub actions: Vec<String>,
    pub cost: u64,
}

/// Render one ground action as `(schema-name obj₁ obj₂ …)`.
///
/// Only the schema's original parameters are shown; parameters introduced
/// by normalization are bound but hidden.
pub fn format_ground_action<G: GeneratorOps>(generator: &G, id: GroundActionId) -> String {
    let action = generator.action(id);
    let factories = generator.factories();
    let schema = factories.action_schema(action.schema);

    let mut out = format!("({}", schema.name);
    for &object in action.binding.iter().take(schema.original_arity) {
        out.push(' ');
        out.push_str(&factories.object(object).name);
    }
    out.push(')');
    out
}

/// Render every step of a plan.
pub fn render_plan<G: GeneratorOps>(generator: &G, plan: &Plan) -> Vec<String> {
    plan.actions
        .iter()
        .map(|&action| format_ground_action(generator, action))
        .collect()
}

/// Build the serializable document for a plan.
pub fn plan_document<G: GeneratorOps>(generator: &G, plan: &Plan) -> PlanDocument {
    PlanDocument {
        actions: render_plan(generator, plan),
        cost: plan.cost,
    }
}
