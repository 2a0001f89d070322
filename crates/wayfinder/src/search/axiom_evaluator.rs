//! Axiom stratification and fixed-point evaluation.
//!
//! Derived predicates are stratified by their dependency graph: an axiom
//! whose body mentions a derived predicate depends on that predicate, and a
//! dependency through a negated literal must cross strictly upward between
//! strata. A negative cycle makes the semantics ill-defined and rejects the
//! problem. Within a stratum, applicable ground axioms are applied until
//! the derived bitset stops changing; the bitset grows monotonically, so
//! the fixed point terminates.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{PlanningError, Result};
use crate::formalism::{AxiomData, AxiomId, Derived, Factories, Fluent, ObjectId, Problem, Static};

use super::assignment_set::AssignmentSet;
use super::bitset::FactBitset;
use super::consistency_graph::{consistent_bindings, ConsistencyGraph};
use super::event_handlers::SharedEventHandler;
use super::ground_axiom::{GroundAxiomData, GroundAxiomId};
use super::ground_action::StripsPrecondition;
use super::grounding::{
    ground_literals_into, nullary_derived_literals_hold, nullary_fluent_literals_hold,
};

/// One stratum of the axiom stratification.
#[derive(Debug, Clone)]
pub struct AxiomPartition {
    axioms: Vec<AxiomId>,
    members: HashSet<AxiomId>,
}

impl AxiomPartition {
    fn new(axioms: Vec<AxiomId>) -> Self {
        let members = axioms.iter().copied().collect();
        AxiomPartition { axioms, members }
    }

    pub fn axioms(&self) -> &[AxiomId] {
        &self.axioms
    }

    pub fn contains(&self, axiom: AxiomId) -> bool {
        self.members.contains(&axiom)
    }
}

/// Partition the problem's axioms into strata, lowest first.
///
/// Fails with [`PlanningError::Stratification`] when some derived predicate
/// transitively depends on itself through a negated body literal.
pub fn stratify(problem: &Problem, factories: &Factories) -> Result<Vec<AxiomPartition>> {
    if problem.axioms.is_empty() {
        return Ok(Vec::new());
    }

    let num_derived = factories.predicate_count::<Derived>();

    // Direct dependencies: body predicate -> head predicate, with polarity.
    let mut incoming: Vec<Vec<(usize, bool)>> = vec![Vec::new(); num_derived];
    let mut outgoing: Vec<Vec<(usize, bool)>> = vec![Vec::new(); num_derived];
    for &axiom_id in &problem.axioms {
        let axiom = factories.axiom(axiom_id);
        let head = head_predicate_index(factories, axiom);
        for &body_id in &axiom.derived_conditions {
            let body = factories.literal(body_id);
            let body_predicate = factories.atom(body.atom).predicate.index();
            incoming[head].push((body_predicate, body.negated));
            outgoing[body_predicate].push((head, body.negated));
        }
    }

    // Reject cycles carrying a negated dependency. Search the product graph
    // of (predicate, seen-negative-edge) nodes from each predicate.
    for start in 0..num_derived {
        let mut visited = vec![[false; 2]; num_derived];
        let mut queue = VecDeque::new();
        visited[start][0] = true;
        queue.push_back((start, false));

        while let Some((predicate, negative_seen)) = queue.pop_front() {
            for &(next, negated) in &outgoing[predicate] {
                let next_negative = negative_seen || negated;
                if next == start && next_negative {
                    let name = derived_predicate_name(factories, start);
                    return Err(PlanningError::Stratification(name));
                }
                let slot = next_negative as usize;
                if !visited[next][slot] {
                    visited[next][slot] = true;
                    queue.push_back((next, next_negative));
                }
            }
        }
    }

    // Assign levels: a positive dependency keeps the level, a negative one
    // raises it. Converges because negative dependencies are acyclic.
    let mut level = vec![0usize; num_derived];
    loop {
        let mut changed = false;
        for head in 0..num_derived {
            for &(body, negated) in &incoming[head] {
                let required = level[body] + usize::from(negated);
                if level[head] < required {
                    level[head] = required;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }

    let max_level = level.iter().copied().max().unwrap_or(0);
    let mut partitions = Vec::new();
    for current in 0..=max_level {
        let axioms: Vec<AxiomId> = problem
            .axioms
            .iter()
            .copied()
            .filter(|&axiom_id| {
                let axiom = factories.axiom(axiom_id);
                level[head_predicate_index(factories, axiom)] == current
            })
            .collect();
        if !axioms.is_empty() {
            partitions.push(AxiomPartition::new(axioms));
        }
    }
    Ok(partitions)
}

fn head_predicate_index(factories: &Factories, axiom: &AxiomData) -> usize {
    let head = factories.literal(axiom.head);
    factories.atom(head.atom).predicate.index()
}

fn derived_predicate_name(factories: &Factories, index: usize) -> String {
    let id: crate::formalism::PredicateId<Derived> =
        crate::formalism::PredicateId::new(index as u32);
    factories.predicate(id).name.clone()
}

/// Grounds axioms lazily and computes the derived fixed point of a state.
pub struct AxiomEvaluator {
    partitions: Vec<AxiomPartition>,
    graphs: HashMap<AxiomId, ConsistencyGraph>,
    axioms: Vec<GroundAxiomData>,
    groundings: HashMap<AxiomId, HashMap<Vec<ObjectId>, GroundAxiomId>>,
    /// Ground axioms observed applicable in some evaluation, in first-seen
    /// order; consumed by the grounded generator's setup.
    applicable: Vec<GroundAxiomId>,
    applicable_members: HashSet<GroundAxiomId>,
}

impl AxiomEvaluator {
    pub fn new(
        problem: &Problem,
        factories: &Factories,
        static_set: &AssignmentSet<Static>,
    ) -> Result<Self> {
        let partitions = stratify(problem, factories)?;

        let mut graphs = HashMap::new();
        for &axiom_id in &problem.axioms {
            let axiom = factories.axiom(axiom_id);
            let graph = ConsistencyGraph::new(
                factories,
                &problem.objects,
                axiom.arity(),
                0,
                &axiom.static_conditions,
                static_set,
            );
            graphs.insert(axiom_id, graph);
        }

        tracing::debug!(
            num_axioms = problem.axioms.len(),
            num_strata = partitions.len(),
            "stratified axioms"
        );

        Ok(AxiomEvaluator {
            partitions,
            graphs,
            axioms: Vec::new(),
            groundings: HashMap::new(),
            applicable: Vec::new(),
            applicable_members: HashSet::new(),
        })
    }

    pub fn partitions(&self) -> &[AxiomPartition] {
        &self.partitions
    }

    pub fn axiom(&self, id: GroundAxiomId) -> &GroundAxiomData {
        &self.axioms[id.index()]
    }

    pub fn axiom_count(&self) -> usize {
        self.axioms.len()
    }

    /// Ground axioms observed applicable so far, in first-seen order.
    pub fn applicable_axioms(&self) -> &[GroundAxiomId] {
        &self.applicable
    }

    /// Ground an axiom under a binding, with at-most-once semantics per
    /// (axiom, binding) pair.
    pub fn ground_axiom(
        &mut self,
        axiom_id: AxiomId,
        axiom: &AxiomData,
        binding: Vec<ObjectId>,
        factories: &mut Factories,
        handler: &SharedEventHandler,
    ) -> GroundAxiomId {
        if let Some(&cached) = self
            .groundings
            .get(&axiom_id)
            .and_then(|table| table.get(&binding))
        {
            handler.borrow_mut().on_ground_axiom_cache_hit();
            return cached;
        }
        handler.borrow_mut().on_ground_axiom_cache_miss();

        let mut precondition = StripsPrecondition::default();
        ground_literals_into(
            factories,
            &axiom.static_conditions,
            &binding,
            &mut precondition.positive_static,
            &mut precondition.negative_static,
        );
        ground_literals_into(
            factories,
            &axiom.fluent_conditions,
            &binding,
            &mut precondition.positive_fluent,
            &mut precondition.negative_fluent,
        );
        ground_literals_into(
            factories,
            &axiom.derived_conditions,
            &binding,
            &mut precondition.positive_derived,
            &mut precondition.negative_derived,
        );

        let head = factories.ground_literal(axiom.head, &binding);
        debug_assert!(!head.negated, "axiom heads are always positive");

        let id = GroundAxiomId::new(self.axioms.len() as u32);
        self.axioms.push(GroundAxiomData {
            axiom: axiom_id,
            binding: binding.clone(),
            precondition,
            effect: head.atom,
        });
        self.groundings
            .entry(axiom_id)
            .or_default()
            .insert(binding, id);
        id
    }

    /// Compute the derived fixed point of `fluent` into `derived`.
    ///
    /// Strata are saturated in order; within a stratum, the consistency
    /// machinery re-enumerates candidate bindings whenever the derived
    /// bitset grew, because new derived atoms can enable further bindings.
    pub fn evaluate(
        &mut self,
        problem: &Problem,
        factories: &mut Factories,
        handler: &SharedEventHandler,
        fluent: &FactBitset<Fluent>,
        derived: &mut FactBitset<Derived>,
    ) {
        if self.partitions.is_empty() {
            return;
        }

        let fluent_set = AssignmentSet::<Fluent>::new(factories, fluent.iter());

        for partition_index in 0..self.partitions.len() {
            let axiom_ids = self.partitions[partition_index].axioms.to_vec();
            loop {
                let mut changed = false;
                let derived_set = AssignmentSet::<Derived>::new(factories, derived.iter());

                for &axiom_id in &axiom_ids {
                    let axiom = factories.axiom(axiom_id).clone();

                    if !nullary_fluent_literals_hold(factories, &axiom.fluent_conditions, fluent)
                        || !nullary_derived_literals_hold(
                            factories,
                            &axiom.derived_conditions,
                            derived,
                        )
                    {
                        continue;
                    }

                    let bindings = consistent_bindings(
                        factories,
                        &self.graphs[&axiom_id],
                        axiom.arity(),
                        &axiom.fluent_conditions,
                        &axiom.derived_conditions,
                        &fluent_set,
                        &derived_set,
                    );

                    for binding in bindings {
                        let ground_id =
                            self.ground_axiom(axiom_id, &axiom, binding, factories, handler);
                        let ground = &self.axioms[ground_id.index()];
                        if ground
                            .precondition
                            .holds_on(fluent, derived, &problem.static_atoms)
                        {
                            if self.applicable_members.insert(ground_id) {
                                self.applicable.push(ground_id);
                            }
                            let effect = ground.effect;
                            if !derived.contains(effect) {
                                derived.insert(effect);
                                changed = true;
                            }
                        } else {
                            handler.borrow_mut().on_inapplicable_grounded_axiom();
                        }
                    }
                }

                if !changed {
                    break;
                }
            }
        }
    }
}
