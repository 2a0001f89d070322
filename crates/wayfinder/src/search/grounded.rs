//! The grounded applicable-action generator.
//!
//! Pre-grounds every reachable action and axiom by exploring the
//! delete-relaxed task to a fixed point, maps the relaxed groundings back
//! through the unrelaxed schemas, and indexes the survivors in two match
//! trees probed over a state's fluent bitset. Applicability queries then
//! cost a tree walk plus a per-candidate verification of the static and
//! derived precondition parts.

use std::collections::{HashMap, HashSet};

use crate::error::Result;
use crate::formalism::{Derived, Factories, Fluent, GroundAtomId, PredicateId, Problem};

use super::bitset::FactBitset;
use super::delete_relax::delete_relax;
use super::event_handlers::{shared, MinimalEventHandler, SharedEventHandler};
use super::ground_action::{GroundActionData, GroundActionId};
use super::ground_axiom::GroundAxiomId;
use super::lifted::LiftedGenerator;
use super::match_tree::{MatchPolarity, MatchTree};
use super::state::StateData;
use super::successor::StateRepository;

/// Grounded generator: a lifted generator that did all its grounding up
/// front, plus the two match trees.
pub struct GroundedGenerator {
    lifted: LiftedGenerator,
    action_match_tree: MatchTree,
    axiom_match_tree: MatchTree,
}

impl GroundedGenerator {
    /// Explore the delete-relaxed task, ground the unrelaxed counterparts,
    /// and build the match trees.
    pub fn new(
        problem: Problem,
        factories: Factories,
        handler: SharedEventHandler,
    ) -> Result<Self> {
        let mut factories = factories;

        // 1. Delete-relax the problem and explore it to a fixed point with
        //    a lifted generator of its own. The exploration gets a quiet
        //    handler so the caller's statistics only reflect the real run.
        let relaxation = delete_relax(&problem, &mut factories);
        let mut relaxed =
            LiftedGenerator::new(relaxation.problem, factories, shared(MinimalEventHandler::new()))?;

        let mut repository = StateRepository::new();
        let initial = repository.initial_state(&mut relaxed)?;
        let mut atoms: FactBitset<Fluent> = repository.data(initial).fluent.clone();

        let mut explored_actions: Vec<GroundActionId> = Vec::new();
        let mut explored_members: HashSet<GroundActionId> = HashSet::new();
        let mut applicable = Vec::new();

        // Applying only newly discovered actions would be wrong: conditional
        // effects can start to fire once more atoms are reachable, so every
        // applicable action is re-applied until the atom set stabilizes.
        loop {
            let atoms_before = atoms.len();

            let state = repository.get_or_create_state(atoms.clone(), &mut relaxed);
            relaxed.applicable_actions(repository.data(state), &mut applicable)?;

            for &action in &applicable {
                if explored_members.insert(action) {
                    explored_actions.push(action);
                }
                let successor = repository.successor_state(state, action, &mut relaxed);
                atoms.union_with(&repository.data(successor).fluent);
            }

            if atoms.len() == atoms_before {
                break;
            }
        }

        let relaxed_action_instances: Vec<_> = explored_actions
            .iter()
            .map(|&id| {
                let action = relaxed.action(id);
                (action.schema, action.binding.clone())
            })
            .collect();
        let relaxed_axiom_instances: Vec<_> = relaxed
            .applicable_axioms()
            .iter()
            .map(|&id| {
                let axiom = relaxed.axiom(id);
                (axiom.axiom, axiom.binding.clone())
            })
            .collect();

        let num_reachable_atoms = atoms.len();
        let (_, factories) = relaxed.into_parts();

        // 2. Build the real lifted generator and re-ground every reachable
        //    instance through the unrelaxed schemas with the same bindings.
        let mut lifted = LiftedGenerator::new(problem, factories, handler.clone())?;

        handler.borrow_mut().on_finish_delete_free_exploration(
            num_reachable_atoms,
            relaxed_action_instances.len() as u64,
            relaxed_axiom_instances.len() as u64,
        );

        let probe_order = compute_probe_order(&atoms, lifted.factories());

        let mut ground_actions: Vec<GroundActionId> = Vec::new();
        let mut seen_actions = HashSet::new();
        for (relaxed_schema, binding) in relaxed_action_instances {
            for &origin in &relaxation.schema_origins[&relaxed_schema] {
                let id = lifted.ground_action(origin, binding.clone())?;
                if lifted
                    .action(id)
                    .is_statically_applicable(&lifted.problem().static_atoms)
                    && seen_actions.insert(id)
                {
                    ground_actions.push(id);
                }
            }
        }

        let mut ground_axioms: Vec<GroundAxiomId> = Vec::new();
        let mut seen_axioms = HashSet::new();
        for (relaxed_axiom, binding) in relaxed_axiom_instances {
            for &origin in &relaxation.axiom_origins[&relaxed_axiom] {
                let id = lifted.ground_axiom(origin, binding.clone());
                if lifted
                    .axiom(id)
                    .is_statically_applicable(&lifted.problem().static_atoms)
                    && seen_axioms.insert(id)
                {
                    ground_axioms.push(id);
                }
            }
        }

        // 3. Index both sets in match trees over the probe order.
        let action_elements: Vec<u32> = ground_actions.iter().map(|id| id.index() as u32).collect();
        let action_match_tree = {
            let lifted_ref = &lifted;
            MatchTree::build(&action_elements, &probe_order, |element, atom| {
                let action = lifted_ref.action(GroundActionId::new(element));
                precondition_polarity(
                    &action.precondition.positive_fluent,
                    &action.precondition.negative_fluent,
                    atom,
                )
            })
        };
        handler
            .borrow_mut()
            .on_finish_build_action_match_tree(action_match_tree.node_count() as u64);

        let axiom_elements: Vec<u32> = ground_axioms.iter().map(|id| id.index() as u32).collect();
        let axiom_match_tree = {
            let lifted_ref = &lifted;
            MatchTree::build(&axiom_elements, &probe_order, |element, atom| {
                let axiom = lifted_ref.axiom(GroundAxiomId::new(element));
                precondition_polarity(
                    &axiom.precondition.positive_fluent,
                    &axiom.precondition.negative_fluent,
                    atom,
                )
            })
        };
        handler
            .borrow_mut()
            .on_finish_build_axiom_match_tree(axiom_match_tree.node_count() as u64);

        tracing::debug!(
            reachable_atoms = num_reachable_atoms,
            ground_actions = ground_actions.len(),
            ground_axioms = ground_axioms.len(),
            action_tree_nodes = action_match_tree.node_count(),
            axiom_tree_nodes = axiom_match_tree.node_count(),
            "built grounded generator"
        );

        Ok(GroundedGenerator {
            lifted,
            action_match_tree,
            axiom_match_tree,
        })
    }

    pub fn problem(&self) -> &Problem {
        self.lifted.problem()
    }

    pub fn factories(&self) -> &Factories {
        self.lifted.factories()
    }

    pub fn handler(&self) -> &SharedEventHandler {
        self.lifted.handler()
    }

    pub fn action(&self, id: GroundActionId) -> &GroundActionData {
        self.lifted.action(id)
    }

    pub fn action_match_tree_size(&self) -> usize {
        self.action_match_tree.node_count()
    }

    pub fn axiom_match_tree_size(&self) -> usize {
        self.axiom_match_tree.node_count()
    }

    /// Walk the action match tree over the state's fluent atoms, then
    /// verify the static and derived precondition parts per candidate.
    pub fn applicable_actions(
        &mut self,
        state: &StateData,
        out: &mut Vec<GroundActionId>,
    ) -> Result<()> {
        out.clear();

        let mut candidates = Vec::new();
        self.action_match_tree.applicable(&state.fluent, &mut candidates);

        for raw in candidates {
            let id = GroundActionId::new(raw);
            if self
                .lifted
                .action(id)
                .is_applicable(state, &self.lifted.problem().static_atoms)
            {
                out.push(id);
            } else {
                self.lifted
                    .handler()
                    .borrow_mut()
                    .on_inapplicable_grounded_action();
            }
        }
        Ok(())
    }

    /// Saturate the derived bitset stratum by stratum through the axiom
    /// match tree.
    ///
    /// The tree probes only fluent atoms, which do not change here, so the
    /// candidate set is computed once; the per-stratum fixed point re-checks
    /// candidates against the growing derived bitset.
    pub fn evaluate_axioms(&mut self, fluent: &FactBitset<Fluent>, derived: &mut FactBitset<Derived>) {
        let mut candidates = Vec::new();
        self.axiom_match_tree.applicable(fluent, &mut candidates);
        if candidates.is_empty() {
            return;
        }

        let static_atoms = &self.lifted.problem().static_atoms;
        for partition in self.lifted.axiom_partitions() {
            loop {
                let mut changed = false;
                for &raw in &candidates {
                    let axiom = self.lifted.axiom(GroundAxiomId::new(raw));
                    if !partition.contains(axiom.axiom) {
                        continue;
                    }
                    if axiom.precondition.holds_on(fluent, derived, static_atoms)
                        && !derived.contains(axiom.effect)
                    {
                        derived.insert(axiom.effect);
                        changed = true;
                    }
                }
                if !changed {
                    break;
                }
            }
        }
    }
}

fn precondition_polarity(
    positive: &FactBitset<Fluent>,
    negative: &FactBitset<Fluent>,
    atom: GroundAtomId<Fluent>,
) -> MatchPolarity {
    if positive.contains(atom) {
        MatchPolarity::Positive
    } else if negative.contains(atom) {
        MatchPolarity::Negative
    } else {
        MatchPolarity::DontCare
    }
}

/// The probe order over the delete-free reachable fluent atoms.
///
/// Atoms of the same predicate are adjacent (they are candidate mutex
/// clusters), larger groups come first, and within a group atoms are
/// ordered by their textual representation so the order is independent of
/// interning history.
fn compute_probe_order(
    atoms: &FactBitset<Fluent>,
    factories: &Factories,
) -> Vec<GroundAtomId<Fluent>> {
    let mut by_predicate: HashMap<usize, Vec<GroundAtomId<Fluent>>> = HashMap::new();
    for atom in atoms.iter() {
        by_predicate
            .entry(factories.ground_atom(atom).predicate.index())
            .or_default()
            .push(atom);
    }

    let mut groups: Vec<(usize, Vec<GroundAtomId<Fluent>>)> = by_predicate.into_iter().collect();
    groups.sort_by(|left, right| {
        right.1.len().cmp(&left.1.len()).then_with(|| {
            let left_name = &factories.predicate(predicate_id(left.0)).name;
            let right_name = &factories.predicate(predicate_id(right.0)).name;
            left_name.cmp(right_name)
        })
    });

    let mut order = Vec::with_capacity(atoms.len() as usize);
    for (_, mut group) in groups {
        group.sort_by_key(|&atom| factories.display_ground_atom(atom));
        order.extend(group);
    }
    order
}

fn predicate_id(index: usize) -> PredicateId<Fluent> {
    PredicateId::new(index as u32)
}
