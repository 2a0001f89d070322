//! Breadth-first search.
//!
//! Unit-cost optimal: the first visit to a state fixes its parent, and the
//! goal test runs when a state is popped. The generator produces state
//! indices in a deterministic order, so the whole search is deterministic
//! for a given generator.

use std::collections::VecDeque;
use std::time::Instant;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::formalism::{Derived, Fluent, GroundLiteralData, Static};

use super::super::generator::GeneratorOps;
use super::super::plan::{render_plan, Plan};
use super::super::successor::StateRepository;
use super::{check_budget, extract_plan, SearchNodeStatus, SearchNodeTable, SearchStatus};

/// Breadth-first search over a generator and a state repository.
pub struct BreadthFirstSearch<'a, G: GeneratorOps> {
    generator: &'a mut G,
    repository: &'a mut StateRepository,
    config: SearchConfig,
}

impl<'a, G: GeneratorOps> BreadthFirstSearch<'a, G> {
    pub fn new(generator: &'a mut G, repository: &'a mut StateRepository) -> Self {
        BreadthFirstSearch {
            generator,
            repository,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(
        generator: &'a mut G,
        repository: &'a mut StateRepository,
        config: SearchConfig,
    ) -> Self {
        BreadthFirstSearch {
            generator,
            repository,
            config,
        }
    }

    /// Run the search; on `Solved` the plan is written into `out_plan`.
    pub fn find_solution(&mut self, out_plan: &mut Plan) -> Result<SearchStatus> {
        out_plan.clear();

        let handler = self.generator.handler().clone();
        handler.borrow_mut().on_start_search();
        let start = Instant::now();

        let initial = self.repository.initial_state(self.generator)?;

        let factories = self.generator.factories();
        let problem = self.generator.problem();
        let static_goal: Vec<GroundLiteralData<Static>> = problem
            .static_goal
            .iter()
            .map(|&literal| factories.ground_literal_data(literal))
            .collect();
        let fluent_goal: Vec<GroundLiteralData<Fluent>> = problem
            .fluent_goal
            .iter()
            .map(|&literal| factories.ground_literal_data(literal))
            .collect();
        let derived_goal: Vec<GroundLiteralData<Derived>> = problem
            .derived_goal
            .iter()
            .map(|&literal| factories.ground_literal_data(literal))
            .collect();

        // The static goal part never changes; evaluate it once.
        let static_goal_holds = static_goal
            .iter()
            .all(|literal| problem.static_atoms.contains(literal.atom) != literal.negated);
        if !static_goal_holds {
            handler.borrow_mut().on_end_search();
            handler.borrow_mut().on_exhausted();
            return Ok(SearchStatus::Exhausted);
        }

        let mut table = SearchNodeTable::new();
        {
            let node = table.node_mut(initial);
            node.status = SearchNodeStatus::Open;
            node.g_value = 0;
        }

        let mut queue = VecDeque::new();
        queue.push_back(initial);

        let mut current_layer: u64 = 0;
        let mut applicable = Vec::new();

        while let Some(state_id) = queue.pop_front() {
            let goal_reached = {
                let state = self.repository.state(state_id);
                state.literals_hold(fluent_goal.iter().copied())
                    && state.literals_hold(derived_goal.iter().copied())
            };
            if goal_reached {
                *out_plan = extract_plan(&table, self.generator, state_id);
                handler.borrow_mut().on_end_search();
                let steps = render_plan(self.generator, out_plan);
                handler.borrow_mut().on_solved(&steps, out_plan.cost);
                return Ok(SearchStatus::Solved);
            }

            let g_value = {
                let node = table.node_mut(state_id);
                node.status = SearchNodeStatus::Closed;
                node.g_value
            };

            if g_value > current_layer {
                current_layer = g_value;
                handler
                    .borrow_mut()
                    .on_finish_f_layer(current_layer, self.repository.len() as u64);
            }

            if let Some(status) = check_budget(&self.config, start) {
                handler.borrow_mut().on_end_search();
                match status {
                    SearchStatus::OutOfMemory => handler.borrow_mut().on_out_of_memory(),
                    _ => handler.borrow_mut().on_out_of_time(),
                }
                return Ok(status);
            }

            handler.borrow_mut().on_expand_state();

            self.generator
                .applicable_actions(self.repository.data(state_id), &mut applicable)?;

            for &action in &applicable {
                let successor = self
                    .repository
                    .successor_state(state_id, action, self.generator);
                handler.borrow_mut().on_generate_state();

                let node = table.node_mut(successor);
                if node.status == SearchNodeStatus::New {
                    node.status = SearchNodeStatus::Open;
                    node.g_value = g_value + 1;
                    node.parent = Some(state_id);
                    node.creating_action = Some(action);
                    queue.push_back(successor);
                }
            }
        }

        handler.borrow_mut().on_end_search();
        handler.borrow_mut().on_exhausted();
        Ok(SearchStatus::Exhausted)
    }
}
