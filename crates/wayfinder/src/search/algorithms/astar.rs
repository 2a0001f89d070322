//! A* search.
//!
//! A priority queue keyed by `f = g + h` with a pluggable heuristic. With
//! the blind heuristic this is uniform-cost search; with an admissible and
//! consistent heuristic the returned plan is cost-minimal. Stale queue
//! entries are skipped lazily on pop; ties on `f` break by insertion order
//! so the search stays deterministic.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Instant;

use crate::config::SearchConfig;
use crate::error::Result;
use crate::formalism::{Derived, Fluent, GroundLiteralData, Static};

use super::super::generator::GeneratorOps;
use super::super::heuristic::{is_dead_end, Heuristic};
use super::super::plan::{render_plan, Plan};
use super::super::state::StateId;
use super::super::successor::StateRepository;
use super::{check_budget, extract_plan, SearchNodeStatus, SearchNodeTable, SearchStatus};

/// One open-list entry. Ordered so that the binary heap pops the smallest
/// `f` first, FIFO among equal `f`.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    f_value: f64,
    g_value: u64,
    sequence: u64,
    state: StateId,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f_value
            .total_cmp(&self.f_value)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// A* over a generator, a state repository, and a heuristic.
pub struct AStarSearch<'a, G: GeneratorOps, H: Heuristic> {
    generator: &'a mut G,
    repository: &'a mut StateRepository,
    heuristic: H,
    config: SearchConfig,
}

impl<'a, G: GeneratorOps, H: Heuristic> AStarSearch<'a, G, H> {
    pub fn new(generator: &'a mut G, repository: &'a mut StateRepository, heuristic: H) -> Self {
        AStarSearch {
            generator,
            repository,
            heuristic,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(
        generator: &'a mut G,
        repository: &'a mut StateRepository,
        heuristic: H,
        config: SearchConfig,
    ) -> Self {
        AStarSearch {
            generator,
            repository,
            heuristic,
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

        let static_goal_holds = static_goal
            .iter()
            .all(|literal| problem.static_atoms.contains(literal.atom) != literal.negated);
        if !static_goal_holds {
            handler.borrow_mut().on_end_search();
            handler.borrow_mut().on_exhausted();
            return Ok(SearchStatus::Exhausted);
        }

        let mut table = SearchNodeTable::new();
        let mut open: BinaryHeap<QueueEntry> = BinaryHeap::new();
        let mut sequence: u64 = 0;
        let mut f_layer: Option<u64> = None;
        let mut applicable = Vec::new();

        let initial_h = self.heuristic.compute(self.repository.state(initial));
        if is_dead_end(initial_h) {
            table.node_mut(initial).status = SearchNodeStatus::DeadEnd;
            handler.borrow_mut().on_dead_end_state();
            handler.borrow_mut().on_end_search();
            handler.borrow_mut().on_exhausted();
            return Ok(SearchStatus::Exhausted);
        }

        {
            let node = table.node_mut(initial);
            node.status = SearchNodeStatus::Open;
            node.g_value = 0;
        }
        open.push(QueueEntry {
            f_value: initial_h,
            g_value: 0,
            sequence,
            state: initial,
        });

        while let Some(entry) = open.pop() {
            // Lazy deletion: skip entries superseded by a cheaper path or
            // an earlier expansion.
            let node = table.node(entry.state);
            if node.status == SearchNodeStatus::Closed || entry.g_value > node.g_value {
                continue;
            }

            let goal_reached = {
                let state = self.repository.state(entry.state);
                state.literals_hold(fluent_goal.iter().copied())
                    && state.literals_hold(derived_goal.iter().copied())
            };
            if goal_reached {
                *out_plan = extract_plan(&table, self.generator, entry.state);
                handler.borrow_mut().on_end_search();
                let steps = render_plan(self.generator, out_plan);
                handler.borrow_mut().on_solved(&steps, out_plan.cost);
                return Ok(SearchStatus::Solved);
            }

            table.node_mut(entry.state).status = SearchNodeStatus::Closed;

            let layer = entry.f_value as u64;
            if f_layer.map_or(true, |previous| layer > previous) {
                if f_layer.is_some() {
                    handler
                        .borrow_mut()
                        .on_finish_f_layer(layer, self.repository.len() as u64);
                }
                f_layer = Some(layer);
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
                .applicable_actions(self.repository.data(entry.state), &mut applicable)?;

            for &action in &applicable {
                let successor = self
                    .repository
                    .successor_state(entry.state, action, self.generator);
                handler.borrow_mut().on_generate_state();

                let action_cost = self.generator.action(action).cost.max(0) as u64;
                let tentative_g = entry.g_value + action_cost;

                let node = table.node(successor);
                match node.status {
                    SearchNodeStatus::DeadEnd => continue,
                    SearchNodeStatus::New => {
                        let h = self.heuristic.compute(self.repository.state(successor));
                        if is_dead_end(h) {
                            table.node_mut(successor).status = SearchNodeStatus::DeadEnd;
                            handler.borrow_mut().on_dead_end_state();
                            continue;
                        }
                        let node = table.node_mut(successor);
                        node.status = SearchNodeStatus::Open;
                        node.g_value = tentative_g;
                        node.parent = Some(entry.state);
                        node.creating_action = Some(action);
                        sequence += 1;
                        open.push(QueueEntry {
                            f_value: tentative_g as f64 + h,
                            g_value: tentative_g,
                            sequence,
                            state: successor,
                        });
                    }
                    SearchNodeStatus::Open | SearchNodeStatus::Closed => {
                        if tentative_g < node.g_value {
                            let h = self.heuristic.compute(self.repository.state(successor));
                            let node = table.node_mut(successor);
                            node.status = SearchNodeStatus::Open;
                            node.g_value = tentative_g;
                            node.parent = Some(entry.state);
                            node.creating_action = Some(action);
                            sequence += 1;
                            open.push(QueueEntry {
                                f_value: tentative_g as f64 + h,
                                g_value: tentative_g,
                                sequence,
                                state: successor,
                            });
                        }
                    }
                }
            }
        }

        handler.borrow_mut().on_end_search();
        handler.borrow_mut().on_exhausted();
        Ok(SearchStatus::Exhausted)
    }
}
