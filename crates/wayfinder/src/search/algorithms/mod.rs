//! Search algorithms and their shared node bookkeeping.

pub mod astar;
pub mod brfs;

use std::time::Instant;

use crate::config::{process_memory_mb, SearchConfig};

use super::generator::GeneratorOps;
use super::ground_action::GroundActionId;
use super::plan::Plan;
use super::state::StateId;

pub use astar::AStarSearch;
pub use brfs::BreadthFirstSearch;

/// Outcome of `find_solution`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Solved,
    Exhausted,
    OutOfTime,
    OutOfMemory,
    Failed,
}

impl SearchStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchStatus::Solved => "solved",
            SearchStatus::Exhausted => "exhausted",
            SearchStatus::OutOfTime => "out-of-time",
            SearchStatus::OutOfMemory => "out-of-memory",
            SearchStatus::Failed => "failed",
        }
    }
}

/// Lifecycle of a search node.
///
/// Generation moves New to Open, expansion moves Open to Closed, and a
/// dead-end heuristic value moves New to DeadEnd.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchNodeStatus {
    #[default]
    New,
    Open,
    Closed,
    DeadEnd,
}

/// Per-state search bookkeeping, indexed by state id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchNode {
    pub status: SearchNodeStatus,
    pub g_value: u64,
    pub parent: Option<StateId>,
    pub creating_action: Option<GroundActionId>,
}

/// Growable table of search nodes; absent ids materialize with defaults.
#[derive(Debug, Default)]
pub struct SearchNodeTable {
    nodes: Vec<SearchNode>,
}

impl SearchNodeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, id: StateId) -> SearchNode {
        self.nodes.get(id.index()).copied().unwrap_or_default()
    }

    pub fn node_mut(&mut self, id: StateId) -> &mut SearchNode {
        if self.nodes.len() <= id.index() {
            self.nodes.resize_with(id.index() + 1, SearchNode::default);
        }
        &mut self.nodes[id.index()]
    }
}

/// Reconstruct the plan by following parent pointers from a goal state.
pub(crate) fn extract_plan<G: GeneratorOps>(
    table: &SearchNodeTable,
    generator: &G,
    goal: StateId,
) -> Plan {
    let mut actions = Vec::new();
    let mut current = table.node(goal);
    while let (Some(parent), Some(action)) = (current.parent, current.creating_action) {
        actions.push(action);
        current = table.node(parent);
    }
    actions.reverse();

    let cost = actions
        .iter()
        .map(|&action| generator.action(action).cost.max(0) as u64)
        .sum();

    Plan { actions, cost }
}

/// Poll the search budget at an expansion boundary.
pub(crate) fn check_budget(config: &SearchConfig, start: Instant) -> Option<SearchStatus> {
    if let Some(flag) = &config.cancellation {
        if flag.load(std::sync::atomic::Ordering::Relaxed) {
            return Some(SearchStatus::OutOfTime);
        }
    }
    if let Some(timeout) = config.timeout {
        if start.elapsed() > timeout {
            return Some(SearchStatus::OutOfTime);
        }
    }
    if let Some(limit) = config.memory_limit_mb {
        if let Some(used) = process_memory_mb() {
            if used >= limit {
                return Some(SearchStatus::OutOfMemory);
            }
        }
    }
    None
}
