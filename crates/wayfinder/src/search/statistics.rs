//! Search statistics.
//!
//! A `Statistics` record accumulates the counters reported by the event
//! handlers: expansion and generation totals (cumulative per f-layer),
//! grounding-cache behavior, delete-free exploration totals, match-tree
//! sizes, and wall time. Durations serialize as `f64` seconds.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};

fn secs(d: &Duration) -> f64 {
    d.as_secs_f64()
}

/// Counters accumulated over one search run.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    // Search counters
    pub num_generated: u64,
    pub num_expanded: u64,
    pub num_dead_ends: u64,

    // Cumulative (f-value, count) pairs recorded at each finished f-layer
    pub num_generated_until_f_value: Vec<(u64, u64)>,
    pub num_expanded_until_f_value: Vec<(u64, u64)>,

    // Grounding cache behavior
    pub ground_action_cache_hits: u64,
    pub ground_action_cache_misses: u64,
    pub ground_axiom_cache_hits: u64,
    pub ground_axiom_cache_misses: u64,
    pub num_inapplicable_grounded_actions: u64,
    pub num_inapplicable_grounded_axioms: u64,

    // Grounded-generator setup totals
    pub num_reachable_fluent_atoms: u64,
    pub num_delete_free_actions: u64,
    pub num_delete_free_axioms: u64,
    pub num_action_match_tree_nodes: u64,
    pub num_axiom_match_tree_nodes: u64,

    // Wall time
    search_start: Option<Instant>,
    pub search_time: Duration,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_search(&mut self) {
        self.search_start = Some(Instant::now());
    }

    pub fn finish_search(&mut self) {
        if let Some(start) = self.search_start {
            self.search_time = start.elapsed();
        }
    }

    /// Record the cumulative counters at the end of an f-layer.
    pub fn record_f_layer(&mut self, f_value: u64) {
        self.num_generated_until_f_value
            .push((f_value, self.num_generated));
        self.num_expanded_until_f_value
            .push((f_value, self.num_expanded));
    }

    pub fn search_time_ms(&self) -> u128 {
        self.search_time.as_millis()
    }
}

impl Serialize for Statistics {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Statistics", 17)?;

        s.serialize_field("num_generated", &self.num_generated)?;
        s.serialize_field("num_expanded", &self.num_expanded)?;
        s.serialize_field("num_dead_ends", &self.num_dead_ends)?;

        s.serialize_field("num_generated_until_f_value", &self.num_generated_until_f_value)?;
        s.serialize_field("num_expanded_until_f_value", &self.num_expanded_until_f_value)?;

        s.serialize_field("ground_action_cache_hits", &self.ground_action_cache_hits)?;
        s.serialize_field("ground_action_cache_misses", &self.ground_action_cache_misses)?;
        s.serialize_field("ground_axiom_cache_hits", &self.ground_axiom_cache_hits)?;
        s.serialize_field("ground_axiom_cache_misses", &self.ground_axiom_cache_misses)?;
        s.serialize_field(
            "num_inapplicable_grounded_actions",
            &self.num_inapplicable_grounded_actions,
        )?;
        s.serialize_field(
            "num_inapplicable_grounded_axioms",
            &self.num_inapplicable_grounded_axioms,
        )?;

        s.serialize_field("num_reachable_fluent_atoms", &self.num_reachable_fluent_atoms)?;
        s.serialize_field("num_delete_free_actions", &self.num_delete_free_actions)?;
        s.serialize_field("num_delete_free_axioms", &self.num_delete_free_axioms)?;
        s.serialize_field("num_action_match_tree_nodes", &self.num_action_match_tree_nodes)?;
        s.serialize_field("num_axiom_match_tree_nodes", &self.num_axiom_match_tree_nodes)?;

        s.serialize_field("search_time", &secs(&self.search_time))?;

        s.end()
    }
}
