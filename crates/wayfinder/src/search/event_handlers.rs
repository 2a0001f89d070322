//! Search event handlers.
//!
//! The generators and the search algorithms report progress through a
//! single observer interface. Default trait methods do the counting into
//! the handler's [`Statistics`]; implementations override the reporting
//! events to print. Three flavors ship: [`DefaultEventHandler`] (progress
//! per f-layer plus the plan), [`MinimalEventHandler`] (final summary
//! only), and [`DebugEventHandler`] (verbose, per-state).
//!
//! Handlers are shared between a generator and its search via
//! `Rc<RefCell<_>>`; the engine is single-threaded (see the crate docs), so
//! the borrow discipline is: borrow, record, drop — never across a call
//! into the generator.

use std::cell::RefCell;
use std::rc::Rc;

use super::statistics::Statistics;

/// A shareable handle to an event handler.
pub type SharedEventHandler = Rc<RefCell<dyn EventHandler>>;

/// Wrap a handler for sharing between a generator and a search.
pub fn shared(handler: impl EventHandler + 'static) -> SharedEventHandler {
    Rc::new(RefCell::new(handler))
}

/// Observer interface for search and grounding events.
///
/// The default method bodies count events; overriding implementations must
/// keep the counting (delegate to `statistics_mut`) before printing.
pub trait EventHandler {
    fn statistics(&self) -> &Statistics;
    fn statistics_mut(&mut self) -> &mut Statistics;

    fn on_start_search(&mut self) {
        self.statistics_mut().start_search();
    }

    fn on_end_search(&mut self) {
        self.statistics_mut().finish_search();
    }

    fn on_expand_state(&mut self) {
        self.statistics_mut().num_expanded += 1;
    }

    fn on_generate_state(&mut self) {
        self.statistics_mut().num_generated += 1;
    }

    fn on_dead_end_state(&mut self) {
        self.statistics_mut().num_dead_ends += 1;
    }

    fn on_finish_f_layer(&mut self, f_value: u64, num_states: u64) {
        let _ = num_states;
        self.statistics_mut().record_f_layer(f_value);
    }

    fn on_ground_action_cache_hit(&mut self) {
        self.statistics_mut().ground_action_cache_hits += 1;
    }

    fn on_ground_action_cache_miss(&mut self) {
        self.statistics_mut().ground_action_cache_misses += 1;
    }

    fn on_ground_axiom_cache_hit(&mut self) {
        self.statistics_mut().ground_axiom_cache_hits += 1;
    }

    fn on_ground_axiom_cache_miss(&mut self) {
        self.statistics_mut().ground_axiom_cache_misses += 1;
    }

    fn on_inapplicable_grounded_action(&mut self) {
        self.statistics_mut().num_inapplicable_grounded_actions += 1;
    }

    fn on_inapplicable_grounded_axiom(&mut self) {
        self.statistics_mut().num_inapplicable_grounded_axioms += 1;
    }

    fn on_finish_delete_free_exploration(
        &mut self,
        num_reachable_atoms: u64,
        num_actions: u64,
        num_axioms: u64,
    ) {
        let statistics = self.statistics_mut();
        statistics.num_reachable_fluent_atoms = num_reachable_atoms;
        statistics.num_delete_free_actions = num_actions;
        statistics.num_delete_free_axioms = num_axioms;
    }

    fn on_finish_build_action_match_tree(&mut self, num_nodes: u64) {
        self.statistics_mut().num_action_match_tree_nodes = num_nodes;
    }

    fn on_finish_build_axiom_match_tree(&mut self, num_nodes: u64) {
        self.statistics_mut().num_axiom_match_tree_nodes = num_nodes;
    }

    fn on_solved(&mut self, plan_steps: &[String], cost: u64) {
        let _ = (plan_steps, cost);
    }

    fn on_exhausted(&mut self) {}

    fn on_out_of_time(&mut self) {}

    fn on_out_of_memory(&mut self) {}
}

// =============================================================================
// Default handler
// =============================================================================

/// Reports per f-layer progress, the plan, and a final summary.
#[derive(Debug, Default)]
pub struct DefaultEventHandler {
    statistics: Statistics,
}

impl DefaultEventHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for DefaultEventHandler {
    fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    fn statistics_mut(&mut self) -> &mut Statistics {
        &mut self.statistics
    }

    fn on_finish_f_layer(&mut self, f_value: u64, num_states: u64) {
        self.statistics.record_f_layer(f_value);
        println!(
            "[f = {f_value}] expanded: {}, generated: {}, states: {num_states}",
            self.statistics.num_expanded, self.statistics.num_generated
        );
    }

    fn on_end_search(&mut self) {
        self.statistics.finish_search();
        println!(
            "Expanded {} states, generated {} states in {} ms",
            self.statistics.num_expanded,
            self.statistics.num_generated,
            self.statistics.search_time_ms()
        );
    }

    fn on_solved(&mut self, plan_steps: &[String], cost: u64) {
        println!("Plan found with cost: {cost}");
        for (index, step) in plan_steps.iter().enumerate() {
            println!("{}. {step}", index + 1);
        }
    }

    fn on_exhausted(&mut self) {
        println!("Exhausted!");
    }

    fn on_out_of_time(&mut self) {
        println!("Time limit reached.");
    }

    fn on_out_of_memory(&mut self) {
        println!("Memory limit reached.");
    }
}

// =============================================================================
// Minimal handler
// =============================================================================

/// Counts everything, prints only the final summary line.
#[derive(Debug, Default)]
pub struct MinimalEventHandler {
    statistics: Statistics,
}

impl MinimalEventHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for MinimalEventHandler {
    fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    fn statistics_mut(&mut self) -> &mut Statistics {
        &mut self.statistics
    }

    fn on_end_search(&mut self) {
        self.statistics.finish_search();
        println!(
            "Num expanded states: {}\nNum generated states: {}\nSearch time: {} ms",
            self.statistics.num_expanded,
            self.statistics.num_generated,
            self.statistics.search_time_ms()
        );
    }

    fn on_solved(&mut self, _plan_steps: &[String], cost: u64) {
        println!("Plan found with cost: {cost}");
    }

    fn on_exhausted(&mut self) {
        println!("Exhausted!");
    }
}

// =============================================================================
// Debug handler
// =============================================================================

/// Verbose handler: every expansion and generation, cache behavior per
/// f-layer, and the full statistics as JSON at the end.
#[derive(Debug, Default)]
pub struct DebugEventHandler {
    statistics: Statistics,
}

impl DebugEventHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for DebugEventHandler {
    fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    fn statistics_mut(&mut self) -> &mut Statistics {
        &mut self.statistics
    }

    fn on_expand_state(&mut self) {
        self.statistics.num_expanded += 1;
        println!("expand #{}", self.statistics.num_expanded);
    }

    fn on_generate_state(&mut self) {
        self.statistics.num_generated += 1;
        println!("generate #{}", self.statistics.num_generated);
    }

    fn on_finish_f_layer(&mut self, f_value: u64, num_states: u64) {
        self.statistics.record_f_layer(f_value);
        println!(
            "[f = {f_value}] expanded: {}, generated: {}, states: {num_states}, \
             action cache: {}/{} hits, axiom cache: {}/{} hits",
            self.statistics.num_expanded,
            self.statistics.num_generated,
            self.statistics.ground_action_cache_hits,
            self.statistics.ground_action_cache_hits + self.statistics.ground_action_cache_misses,
            self.statistics.ground_axiom_cache_hits,
            self.statistics.ground_axiom_cache_hits + self.statistics.ground_axiom_cache_misses,
        );
    }

    fn on_end_search(&mut self) {
        self.statistics.finish_search();
        match serde_json::to_string_pretty(&self.statistics) {
            Ok(json) => println!("{json}"),
            Err(_) => println!("search time: {} ms", self.statistics.search_time_ms()),
        }
    }

    fn on_solved(&mut self, plan_steps: &[String], cost: u64) {
        println!("Plan found with cost: {cost}");
        for (index, step) in plan_steps.iter().enumerate() {
            println!("{}. {step}", index + 1);
        }
    }

    fn on_exhausted(&mut self) {
        println!("Exhausted!");
    }
}
