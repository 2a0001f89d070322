//! The search infrastructure.
//!
//! Packed states, ground actions, and ground axioms; the lifted and
//! grounded applicable-action generators with their supporting structures
//! (assignment sets, consistency graphs, clique enumeration, match trees,
//! the stratified axiom evaluator); the canonicalizing successor state
//! generator; and the search algorithms driving them.

pub mod algorithms;
pub mod assignment_set;
pub mod axiom_evaluator;
pub mod bitset;
pub mod cliques;
pub mod consistency_graph;
pub mod delete_relax;
pub mod event_handlers;
pub mod generator;
pub mod ground_action;
pub mod ground_axiom;
mod grounding;
pub mod grounded;
pub mod heuristic;
pub mod lifted;
pub mod match_tree;
pub mod plan;
pub mod state;
pub mod statistics;
pub mod successor;

pub use algorithms::{
    AStarSearch, BreadthFirstSearch, SearchNodeStatus, SearchStatus,
};
pub use assignment_set::{AssignmentSet, ParameterAssignment};
pub use axiom_evaluator::{stratify, AxiomEvaluator, AxiomPartition};
pub use bitset::FactBitset;
pub use consistency_graph::ConsistencyGraph;
pub use event_handlers::{
    shared, DebugEventHandler, DefaultEventHandler, EventHandler, MinimalEventHandler,
    SharedEventHandler,
};
pub use generator::{Generator, GeneratorOps};
pub use ground_action::{
    ConditionalEffectData, GroundActionData, GroundActionId, SimpleEffect, StripsEffect,
    StripsPrecondition,
};
pub use ground_axiom::{GroundAxiomData, GroundAxiomId};
pub use grounded::GroundedGenerator;
pub use heuristic::{BlindHeuristic, Heuristic};
pub use lifted::LiftedGenerator;
pub use match_tree::{MatchPolarity, MatchTree};
pub use plan::{format_ground_action, plan_document, render_plan, Plan, PlanDocument};
pub use state::{State, StateData, StateId};
pub use statistics::Statistics;
pub use successor::StateRepository;
