//! Wayfinder: a classical planning engine.
//!
//! Given a typed, first-order planning problem with derived predicates,
//! conditional and universal effects, and action costs — already parsed and
//! normalized into the data model of [`formalism`] — the engine searches
//! the reachable state space for a cost-minimizing sequence of ground
//! actions from the initial state to a goal state.
//!
//! Two applicable-action generators drive the search: a lifted one that
//! enumerates bindings on demand via consistency graphs and clique search,
//! and a grounded one that pre-grounds the delete-free reachable instances
//! into match trees. Both plug into the canonicalizing successor state
//! generator and the breadth-first and A* searches.
//!
//! The engine is single-threaded; run distinct problems on distinct
//! threads, each with its own factories and generators.

pub mod config;
pub mod error;
pub mod formalism;
pub mod json;
pub mod search;

// Re-export the data model
pub use formalism::{
    ActionSchemaData, ActionSchemaId, AtomData, AtomId, AxiomData, AxiomId, Category,
    CategoryStore, ConditionalEffectSchema, Derived, Domain, Factories, Factory, FactoryIndex,
    Fluent, FunctionExpression, GroundAtomData, GroundAtomId, GroundLiteralData, GroundLiteralId,
    LiteralData, LiteralId, ObjectData, ObjectId, PredicateData, PredicateId, Problem, Static,
    Term, UniversalEffectSchema, VariableData, VariableId,
};

// Re-export the search infrastructure
pub use search::{
    shared, AStarSearch, BlindHeuristic, BreadthFirstSearch, DebugEventHandler,
    DefaultEventHandler, EventHandler, FactBitset, Generator, GeneratorOps, GroundActionData,
    GroundActionId, GroundAxiomData, GroundAxiomId, GroundedGenerator, Heuristic,
    LiftedGenerator, MinimalEventHandler, Plan, SearchStatus, SharedEventHandler, State,
    StateData, StateId, StateRepository, Statistics,
};

pub use config::SearchConfig;
pub use error::{PlanningError, Result};
pub use json::{search_result_document, SearchResultDocument};
