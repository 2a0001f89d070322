//! Error types for the planning engine.

use thiserror::Error;

/// Fatal failures raised during problem setup, grounding, or search.
///
/// Non-fatal outcomes (exhaustion, budget limits) are not errors; they are
/// [`SearchStatus`](crate::search::SearchStatus) variants.
#[derive(Error, Debug)]
pub enum PlanningError {
    #[error("negative literal in the initial state: {0}")]
    InitialState(String),

    #[error("negative cycle over derived predicate {0} in axiom stratification")]
    Stratification(String),

    #[error("no numeric fluent available to determine cost for ground function {0}")]
    Evaluation(String),
}

pub type Result<T> = std::result::Result<T, PlanningError>;
