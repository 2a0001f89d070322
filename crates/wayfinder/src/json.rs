//! JSON export for search results.
//!
//! Embedders that want machine-readable output serialize a
//! [`SearchResultDocument`]: the final status, the rendered plan if one was
//! found, and the statistics of the run.

use serde::Serialize;

use crate::search::generator::GeneratorOps;
use crate::search::plan::{plan_document, Plan, PlanDocument};
use crate::search::{SearchStatus, Statistics};

/// Serializable summary of one search run.
#[derive(Debug, Serialize)]
pub struct SearchResultDocument {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanDocument>,
    pub statistics: Statistics,
}

/// Build the result document for a finished search.
pub fn search_result_document<G: GeneratorOps>(
    generator: &G,
    status: SearchStatus,
    plan: &Plan,
) -> SearchResultDocument {
    let plan = (status == SearchStatus::Solved).then(|| plan_document(generator, plan));
    let statistics = generator.handler().borrow().statistics().clone();
    SearchResultDocument {
        status: status.as_str().to_string(),
        plan,
        statistics,
    }
}
