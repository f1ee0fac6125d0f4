//! Similarity ranking and category balancing

pub mod balancer;
pub mod ranker;

use crate::catalog::Assessment;
use serde::Serialize;

/// An assessment paired with its similarity score for one query. Ephemeral:
/// produced per query, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredAssessment {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub score: f32,
}
