//! Category balancing for mixed-intent queries
//!
//! When a query spans both technical and interpersonal needs, a plain top-K
//! slice can be dominated by whichever category the embedding space favors.
//! Balancing reserves slots for both "Knowledge & Skills" and "Personality &
//! Behavior" results, then re-sorts the selection by score so the best items
//! still appear first.

use crate::search::ScoredAssessment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bucket {
    Knowledge,
    Personality,
    Other,
}

fn bucket_for(category: &str) -> Bucket {
    if category.contains("Knowledge") {
        Bucket::Knowledge
    } else if category.contains("Personality") || category.contains("Behavior") {
        Bucket::Personality
    } else {
        Bucket::Other
    }
}

/// Mix the full ranking into a top-`top_k` selection with both primary
/// categories represented when both are present.
///
/// The entire ranking is partitioned into knowledge / personality / other
/// buckets, preserving rank order within each bucket. When both primary
/// buckets are non-empty, each gets up to `top_k / 2 + 1` slots; otherwise
/// whichever is non-empty gets up to `top_k`. Remaining slots fill from the
/// other bucket in rank order. The final truncate to `top_k` after the score
/// re-sort is the authoritative size contract.
pub fn balance(ranked: Vec<ScoredAssessment>, top_k: usize) -> Vec<ScoredAssessment> {
    let mut knowledge = Vec::new();
    let mut personality = Vec::new();
    let mut other = Vec::new();

    for result in ranked {
        match bucket_for(&result.assessment.category) {
            Bucket::Knowledge => knowledge.push(result),
            Bucket::Personality => personality.push(result),
            Bucket::Other => other.push(result),
        }
    }

    let mut selected = Vec::new();
    if !knowledge.is_empty() && !personality.is_empty() {
        let half = top_k / 2 + 1;
        let k_count = knowledge.len().min(half);
        let p_count = personality.len().min(half);
        selected.extend(knowledge.into_iter().take(k_count));
        selected.extend(personality.into_iter().take(p_count));
    } else {
        selected.extend(knowledge.into_iter().take(top_k));
        selected.extend(personality.into_iter().take(top_k));
    }

    let remaining = top_k.saturating_sub(selected.len());
    if remaining > 0 {
        selected.extend(other.into_iter().take(remaining));
    }

    selected.sort_by(|a, b| b.score.total_cmp(&a.score));
    selected.truncate(top_k);
    selected
}
