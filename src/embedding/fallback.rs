//! Deterministic lexical fallback embeddings
//!
//! Hand-crafted feature vectors built from text statistics and keyword
//! lexicons. No model files, no network — always available, and
//! bit-reproducible for identical input text.

use crate::embedding::EmbeddingProvider;
use crate::error::Result;
use aho_corasick::AhoCorasick;
use async_trait::async_trait;

pub const FALLBACK_DIMENSIONS: usize = 384;

const TECH_KEYWORDS: &[&str] = &[
    "java",
    "python",
    "javascript",
    "sql",
    "programming",
    "technical",
    "coding",
    "software",
    "data",
    "analysis",
    "database",
    "development",
];

const BEHAVIOR_KEYWORDS: &[&str] = &[
    "personality",
    "behavior",
    "teamwork",
    "leadership",
    "communication",
    "collaboration",
    "motivation",
    "culture",
    "customer",
    "service",
];

const COGNITIVE_KEYWORDS: &[&str] = &[
    "reasoning",
    "logical",
    "numerical",
    "verbal",
    "analytical",
    "critical",
    "problem",
    "solving",
    "cognitive",
    "ability",
];

/// Lexical feature embedding provider.
///
/// Feature layout, in order: word count, character count, space count, one
/// matched-term count per keyword lexicon (technical, behavioral, cognitive),
/// then 26 per-letter occurrence counts. Zero-padded to a fixed 384
/// dimensions and L2-normalized.
pub struct LexicalFallback {
    lexicons: AhoCorasick,
}

impl LexicalFallback {
    pub fn new() -> Self {
        let patterns: Vec<&str> = TECH_KEYWORDS
            .iter()
            .chain(BEHAVIOR_KEYWORDS.iter())
            .chain(COGNITIVE_KEYWORDS.iter())
            .copied()
            .collect();
        // Patterns are fixed lowercase literals; the build cannot fail.
        let lexicons = AhoCorasick::new(&patterns).expect("static lexicon patterns");
        Self { lexicons }
    }

    /// Count how many distinct terms of each lexicon occur as substrings of
    /// the lowercased text. Overlapping matches count ("java" and
    /// "javascript" are both present in "javascript").
    fn lexicon_counts(&self, lower: &str) -> [f32; 3] {
        let mut seen = vec![false; TECH_KEYWORDS.len() + BEHAVIOR_KEYWORDS.len() + COGNITIVE_KEYWORDS.len()];
        for mat in self.lexicons.find_overlapping_iter(lower) {
            seen[mat.pattern().as_usize()] = true;
        }

        let tech_end = TECH_KEYWORDS.len();
        let behavior_end = tech_end + BEHAVIOR_KEYWORDS.len();
        let mut counts = [0.0f32; 3];
        for (i, hit) in seen.iter().enumerate() {
            if !hit {
                continue;
            }
            if i < tech_end {
                counts[0] += 1.0;
            } else if i < behavior_end {
                counts[1] += 1.0;
            } else {
                counts[2] += 1.0;
            }
        }
        counts
    }

    fn feature_vector(&self, text: &str) -> Vec<f32> {
        let lower = text.to_lowercase();

        let mut features = Vec::with_capacity(FALLBACK_DIMENSIONS);
        features.push(lower.split_whitespace().count() as f32);
        features.push(text.chars().count() as f32);
        features.push(text.chars().filter(|c| *c == ' ').count() as f32);
        features.extend(self.lexicon_counts(&lower));

        for letter in b'a'..=b'z' {
            let letter = letter as char;
            features.push(lower.chars().filter(|c| *c == letter).count() as f32);
        }

        // Pads with zeros or truncates, whichever the feature count needs.
        features.resize(FALLBACK_DIMENSIONS, 0.0);

        let norm: f32 = features.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut features {
                *value /= norm;
            }
        }
        features
    }
}

impl Default for LexicalFallback {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for LexicalFallback {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.feature_vector(text))
    }

    fn dimensions(&self) -> usize {
        FALLBACK_DIMENSIONS
    }

    fn name(&self) -> &str {
        "lexical-fallback"
    }

    fn is_available(&self) -> bool {
        true
    }
}
