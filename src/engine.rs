//! Recommendation orchestrator
//!
//! Owns the embedding engine, the intent analyzer, and the catalog index,
//! and ties them into the public `recommend` / `analyze` contract. The
//! catalog and its embedding matrix live behind a single swapped reference,
//! so a rebuild is never observable as a partial state by in-flight queries.

use crate::catalog::store::{self, EngineSnapshot};
use crate::catalog::Assessment;
use crate::config::Config;
use crate::embedding::EmbeddingEngine;
use crate::error::{RecommenderError, Result};
use crate::fetch;
use crate::intent::{IntentAnalyzer, QueryIntent};
use crate::search::{balancer, ranker, ScoredAssessment};
use chrono::Utc;
use log::{debug, info, warn};
use parking_lot::RwLock;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Public result-count contract: requested counts clamp into this range.
pub const MIN_RESULTS: usize = 5;
pub const MAX_RESULTS: usize = 10;

/// Queries with fewer whitespace tokens than this get a clarifying prefix
/// before embedding.
const SHORT_QUERY_TOKENS: usize = 5;

const MIN_QUERY_CHARS: usize = 3;

/// The catalog and its embedding matrix, always the same length and
/// index-aligned. Built once per catalog load and treated as immutable.
pub struct CatalogIndex {
    assessments: Vec<Assessment>,
    embeddings: Vec<Vec<f32>>,
}

impl CatalogIndex {
    fn new(assessments: Vec<Assessment>, embeddings: Vec<Vec<f32>>) -> Result<Self> {
        if assessments.len() != embeddings.len() {
            return Err(RecommenderError::Configuration(format!(
                "catalog and embedding matrix are misaligned: {} records vs {} vectors",
                assessments.len(),
                embeddings.len()
            )));
        }
        Ok(Self {
            assessments,
            embeddings,
        })
    }

    pub fn len(&self) -> usize {
        self.assessments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assessments.is_empty()
    }

    pub fn assessments(&self) -> &[Assessment] {
        &self.assessments
    }
}

/// Reject queries too short to mean anything before they reach the core.
pub fn validate_query(query: &str) -> Result<()> {
    if query.trim().chars().count() < MIN_QUERY_CHARS {
        return Err(RecommenderError::Validation(format!(
            "query must be at least {MIN_QUERY_CHARS} characters long"
        )));
    }
    Ok(())
}

pub struct RecommendationEngine {
    embedder: EmbeddingEngine,
    intent: IntentAnalyzer,
    http: reqwest::Client,
    index: RwLock<Option<Arc<CatalogIndex>>>,
}

impl RecommendationEngine {
    pub fn new(config: &Config) -> Result<Self> {
        let embedder = EmbeddingEngine::from_config(&config.embedding);
        let intent = IntentAnalyzer::new()?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.embedding.request_timeout_secs))
            .build()
            .unwrap_or_default();

        info!(
            "Recommendation engine using embedding provider: {}",
            embedder.provider_name()
        );

        Ok(Self {
            embedder,
            intent,
            http,
            index: RwLock::new(None),
        })
    }

    /// Embed every catalog record and swap the new catalog+matrix pair in
    /// atomically.
    pub async fn build_index(&self, assessments: Vec<Assessment>) -> Result<()> {
        let texts: Vec<String> = assessments.iter().map(|a| a.combined_text()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;
        let index = CatalogIndex::new(assessments, embeddings)?;

        info!("Built embedding index over {} assessments", index.len());
        *self.index.write() = Some(Arc::new(index));
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.index.read().is_some()
    }

    pub fn catalog_len(&self) -> usize {
        self.index.read().as_ref().map(|i| i.len()).unwrap_or(0)
    }

    fn current_index(&self) -> Result<Arc<CatalogIndex>> {
        self.index.read().clone().ok_or_else(|| {
            RecommenderError::Configuration(
                "engine is not ready: catalog embeddings have not been built".to_string(),
            )
        })
    }

    /// Analyze query intent. Pure; does not require a built index.
    pub fn analyze(&self, query: &str) -> QueryIntent {
        self.intent.analyze(query)
    }

    /// Get assessment recommendations for a query.
    ///
    /// `top_k` is clamped into the public [5, 10] contract. Balancing is
    /// decided from the intent of the original query, before any URL
    /// extraction or short-query rewriting. A catalog smaller than `top_k`
    /// yields as many results as exist; an empty catalog yields none.
    pub async fn recommend(&self, query: &str, top_k: usize) -> Result<Vec<ScoredAssessment>> {
        let top_k = top_k.clamp(MIN_RESULTS, MAX_RESULTS);
        let balance = self.intent.analyze(query).needs_balancing();
        let processed = self.process_query(query).await;
        debug!("Balancing categories: {balance}");
        self.search(&processed, top_k, balance).await
    }

    /// Rank the catalog against a query and take a (possibly balanced)
    /// top-`top_k` selection.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        balance: bool,
    ) -> Result<Vec<ScoredAssessment>> {
        let index = self.current_index()?;
        if index.is_empty() {
            return Ok(Vec::new());
        }

        let outcome = self.embedder.embed(query).await?;
        if let Some(reason) = &outcome.degraded {
            warn!("Degraded query embedding: {reason}");
        }

        let ranked = ranker::rank(&outcome.vector, &index.embeddings);
        let scored: Vec<ScoredAssessment> = ranked
            .into_iter()
            .map(|(i, score)| ScoredAssessment {
                assessment: index.assessments[i].clone(),
                score,
            })
            .collect();

        Ok(if balance {
            balancer::balance(scored, top_k)
        } else {
            scored.into_iter().take(top_k).collect()
        })
    }

    /// Prepare a raw query for embedding. A URL query becomes the page's
    /// extracted text behind a fixed label; extraction failure or an empty
    /// page keeps the raw query. Very short queries get a clarifying prefix
    /// for more lexical signal. Never fails.
    pub async fn process_query(&self, query: &str) -> String {
        let mut effective = query.to_string();

        if fetch::is_url(query) {
            match fetch::extract_page_text(&self.http, query).await {
                Ok(text) if !text.is_empty() => {
                    effective = format!("Job description: {text}");
                }
                Ok(_) => {
                    debug!("URL query extracted no text, keeping raw query");
                }
                Err(e) => {
                    warn!("URL text extraction failed, keeping raw query: {e}");
                }
            }
        }

        if effective.split_whitespace().count() < SHORT_QUERY_TOKENS {
            effective = format!("Find assessments for: {effective}");
        }

        effective
    }

    /// Persist the catalog, embedding matrix, and text cache for fast
    /// restart.
    pub fn save_snapshot(&self, path: &Path) -> Result<()> {
        let index = self.current_index()?;
        let snapshot = EngineSnapshot {
            provider: self.embedder.provider_name().to_string(),
            dimensions: self.embedder.dimensions(),
            built_at: Utc::now(),
            assessments: index.assessments.clone(),
            embeddings: index.embeddings.clone(),
            cache: self.embedder.export_cache(),
        };
        store::save_snapshot(path, &snapshot)
    }

    /// Rehydrate from a persisted snapshot. Returns false (leaving the
    /// engine untouched) when the snapshot is absent, corrupt, misaligned,
    /// or was built by a different provider or dimensionality.
    pub fn load_snapshot(&self, path: &Path) -> bool {
        let Some(snapshot) = store::load_snapshot(path) else {
            return false;
        };

        if snapshot.provider != self.embedder.provider_name()
            || snapshot.dimensions != self.embedder.dimensions()
        {
            warn!(
                "Snapshot was built by provider {} ({} dims), rebuilding",
                snapshot.provider, snapshot.dimensions
            );
            return false;
        }

        let index = match CatalogIndex::new(snapshot.assessments, snapshot.embeddings) {
            Ok(index) => index,
            Err(e) => {
                warn!("Discarding misaligned snapshot: {e}");
                return false;
            }
        };

        self.embedder.hydrate_cache(snapshot.cache);
        info!("Rehydrated index over {} assessments from snapshot", index.len());
        *self.index.write() = Some(Arc::new(index));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::sample_assessments;

    fn engine() -> RecommendationEngine {
        RecommendationEngine::new(&Config::default()).unwrap()
    }

    async fn ready_engine() -> RecommendationEngine {
        let engine = engine();
        engine.build_index(sample_assessments()).await.unwrap();
        engine
    }

    #[test]
    fn test_validate_query_rejects_short_input() {
        assert!(matches!(
            validate_query("ab").unwrap_err(),
            RecommenderError::Validation(_)
        ));
        assert!(matches!(
            validate_query("  a  ").unwrap_err(),
            RecommenderError::Validation(_)
        ));
        assert!(validate_query("sql").is_ok());
    }

    #[tokio::test]
    async fn test_search_before_build_is_configuration_error() {
        let engine = engine();
        let err = engine.search("java", 10, false).await.unwrap_err();
        assert!(matches!(err, RecommenderError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_empty_catalog_returns_empty_results() {
        let engine = engine();
        engine.build_index(Vec::new()).await.unwrap();
        let results = engine.recommend("java developer role", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_requested_count_is_clamped() {
        let engine = ready_engine().await;
        let results = engine
            .recommend("experienced accountant for the finance team", 1)
            .await
            .unwrap();
        assert_eq!(results.len(), MIN_RESULTS);

        let results = engine
            .recommend("experienced accountant for the finance team", 50)
            .await
            .unwrap();
        assert_eq!(results.len(), MAX_RESULTS);
    }

    #[tokio::test]
    async fn test_short_query_gets_wrapped() {
        let engine = engine();
        let processed = engine.process_query("java developer").await;
        assert_eq!(processed, "Find assessments for: java developer");
    }

    #[tokio::test]
    async fn test_long_query_is_untouched() {
        let engine = engine();
        let query = "Hiring for Java developers who collaborate with teams";
        assert_eq!(engine.process_query(query).await, query);
    }

    #[tokio::test]
    async fn test_failed_url_extraction_keeps_raw_query() {
        let engine = engine();
        let url = "http://nonexistent.invalid/job-posting";
        let processed = engine.process_query(url).await;
        // Extraction fails (unresolvable host); the raw URL is the effective
        // query, and as a single token it still gets the short-query prefix.
        assert_eq!(processed, format!("Find assessments for: {url}"));
    }

    #[tokio::test]
    async fn test_index_rebuild_swaps_catalog() {
        let engine = ready_engine().await;
        assert_eq!(engine.catalog_len(), sample_assessments().len());

        let small: Vec<_> = sample_assessments().into_iter().take(3).collect();
        engine.build_index(small).await.unwrap();
        assert_eq!(engine.catalog_len(), 3);
    }

    #[tokio::test]
    async fn test_snapshot_roundtrip_restores_engine() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("snapshot.json");

        let engine = ready_engine().await;
        let before = engine.recommend("numerical reasoning for analysts", 5).await.unwrap();
        engine.save_snapshot(&path).unwrap();

        let restored = RecommendationEngine::new(&Config::default()).unwrap();
        assert!(restored.load_snapshot(&path));
        assert_eq!(restored.catalog_len(), engine.catalog_len());

        let after = restored.recommend("numerical reasoning for analysts", 5).await.unwrap();
        let urls = |rs: &[ScoredAssessment]| {
            rs.iter().map(|r| r.assessment.url.clone()).collect::<Vec<_>>()
        };
        assert_eq!(urls(&before), urls(&after));
    }

    #[tokio::test]
    async fn test_missing_snapshot_reports_false() {
        let dir = tempfile::TempDir::new().unwrap();
        let engine = engine();
        assert!(!engine.load_snapshot(&dir.path().join("missing.json")));
        assert!(!engine.is_ready());
    }
}
