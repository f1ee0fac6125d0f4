//! Embedding generation: provider strategies, degradation chain, memoization
//!
//! Three interchangeable strategies, selected once at startup: a remote
//! embedding API when a credential is configured, a local static encoder
//! when a model directory is configured, and a deterministic lexical
//! fallback that needs no external resources. The fallback always terminates
//! the chain, so producing *a* vector cannot fail — only degrade.

pub mod cache;
pub mod fallback;
pub mod local;
pub mod remote;

use crate::config::EmbeddingConfig;
use crate::error::{RecommenderError, Result};
use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::time::Duration;

pub use cache::EmbeddingCache;
pub use fallback::{LexicalFallback, FALLBACK_DIMENSIONS};
pub use local::LocalProvider;
pub use remote::RemoteProvider;

#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed several texts, one vector per input, order preserved.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            vectors.push(self.embed(text).await?);
        }
        Ok(vectors)
    }

    fn dimensions(&self) -> usize;
    fn name(&self) -> &str;
    fn is_available(&self) -> bool;
}

/// The result of embedding one text. `degraded` carries the reason when a
/// lower-priority strategy produced the vector, so fallback use stays
/// observable without being an error.
#[derive(Debug, Clone)]
pub struct EmbeddingOutcome {
    pub vector: Vec<f32>,
    pub degraded: Option<String>,
}

/// Ordered list of embedding strategies with try-next-on-failure semantics.
pub struct ProviderChain {
    providers: Vec<Box<dyn EmbeddingProvider>>,
}

impl ProviderChain {
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn push(&mut self, provider: Box<dyn EmbeddingProvider>) {
        self.providers.push(provider);
    }

    /// Name of the first available provider.
    pub fn active_name(&self) -> &str {
        self.providers
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.name())
            .unwrap_or("none")
    }

    /// Dimensionality of the first available provider.
    pub fn active_dimensions(&self) -> usize {
        self.providers
            .iter()
            .find(|p| p.is_available())
            .map(|p| p.dimensions())
            .unwrap_or(FALLBACK_DIMENSIONS)
    }

    /// Embed one text, falling through the chain on failure. The failure of
    /// one call never aborts a batch: each call degrades independently.
    pub async fn embed(&self, text: &str) -> Result<EmbeddingOutcome> {
        let mut last_error: Option<RecommenderError> = None;

        for (i, provider) in self.providers.iter().enumerate() {
            if !provider.is_available() {
                continue;
            }
            match provider.embed(text).await {
                Ok(vector) => {
                    let degraded = if i > 0 {
                        let reason = last_error
                            .take()
                            .map(|e| e.to_string())
                            .unwrap_or_else(|| "primary provider unavailable".to_string());
                        Some(format!("{} used after: {reason}", provider.name()))
                    } else {
                        None
                    };
                    return Ok(EmbeddingOutcome { vector, degraded });
                }
                Err(e) => {
                    warn!(
                        "Embedding provider {} failed, trying next in chain: {e}",
                        provider.name()
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            RecommenderError::UpstreamProvider("no embedding provider available".to_string())
        }))
    }
}

impl Default for ProviderChain {
    fn default() -> Self {
        Self::new()
    }
}

/// Memoizing embedding engine: the provider chain behind a read-through,
/// concurrency-safe text cache. Repeated identical texts short-circuit
/// recomputation.
pub struct EmbeddingEngine {
    chain: ProviderChain,
    cache: EmbeddingCache,
}

impl EmbeddingEngine {
    pub fn new(chain: ProviderChain) -> Self {
        Self {
            chain,
            cache: EmbeddingCache::new(),
        }
    }

    /// Build the provider chain from configuration. First available wins:
    /// remote API when a credential is configured, otherwise a local encoder
    /// when one loads, with the lexical fallback always last. Never fails.
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        let mut chain = ProviderChain::new();

        if let Some(api_key) = config.api_key.as_deref().filter(|k| !k.is_empty()) {
            chain.push(Box::new(RemoteProvider::new(
                config.remote_endpoint.clone(),
                api_key.to_string(),
                config.remote_model.clone(),
                config.remote_dimensions,
                Duration::from_secs(config.request_timeout_secs),
            )));
        } else if let Some(model_dir) = &config.local_model_dir {
            match LocalProvider::load(model_dir, config.local_dimensions) {
                Ok(provider) => chain.push(Box::new(provider)),
                Err(e) => warn!("Local embedding model unavailable: {e}"),
            }
        }

        chain.push(Box::new(LexicalFallback::new()));
        Self::new(chain)
    }

    pub async fn embed(&self, text: &str) -> Result<EmbeddingOutcome> {
        if let Some(vector) = self.cache.get(text) {
            return Ok(EmbeddingOutcome {
                vector,
                degraded: None,
            });
        }

        let outcome = self.chain.embed(text).await?;
        self.cache.insert(text.to_string(), outcome.vector.clone());
        Ok(outcome)
    }

    /// Embed several texts in order. Each text goes through the cache and
    /// chain independently, so a single remote failure degrades only the
    /// vector it belongs to.
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut vectors = Vec::with_capacity(texts.len());
        for text in texts {
            let outcome = self.embed(text).await?;
            if let Some(reason) = &outcome.degraded {
                warn!("Degraded embedding for catalog text: {reason}");
            }
            vectors.push(outcome.vector);
        }
        Ok(vectors)
    }

    pub fn provider_name(&self) -> &str {
        self.chain.active_name()
    }

    pub fn dimensions(&self) -> usize {
        self.chain.active_dimensions()
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    pub fn export_cache(&self) -> HashMap<String, Vec<f32>> {
        self.cache.export()
    }

    pub fn hydrate_cache(&self, entries: HashMap<String, Vec<f32>>) {
        self.cache.hydrate(entries);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingProvider;

    #[async_trait]
    impl EmbeddingProvider for FailingProvider {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(RecommenderError::UpstreamProvider(
                "mock failure".to_string(),
            ))
        }
        fn dimensions(&self) -> usize {
            8
        }
        fn name(&self) -> &str {
            "failing-mock"
        }
        fn is_available(&self) -> bool {
            true
        }
    }

    fn fallback_engine() -> EmbeddingEngine {
        let mut chain = ProviderChain::new();
        chain.push(Box::new(LexicalFallback::new()));
        EmbeddingEngine::new(chain)
    }

    #[tokio::test]
    async fn test_primary_success_is_not_degraded() {
        let engine = fallback_engine();
        let outcome = engine.embed("java developer").await.unwrap();
        assert!(outcome.degraded.is_none());
        assert_eq!(outcome.vector.len(), FALLBACK_DIMENSIONS);
    }

    #[tokio::test]
    async fn test_failed_primary_degrades_to_fallback() {
        let mut chain = ProviderChain::new();
        chain.push(Box::new(FailingProvider));
        chain.push(Box::new(LexicalFallback::new()));
        let engine = EmbeddingEngine::new(chain);

        let outcome = engine.embed("java developer").await.unwrap();
        assert!(outcome.degraded.is_some());
        assert_eq!(outcome.vector.len(), FALLBACK_DIMENSIONS);
    }

    #[tokio::test]
    async fn test_cache_short_circuits_recomputation() {
        let engine = fallback_engine();
        let first = engine.embed("python engineer").await.unwrap();
        assert_eq!(engine.cache_len(), 1);

        let second = engine.embed("python engineer").await.unwrap();
        assert_eq!(engine.cache_len(), 1);
        assert_eq!(first.vector, second.vector);
    }

    #[tokio::test]
    async fn test_batch_preserves_order_and_duplicates() {
        let engine = fallback_engine();
        let texts = vec![
            "java developer".to_string(),
            "team leadership".to_string(),
            "java developer".to_string(),
        ];
        let vectors = engine.embed_batch(&texts).await.unwrap();
        assert_eq!(vectors.len(), 3);
        assert_eq!(vectors[0], vectors[2]);
        assert_ne!(vectors[0], vectors[1]);
        // The duplicate was served from cache, not recomputed.
        assert_eq!(engine.cache_len(), 2);
    }

    #[tokio::test]
    async fn test_from_config_always_has_a_usable_provider() {
        let engine = EmbeddingEngine::from_config(&EmbeddingConfig::default());
        assert_eq!(engine.provider_name(), "lexical-fallback");
        let outcome = engine.embed("anything at all").await.unwrap();
        assert_eq!(outcome.vector.len(), FALLBACK_DIMENSIONS);
    }
}
