//! Remote embedding API provider
//!
//! Calls an OpenAI-compatible `/v1/embeddings` endpoint with a bounded
//! timeout. A failed call surfaces as `UpstreamProvider` and is absorbed by
//! the provider chain, which degrades to the lexical fallback for that call
//! only.

use crate::embedding::EmbeddingProvider;
use crate::error::{RecommenderError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

pub struct RemoteProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    dimensions: usize,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
}

impl RemoteProvider {
    pub fn new(
        endpoint: String,
        api_key: String,
        model: String,
        dimensions: usize,
        timeout: Duration,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();
        Self {
            client,
            endpoint,
            api_key,
            model,
            dimensions,
        }
    }

    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>> {
        let body = serde_json::json!({
            "model": self.model,
            "input": text,
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RecommenderError::UpstreamProvider(format!("embedding request failed: {e}")))?;

        let response = response.error_for_status().map_err(|e| {
            RecommenderError::UpstreamProvider(format!("embedding API returned error: {e}"))
        })?;

        let parsed: EmbeddingResponse = response.json().await.map_err(|e| {
            RecommenderError::UpstreamProvider(format!("malformed embedding response: {e}"))
        })?;

        parsed
            .data
            .into_iter()
            .next()
            .map(|d| d.embedding)
            .ok_or_else(|| {
                RecommenderError::UpstreamProvider("embedding response contained no data".to_string())
            })
    }
}

#[async_trait]
impl EmbeddingProvider for RemoteProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.request_embedding(text).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "remote-api"
    }

    fn is_available(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_without_api_key() {
        let provider = RemoteProvider::new(
            "https://api.openai.com/v1/embeddings".to_string(),
            String::new(),
            "text-embedding-3-large".to_string(),
            3072,
            Duration::from_secs(10),
        );
        assert!(!provider.is_available());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_upstream_error() {
        let provider = RemoteProvider::new(
            // Reserved TEST-NET address; connections fail fast.
            "http://192.0.2.1:9/v1/embeddings".to_string(),
            "test-key".to_string(),
            "text-embedding-3-large".to_string(),
            3072,
            Duration::from_millis(200),
        );
        let err = provider.embed("query").await.unwrap_err();
        assert!(matches!(err, RecommenderError::UpstreamProvider(_)));
    }
}
