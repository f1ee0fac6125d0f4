//! Local static sentence encoder provider (Model2Vec)

use crate::embedding::EmbeddingProvider;
use crate::error::{RecommenderError, Result};
use async_trait::async_trait;
use model2vec_rs::model::StaticModel;
use std::path::Path;

pub struct LocalProvider {
    model: StaticModel,
    dimensions: usize,
}

impl LocalProvider {
    /// Load a Model2Vec model from a local directory.
    pub fn load(model_dir: &Path, dimensions: usize) -> Result<Self> {
        let model = StaticModel::from_pretrained(model_dir, None, None, None).map_err(|e| {
            RecommenderError::Embedding(format!(
                "failed to load local model from {}: {e}",
                model_dir.display()
            ))
        })?;
        Ok(Self { model, dimensions })
    }
}

#[async_trait]
impl EmbeddingProvider for LocalProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.model.encode_single(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(self.model.encode(texts))
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "local-model2vec"
    }

    fn is_available(&self) -> bool {
        true
    }
}
