//! Concurrency-safe embedding memoization

use parking_lot::RwLock;
use std::collections::HashMap;

/// In-memory text-to-vector cache, keyed by exact string equality.
///
/// Unbounded for the process lifetime. Values are deterministic for a given
/// text and provider, so a duplicate concurrent insert of the same key is
/// harmless.
#[derive(Default)]
pub struct EmbeddingCache {
    entries: RwLock<HashMap<String, Vec<f32>>>,
}

impl EmbeddingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, text: &str) -> Option<Vec<f32>> {
        self.entries.read().get(text).cloned()
    }

    pub fn insert(&self, text: String, vector: Vec<f32>) {
        self.entries.write().insert(text, vector);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Clone the full contents, for snapshot persistence.
    pub fn export(&self) -> HashMap<String, Vec<f32>> {
        self.entries.read().clone()
    }

    /// Replace the contents from a persisted snapshot.
    pub fn hydrate(&self, entries: HashMap<String, Vec<f32>>) {
        *self.entries.write() = entries;
    }
}
