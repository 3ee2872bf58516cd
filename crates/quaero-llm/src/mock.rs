//! Test-only mock model providers.

use std::collections::HashSet;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{Arc, Mutex};

use crate::error::LlmError;
use crate::provider::{EmbeddingProvider, GenerationProvider};

/// Dimensionality of mock embedding vectors.
pub const MOCK_VECTOR_SIZE: usize = 8;

/// Deterministic vector derived from the text content. Identical texts
/// always map to identical vectors, so exact-match retrieval works.
#[must_use]
pub fn embedding_for(text: &str) -> Vec<f32> {
    (0..MOCK_VECTOR_SIZE)
        .map(|dim| {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            dim.hash(&mut hasher);
            #[allow(clippy::cast_precision_loss)]
            let unit = (hasher.finish() % 1000) as f32 / 1000.0;
            unit - 0.5
        })
        .collect()
}

/// Scriptable embedding double with recorded calls.
#[derive(Debug, Clone, Default)]
pub struct MockEmbedder {
    calls: Arc<Mutex<Vec<Vec<String>>>>,
    fail_calls: HashSet<usize>,
    fail_all: bool,
}

impl MockEmbedder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `embed_batch` call.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    /// Fail the nth `embed_batch` call (zero-based), succeed otherwise.
    #[must_use]
    pub fn failing_on_call(mut self, n: usize) -> Self {
        self.fail_calls.insert(n);
        self
    }

    /// Batches received so far, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl EmbeddingProvider for MockEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
        let call_index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(texts.to_vec());
            calls.len() - 1
        };

        if self.fail_all || self.fail_calls.contains(&call_index) {
            return Err(LlmError::Other("mock embedding error".into()));
        }

        Ok(texts.iter().map(|t| embedding_for(t)).collect())
    }

    fn name(&self) -> &'static str {
        "mock-embedder"
    }
}

/// Scriptable generation double with recorded prompts.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    prompts: Arc<Mutex<Vec<String>>>,
    pub response: String,
    pub fail: bool,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            prompts: Arc::new(Mutex::new(Vec::new())),
            response: "mock answer".into(),
            fail: false,
        }
    }
}

impl MockGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Prompts received so far, in call order.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl GenerationProvider for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        if self.fail {
            return Err(LlmError::Other("mock generation error".into()));
        }
        Ok(self.response.clone())
    }

    fn name(&self) -> &'static str {
        "mock-generator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn embedding_is_deterministic() {
        let a = embedding_for("same text");
        let b = embedding_for("same text");
        let c = embedding_for("other text");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), MOCK_VECTOR_SIZE);
    }

    #[tokio::test]
    async fn mock_embedder_records_calls() {
        let embedder = MockEmbedder::new();
        embedder.embed_batch(&["a".into(), "b".into()]).await.unwrap();
        embedder.embed_batch(&["c".into()]).await.unwrap();
        assert_eq!(embedder.call_count(), 2);
        assert_eq!(embedder.calls()[1], vec!["c".to_owned()]);
    }

    #[tokio::test]
    async fn mock_embedder_fails_selected_call() {
        let embedder = MockEmbedder::new().failing_on_call(1);
        assert!(embedder.embed_batch(&["a".into()]).await.is_ok());
        assert!(embedder.embed_batch(&["b".into()]).await.is_err());
        assert!(embedder.embed_batch(&["c".into()]).await.is_ok());
    }

    #[tokio::test]
    async fn mock_generator_records_prompts() {
        let generator = MockGenerator::with_response("hi");
        let out = generator.generate("prompt one").await.unwrap();
        assert_eq!(out, "hi");
        assert_eq!(generator.prompts(), vec!["prompt one".to_owned()]);
    }

    #[tokio::test]
    async fn mock_generator_failing() {
        let generator = MockGenerator::failing();
        assert!(generator.generate("p").await.is_err());
        assert_eq!(generator.call_count(), 1);
    }
}
