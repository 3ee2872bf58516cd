use crate::error::LlmError;

/// Capability that turns batches of texts into fixed-length vectors.
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a batch of texts, returning one vector per input text in
    /// input order.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, responds with a
    /// non-success status, or the response cannot be decoded.
    fn embed_batch(
        &self,
        texts: &[String],
    ) -> impl Future<Output = Result<Vec<Vec<f32>>, LlmError>> + Send;

    fn name(&self) -> &'static str;
}

/// Capability that completes an instruction-formatted prompt.
pub trait GenerationProvider: Send + Sync {
    /// Generate text for the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable, responds with a
    /// non-success status, or the response cannot be decoded.
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String, LlmError>> + Send;

    fn name(&self) -> &'static str;
}
