use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::http::client_with_timeout;
use crate::provider::EmbeddingProvider;

/// Default request timeout for the embedding service. Embedding calls
/// are expected to complete within tens of seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Serialize)]
struct EmbedRequest<'a> {
    texts: &'a [String],
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Client for the remote embedding service.
///
/// The service accepts `{"texts": [...]}` and answers with
/// `{"embeddings": [[...], ...]}`, one vector per input text in input
/// order.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: reqwest::Client,
    url: String,
}

impl HttpEmbedder {
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: client_with_timeout(timeout),
            url: url.into(),
        }
    }
}

impl EmbeddingProvider for HttpEmbedder {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, LlmError> {
        let response = self
            .client
            .post(&self.url)
            .json(&EmbedRequest { texts })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
            });
        }

        let body: EmbedResponse = response.json().await?;
        if body.embeddings.len() != texts.len() {
            return Err(LlmError::LengthMismatch {
                sent: texts.len(),
                got: body.embeddings.len(),
            });
        }

        Ok(body.embeddings)
    }

    fn name(&self) -> &'static str {
        "http-embedder"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[tokio::test]
    async fn embed_batch_returns_vectors_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/embed"))
            .and(body_partial_json(serde_json::json!({"texts": ["a", "b"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                serde_json::json!({"embeddings": [[1.0, 0.0], [0.0, 1.0]]}),
            ))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(format!("{}/embed", server.uri()), DEFAULT_TIMEOUT);
        let vectors = embedder.embed_batch(&texts(&["a", "b"])).await.unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[tokio::test]
    async fn embed_batch_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(server.uri(), DEFAULT_TIMEOUT);
        let result = embedder.embed_batch(&texts(&["a"])).await;
        assert!(matches!(result, Err(LlmError::Status { status: 500 })));
    }

    #[tokio::test]
    async fn embed_batch_length_mismatch_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"embeddings": [[1.0]]})),
            )
            .mount(&server)
            .await;

        let embedder = HttpEmbedder::new(server.uri(), DEFAULT_TIMEOUT);
        let result = embedder.embed_batch(&texts(&["a", "b"])).await;
        assert!(matches!(
            result,
            Err(LlmError::LengthMismatch { sent: 2, got: 1 })
        ));
    }

    #[tokio::test]
    async fn embed_batch_unreachable_service_is_error() {
        let embedder = HttpEmbedder::new("http://127.0.0.1:1/embed", Duration::from_secs(1));
        let result = embedder.embed_batch(&texts(&["a"])).await;
        assert!(matches!(result, Err(LlmError::Http(_))));
    }
}
