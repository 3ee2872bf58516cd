use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::LlmError;
use crate::http::client_with_timeout;
use crate::provider::GenerationProvider;

/// Default request timeout for the generation service. Generation
/// latency dominates the query path, so the bound is deliberately long.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6000);

#[derive(Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    text: String,
}

/// Client for the remote generation service.
///
/// The service accepts `{"prompt": "..."}` and answers with
/// `{"text": "..."}`.
#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    url: String,
}

impl HttpGenerator {
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: client_with_timeout(timeout),
            url: url.into(),
        }
    }
}

impl GenerationProvider for HttpGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(&self.url)
            .json(&GenerateRequest { prompt })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
            });
        }

        let body: GenerateResponse = response.json().await?;
        Ok(body.text)
    }

    fn name(&self) -> &'static str {
        "http-generator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn generate_returns_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(serde_json::json!({"prompt": "hello"})))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "world"})),
            )
            .mount(&server)
            .await;

        let generator = HttpGenerator::new(format!("{}/generate", server.uri()), DEFAULT_TIMEOUT);
        let text = generator.generate("hello").await.unwrap();
        assert_eq!(text, "world");
    }

    #[tokio::test]
    async fn generate_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let generator = HttpGenerator::new(server.uri(), DEFAULT_TIMEOUT);
        let result = generator.generate("hello").await;
        assert!(matches!(result, Err(LlmError::Status { status: 503 })));
    }

    #[tokio::test]
    async fn generate_unreachable_service_is_error() {
        let generator = HttpGenerator::new("http://127.0.0.1:1/generate", Duration::from_secs(1));
        let result = generator.generate("hello").await;
        assert!(matches!(result, Err(LlmError::Http(_))));
    }
}
