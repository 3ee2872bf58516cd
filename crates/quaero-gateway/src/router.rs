use axum::Router;
use axum::routing::{get, post};
use tower_http::limit::RequestBodyLimitLayer;

use super::handlers::{chat_handler, health_handler};
use super::server::AppState;

pub(crate) fn build_router(state: AppState, max_body_size: usize) -> Router {
    Router::new()
        .route("/chat", post(chat_handler))
        .layer(RequestBodyLimitLayer::new(max_body_size))
        .route("/health", get(health_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::pin::Pin;
    use std::sync::Arc;
    use std::time::Instant;

    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::server::QueryHandler;

    struct FixedHandler(&'static str);

    impl QueryHandler for FixedHandler {
        fn answer(&self, _question: &str) -> Pin<Box<dyn Future<Output = String> + Send + '_>> {
            let answer = self.0.to_owned();
            Box::pin(async move { answer })
        }
    }

    fn make_router(answer: &'static str, max_body_size: usize) -> Router {
        let state = AppState {
            handler: Arc::new(FixedHandler(answer)),
            started_at: Instant::now(),
        };
        build_router(state, max_body_size)
    }

    fn chat_request(question: &str) -> Request<Body> {
        let body = serde_json::json!({ "question": question });
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = make_router("irrelevant", 1_048_576);
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn chat_returns_answer() {
        let app = make_router("the rules allow it", 1_048_576);
        let resp = app.oneshot(chat_request("are remote classes allowed?")).await.unwrap();
        assert_eq!(resp.status(), 200);
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["answer"], "the rules allow it");
    }

    #[tokio::test]
    async fn blank_question_is_rejected() {
        let app = make_router("irrelevant", 1_048_576);
        let resp = app.oneshot(chat_request("   ")).await.unwrap();
        assert_eq!(resp.status(), 400);
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let app = make_router("irrelevant", 64);
        let oversized = "x".repeat(128);
        let resp = app.oneshot(chat_request(&oversized)).await.unwrap();
        assert_eq!(resp.status(), 413);
    }

    #[tokio::test]
    async fn health_ignores_body_limit() {
        let app = make_router("irrelevant", 16);
        let req = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), 200);
    }
}
