use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use tokio::sync::watch;

use quaero_gateway::{GatewayServer, QueryHandler};
use quaero_llm::{EmbeddingProvider, HttpEmbedder, HttpGenerator};
use quaero_memory::{QdrantStore, VectorStore};
use quaero_rag::{Config, RagPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();

    let config_path = resolve_config_path();
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load {}", config_path.display()))?;
    config.validate().context("invalid configuration")?;

    let embedder = HttpEmbedder::new(
        config.embedding.url.clone(),
        Duration::from_secs(config.embedding.timeout_secs),
    );
    let generator = HttpGenerator::new(
        config.generation.url.clone(),
        Duration::from_secs(config.generation.timeout_secs),
    );

    let store: Arc<dyn VectorStore> = Arc::new(
        QdrantStore::new(&config.store.qdrant_url, config.store.collection.clone())
            .context("failed to create Qdrant client")?,
    );

    // Qdrant needs the vector dimensionality up front; learn it from
    // the embedding service. Startup without the model services is a
    // fatal configuration problem, unlike failures during a build.
    let probe = embedder
        .embed_batch(&["probe".to_owned()])
        .await
        .context("embedding service unavailable at startup")?;
    let vector_size = probe.first().map_or(0, |v| v.len()) as u64;
    if vector_size == 0 {
        bail!("embedding service returned an empty probe vector at startup");
    }
    store
        .ensure_collection(vector_size)
        .await
        .context("failed to ensure Qdrant collection")?;
    tracing::info!(
        collection = %config.store.collection,
        vector_size,
        "vector store ready"
    );

    let pipeline = Arc::new(
        RagPipeline::new(&config, embedder, generator, store)
            .context("failed to construct pipeline")?,
    );

    tracing::info!("building index before accepting traffic");
    let report = pipeline.build_index().await.context("index build failed")?;
    tracing::info!(
        documents = report.documents,
        written = report.written,
        skipped = report.skipped,
        ms = report.duration_ms,
        "index ready"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {e:#}");
            return;
        }
        tracing::info!("received shutdown signal");
        let _ = shutdown_tx.send(true);
    });

    let handler: Arc<dyn QueryHandler> = Arc::new(PipelineHandler { pipeline });
    GatewayServer::new(
        &config.gateway.bind,
        config.gateway.port,
        handler,
        shutdown_rx,
    )
    .with_max_body_size(config.gateway.max_body_size)
    .serve()
    .await?;

    Ok(())
}

struct PipelineHandler {
    pipeline: Arc<RagPipeline<HttpEmbedder, HttpGenerator>>,
}

impl QueryHandler for PipelineHandler {
    fn answer(&self, question: &str) -> Pin<Box<dyn Future<Output = String> + Send + '_>> {
        let pipeline = Arc::clone(&self.pipeline);
        let question = question.to_owned();
        Box::pin(async move { pipeline.query(&question).await })
    }
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn resolve_config_path() -> PathBuf {
    let args: Vec<String> = std::env::args().collect();
    if let Some(path) = args.windows(2).find(|w| w[0] == "--config").map(|w| &w[1]) {
        return PathBuf::from(path);
    }
    if let Ok(path) = std::env::var("QUAERO_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_defaults_when_unset() {
        let path = resolve_config_path();
        assert_eq!(path, PathBuf::from("config/default.toml"));
    }

    #[test]
    fn default_config_file_parses() {
        let config = Config::load(std::path::Path::new("config/default.toml")).unwrap();
        assert_eq!(config.chunking.size, 512);
    }
}
