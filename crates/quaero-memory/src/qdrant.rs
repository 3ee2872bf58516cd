//! Qdrant-backed vector store bound to a single collection.

use std::collections::HashMap;

use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CountPointsBuilder, CreateCollectionBuilder, Distance, PointStruct, ScoredPoint,
    SearchPointsBuilder, UpsertPointsBuilder, VectorParamsBuilder, value::Kind,
};

use crate::vector_store::{IndexRecord, SearchHit, VectorStore, VectorStoreError};

type BoxFuture<'a, T> = std::pin::Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub struct QdrantStore {
    client: Qdrant,
    collection: String,
}

impl std::fmt::Debug for QdrantStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QdrantStore")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl QdrantStore {
    /// Connect to Qdrant at `url`, operating on `collection`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Qdrant client cannot be created.
    pub fn new(url: &str, collection: impl Into<String>) -> Result<Self, VectorStoreError> {
        let client = Qdrant::from_url(url)
            .build()
            .map_err(|e| VectorStoreError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            collection: collection.into(),
        })
    }
}

fn record_to_point(record: IndexRecord) -> Result<PointStruct, VectorStoreError> {
    let payload: HashMap<String, qdrant_client::qdrant::Value> =
        serde_json::from_value(serde_json::json!({
            "source": record.source,
            "text": record.text,
        }))
        .map_err(|e| VectorStoreError::Serialization(e.to_string()))?;
    Ok(PointStruct::new(record.id, record.vector, payload))
}

fn payload_string(point: &ScoredPoint, key: &str) -> String {
    match point.payload.get(key).and_then(|v| v.kind.as_ref()) {
        Some(Kind::StringValue(s)) => s.clone(),
        _ => String::new(),
    }
}

impl VectorStore for QdrantStore {
    fn ensure_collection(&self, vector_size: u64) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        Box::pin(async move {
            let exists = self
                .client
                .collection_exists(&self.collection)
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;
            if exists {
                return Ok(());
            }
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection)
                        .vectors_config(VectorParamsBuilder::new(vector_size, Distance::Cosine)),
                )
                .await
                .map_err(|e| VectorStoreError::Collection(e.to_string()))?;
            Ok(())
        })
    }

    fn upsert(&self, records: Vec<IndexRecord>) -> BoxFuture<'_, Result<(), VectorStoreError>> {
        Box::pin(async move {
            let points: Vec<PointStruct> = records
                .into_iter()
                .map(record_to_point)
                .collect::<Result<_, _>>()?;
            self.client
                .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
                .await
                .map_err(|e| VectorStoreError::Upsert(e.to_string()))?;
            Ok(())
        })
    }

    fn search(
        &self,
        vector: Vec<f32>,
        limit: u64,
    ) -> BoxFuture<'_, Result<Vec<SearchHit>, VectorStoreError>> {
        Box::pin(async move {
            let results = self
                .client
                .search_points(
                    SearchPointsBuilder::new(&self.collection, vector, limit).with_payload(true),
                )
                .await
                .map_err(|e| VectorStoreError::Search(e.to_string()))?;

            Ok(results
                .result
                .iter()
                .map(|point| SearchHit {
                    text: payload_string(point, "text"),
                    source: payload_string(point, "source"),
                    score: point.score,
                })
                .collect())
        })
    }

    fn count(&self) -> BoxFuture<'_, Result<u64, VectorStoreError>> {
        Box::pin(async move {
            let response = self
                .client
                .count(CountPointsBuilder::new(&self.collection).exact(true))
                .await
                .map_err(|e| VectorStoreError::Count(e.to_string()))?;
            Ok(response.result.map_or(0, |r| r.count))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_valid_url() {
        let store = QdrantStore::new("http://localhost:6334", "chunks");
        assert!(store.is_ok());
    }

    #[test]
    fn new_invalid_url() {
        let store = QdrantStore::new("not a valid url", "chunks");
        assert!(store.is_err());
    }

    #[test]
    fn debug_format_hides_client() {
        let store = QdrantStore::new("http://localhost:6334", "chunks").unwrap();
        let dbg = format!("{store:?}");
        assert!(dbg.contains("chunks"));
    }

    #[test]
    fn record_maps_to_point_with_payload() {
        let record = IndexRecord {
            id: 7,
            vector: vec![0.1, 0.2],
            source: "a.txt".into(),
            text: "hello".into(),
        };
        let point = record_to_point(record).unwrap();
        assert!(matches!(
            point.payload.get("source").and_then(|v| v.kind.as_ref()),
            Some(Kind::StringValue(s)) if s == "a.txt"
        ));
    }
}
