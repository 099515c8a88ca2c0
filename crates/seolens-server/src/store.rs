//! Persistence of analysis rows
//!
//! [`SupabaseStore`] writes to a PostgREST table; [`MemoryStore`] keeps rows
//! in-process for tests and local runs.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use seolens_core::{AnalysisError, AnalysisRecord, Result};
use tracing::debug;

/// Destination for analysis rows. Returns the stored row as JSON.
#[async_trait]
pub trait ReportStore: Send + Sync {
    async fn save(&self, record: &AnalysisRecord) -> Result<Value>;
}

/// Supabase REST (PostgREST) table writer
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    endpoint: String,
    service_key: String,
}

impl SupabaseStore {
    pub fn new(base_url: &str, service_key: &str, table: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| AnalysisError::Unexpected(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            service_key: service_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ReportStore for SupabaseStore {
    async fn save(&self, record: &AnalysisRecord) -> Result<Value> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Prefer", "return=representation")
            .json(record)
            .send()
            .await
            .map_err(|e| AnalysisError::PersistenceFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AnalysisError::PersistenceFailed(format!("HTTP {status}: {body}")));
        }

        let rows: Value = response
            .json()
            .await
            .map_err(|e| AnalysisError::PersistenceFailed(format!("invalid response body: {e}")))?;
        debug!(id = %record.id, kind = record.payload.analysis_type(), "row inserted");

        // PostgREST answers an insert with an array of the inserted rows
        Ok(match rows {
            Value::Array(mut rows) if rows.len() == 1 => rows.remove(0),
            other => other,
        })
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<AnalysisRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<AnalysisRecord> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ReportStore for MemoryStore {
    async fn save(&self, record: &AnalysisRecord) -> Result<Value> {
        let row = serde_json::to_value(record)
            .map_err(|e| AnalysisError::PersistenceFailed(e.to_string()))?;
        self.records
            .lock()
            .map_err(|_| AnalysisError::PersistenceFailed("store lock poisoned".to_string()))?
            .push(record.clone());
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seolens_core::simulated::KeywordAnalysis;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn record() -> AnalysisRecord {
        AnalysisRecord::keyword("acme.com", KeywordAnalysis::new(Vec::new()), Some("p1".into()))
    }

    #[tokio::test]
    async fn test_memory_store_keeps_rows() {
        let store = MemoryStore::new();
        let row = store.save(&record()).await.unwrap();
        assert_eq!(row["analysis_type"], "keyword");
        assert_eq!(store.records().len(), 1);
    }

    #[test]
    fn test_endpoint_joins_table() {
        let store = SupabaseStore::new("https://x.supabase.co/", "key", "seo_analyses").unwrap();
        assert_eq!(store.endpoint(), "https://x.supabase.co/rest/v1/seo_analyses");
    }

    #[tokio::test]
    async fn test_supabase_insert_returns_row() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/seo_analyses"))
            .and(header("apikey", "secret"))
            .and(header("Authorization", "Bearer secret"))
            .and(header("Prefer", "return=representation"))
            .and(body_partial_json(serde_json::json!({
                "domain": "acme.com",
                "analysis_type": "keyword",
                "project_id": "p1"
            })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!([{"id": "row-1"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), "secret", "seo_analyses").unwrap();
        let row = store.save(&record()).await.unwrap();
        assert_eq!(row, serde_json::json!({"id": "row-1"}));
    }

    #[tokio::test]
    async fn test_supabase_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let store = SupabaseStore::new(&server.uri(), "wrong", "seo_analyses").unwrap();
        let err = store.save(&record()).await.unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::PersistenceFailed(ref msg) if msg.contains("bad key")
        ));
    }
}
