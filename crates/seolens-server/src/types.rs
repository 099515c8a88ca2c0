//! Request and response bodies for the HTTP API

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use seolens_core::Report;

/// Body accepted by every analysis endpoint.
///
/// Fields are read independently, so a mistyped optional field never hides
/// the domain. A body that fails to parse is treated like an empty one.
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    pub domain: Option<String>,
    pub project_id: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl AnalysisRequest {
    pub fn from_body(body: &[u8]) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        let domain = fields.get("domain").and_then(Value::as_str).map(str::to_string);
        let project_id = fields
            .get("projectId")
            .or_else(|| fields.get("project_id"))
            .and_then(|value| match value {
                Value::String(id) => Some(id.clone()),
                Value::Number(id) => Some(id.to_string()),
                _ => None,
            });
        let keywords = fields
            .get("keywords")
            .and_then(Value::as_array)
            .and_then(|list| {
                list.iter()
                    .map(|k| k.as_str().map(str::to_string))
                    .collect::<Option<Vec<_>>>()
            });

        Self {
            domain,
            project_id,
            keywords,
        }
    }

    /// Trimmed domain, `None` when absent or blank
    pub fn domain(&self) -> Option<&str> {
        self.domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    pub fn project_id(&self) -> Option<String> {
        self.project_id
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
    }
}

/// Error body; `success` is omitted by the uniqueness endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl ErrorResponse {
    pub fn bare(error: impl Into<String>) -> Self {
        Self {
            success: None,
            error: error.into(),
            status: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: Some(false),
            ..Self::bare(error)
        }
    }

    pub fn with_status(mut self, status: Option<u16>) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeoReportResponse {
    pub success: bool,
    pub report: Report,
    /// Persisted row, or `null` when nothing was saved
    pub saved: Option<Value>,
}

/// Envelope for the simulated endpoints
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: DateTime<Utc>,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
