//! Route handlers
//!
//! Bodies are read as raw bytes so that a malformed JSON payload is treated
//! the same as a missing domain.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use seolens_core::simulated::{
    KeywordAnalysis, default_keywords, simulate_keywords, simulate_seo_analysis,
};
use seolens_core::{AnalysisError, AnalysisRecord, is_valid_domain, seo_report, uniqueness_report};
use serde_json::Value;
use tracing::{info, warn};

use crate::AppState;
use crate::types::*;

const DOMAIN_REQUIRED: &str = "domain is required";

/// Lexical-diversity check of a live page
pub async fn analyze_domain_real(State(state): State<AppState>, body: Bytes) -> Response {
    let request = AnalysisRequest::from_body(&body);
    let Some(domain) = request.domain() else {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bare(DOMAIN_REQUIRED)))
            .into_response();
    };

    match uniqueness_report(&state.fetcher, domain).await {
        Ok(report) => Json(report).into_response(),
        Err(AnalysisError::InvalidInput(msg)) => {
            (StatusCode::BAD_REQUEST, Json(ErrorResponse::bare(msg))).into_response()
        }
        Err(err @ AnalysisError::FetchFailed { .. }) => {
            warn!(domain, error = %err, "uniqueness check failed");
            let body = match err.upstream_status() {
                Some(status) => {
                    ErrorResponse::bare("Could not fetch domain").with_status(Some(status))
                }
                None => ErrorResponse::bare(err.to_string()),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
        Err(err) => {
            warn!(domain, error = %err, "uniqueness check failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::bare(err.to_string())))
                .into_response()
        }
    }
}

/// Full report of a live page, persisted when a store is configured
pub async fn seo_report_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request = AnalysisRequest::from_body(&body);
    let Some(domain) = request.domain() else {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::failed(DOMAIN_REQUIRED)))
            .into_response();
    };

    let report = match seo_report(&state.fetcher, domain).await {
        Ok(report) => report,
        Err(err) => {
            let status = match err {
                AnalysisError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                AnalysisError::FetchFailed { .. } => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(domain, error = %err, status = status.as_u16(), "seo report failed");
            return (status, Json(ErrorResponse::failed(err.to_string()))).into_response();
        }
    };

    let saved = persist(&state, || {
        AnalysisRecord::seo_report(report.clone(), request.project_id())
    })
    .await;

    Json(SeoReportResponse {
        success: true,
        report,
        saved,
    })
    .into_response()
}

/// Simulated SEO analysis
pub async fn analyze_domain(State(state): State<AppState>, body: Bytes) -> Response {
    let request = AnalysisRequest::from_body(&body);
    let Some(domain) = request.domain() else {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::failed(DOMAIN_REQUIRED)))
            .into_response();
    };
    if !is_valid_domain(domain) {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::failed("invalid domain format")))
            .into_response();
    }

    let analysis = {
        let mut rng = rand::thread_rng();
        simulate_seo_analysis(domain, &mut rng)
    };
    info!(domain, overall = analysis.seo_score.overall, "simulated analysis generated");

    if let Some(project_id) = request.project_id() {
        persist(&state, || AnalysisRecord::technical(analysis.clone(), Some(project_id))).await;
    }

    Json(DataResponse::new(analysis)).into_response()
}

/// Simulated keyword rankings
pub async fn keyword_analysis(State(state): State<AppState>, body: Bytes) -> Response {
    let request = AnalysisRequest::from_body(&body);
    let Some(domain) = request.domain() else {
        return (StatusCode::BAD_REQUEST, Json(ErrorResponse::failed(DOMAIN_REQUIRED)))
            .into_response();
    };

    let keywords: Vec<String> = match request.keywords.as_deref() {
        Some(list) if list.iter().any(|k| !k.trim().is_empty()) => list
            .iter()
            .map(|k| k.trim())
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect(),
        _ => default_keywords(domain),
    };

    let analysis = {
        let mut rng = rand::thread_rng();
        KeywordAnalysis::new(simulate_keywords(&keywords, &mut rng))
    };
    info!(domain, keywords = analysis.keywords.len(), "simulated keyword analysis generated");

    if let Some(project_id) = request.project_id() {
        persist(&state, || {
            AnalysisRecord::keyword(domain, analysis.clone(), Some(project_id))
        })
        .await;
    }

    Json(DataResponse::new(analysis)).into_response()
}

pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::bare("Not Found")))
}

/// Save a row if a store is configured. Failures are logged, never surfaced.
async fn persist(state: &AppState, record: impl FnOnce() -> AnalysisRecord) -> Option<Value> {
    let store = state.store.as_ref()?;
    let record = record();
    match store.save(&record).await {
        Ok(row) => {
            info!(id = %record.id, kind = record.payload.analysis_type(), "analysis saved");
            Some(row)
        }
        Err(err) => {
            warn!(id = %record.id, error = %err, "failed to save analysis");
            None
        }
    }
}
