//! # seolens-server
//!
//! HTTP API over `seolens-core`.
//!
//! | Route                       | Purpose                                   |
//! |-----------------------------|-------------------------------------------|
//! | `POST /analyze-domain-real` | Lexical-diversity score of a live page    |
//! | `POST /seo-report`          | Full report, persisted when configured    |
//! | `POST /analyze-domain`      | Simulated SEO analysis                    |
//! | `POST /keyword-analysis`    | Simulated keyword rankings                |
//! | `GET /health`               | Liveness                                  |
//!
//! Every response carries permissive CORS headers and `OPTIONS` is answered
//! with `204` on any path.

pub mod config;
pub mod cors;
pub mod handlers;
pub mod store;
pub mod telemetry;
pub mod types;

use std::any::Any;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    Json, Router,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use seolens_core::Fetcher;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::types::ErrorResponse;

pub use config::ServerConfig;
pub use store::{MemoryStore, ReportStore, SupabaseStore};

/// Shared state handed to every handler.
///
/// Built once at startup; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<Fetcher>,
    pub store: Option<Arc<dyn ReportStore>>,
}

impl AppState {
    pub fn new(fetcher: Fetcher, store: Option<Arc<dyn ReportStore>>) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            store,
        }
    }

    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let fetcher = Fetcher::new(config.fetch_config()).context("failed to create fetcher")?;

        let store: Option<Arc<dyn ReportStore>> = match config.supabase() {
            Some((url, key)) => {
                let store = SupabaseStore::new(url, key, &config.analyses_table)
                    .context("failed to create Supabase store")?;
                info!(endpoint = store.endpoint(), "persistence enabled");
                Some(Arc::new(store) as Arc<dyn ReportStore>)
            }
            None => {
                info!("persistence disabled; SUPABASE_URL or SUPABASE_SERVICE_ROLE_KEY not set");
                None
            }
        };

        Ok(Self::new(fetcher, store))
    }
}

/// Build the application router with all middleware applied
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route(
            "/analyze-domain-real",
            post(handlers::analyze_domain_real).layer(CatchPanicLayer::custom(bare_panic_response)),
        )
        .route("/seo-report", post(handlers::seo_report_handler))
        .route("/analyze-domain", post(handlers::analyze_domain))
        .route("/keyword-analysis", post(handlers::keyword_analysis))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state);

    with_middleware(routes)
}

fn with_middleware(router: Router) -> Router {
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn(cors::cors_middleware))
        .layer(TraceLayer::new_for_http())
}

fn panic_message(panic: Box<dyn Any + Send + 'static>) -> String {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "internal error".to_string()
    };
    error!(panic = %message, "handler panicked");
    message
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let body = ErrorResponse::failed(panic_message(panic));
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

/// The uniqueness endpoint reports every failure as a bare `{error}`
fn bare_panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let body = ErrorResponse::bare(panic_message(panic));
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
