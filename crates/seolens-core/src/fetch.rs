//! HTTP fetching of target pages and their site-root resources
//!
//! Requires the `fetch` feature (needs reqwest)

use std::time::Duration;

use reqwest::header::{CONTENT_SECURITY_POLICY, HeaderMap, X_FRAME_OPTIONS};
use tracing::{debug, warn};

use crate::error::{AnalysisError, Result};
use crate::types::FetchedPage;

/// Settings for [`Fetcher`]
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    /// Whole-request timeout; `None` waits for the server or the caller's own deadline
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!(
                "Mozilla/5.0 (compatible; seolens/{})",
                env!("CARGO_PKG_VERSION")
            ),
            timeout: None,
        }
    }
}

/// Shared HTTP client for page and auxiliary fetches.
///
/// Build one at process start and hand it to every request handler.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| AnalysisError::Unexpected(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Fetch the primary document.
    ///
    /// Redirects are followed. A single attempt is made; a non-2xx status,
    /// a transport error and an unreadable body all become
    /// [`AnalysisError::FetchFailed`].
    pub async fn fetch_page(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await.map_err(|e| {
            warn!(url, error = %e, "page fetch failed");
            AnalysisError::FetchFailed {
                url: url.to_string(),
                status: None,
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(url, status = status.as_u16(), "page fetch returned error status");
            return Err(AnalysisError::FetchFailed {
                url: url.to_string(),
                status: Some(status.as_u16()),
                reason: format!("HTTP {status}"),
            });
        }

        let final_url = response.url().to_string();
        let x_frame_options = header_text(response.headers(), X_FRAME_OPTIONS.as_str());
        let content_security_policy =
            header_text(response.headers(), CONTENT_SECURITY_POLICY.as_str());

        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::FetchFailed {
                url: url.to_string(),
                status: Some(status.as_u16()),
                reason: format!("failed to read response body: {e}"),
            })?;

        debug!(url, final_url = %final_url, bytes = body.len(), "fetched page");

        Ok(FetchedPage {
            requested_url: url.to_string(),
            final_url,
            status: status.as_u16(),
            body,
            x_frame_options,
            content_security_policy,
        })
    }

    /// Fetch an auxiliary text resource; any failure yields `None`
    pub async fn fetch_text(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!(url, error = %e, "auxiliary fetch failed");
                return None;
            }
        };

        if !response.status().is_success() {
            debug!(url, status = response.status().as_u16(), "auxiliary resource missing");
            return None;
        }

        response.text().await.ok()
    }

    /// Report whether a resource answers with a 2xx status.
    ///
    /// `None` means the request itself failed.
    pub async fn probe(&self, url: &str) -> Option<bool> {
        match self.client.get(url).send().await {
            Ok(resp) => Some(resp.status().is_success()),
            Err(e) => {
                debug!(url, error = %e, "probe failed");
                None
            }
        }
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim().to_string())
}
