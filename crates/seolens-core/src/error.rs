//! Error taxonomy shared by the pipeline, the server and the CLI

use thiserror::Error;

/// Failures surfaced by the analysis pipeline.
///
/// The extraction stages never fail; only input validation, the primary
/// network fetch and the optional persistence step produce these.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("could not fetch {url}: {reason}")]
    FetchFailed {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("failed to persist analysis: {0}")]
    PersistenceFailed(String),

    #[error("{0}")]
    Unexpected(String),
}

impl AnalysisError {
    /// HTTP status of the upstream response, when the failure was a non-2xx reply
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            Self::FetchFailed { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
