//! Common types used across seolens

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::audit::ContentAudit;
use crate::technical::TechnicalChecks;

/// Head-level metadata extracted from a page.
///
/// Every field is optional; `None` means the tag was not found, which is
/// distinct from a tag that is present with empty content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaRecord {
    pub title: Option<String>,
    pub description: Option<String>,
    pub canonical: Option<String>,
    pub robots: Option<String>,
    pub charset: Option<String>,
    pub viewport: Option<String>,
    /// `og:*` properties keyed by the suffix after `og:`
    pub open_graph: BTreeMap<String, String>,
}

/// Word statistics over extracted plain text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub unique_words: usize,
    pub sample: String,
}

/// Static markup cost estimate.
///
/// Purely a function of the HTML string; nothing is rendered or timed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerformanceEstimate {
    pub html_size_bytes: usize,
    pub js_files: usize,
    pub css_files: usize,
    pub inline_styles_count: usize,
    pub performance_score_est: u8,
}

/// Content metrics section of a [`Report`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentMetrics {
    pub word_count: usize,
    pub unique_words: usize,
    pub uniqueness_score: u8,
    pub sample: String,
    pub links: Vec<String>,
}

/// Full analysis of a single fetched page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub domain: String,
    /// Effective URL after redirects
    pub url: String,
    pub timestamp: DateTime<Utc>,
    pub meta: MetaRecord,
    pub metrics: ContentMetrics,
    pub performance: PerformanceEstimate,
    pub technical: TechnicalChecks,
    pub content: ContentAudit,
}

/// Response body of the lexical-diversity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniquenessReport {
    pub success: bool,
    pub domain: String,
    pub score: u8,
    pub word_count: usize,
    pub unique_words: usize,
    pub sample: String,
}

/// Primary document returned by the fetcher
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    /// URL that was requested
    pub requested_url: String,
    /// Effective URL after redirects
    pub final_url: String,
    pub status: u16,
    pub body: String,
    pub x_frame_options: Option<String>,
    pub content_security_policy: Option<String>,
}
