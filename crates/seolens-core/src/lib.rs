//! # seolens-core
//!
//! Core library for static SEO analysis of a single web page.
//!
//! This library provides:
//! - Plain-text, head metadata and link extraction from raw HTML
//! - Heuristic lexical-diversity and static performance scores
//! - robots.txt parsing and content audits (headings, alt text, metadata)
//! - A separate simulated-metrics generator for keyword and page-speed placeholders
//!
//! ## Features
//!
//! - `default`: Pure extraction and scoring over HTML you already have
//! - `fetch`: HTTP fetching and the end-to-end report pipeline
//!
//! ## Example
//!
//! ```
//! use seolens_core::{extract_links, extract_meta};
//!
//! let html = r#"<title>Home</title><a href="/b">x</a><a href="/b">y</a>"#;
//!
//! let meta = extract_meta(html);
//! assert_eq!(meta.title.as_deref(), Some("Home"));
//!
//! let links = extract_links("https://a.com/", html);
//! assert_eq!(links, vec!["https://a.com/b"]);
//! ```

pub mod audit;
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod records;
pub mod scoring;
pub mod simulated;
pub mod technical;
pub mod types;
pub mod url_utils;

#[cfg(feature = "fetch")]
pub mod fetch;

// Re-export commonly used types
pub use error::{AnalysisError, Result};
pub use records::{AnalysisPayload, AnalysisRecord};
pub use types::{
    ContentMetrics, FetchedPage, MetaRecord, PerformanceEstimate, Report, TextStats,
    UniquenessReport,
};

pub use parser::{extract_links, extract_meta, extract_text, text_stats};
pub use pipeline::{build_report, uniqueness_from_html};
pub use scoring::{estimate_performance, performance_score, uniqueness_score};
pub use url_utils::{is_valid_domain, normalize_target};

#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, Fetcher};

#[cfg(feature = "fetch")]
pub use pipeline::{seo_report, uniqueness_report};
