//! Fetch → extract → score, assembled into the two response bodies

use chrono::Utc;

use crate::audit::audit_content;
use crate::parser::{
    LONG_SAMPLE_LEN, SHORT_SAMPLE_LEN, extract_links, extract_meta, extract_text, text_stats,
};
use crate::scoring::{estimate_performance, uniqueness_score};
use crate::technical::TechnicalChecks;
use crate::types::{ContentMetrics, FetchedPage, Report, UniquenessReport};

#[cfg(feature = "fetch")]
use crate::{
    error::Result, fetch::Fetcher, technical::analyze_technical, url_utils::normalize_target,
};
#[cfg(feature = "fetch")]
use tracing::info;

/// Lexical-diversity summary of an already fetched document
pub fn uniqueness_from_html(domain: &str, html: &str) -> UniquenessReport {
    let stats = text_stats(&extract_text(html), SHORT_SAMPLE_LEN);
    UniquenessReport {
        success: true,
        domain: domain.to_string(),
        score: uniqueness_score(&stats),
        word_count: stats.word_count,
        unique_words: stats.unique_words,
        sample: stats.sample,
    }
}

/// Merge every extraction stage over `page` into a report.
///
/// Links resolve against the post-redirect URL.
pub fn build_report(domain: &str, page: &FetchedPage, technical: TechnicalChecks) -> Report {
    let html = page.body.as_str();
    let meta = extract_meta(html);
    let stats = text_stats(&extract_text(html), LONG_SAMPLE_LEN);
    let content = audit_content(html, &meta, &stats);

    Report {
        domain: domain.to_string(),
        url: page.final_url.clone(),
        timestamp: Utc::now(),
        metrics: ContentMetrics {
            word_count: stats.word_count,
            unique_words: stats.unique_words,
            uniqueness_score: uniqueness_score(&stats),
            sample: stats.sample,
            links: extract_links(&page.final_url, html),
        },
        performance: estimate_performance(html),
        meta,
        technical,
        content,
    }
}

/// Fetch `domain` and score its lexical diversity
#[cfg(feature = "fetch")]
pub async fn uniqueness_report(fetcher: &Fetcher, domain: &str) -> Result<UniquenessReport> {
    let url = normalize_target(domain)?;
    let page = fetcher.fetch_page(&url).await?;
    let report = uniqueness_from_html(domain, &page.body);
    info!(domain, score = report.score, words = report.word_count, "uniqueness computed");
    Ok(report)
}

/// Fetch `domain`, its robots.txt and sitemap, and build the full report
#[cfg(feature = "fetch")]
pub async fn seo_report(fetcher: &Fetcher, domain: &str) -> Result<Report> {
    let url = normalize_target(domain)?;
    let page = fetcher.fetch_page(&url).await?;
    let technical = analyze_technical(fetcher, &page).await;
    let report = build_report(domain, &page, technical);
    info!(
        domain,
        url = %report.url,
        links = report.metrics.links.len(),
        issues = report.content.issues.len(),
        "report built"
    );
    Ok(report)
}
