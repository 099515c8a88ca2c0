//! Content audit over the real page markup
//!
//! Checks heading structure, image alt coverage and the head metadata found
//! by [`crate::parser::extract_meta`], and turns the findings into a list of
//! issues with a severity-weighted score.

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::types::{MetaRecord, TextStats};

/// Documents below this word count are flagged as thin content
pub const THIN_CONTENT_WORDS: usize = 300;

const TITLE_RANGE: (usize, usize) = (10, 60);
const DESCRIPTION_RANGE: (usize, usize) = (50, 160);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentAudit {
    /// 0-100, reduced per issue by severity
    pub score: u8,
    pub headings: HeadingSummary,
    pub images: ImageSummary,
    pub issues: Vec<ContentIssue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingSummary {
    /// Counts of h1 through h6
    pub distribution: Vec<usize>,
    pub has_single_h1: bool,
    /// No heading level is skipped
    pub proper_hierarchy: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub total_images: usize,
    pub images_with_alt: usize,
    pub images_missing_alt: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentIssue {
    /// Area of the page the issue concerns (`title`, `meta`, `images`, ...)
    pub kind: String,
    pub severity: IssueSeverity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    High,
    Medium,
    Low,
}

impl IssueSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    fn deduction(self) -> u32 {
        match self {
            Self::High => 10,
            Self::Medium => 5,
            Self::Low => 2,
        }
    }
}

/// Audit a page. Never fails; unparseable markup simply yields fewer findings.
pub fn audit_content(html: &str, meta: &MetaRecord, stats: &TextStats) -> ContentAudit {
    let document = Html::parse_document(html);
    let headings = summarize_headings(&document);
    let images = summarize_images(&document);

    let mut issues = Vec::new();
    let mut push = |kind: &str, severity: IssueSeverity, message: String| {
        issues.push(ContentIssue {
            kind: kind.to_string(),
            severity,
            message,
        });
    };

    match meta.title.as_deref() {
        None => push("title", IssueSeverity::High, "Page has no <title>".to_string()),
        Some(title) => {
            let len = title.chars().count();
            if len < TITLE_RANGE.0 || len > TITLE_RANGE.1 {
                push(
                    "title",
                    IssueSeverity::Medium,
                    format!(
                        "Title is {len} characters; aim for {}-{}",
                        TITLE_RANGE.0, TITLE_RANGE.1
                    ),
                );
            }
        }
    }

    match meta.description.as_deref() {
        None => push(
            "meta",
            IssueSeverity::High,
            "Meta description is missing".to_string(),
        ),
        Some(description) => {
            let len = description.chars().count();
            if len < DESCRIPTION_RANGE.0 {
                push(
                    "meta",
                    IssueSeverity::Medium,
                    format!(
                        "Meta description is too short ({len} characters); keep it around 150-160"
                    ),
                );
            } else if len > DESCRIPTION_RANGE.1 {
                push(
                    "meta",
                    IssueSeverity::Medium,
                    format!("Meta description is too long ({len} characters); keep it under 160"),
                );
            }
        }
    }

    if meta.viewport.is_none() {
        push(
            "mobile",
            IssueSeverity::High,
            "No viewport meta tag; the page may not render well on mobile".to_string(),
        );
    }

    if meta.canonical.is_none() {
        push(
            "canonical",
            IssueSeverity::Low,
            "No canonical link declared".to_string(),
        );
    }

    let h1_count = headings.distribution.first().copied().unwrap_or(0);
    if h1_count == 0 {
        push("headings", IssueSeverity::Medium, "No <h1> heading".to_string());
    } else if h1_count > 1 {
        push(
            "headings",
            IssueSeverity::Medium,
            format!("{h1_count} <h1> headings; use a single main heading"),
        );
    }
    if !headings.proper_hierarchy {
        push(
            "headings",
            IssueSeverity::Low,
            "Heading levels are skipped".to_string(),
        );
    }

    if images.images_missing_alt > 0 {
        push(
            "images",
            IssueSeverity::Medium,
            format!(
                "{} of {} images have no alt text",
                images.images_missing_alt, images.total_images
            ),
        );
    }

    if stats.word_count < THIN_CONTENT_WORDS {
        push(
            "content",
            IssueSeverity::Medium,
            format!("Thin content: {} words", stats.word_count),
        );
    }

    let score = issues
        .iter()
        .fold(100u32, |score, issue| score.saturating_sub(issue.severity.deduction()));

    ContentAudit {
        score: score as u8,
        headings,
        images,
        issues,
    }
}

fn summarize_headings(document: &Html) -> HeadingSummary {
    let distribution: Vec<usize> = ["h1", "h2", "h3", "h4", "h5", "h6"]
        .iter()
        .map(|tag| count_elements(document, tag))
        .collect();

    let mut proper_hierarchy = true;
    let mut last_level = 0;
    for (idx, &count) in distribution.iter().enumerate() {
        if count > 0 {
            let level = idx + 1;
            if last_level > 0 && level > last_level + 1 {
                proper_hierarchy = false;
            }
            last_level = level;
        }
    }

    HeadingSummary {
        has_single_h1: distribution[0] == 1,
        distribution,
        proper_hierarchy,
    }
}

fn summarize_images(document: &Html) -> ImageSummary {
    let total_images = count_elements(document, "img");
    let images_with_alt = count_elements(document, "img[alt]");
    ImageSummary {
        total_images,
        images_with_alt,
        images_missing_alt: total_images.saturating_sub(images_with_alt),
    }
}

fn count_elements(document: &Html, selector_str: &str) -> usize {
    Selector::parse(selector_str)
        .map(|selector| document.select(&selector).count())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{extract_meta, extract_text, text_stats};

    fn audit(html: &str) -> ContentAudit {
        let meta = extract_meta(html);
        let stats = text_stats(&extract_text(html), 300);
        audit_content(html, &meta, &stats)
    }

    fn kinds(audit: &ContentAudit) -> Vec<&str> {
        audit.issues.iter().map(|i| i.kind.as_str()).collect()
    }

    #[test]
    fn test_well_formed_page_has_few_issues() {
        let body = "word ".repeat(320);
        let html = format!(
            r#"<html><head>
                <title>Acme Widgets for Everyone</title>
                <meta name="description" content="{}">
                <meta name="viewport" content="width=device-width">
                <link rel="canonical" href="https://acme.test/">
            </head><body>
                <h1>Widgets</h1><h2>Small</h2><h3>Tiny</h3>
                <img src="a.png" alt="A widget"><img src="b.png" alt="">
                <p>{body}</p>
            </body></html>"#,
            "d".repeat(155)
        );

        let result = audit(&html);
        assert!(result.issues.is_empty(), "unexpected issues: {:?}", result.issues);
        assert_eq!(result.score, 100);
        assert!(result.headings.has_single_h1);
        assert!(result.headings.proper_hierarchy);
        assert_eq!(result.images.total_images, 2);
        assert_eq!(result.images.images_missing_alt, 0);
    }

    #[test]
    fn test_empty_page_reports_missing_metadata() {
        let result = audit("");
        let kinds = kinds(&result);
        assert!(kinds.contains(&"title"));
        assert!(kinds.contains(&"meta"));
        assert!(kinds.contains(&"mobile"));
        assert!(kinds.contains(&"canonical"));
        assert!(kinds.contains(&"headings"));
        assert!(kinds.contains(&"content"));
        // 3 high, 2 medium, 1 low
        assert_eq!(result.score, 100 - 30 - 10 - 2);
    }

    #[test]
    fn test_heading_gaps_and_multiple_h1() {
        let result = audit("<h1>A</h1><h1>B</h1><h4>C</h4>");
        assert_eq!(result.headings.distribution, vec![2, 0, 0, 1, 0, 0]);
        assert!(!result.headings.has_single_h1);
        assert!(!result.headings.proper_hierarchy);
        assert!(result
            .issues
            .iter()
            .any(|i| i.kind == "headings" && i.severity == IssueSeverity::Low));
    }

    #[test]
    fn test_images_missing_alt() {
        let result = audit(r#"<img src="a.png"><img src="b.png"><img src="c.png" alt="c">"#);
        assert_eq!(result.images.images_missing_alt, 2);
        let issue = result.issues.iter().find(|i| i.kind == "images").unwrap();
        assert_eq!(issue.message, "2 of 3 images have no alt text");
    }

    #[test]
    fn test_short_description_is_medium() {
        let result = audit(r#"<meta name="description" content="Too short">"#);
        let issue = result.issues.iter().find(|i| i.kind == "meta").unwrap();
        assert_eq!(issue.severity, IssueSeverity::Medium);
        assert!(issue.message.contains("too short"));
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        for severity in [IssueSeverity::High, IssueSeverity::Medium, IssueSeverity::Low] {
            let json = serde_json::to_string(&severity).unwrap();
            assert_eq!(json, format!("\"{}\"", severity.as_str()));
        }
    }
}
