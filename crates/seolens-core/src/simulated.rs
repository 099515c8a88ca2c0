//! Simulated SEO metrics
//!
//! Page-speed numbers, keyword positions and search volumes here are random
//! placeholders. They are not derived from the fetched page and are kept
//! apart from the heuristics in [`crate::scoring`] on purpose: nothing in
//! this module looks at HTML.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::audit::IssueSeverity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulatedAnalysis {
    pub domain: String,
    pub page_speed: PageSpeed,
    pub seo_score: SeoScore,
    pub keywords: Vec<KeywordPosition>,
    pub issues: Vec<SimulatedIssue>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeed {
    pub score: u8,
    /// Seconds
    pub load_time: f64,
    pub metrics: WebVitals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebVitals {
    pub fcp: f64,
    pub lcp: f64,
    pub ttfb: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeoScore {
    pub overall: u8,
    pub technical: u8,
    pub content: u8,
    pub mobile: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordPosition {
    pub keyword: String,
    pub position: u32,
    pub volume: u32,
    pub difficulty: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatedIssue {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: IssueSeverity,
    pub message: String,
}

const POSSIBLE_ISSUES: &[(&str, IssueSeverity, &str)] = &[
    ("meta", IssueSeverity::High, "Meta description is missing or too short"),
    ("title", IssueSeverity::Medium, "Page title is not optimized"),
    ("images", IssueSeverity::Medium, "Images are missing alt text"),
    ("mobile", IssueSeverity::High, "Mobile compatibility problems detected"),
    ("speed", IssueSeverity::Medium, "Page load speed should be optimized"),
    ("https", IssueSeverity::Low, "HTTPS is configured correctly"),
];

const RECOMMENDATIONS: &[&str] = &[
    "Keep your meta description between 150 and 160 characters",
    "Add target keywords to your page titles",
    "Compress images to improve load speed",
    "Use a responsive design for mobile devices",
    "Optimize internal links",
    "Publish high-quality, original content",
    "Create a sitemap",
    "Add social media integration",
];

/// Produce a random-but-plausible analysis for `domain`.
pub fn simulate_seo_analysis<R: Rng + ?Sized>(domain: &str, rng: &mut R) -> SimulatedAnalysis {
    let base: i32 = rng.gen_range(60..90);
    let jitter = |rng: &mut R| (base + rng.gen_range(-5..5)).clamp(0, 100) as u8;

    let page_speed = PageSpeed {
        score: (base + rng.gen_range(0..10)).min(100) as u8,
        load_time: rng.gen_range(1.0..4.0),
        metrics: WebVitals {
            fcp: rng.gen_range(0.5..2.5),
            lcp: rng.gen_range(1.0..4.0),
            ttfb: rng.gen_range(0.1..0.6),
        },
    };

    let seo_score = SeoScore {
        overall: base as u8,
        technical: jitter(rng),
        content: jitter(rng),
        mobile: jitter(rng),
    };

    let templates: [(String, u32, u32, u32, u32, u32); 5] = [
        (format!("about {domain}"), 50, 1000, 5000, 20, 50),
        (format!("what is {domain}"), 50, 500, 3000, 30, 40),
        (format!("{domain} features"), 100, 300, 2000, 20, 60),
        (format!("how to use {domain}"), 80, 200, 1500, 25, 50),
        (format!("{domain} pricing"), 60, 800, 4000, 30, 70),
    ];
    let keywords = templates
        .into_iter()
        .map(|(keyword, max_pos, min_vol, vol_span, min_diff, diff_span)| KeywordPosition {
            keyword,
            position: rng.gen_range(1..=max_pos),
            volume: min_vol + rng.gen_range(0..vol_span),
            difficulty: min_diff + rng.gen_range(0..diff_span),
        })
        .collect();

    let issue_count = rng.gen_range(2..=4);
    let issues = POSSIBLE_ISSUES
        .iter()
        .take(issue_count)
        .map(|(kind, severity, message)| SimulatedIssue {
            kind: kind.to_string(),
            severity: *severity,
            message: message.to_string(),
        })
        .collect();

    SimulatedAnalysis {
        domain: domain.to_string(),
        page_speed,
        seo_score,
        keywords,
        issues,
        recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetrics {
    pub keyword: String,
    pub position: u32,
    pub search_volume: u32,
    pub difficulty: u32,
    pub trend: Trend,
    pub cpc: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordSummary {
    pub total: usize,
    pub in_top10: usize,
    pub in_top50: usize,
    pub avg_position: u32,
    pub total_volume: u64,
}

/// Keyword rows plus their summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    pub keywords: Vec<KeywordMetrics>,
    pub summary: KeywordSummary,
}

impl KeywordAnalysis {
    pub fn new(keywords: Vec<KeywordMetrics>) -> Self {
        let summary = summarize_keywords(&keywords);
        Self { keywords, summary }
    }
}

/// Stem of a domain: `www.` and everything from the first dot removed
fn domain_stem(domain: &str) -> &str {
    let domain = domain.strip_prefix("www.").unwrap_or(domain);
    domain.split('.').next().unwrap_or(domain)
}

/// Keyword phrases generated when the caller supplies none
pub fn default_keywords(domain: &str) -> Vec<String> {
    let stem = domain_stem(domain);
    vec![
        stem.to_string(),
        format!("what is {stem}"),
        format!("about {stem}"),
        format!("how to use {stem}"),
        format!("{stem} features"),
        format!("{stem} pricing"),
        format!("{stem} review"),
        format!("{stem} reviews"),
        format!("{stem} alternatives"),
        format!("best {stem}"),
    ]
}

/// Random ranking data for each keyword
pub fn simulate_keywords<R: Rng + ?Sized>(keywords: &[String], rng: &mut R) -> Vec<KeywordMetrics> {
    keywords
        .iter()
        .map(|keyword| {
            let base_volume = if keyword.chars().count() < 15 { 5000 } else { 2000 };
            let trend = match rng.gen_range(0..3) {
                0 => Trend::Up,
                1 => Trend::Down,
                _ => Trend::Stable,
            };
            KeywordMetrics {
                keyword: keyword.clone(),
                position: rng.gen_range(1..=100),
                search_volume: 500 + rng.gen_range(0..base_volume),
                difficulty: rng.gen_range(20..90),
                trend,
                cpc: rng.gen_range(0.5..5.5),
            }
        })
        .collect()
}

pub fn summarize_keywords(rows: &[KeywordMetrics]) -> KeywordSummary {
    let total = rows.len();
    let position_sum: u64 = rows.iter().map(|k| u64::from(k.position)).sum();
    let avg_position = if total == 0 {
        0
    } else {
        (position_sum as f64 / total as f64).round() as u32
    };

    KeywordSummary {
        total,
        in_top10: rows.iter().filter(|k| k.position <= 10).count(),
        in_top50: rows.iter().filter(|k| k.position <= 50).count(),
        avg_position,
        total_volume: rows.iter().map(|k| u64::from(k.search_volume)).sum(),
    }
}

/// Weighted 0-100 score: top-10 share (50), top-50 share (30), volume (20)
pub fn keyword_score(rows: &[KeywordMetrics]) -> u8 {
    if rows.is_empty() {
        return 0;
    }
    let summary = summarize_keywords(rows);
    let total = summary.total as f64;
    let top10 = summary.in_top10 as f64 / total * 50.0;
    let top50 = summary.in_top50 as f64 / total * 30.0;
    let volume = (summary.total_volume as f64 / 10_000.0).min(1.0) * 20.0;
    (top10 + top50 + volume).round().min(100.0) as u8
}
