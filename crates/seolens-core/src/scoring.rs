//! Heuristic scorers
//!
//! Both scores are cheap static proxies. The lexical-diversity score does no
//! cross-document comparison, and the performance estimate never renders or
//! times anything.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{PerformanceEstimate, TextStats};

static RE_EXTERNAL_SCRIPT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<script[^>]+src=["'][^"']+["'][^>]*>"#).expect("invalid script regex")
});
static RE_STYLESHEET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<link[^>]+rel=["']stylesheet["'][^>]*>"#).expect("invalid stylesheet regex")
});
static RE_INLINE_STYLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)style=["'][\s\S]*?["']"#).expect("invalid style regex"));

/// Ratio of distinct words to total words, scaled to 0-100.
///
/// An empty document scores 0.
pub fn uniqueness_score(stats: &TextStats) -> u8 {
    let total = stats.word_count.max(1);
    let score = stats.unique_words.saturating_mul(100) / total;
    score.min(100) as u8
}

/// Estimate page weight from markup alone.
pub fn estimate_performance(html: &str) -> PerformanceEstimate {
    let html_size_bytes = html.len();
    let js_files = RE_EXTERNAL_SCRIPT.find_iter(html).count();
    let css_files = RE_STYLESHEET.find_iter(html).count();
    let inline_styles_count = RE_INLINE_STYLE.find_iter(html).count();

    PerformanceEstimate {
        html_size_bytes,
        js_files,
        css_files,
        inline_styles_count,
        performance_score_est: performance_score(html_size_bytes, js_files),
    }
}

/// `max(0, 100 - floor(size / 10000) - 2 * scripts)`
pub fn performance_score(html_size_bytes: usize, js_files: usize) -> u8 {
    let penalty = (html_size_bytes / 10_000).saturating_add(js_files.saturating_mul(2));
    100usize.saturating_sub(penalty) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{extract_text, text_stats};

    fn stats(words: usize, unique: usize) -> TextStats {
        TextStats {
            word_count: words,
            unique_words: unique,
            sample: String::new(),
        }
    }

    #[test]
    fn test_uniqueness_empty_document() {
        assert_eq!(uniqueness_score(&stats(0, 0)), 0);
        let empty = text_stats(&extract_text(""), 300);
        assert_eq!(uniqueness_score(&empty), 0);
    }

    #[test]
    fn test_uniqueness_floors_ratio() {
        assert_eq!(uniqueness_score(&stats(3, 2)), 66);
        assert_eq!(uniqueness_score(&stats(5, 4)), 80);
        assert_eq!(uniqueness_score(&stats(7, 7)), 100);
    }

    #[test]
    fn test_uniqueness_bounds_for_documents() {
        let documents = [
            "<p>one one one one</p>",
            "<p>alpha beta gamma</p>",
            "<div>a b a b a b c</div><script>x y z</script>",
            "",
        ];
        for html in documents {
            let s = text_stats(&extract_text(html), 300);
            assert!(s.word_count >= s.unique_words);
            assert!(uniqueness_score(&s) <= 100);
        }
    }

    #[test]
    fn test_estimate_performance_counts_assets() {
        let html = r#"
            <link rel="stylesheet" href="/a.css">
            <link rel='stylesheet' href='/b.css'>
            <link rel="icon" href="/favicon.ico">
            <script src="/app.js"></script>
            <script type="module" SRC='/vendor.js'></script>
            <script>inline()</script>
            <div style="color: red">x</div>
            <p STYLE='margin:0'>y</p>
        "#;

        let estimate = estimate_performance(html);
        assert_eq!(estimate.js_files, 2);
        assert_eq!(estimate.css_files, 2);
        assert_eq!(estimate.inline_styles_count, 2);
        assert_eq!(estimate.html_size_bytes, html.len());
        assert_eq!(estimate.performance_score_est, 96);
    }

    #[test]
    fn test_performance_score_size_penalty() {
        assert_eq!(performance_score(0, 0), 100);
        assert_eq!(performance_score(9_999, 0), 100);
        assert_eq!(performance_score(10_000, 0), 99);
        assert_eq!(performance_score(250_000, 3), 69);
    }

    #[test]
    fn test_performance_score_clamps_at_zero() {
        assert_eq!(performance_score(5_000_000, 0), 0);
        assert_eq!(performance_score(0, 80), 0);
        assert_eq!(performance_score(usize::MAX, usize::MAX), 0);
    }

    #[test]
    fn test_performance_score_monotonic_in_size() {
        for scripts in [0, 1, 10] {
            let mut previous = performance_score(0, scripts);
            for size in (0..2_000_000).step_by(7_919) {
                let current = performance_score(size, scripts);
                assert!(current <= previous);
                assert!(current <= 100);
                previous = current;
            }
        }
    }

    #[test]
    fn test_html_size_counts_utf8_bytes() {
        let estimate = estimate_performance("ğ");
        assert_eq!(estimate.html_size_bytes, 2);
    }
}
