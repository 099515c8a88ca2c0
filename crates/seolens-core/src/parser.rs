//! Regex-based extraction of text, head metadata and links from raw HTML
//!
//! All functions here are best-effort and total: any input string yields a
//! defined result. Malformed or deeply nested markup can produce partial or
//! incorrect extraction; that is a known limitation of single-pass regex
//! matching, not an error condition.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashSet;
use url::Url;

use crate::types::{MetaRecord, TextStats};

/// Upper bound on the number of links returned by [`extract_links`]
pub const MAX_LINKS: usize = 200;

/// Sample length used by the lexical-diversity check
pub const SHORT_SAMPLE_LEN: usize = 300;

/// Sample length used by the full report
pub const LONG_SAMPLE_LEN: usize = 800;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid built-in regex")
}

static RE_TAG_BLOCKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<script[^>]*>.*?</script>",
        r"(?is)<style[^>]*>.*?</style>",
    ]
    .into_iter()
    .map(compile)
    .collect()
});
static RE_TAG: Lazy<Regex> = Lazy::new(|| compile(r"<[^>]+>"));
static RE_ENTITY: Lazy<Regex> = Lazy::new(|| compile(r"&(?:nbsp|#160|amp|lt|gt|quot|apos);"));
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| compile(r"\s+"));

/// Strip markup from HTML and return collapsed plain text.
///
/// Script and style blocks are dropped entirely, every other tag becomes a
/// single space, a small set of named entities is decoded, and whitespace
/// runs collapse to one space.
pub fn extract_text(html: &str) -> String {
    let mut text = html.to_string();
    for re in RE_TAG_BLOCKS.iter() {
        text = re.replace_all(&text, " ").into_owned();
    }
    let text = RE_TAG.replace_all(&text, " ");

    // Single pass so that "&amp;lt;" decodes to the literal "&lt;"
    let text = RE_ENTITY.replace_all(&text, |caps: &Captures| {
        match &caps[0] {
            "&nbsp;" | "&#160;" => " ",
            "&amp;" => "&",
            "&lt;" => "<",
            "&gt;" => ">",
            "&quot;" => "\"",
            _ => "'",
        }
        .to_string()
    });

    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Count words and distinct words in already-extracted text.
///
/// Tokens are compared with exact, case-sensitive equality. The sample holds
/// the first `sample_len` characters of `text`.
pub fn text_stats(text: &str, sample_len: usize) -> TextStats {
    let mut seen = HashSet::new();
    let mut word_count = 0;
    for word in text.split_whitespace() {
        word_count += 1;
        seen.insert(word);
    }

    TextStats {
        word_count,
        unique_words: seen.len(),
        sample: text.chars().take(sample_len).collect(),
    }
}

static RE_TITLE: Lazy<Regex> = Lazy::new(|| compile(r"(?is)<title[^>]*>(.*?)</title>"));
static RE_DESCRIPTION_NAME_FIRST: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?i)<meta[^>]+name=["']description["'][^>]*content=["']([^"']*)["'][^>]*>"#)
});
static RE_DESCRIPTION_CONTENT_FIRST: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?i)<meta[^>]+content=["']([^"']*)["'][^>]*name=["']description["'][^>]*>"#)
});
static RE_CANONICAL: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?i)<link[^>]+rel=["']canonical["'][^>]*href=["']([^"']*)["'][^>]*>"#)
});
static RE_ROBOTS: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?i)<meta[^>]+name=["']robots["'][^>]*content=["']([^"']*)["'][^>]*>"#)
});
static RE_CHARSET: Lazy<Regex> =
    Lazy::new(|| compile(r#"(?i)<meta[^>]+charset=["']?([^"'>\s]+)["']?[^>]*>"#));
static RE_VIEWPORT: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?i)<meta[^>]+name=["']viewport["'][^>]*content=["']([^"']*)["'][^>]*>"#)
});
static RE_OPEN_GRAPH: Lazy<Regex> = Lazy::new(|| {
    compile(r#"(?i)<meta[^>]+property=["']og:([^"']+)["'][^>]*content=["']([^"']*)["'][^>]*>"#)
});

fn first_capture(re: &Regex, html: &str) -> Option<String> {
    re.captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Extract head-level metadata from raw HTML.
///
/// Each field is matched independently and the first occurrence in the
/// document wins. Missing fields stay `None`.
pub fn extract_meta(html: &str) -> MetaRecord {
    let mut meta = MetaRecord {
        title: first_capture(&RE_TITLE, html),
        canonical: first_capture(&RE_CANONICAL, html),
        robots: first_capture(&RE_ROBOTS, html),
        charset: first_capture(&RE_CHARSET, html),
        viewport: first_capture(&RE_VIEWPORT, html),
        ..Default::default()
    };

    // The description attribute order varies; whichever tag appears first wins
    let name_first = RE_DESCRIPTION_NAME_FIRST.captures(html);
    let content_first = RE_DESCRIPTION_CONTENT_FIRST.captures(html);
    let description = match (name_first, content_first) {
        (Some(a), Some(b)) => {
            if a.get(0).map(|m| m.start()) <= b.get(0).map(|m| m.start()) {
                Some(a)
            } else {
                Some(b)
            }
        }
        (a, b) => a.or(b),
    };
    meta.description = description
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string());

    for caps in RE_OPEN_GRAPH.captures_iter(html) {
        meta.open_graph
            .entry(caps[1].to_string())
            .or_insert_with(|| caps[2].to_string());
    }

    meta
}

static RE_ANCHOR_HREF: Lazy<Regex> =
    Lazy::new(|| compile(r#"(?i)<a[^>]+href=["']([^"']+)["'][^>]*>"#));

/// Collect anchor hrefs as absolute URLs.
///
/// Each href is resolved against `base_url`; hrefs that fail to resolve are
/// skipped. Results are deduplicated by exact string in first-seen order and
/// capped at [`MAX_LINKS`].
pub fn extract_links(base_url: &str, html: &str) -> Vec<String> {
    let Ok(base) = Url::parse(base_url) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for caps in RE_ANCHOR_HREF.captures_iter(html) {
        let Ok(resolved) = base.join(&caps[1]) else {
            continue;
        };
        let resolved = resolved.to_string();
        if seen.insert(resolved.clone()) {
            links.push(resolved);
            if links.len() == MAX_LINKS {
                break;
            }
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_removes_scripts_and_styles() {
        let html = r#"
            <html>
                <head>
                    <style type="text/css">
                        body { color: red; }
                    </style>
                </head>
                <body>
                    <h1>Main Content</h1>
                    <SCRIPT>
                        alert('xss')
                    </SCRIPT>
                    <p>Safe content</p>
                </body>
            </html>
        "#;

        let text = extract_text(html);
        assert_eq!(text, "Main Content Safe content");
    }

    #[test]
    fn test_extract_text_decodes_entities() {
        let html = "<p>Fish&nbsp;&amp;&#160;Chips &lt;3 &quot;tasty&quot; it&apos;s</p>";
        assert_eq!(extract_text(html), "Fish & Chips <3 \"tasty\" it's");
    }

    #[test]
    fn test_extract_text_decodes_in_single_pass() {
        assert_eq!(extract_text("a &amp;lt; b"), "a &lt; b");
    }

    #[test]
    fn test_extract_text_empty_input() {
        assert_eq!(extract_text(""), "");
        assert_eq!(extract_text("   \n\t "), "");
    }

    #[test]
    fn test_extract_text_tags_become_spaces() {
        assert_eq!(extract_text("one<br>two<span>three</span>"), "one two three");
    }

    #[test]
    fn test_extract_text_is_idempotent() {
        let documents = [
            "",
            "plain words only",
            "<div><p>Hello <b>world</b></p><script>var a = '<p>';</script></div>",
            "<ul>\n<li>One</li>\n<li>Two &amp; Three</li>\n</ul>",
            "broken < markup <without end",
            "<style>p{}</style><p>x&nbsp;y</p>",
        ];

        for html in documents {
            let once = extract_text(html);
            assert_eq!(extract_text(&once), once, "not idempotent for {html:?}");
        }
    }

    #[test]
    fn test_text_stats_counts() {
        let stats = text_stats("the cat and the hat", 300);
        assert_eq!(stats.word_count, 5);
        assert_eq!(stats.unique_words, 4);
        assert_eq!(stats.sample, "the cat and the hat");
    }

    #[test]
    fn test_text_stats_is_case_sensitive() {
        let stats = text_stats("Word word WORD", 300);
        assert_eq!(stats.unique_words, 3);
    }

    #[test]
    fn test_text_stats_empty() {
        let stats = text_stats("", 300);
        assert_eq!(stats.word_count, 0);
        assert_eq!(stats.unique_words, 0);
        assert_eq!(stats.sample, "");
    }

    #[test]
    fn test_text_stats_sample_counts_characters() {
        let stats = text_stats("çğüşöı çğüşöı", 4);
        assert_eq!(stats.sample, "çğüş");
    }

    #[test]
    fn test_extract_meta_title_and_description() {
        let meta = extract_meta(
            r#"<title>Home</title><meta name="description" content="Welcome">"#,
        );
        assert_eq!(meta.title.as_deref(), Some("Home"));
        assert_eq!(meta.description.as_deref(), Some("Welcome"));
        assert_eq!(meta.canonical, None);
        assert_eq!(meta.robots, None);
        assert_eq!(meta.charset, None);
        assert_eq!(meta.viewport, None);
        assert!(meta.open_graph.is_empty());
    }

    #[test]
    fn test_extract_meta_missing_title_is_absent() {
        let meta = extract_meta("<html><body>No head here</body></html>");
        assert_eq!(meta.title, None);
        assert_eq!(meta, MetaRecord::default());
    }

    #[test]
    fn test_extract_meta_empty_content_is_present() {
        let meta = extract_meta(r#"<title></title><meta name="description" content="">"#);
        assert_eq!(meta.title.as_deref(), Some(""));
        assert_eq!(meta.description.as_deref(), Some(""));
    }

    #[test]
    fn test_extract_meta_content_before_name() {
        let meta = extract_meta(r#"<meta content="Reversed order" name="description">"#);
        assert_eq!(meta.description.as_deref(), Some("Reversed order"));
    }

    #[test]
    fn test_extract_meta_first_description_wins() {
        let html = r#"
            <meta content="First" name="description">
            <meta name="description" content="Second">
        "#;
        let meta = extract_meta(html);
        assert_eq!(meta.description.as_deref(), Some("First"));
    }

    #[test]
    fn test_extract_meta_full_head() {
        let html = r#"
            <html>
                <head>
                    <meta charset="UTF-8">
                    <TITLE>
                        Acme Widgets
                    </TITLE>
                    <meta name="viewport" content="width=device-width, initial-scale=1">
                    <meta name='robots' content='index, follow'>
                    <link rel="canonical" href="https://acme.test/">
                    <meta property="og:title" content="Acme">
                    <meta property="og:image" content="https://acme.test/og.png">
                    <meta property="og:title" content="Ignored duplicate">
                </head>
            </html>
        "#;

        let meta = extract_meta(html);
        assert_eq!(meta.title.as_deref(), Some("Acme Widgets"));
        assert_eq!(meta.charset.as_deref(), Some("UTF-8"));
        assert_eq!(
            meta.viewport.as_deref(),
            Some("width=device-width, initial-scale=1")
        );
        assert_eq!(meta.robots.as_deref(), Some("index, follow"));
        assert_eq!(meta.canonical.as_deref(), Some("https://acme.test/"));
        assert_eq!(meta.open_graph.len(), 2);
        assert_eq!(meta.open_graph["title"], "Acme");
        assert_eq!(meta.open_graph["image"], "https://acme.test/og.png");
    }

    #[test]
    fn test_extract_meta_charset_from_http_equiv() {
        let html = r#"<meta http-equiv="Content-Type" content="text/html; charset=iso-8859-1">"#;
        let meta = extract_meta(html);
        assert_eq!(meta.charset.as_deref(), Some("iso-8859-1"));
    }

    #[test]
    fn test_extract_links_deduplicates() {
        let links = extract_links(
            "https://a.com/",
            r#"<a href="/b">x</a><a href="/b">y</a>"#,
        );
        assert_eq!(links, vec!["https://a.com/b".to_string()]);
    }

    #[test]
    fn test_extract_links_resolves_relative_and_keeps_order() {
        let html = r#"
            <a href="https://other.org">Other</a>
            <A class="nav" HREF='docs/intro.html'>Docs</A>
            <a href="../up">Up</a>
            <a href="https://other.org/">Other again</a>
        "#;
        let links = extract_links("https://a.com/blog/post", html);
        assert_eq!(
            links,
            vec![
                "https://other.org/".to_string(),
                "https://a.com/blog/docs/intro.html".to_string(),
                "https://a.com/up".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_links_drops_unresolvable() {
        let html = r#"<a href="http://[broken">bad</a><a href="/ok">ok</a>"#;
        let links = extract_links("https://a.com/", html);
        assert_eq!(links, vec!["https://a.com/ok".to_string()]);
    }

    #[test]
    fn test_extract_links_invalid_base() {
        let links = extract_links("not a url", r#"<a href="/b">x</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn test_extract_links_caps_result() {
        let html: String = (0..450)
            .map(|i| format!(r#"<a href="/page/{i}">{i}</a>"#))
            .collect();
        let links = extract_links("https://a.com/", &html);
        assert_eq!(links.len(), MAX_LINKS);
        assert_eq!(links[0], "https://a.com/page/0");

        let unique: HashSet<&String> = links.iter().collect();
        assert_eq!(unique.len(), links.len());
        for link in &links {
            assert!(Url::parse(link).is_ok());
        }
    }
}
