//! End-to-end pipeline tests against a local mock site

#![cfg(feature = "fetch")]

use seolens_core::{AnalysisError, FetchConfig, Fetcher, seo_report, uniqueness_report};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HOME: &str = r#"<!doctype html>
<html>
<head>
  <title>Mock Site Home</title>
  <meta name="description" content="A small site used in tests">
  <meta property="og:title" content="Mock Site">
  <script src="/app.js"></script>
  <style>body { color: red; }</style>
</head>
<body>
  <h1>Welcome</h1>
  <p>Alpha beta beta gamma.</p>
  <a href="/about">About</a>
  <a href="/about">About again</a>
  <a href="http://[bad">Broken</a>
</body>
</html>"#;

async fn mock_site() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Security-Policy", "default-src 'self'")
                .set_body_string(HOME),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /admin\n"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    server
}

fn fetcher() -> Fetcher {
    Fetcher::new(FetchConfig::default()).unwrap()
}

#[tokio::test]
async fn test_seo_report_end_to_end() {
    let server = mock_site().await;
    let domain = server.uri();

    let report = seo_report(&fetcher(), &domain).await.unwrap();

    assert_eq!(report.domain, domain);
    assert_eq!(report.meta.title.as_deref(), Some("Mock Site Home"));
    assert_eq!(
        report.meta.description.as_deref(),
        Some("A small site used in tests")
    );
    assert_eq!(report.meta.open_graph.get("title").map(String::as_str), Some("Mock Site"));
    assert_eq!(report.metrics.links, vec![format!("{domain}/about")]);
    assert!(!report.metrics.sample.contains("color: red"));
    assert_eq!(report.performance.js_files, 1);

    assert_eq!(report.technical.robots.as_deref(), Some("User-agent: *\nDisallow: /admin\n"));
    assert_eq!(report.technical.sitemap, Some(false));
    assert!(!report.technical.security.https);
    assert_eq!(
        report.technical.security.content_security_policy.as_deref(),
        Some("default-src 'self'")
    );
}

#[tokio::test]
async fn test_uniqueness_report_end_to_end() {
    let server = mock_site().await;

    let report = uniqueness_report(&fetcher(), &server.uri()).await.unwrap();
    assert!(report.success);
    assert!(report.word_count >= report.unique_words);
    assert!(report.score <= 100);
    assert!(report.sample.starts_with("Mock Site Home"));
    assert!(report.sample.chars().count() <= 300);
}

#[tokio::test]
async fn test_upstream_404_is_fetch_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = seo_report(&fetcher(), &server.uri()).await.unwrap_err();
    assert_eq!(err.upstream_status(), Some(404));
    assert!(err.to_string().contains("could not fetch"));
}

#[tokio::test]
async fn test_empty_domain_is_invalid_input() {
    let err = uniqueness_report(&fetcher(), "  ").await.unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidInput(ref msg) if msg == "domain is required"));
}
