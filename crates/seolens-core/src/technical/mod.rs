//! Technical checks: robots.txt, sitemap presence and transport security

pub mod robots;

use serde::{Deserialize, Serialize};

use crate::types::FetchedPage;

#[cfg(feature = "fetch")]
use crate::fetch::Fetcher;
#[cfg(feature = "fetch")]
use crate::url_utils::well_known_url;

pub use robots::{
    AccessLevel, AgentRules, CrawlerAccess, RobotsRules, is_path_allowed, parse_robots_txt,
};

/// Technical section of a report.
///
/// `robots` and `sitemap` are `None` when the auxiliary fetch failed, so a
/// missing file (`None` body / `Some(false)`) can be told apart from an
/// unreachable one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TechnicalChecks {
    /// Raw robots.txt body when served with a 2xx status
    pub robots: Option<String>,
    /// Whether `/sitemap.xml` answered with a 2xx status
    pub sitemap: Option<bool>,
    pub robots_rules: Option<RobotsRules>,
    pub security: SecurityChecks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityChecks {
    pub https: bool,
    pub x_frame_options: Option<String>,
    pub content_security_policy: Option<String>,
}

impl TechnicalChecks {
    /// Assemble checks from the primary page and the auxiliary fetch results
    pub fn from_parts(page: &FetchedPage, robots: Option<String>, sitemap: Option<bool>) -> Self {
        let robots_rules = robots.as_deref().map(parse_robots_txt);
        Self {
            robots,
            sitemap,
            robots_rules,
            security: SecurityChecks {
                https: page.final_url.to_ascii_lowercase().starts_with("https://"),
                x_frame_options: page.x_frame_options.clone(),
                content_security_policy: page.content_security_policy.clone(),
            },
        }
    }
}

/// Fetch `/robots.txt` and probe `/sitemap.xml` next to the page.
///
/// Both requests run concurrently and neither can fail the analysis.
#[cfg(feature = "fetch")]
pub async fn analyze_technical(fetcher: &Fetcher, page: &FetchedPage) -> TechnicalChecks {
    let robots_url = well_known_url(&page.final_url, "/robots.txt");
    let sitemap_url = well_known_url(&page.final_url, "/sitemap.xml");

    let (robots, sitemap) = tokio::join!(
        async {
            match robots_url {
                Some(url) => fetcher.fetch_text(&url).await,
                None => None,
            }
        },
        async {
            match sitemap_url {
                Some(url) => fetcher.probe(&url).await,
                None => None,
            }
        },
    );

    TechnicalChecks::from_parts(page, robots, sitemap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_parses_robots() {
        let page = FetchedPage {
            final_url: "https://example.com/".to_string(),
            x_frame_options: Some("DENY".to_string()),
            ..Default::default()
        };
        let robots = "User-agent: *\nDisallow: /private\nSitemap: https://example.com/s.xml\n";

        let checks = TechnicalChecks::from_parts(&page, Some(robots.to_string()), Some(true));
        assert!(checks.security.https);
        assert_eq!(checks.security.x_frame_options.as_deref(), Some("DENY"));
        assert_eq!(checks.security.content_security_policy, None);
        assert_eq!(checks.sitemap, Some(true));

        let rules = checks.robots_rules.expect("robots rules parsed");
        assert_eq!(rules.sitemaps, vec!["https://example.com/s.xml"]);
    }

    #[test]
    fn test_from_parts_without_aux_files() {
        let page = FetchedPage {
            final_url: "http://plain.example/".to_string(),
            ..Default::default()
        };

        let checks = TechnicalChecks::from_parts(&page, None, None);
        assert!(!checks.security.https);
        assert_eq!(checks.robots, None);
        assert_eq!(checks.robots_rules, None);
        assert_eq!(checks.sitemap, None);

        let json = serde_json::to_value(&checks).unwrap();
        assert!(json["robots"].is_null());
        assert!(json["sitemap"].is_null());
    }
}
