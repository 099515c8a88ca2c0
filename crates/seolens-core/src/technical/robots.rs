//! Robots.txt parser
//!
//! Parses robots.txt files into per-agent rule groups and reports how the
//! major search-engine crawlers are treated.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Search-engine crawlers whose access is summarised
pub const SEARCH_CRAWLERS: &[&str] = &[
    "Googlebot",
    "Bingbot",
    "Slurp",
    "DuckDuckBot",
    "Baiduspider",
    "YandexBot",
];

/// Parsed robots.txt content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RobotsRules {
    /// Sitemap URLs declared with `Sitemap:`
    pub sitemaps: Vec<String>,

    /// Rule group per user agent
    pub agent_rules: BTreeMap<String, AgentRules>,

    /// Access summary for [`SEARCH_CRAWLERS`]
    pub crawler_access: Vec<CrawlerAccess>,

    pub issues: Vec<String>,
}

/// Rules for a specific user agent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentRules {
    pub disallow: Vec<String>,
    pub allow: Vec<String>,
    /// Crawl delay in seconds
    pub crawl_delay: Option<u32>,
    /// `Disallow: /` present
    pub blocks_all: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrawlerAccess {
    pub name: String,
    pub access: AccessLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    /// Explicit group with no disallow rules
    Allowed,
    /// Some paths disallowed
    Partial,
    /// `Disallow: /`
    Blocked,
    /// No rules apply
    Default,
}

/// Parse robots.txt content.
///
/// Consecutive `User-agent` lines share the rule group that follows them.
pub fn parse_robots_txt(content: &str) -> RobotsRules {
    let mut rules = RobotsRules::default();

    let mut current_agents: Vec<String> = Vec::new();
    let mut current = AgentRules::default();
    let mut group_has_rules = false;

    for line in content.lines() {
        // Strip trailing comments
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let Some((directive, value)) = line.split_once(':') else {
            continue;
        };
        let directive = directive.trim().to_ascii_lowercase();
        let value = value.trim();

        match directive.as_str() {
            "user-agent" => {
                if group_has_rules {
                    flush_group(&mut rules, &current_agents, &current);
                    current_agents.clear();
                    current = AgentRules::default();
                    group_has_rules = false;
                }
                current_agents.push(value.to_string());
            }
            "disallow" => {
                group_has_rules = true;
                if !value.is_empty() {
                    if value == "/" {
                        current.blocks_all = true;
                    }
                    current.disallow.push(value.to_string());
                }
            }
            "allow" => {
                group_has_rules = true;
                if !value.is_empty() {
                    current.allow.push(value.to_string());
                }
            }
            "crawl-delay" => {
                group_has_rules = true;
                if let Ok(delay) = value.parse::<u32>() {
                    current.crawl_delay = Some(delay);
                }
            }
            "sitemap" => {
                if !value.is_empty() {
                    rules.sitemaps.push(value.to_string());
                }
            }
            _ => {}
        }
    }
    flush_group(&mut rules, &current_agents, &current);

    rules.crawler_access = SEARCH_CRAWLERS
        .iter()
        .map(|name| CrawlerAccess {
            name: name.to_string(),
            access: access_for(name, &rules.agent_rules),
        })
        .collect();

    if rules.sitemaps.is_empty() {
        rules.issues.push("No sitemap URLs declared".to_string());
    }
    if rules.agent_rules.get("*").is_some_and(|r| r.blocks_all) {
        rules
            .issues
            .push("All crawlers blocked with 'Disallow: /'".to_string());
    }

    rules
}

fn flush_group(rules: &mut RobotsRules, agents: &[String], group: &AgentRules) {
    for agent in agents {
        rules.agent_rules.insert(agent.clone(), group.clone());
    }
}

/// Rule group that applies to `agent`: exact, then case-insensitive, then `*`
fn rules_for<'a>(
    agent: &str,
    agent_rules: &'a BTreeMap<String, AgentRules>,
) -> Option<&'a AgentRules> {
    agent_rules
        .get(agent)
        .or_else(|| {
            agent_rules
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(agent))
                .map(|(_, rules)| rules)
        })
        .or_else(|| agent_rules.get("*"))
}

fn access_for(agent: &str, agent_rules: &BTreeMap<String, AgentRules>) -> AccessLevel {
    let explicit = agent_rules.keys().any(|name| name.eq_ignore_ascii_case(agent));
    match rules_for(agent, agent_rules) {
        Some(rules) if rules.blocks_all => AccessLevel::Blocked,
        Some(rules) if !rules.disallow.is_empty() => AccessLevel::Partial,
        Some(_) if explicit => AccessLevel::Allowed,
        _ => AccessLevel::Default,
    }
}

/// Check if a specific path is allowed for a user agent
pub fn is_path_allowed(path: &str, agent: &str, rules: &RobotsRules) -> bool {
    let Some(group) = rules_for(agent, &rules.agent_rules) else {
        return true;
    };

    // Allow rules take precedence
    if group.allow.iter().any(|allow| path.starts_with(allow.as_str())) {
        return true;
    }

    !group
        .disallow
        .iter()
        .any(|disallow| path.starts_with(disallow.as_str()))
}
