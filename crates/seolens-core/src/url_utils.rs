use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::error::{AnalysisError, Result};

static RE_DOMAIN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]$")
        .expect("invalid domain regex")
});

/// Turn a user-supplied domain into a fetchable URL.
///
/// Inputs without an `http://` or `https://` scheme get `https://` prefixed.
/// No further syntactic validation happens here.
pub fn normalize_target(domain: &str) -> Result<String> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::InvalidInput("domain is required".to_string()));
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("https://{trimmed}"))
    }
}

/// Conservative bare-hostname check: one or more labels plus a TLD.
pub fn is_valid_domain(domain: &str) -> bool {
    RE_DOMAIN.is_match(domain)
}

/// Normalize a URL to its origin (scheme + host + optional port).
///
/// Falls back to trimming trailing slashes if the input cannot be parsed.
pub fn normalize_origin(input: &str) -> String {
    match Url::parse(input) {
        Ok(parsed) => parsed
            .origin()
            .ascii_serialization()
            .trim_end_matches('/')
            .to_string(),
        Err(_) => input.trim_end_matches('/').to_string(),
    }
}

/// Resolve a site-root resource such as `/robots.txt` against a page URL.
///
/// Returns `None` for pages without a usable origin.
pub fn well_known_url(page_url: &str, path: &str) -> Option<String> {
    let origin = normalize_origin(page_url);
    Url::parse(&format!("{origin}{path}"))
        .ok()
        .map(String::from)
}
