//! Server configuration from flags and environment variables

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use seolens_core::FetchConfig;

use crate::telemetry::LogFormat;

#[derive(Debug, Clone, Parser)]
#[command(name = "seolens-server", version, about = "HTTP API for static SEO analysis")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "SEOLENS_LISTEN", default_value = "0.0.0.0:8787")]
    pub listen: SocketAddr,

    /// Supabase project URL; persistence is enabled when this and the key are set
    #[arg(long, env = "SUPABASE_URL")]
    pub supabase_url: Option<String>,

    #[arg(long, env = "SUPABASE_SERVICE_ROLE_KEY", hide_env_values = true)]
    pub supabase_key: Option<String>,

    /// Table receiving analysis rows
    #[arg(long, env = "SEOLENS_ANALYSES_TABLE", default_value = "seo_analyses")]
    pub analyses_table: String,

    /// User-Agent sent with page fetches
    #[arg(long, env = "SEOLENS_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Per-request fetch timeout in seconds (no timeout when unset)
    #[arg(long, env = "SEOLENS_FETCH_TIMEOUT_SECS")]
    pub fetch_timeout_secs: Option<u64>,

    #[arg(long, env = "SEOLENS_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl ServerConfig {
    pub fn fetch_config(&self) -> FetchConfig {
        let mut config = FetchConfig::default();
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        config.timeout = self.fetch_timeout_secs.map(Duration::from_secs);
        config
    }

    /// Supabase URL and key, only when both are present and non-empty
    pub fn supabase(&self) -> Option<(&str, &str)> {
        let url = self.supabase_url.as_deref().filter(|s| !s.is_empty())?;
        let key = self.supabase_key.as_deref().filter(|s| !s.is_empty())?;
        Some((url, key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let config = ServerConfig::try_parse_from([
            "seolens-server",
            "--listen",
            "127.0.0.1:9000",
            "--fetch-timeout-secs",
            "15",
            "--user-agent",
            "probe/1.0",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.listen.port(), 9000);
        assert_eq!(config.log_format, LogFormat::Json);

        let fetch = config.fetch_config();
        assert_eq!(fetch.user_agent, "probe/1.0");
        assert_eq!(fetch.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_supabase_needs_both_values() {
        let config = ServerConfig::try_parse_from([
            "seolens-server",
            "--supabase-url",
            "https://x.supabase.co",
            "--supabase-key",
            "",
        ])
        .unwrap();
        assert_eq!(config.supabase(), None);

        let config = ServerConfig::try_parse_from([
            "seolens-server",
            "--supabase-url",
            "https://x.supabase.co",
            "--supabase-key",
            "k",
        ])
        .unwrap();
        assert_eq!(config.supabase(), Some(("https://x.supabase.co", "k")));
    }

    #[test]
    fn test_invalid_listen_address_rejected() {
        let result = ServerConfig::try_parse_from(["seolens-server", "--listen", "nowhere"]);
        assert!(result.is_err());
    }
}
