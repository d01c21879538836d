use serde::Deserialize;
use std::time::Duration;

/// Which resolver turns hostnames into addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DnsBackend {
    /// Platform resolver (getaddrinfo)
    #[default]
    System,
    /// Direct A-record queries via hickory, using resolv.conf
    Hickory,
}

impl DnsBackend {
    /// Parse a backend name. Unknown names fall back to `System`.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "hickory" => Self::Hickory,
            _ => Self::System,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Hickory => "hickory",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub dns_backend: DnsBackend,
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "https://ipinfo.io".to_string(),
            token: None,
            timeout_secs: None,
            dns_backend: DnsBackend::System,
            debug: false,
        }
    }
}

impl Config {
    /// HTTP timeout, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Build a configuration from a variable lookup (normally the process environment).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("IPLOCATE_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| "https://ipinfo.io".to_string());

        let token = non_empty("IPLOCATE_TOKEN");

        let timeout_secs = non_empty("IPLOCATE_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0);

        let dns_backend = non_empty("IPLOCATE_DNS_BACKEND")
            .map(|v| DnsBackend::from_str(&v))
            .unwrap_or_default();

        let debug = lookup("DEBUG").is_some();

        Config {
            api_url,
            token,
            timeout_secs,
            dns_backend,
            debug,
        }
    }
}

pub fn load_config() -> anyhow::Result<Config> {
    Ok(Config::from_lookup(|key| std::env::var(key).ok()))
}
