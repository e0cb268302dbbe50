use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub jackett: JackettConfig,
    #[serde(default)]
    pub real_debrid: RealDebridConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Outbound HTTP client settings shared by every upstream call.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HttpConfig {
    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u32 {
    30
}

/// Jackett indexer aggregator configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JackettConfig {
    /// Jackett server URL (e.g., "http://localhost:9117")
    pub url: String,
    /// Jackett API key
    pub api_key: String,
}

/// Real-Debrid service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RealDebridConfig {
    /// REST API base URL (default: https://api.real-debrid.com/rest/1.0)
    #[serde(default = "default_rd_base_url")]
    pub base_url: String,
    /// Bearer token. Falls back to REAL_DEBRID_API_TOKEN when loaded from file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// How many links to unrestrict at once (default: 1, sequential)
    #[serde(default = "default_unrestrict_concurrency")]
    pub unrestrict_concurrency: usize,
    /// Status polling; disabled unless max_wait_secs > 0
    #[serde(default)]
    pub polling: PollingConfig,
}

impl Default for RealDebridConfig {
    fn default() -> Self {
        Self {
            base_url: default_rd_base_url(),
            api_token: None,
            unrestrict_concurrency: default_unrestrict_concurrency(),
            polling: PollingConfig::default(),
        }
    }
}

fn default_rd_base_url() -> String {
    "https://api.real-debrid.com/rest/1.0".to_string()
}

fn default_unrestrict_concurrency() -> usize {
    1
}

/// Bounded wait for a torrent to reach the `downloaded` state.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct PollingConfig {
    /// Upper bound on total wait. 0 means check once and fail if not ready.
    #[serde(default)]
    pub max_wait_secs: u64,
    /// First backoff interval in milliseconds (default: 1000)
    #[serde(default = "default_initial_interval")]
    pub initial_interval_ms: u64,
    /// Backoff ceiling in milliseconds (default: 10000)
    #[serde(default = "default_max_interval")]
    pub max_interval_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_wait_secs: 0,
            initial_interval_ms: default_initial_interval(),
            max_interval_ms: default_max_interval(),
        }
    }
}

impl PollingConfig {
    pub fn is_enabled(&self) -> bool {
        self.max_wait_secs > 0
    }
}

fn default_initial_interval() -> u64 {
    1_000
}

fn default_max_interval() -> u64 {
    10_000
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub jackett: SanitizedJackettConfig,
    pub real_debrid: SanitizedRealDebridConfig,
}

/// Sanitized Jackett config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedJackettConfig {
    pub url: String,
    pub api_key_configured: bool,
}

/// Sanitized Real-Debrid config (token hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRealDebridConfig {
    pub base_url: String,
    pub api_token_configured: bool,
    pub unrestrict_concurrency: usize,
    pub polling: PollingConfig,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            http: config.http.clone(),
            jackett: SanitizedJackettConfig {
                url: config.jackett.url.clone(),
                api_key_configured: !config.jackett.api_key.is_empty(),
            },
            real_debrid: SanitizedRealDebridConfig {
                base_url: config.real_debrid.base_url.clone(),
                api_token_configured: config
                    .real_debrid
                    .api_token
                    .as_deref()
                    .is_some_and(|t| !t.is_empty()),
                unrestrict_concurrency: config.real_debrid.unrestrict_concurrency,
                polling: config.real_debrid.polling.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[jackett]
url = "http://localhost:9117"
api_key = "jackett-key"
"#;

    #[test]
    fn test_deserialize_minimal_config_uses_defaults() {
        let config: Config = toml::from_str(MINIMAL).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host.to_string(), "0.0.0.0");
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.jackett.url, "http://localhost:9117");
        assert_eq!(
            config.real_debrid.base_url,
            "https://api.real-debrid.com/rest/1.0"
        );
        assert!(config.real_debrid.api_token.is_none());
        assert_eq!(config.real_debrid.unrestrict_concurrency, 1);
        assert!(!config.real_debrid.polling.is_enabled());
    }

    #[test]
    fn test_deserialize_missing_jackett_fails() {
        let toml = r#"
[server]
port = 8080
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_full_real_debrid_section() {
        let toml = r#"
[jackett]
url = "http://localhost:9117"
api_key = "k"

[real_debrid]
base_url = "http://localhost:1234/rest/1.0"
api_token = "rd-token"
unrestrict_concurrency = 4

[real_debrid.polling]
max_wait_secs = 60
initial_interval_ms = 500
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let rd = &config.real_debrid;
        assert_eq!(rd.base_url, "http://localhost:1234/rest/1.0");
        assert_eq!(rd.api_token.as_deref(), Some("rd-token"));
        assert_eq!(rd.unrestrict_concurrency, 4);
        assert!(rd.polling.is_enabled());
        assert_eq!(rd.polling.initial_interval_ms, 500);
        assert_eq!(rd.polling.max_interval_ms, 10_000); // default
    }

    #[test]
    fn test_sanitized_config_hides_secrets() {
        let mut config: Config = toml::from_str(MINIMAL).unwrap();
        config.real_debrid.api_token = Some("secret".to_string());

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.jackett.api_key_configured);
        assert!(sanitized.real_debrid.api_token_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("jackett-key"));
    }

    #[test]
    fn test_sanitized_config_empty_token_is_not_configured() {
        let mut config: Config = toml::from_str(MINIMAL).unwrap();
        config.real_debrid.api_token = Some(String::new());

        let sanitized = SanitizedConfig::from(&config);
        assert!(!sanitized.real_debrid.api_token_configured);
    }
}
