use super::{types::Config, ConfigError};

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Jackett URL is an http(s) URL and the API key is set
/// - Real-Debrid base URL is an http(s) URL
/// - Unrestrict concurrency is at least 1
///
/// A missing Real-Debrid token is not an error here; scrapes fail with a
/// configuration error instead so the host can still start.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if !is_http_url(&config.jackett.url) {
        return Err(ConfigError::ValidationError(format!(
            "jackett.url must be an http(s) URL, got '{}'",
            config.jackett.url
        )));
    }

    if config.jackett.api_key.is_empty() {
        return Err(ConfigError::ValidationError(
            "jackett.api_key cannot be empty".to_string(),
        ));
    }

    if !is_http_url(&config.real_debrid.base_url) {
        return Err(ConfigError::ValidationError(format!(
            "real_debrid.base_url must be an http(s) URL, got '{}'",
            config.real_debrid.base_url
        )));
    }

    if config.real_debrid.unrestrict_concurrency == 0 {
        return Err(ConfigError::ValidationError(
            "real_debrid.unrestrict_concurrency must be at least 1".to_string(),
        ));
    }

    Ok(())
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}
