use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variable holding the Real-Debrid token.
pub const REAL_DEBRID_TOKEN_ENV: &str = "REAL_DEBRID_API_TOKEN";

/// Load configuration from file with environment variable overrides.
///
/// `SCOUT_` prefixed variables override file values, with `__` separating
/// nested keys (e.g. `SCOUT_REAL_DEBRID__API_TOKEN`). `REAL_DEBRID_API_TOKEN`
/// fills the token when neither source sets it.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Env::raw().only(&[REAL_DEBRID_TOKEN_ENV]).map(|_| "real_debrid.api_token".into()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SCOUT_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_from_str_valid() {
        let toml = r#"
[server]
port = 9000

[jackett]
url = "http://localhost:9117"
api_key = "key"
"#;
        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.jackett.api_key, "key");
    }

    #[test]
    fn test_load_config_from_str_missing_jackett() {
        let toml = r#"
[server]
port = 8080
"#;
        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_config_file_not_found() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
[server]
host = "127.0.0.1"
port = 3000

[jackett]
url = "http://jackett:9117"
api_key = "abc"

[real_debrid]
api_token = "from-file"
"#
        )
        .unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host.to_string(), "127.0.0.1");
        assert_eq!(config.jackett.url, "http://jackett:9117");
        assert_eq!(config.real_debrid.api_token.as_deref(), Some("from-file"));
    }
}
