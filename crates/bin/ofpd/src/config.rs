//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `ofp.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Heating controller to administer.
    pub controller: ControllerConfig,
    /// Dashboard behaviour.
    pub dashboard: DashboardConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Controller REST API location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Controller origin, e.g. `http://192.168.1.10`.
    pub base_url: String,
    pub api_prefix: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Zone section refresh period, both server-side and in the browser.
    pub refresh_seconds: u32,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `ofp.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("ofp.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("OFP_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("OFP_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("OFP_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("OFP_CONTROLLER_URL") {
            self.controller.base_url = val;
        }
        if let Ok(val) = std::env::var("OFP_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.dashboard.refresh_seconds == 0 {
            return Err(ConfigError::Validation(
                "refresh period must be non-zero".to_string(),
            ));
        }
        let url = &self.controller.base_url;
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::Validation(format!(
                "controller url must start with http:// or https://, got {url:?}"
            )));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    #[must_use]
    pub fn refresh_period(&self) -> Duration {
        Duration::from_secs(u64::from(self.dashboard.refresh_seconds))
    }

    /// HTTP client settings for the controller.
    #[must_use]
    pub fn client_config(&self) -> ofp_adapter_http_client::Config {
        ofp_adapter_http_client::Config {
            base_url: self.controller.base_url.clone(),
            api_prefix: self.controller.api_prefix.clone(),
            timeout: Duration::from_secs(self.controller.timeout_seconds),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            api_prefix: "/ofp-api/v1".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { refresh_seconds: 5 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "ofpd=info,ofp_app=info,ofp_adapter_http_client=info,tower_http=debug"
                .to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.controller.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.controller.api_prefix, "/ofp-api/v1");
        assert_eq!(config.dashboard.refresh_seconds, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [controller]
            base_url = 'http://192.168.1.10'
            api_prefix = '/api'
            timeout_seconds = 3

            [dashboard]
            refresh_seconds = 2

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.controller.base_url, "http://192.168.1.10");
        assert_eq!(config.refresh_period(), Duration::from_secs(2));
        assert_eq!(config.logging.filter, "debug");

        let client = config.client_config();
        assert_eq!(client.api_prefix, "/api");
        assert_eq!(client.timeout, Duration::from_secs(3));
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [controller]
            base_url = 'https://ofp.local'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.controller.base_url, "https://ofp.local");
        assert_eq!(config.controller.timeout_seconds, 10);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_refresh_period() {
        let mut config = Config::default();
        config.dashboard.refresh_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_non_http_controller_url() {
        let mut config = Config::default();
        config.controller.base_url = "192.168.1.10".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
