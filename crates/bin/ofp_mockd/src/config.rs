//! Settings of the mock controller.
//!
//! Read from `ofp-mock.toml` when present, then `OFP_MOCK_BIND`,
//! `OFP_MOCK_LOG` and `RUST_LOG` (in increasing priority for the filter).

use std::net::SocketAddr;
use std::time::Duration;

use serde::Deserialize;

const FILE: &str = "ofp-mock.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    server: Listen,
    mock: Mock,
    logging: Logging,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Listen {
    host: String,
    port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Mock {
    /// How long the API answers 503 after a reboot request.
    reboot_seconds: u64,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Logging {
    filter: String,
}

impl Default for Listen {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for Mock {
    fn default() -> Self {
        Self { reboot_seconds: 10 }
    }
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            filter: "ofp_mockd=info,ofp_adapter_mock=info,tower_http=debug".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read ofp-mock.toml")]
    Read(#[source] std::io::Error),
    #[error("malformed ofp-mock.toml")]
    Malformed(#[source] toml::de::Error),
    #[error("cannot listen on {0:?}")]
    Bind(String),
}

impl Config {
    /// # Errors
    ///
    /// Fails when `ofp-mock.toml` is unreadable or malformed, or when the
    /// resulting listen address is not a valid socket address.
    pub fn load() -> Result<(Self, SocketAddr), ConfigError> {
        let mut config = match std::fs::read_to_string(FILE) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Malformed)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(ConfigError::Read(err)),
        };
        config.override_with(|name| std::env::var(name).ok());
        let addr = config.listen_addr()?;
        Ok((config, addr))
    }

    fn override_with(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some((host, port)) = var("OFP_MOCK_BIND")
            .as_deref()
            .and_then(|bind| bind.rsplit_once(':'))
        {
            self.server.host = host.to_string();
            if let Ok(port) = port.parse() {
                self.server.port = port;
            }
        }
        if let Some(filter) = var("RUST_LOG").or_else(|| var("OFP_MOCK_LOG")) {
            self.logging.filter = filter;
        }
    }

    fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let bind = format!("{}:{}", self.server.host, self.server.port);
        match bind.parse::<SocketAddr>() {
            Ok(addr) if addr.port() != 0 => Ok(addr),
            _ => Err(ConfigError::Bind(bind)),
        }
    }

    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.logging.filter
    }

    #[must_use]
    pub fn reboot_grace(&self) -> Duration {
        Duration::from_secs(self.mock.reboot_seconds)
    }
}
