//! Server configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the request catcher.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Directory receiving one JSON-lines log file per run.
    pub log_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            log_dir: PathBuf::from("logs"),
        }
    }
}

impl ServerConfig {
    /// Configuration listening on `port`, with everything else defaulted.
    pub fn for_port(port: u16) -> Self {
        Self {
            bind_address: format!("0.0.0.0:{port}"),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_port_is_8080() {
        assert_eq!(ServerConfig::default().bind_address, "0.0.0.0:8080");
    }

    #[test]
    fn for_port_keeps_default_log_dir() {
        let config = ServerConfig::for_port(9999);
        assert_eq!(config.bind_address, "0.0.0.0:9999");
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }
}
