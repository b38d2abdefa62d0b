//! Relay configuration, loaded from an optional JSON file.

use std::path::Path;

use chitter_router::RouterConfig;
use serde::{Deserialize, Serialize};

use crate::ChitterError;

/// Settings for a relay in server mode. Every field has a default, so an
/// empty JSON object is a valid config.
///
/// ```json
/// { "bind_host": "127.0.0.1", "mailbox_capacity": 32 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RelayConfig {
    /// Interface to listen on. The port always comes from the command line.
    pub bind_host: String,
    /// Messages buffered per client before new ones are dropped.
    pub mailbox_capacity: usize,
    /// Events buffered between sessions and the router.
    pub event_capacity: usize,
    /// Connections beyond this many are closed on accept.
    pub max_clients: usize,
}

impl Default for RelayConfig {
    fn default() -> Self {
        let router = RouterConfig::default();
        Self {
            bind_host: "0.0.0.0".to_string(),
            mailbox_capacity: router.mailbox_capacity,
            event_capacity: router.event_capacity,
            max_clients: router.max_clients,
        }
    }
}

impl RelayConfig {
    /// Parses and validates a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ChitterError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ChitterError> {
        let json = std::fs::read_to_string(path).map_err(|source| {
            ChitterError::ConfigRead {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json_str(&json)
    }

    /// Rejects values the relay cannot run with.
    pub fn validate(&self) -> Result<(), ChitterError> {
        if self.bind_host.trim().is_empty() {
            return Err(ChitterError::InvalidConfig(
                "bind_host is empty".into(),
            ));
        }
        self.router_config()
            .validate()
            .map_err(|e| ChitterError::InvalidConfig(e.to_string()))
    }

    pub fn router_config(&self) -> RouterConfig {
        RouterConfig {
            event_capacity: self.event_capacity,
            mailbox_capacity: self.mailbox_capacity,
            max_clients: self.max_clients,
        }
    }

    /// The listen address for `port`, bracketing IPv6 hosts.
    pub fn bind_addr(&self, port: u16) -> String {
        if self.bind_host.contains(':') {
            format!("[{}]:{port}", self.bind_host)
        } else {
            format!("{}:{port}", self.bind_host)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.bind_host, "0.0.0.0");
        assert_eq!(config.mailbox_capacity, 64);
        assert_eq!(config.event_capacity, 256);
        assert_eq!(config.max_clients, 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = RelayConfig::from_json_str("{}").unwrap();
        assert_eq!(config, RelayConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{"bind_host": "127.0.0.1", "max_clients": 8}"#;
        let config = RelayConfig::from_json_str(json).unwrap();
        assert_eq!(config.bind_host, "127.0.0.1");
        assert_eq!(config.max_clients, 8);
        assert_eq!(config.mailbox_capacity, 64);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = RelayConfig::from_json_str(r#"{"mailbox_capacity": 0}"#)
            .unwrap_err();
        assert!(matches!(err, ChitterError::InvalidConfig(_)));
        assert!(err.to_string().contains("mailbox_capacity"));
    }

    #[test]
    fn test_zero_event_capacity_and_limit_rejected() {
        for json in [r#"{"event_capacity": 0}"#, r#"{"max_clients": 0}"#] {
            let err = RelayConfig::from_json_str(json).unwrap_err();
            assert!(matches!(err, ChitterError::InvalidConfig(_)), "{json}");
        }
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = RelayConfig::from_json_str(r#"{"port": 9000}"#).unwrap_err();
        assert!(matches!(err, ChitterError::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let path = Path::new("/definitely/not/here.json");
        let err = RelayConfig::from_json_file(path).unwrap_err();
        assert!(matches!(err, ChitterError::ConfigRead { .. }));
    }

    #[test]
    fn test_from_json_file() {
        let name = format!("chitter-config-{}.json", std::process::id());
        let path = std::env::temp_dir().join(name);
        std::fs::write(&path, r#"{"event_capacity": 16}"#).unwrap();

        let config = RelayConfig::from_json_file(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.event_capacity, 16);
    }

    #[test]
    fn test_router_config_copies_limits() {
        let config = RelayConfig {
            mailbox_capacity: 2,
            event_capacity: 3,
            max_clients: 4,
            ..RelayConfig::default()
        };
        assert_eq!(
            config.router_config(),
            RouterConfig {
                event_capacity: 3,
                mailbox_capacity: 2,
                max_clients: 4,
            }
        );
    }

    #[test]
    fn test_bind_addr() {
        let mut config = RelayConfig::default();
        assert_eq!(config.bind_addr(4000), "0.0.0.0:4000");
        config.bind_host = "::1".into();
        assert_eq!(config.bind_addr(4000), "[::1]:4000");
    }
}
