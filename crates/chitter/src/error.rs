//! Unified error type for Chitter.

use std::path::PathBuf;

use chitter_router::RouterError;
use chitter_session::SessionError;
use chitter_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant lets `?` convert sub-crate
/// errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum ChitterError {
    /// A transport-level error (bind, connect, accept, send, receive).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The router refused or is gone.
    #[error(transparent)]
    Router(#[from] RouterError),

    /// A session ended with an I/O failure.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid JSON for [`RelayConfig`](crate::RelayConfig).
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The config parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone");
        let err: ChitterError = TransportError::SendFailed(io).into();
        assert!(matches!(err, ChitterError::Transport(_)));
        assert!(err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_router_error() {
        let err: ChitterError = RouterError::Full { max_clients: 3 }.into();
        assert!(matches!(err, ChitterError::Router(_)));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_from_session_error() {
        let err: ChitterError =
            SessionError::from(RouterError::Unavailable).into();
        assert!(matches!(err, ChitterError::Session(_)));
    }

    #[test]
    fn test_config_read_names_path() {
        let err = ChitterError::ConfigRead {
            path: PathBuf::from("/nowhere/relay.json"),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "missing",
            ),
        };
        assert!(err.to_string().contains("/nowhere/relay.json"));
    }
}
