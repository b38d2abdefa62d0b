//! Error types for the protocol layer.

/// Errors that can occur while interpreting protocol input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// The text is not a non-negative integer client ID.
    ///
    /// The command parser uses this to tell a private-message prefix
    /// (`"3:hi"`) apart from an unknown command (`"nick:bob"`).
    #[error("invalid client id: {0:?}")]
    InvalidClientId(String),
}
