//! Error types for the router.

/// Errors returned by [`RouterHandle`](crate::RouterHandle) operations.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// The router task is gone (its command channel is closed).
    #[error("router is unavailable")]
    Unavailable,

    /// Registration refused: the registry already holds the maximum
    /// number of clients.
    #[error("router is full ({max_clients} clients connected)")]
    Full { max_clients: usize },

    /// A [`RouterConfig`](crate::RouterConfig) capacity or limit is zero.
    #[error("{field} must be greater than zero")]
    ZeroCapacity { field: &'static str },
}
