//! Router configuration.

use crate::RouterError;

/// Capacities and limits for a router instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// Capacity of the router's command channel. Sessions wait when it is
    /// full, which is the only backpressure they ever see.
    pub event_capacity: usize,

    /// Capacity of each client's mailbox. When a mailbox is full, new
    /// messages for that client are dropped (the router never waits on a
    /// single client).
    pub mailbox_capacity: usize,

    /// Maximum number of simultaneously registered clients.
    pub max_clients: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            event_capacity: 256,
            mailbox_capacity: 64,
            max_clients: 1024,
        }
    }
}

impl RouterConfig {
    /// Rejects zero capacities and a zero client limit.
    pub fn validate(&self) -> Result<(), RouterError> {
        for (field, value) in [
            ("event_capacity", self.event_capacity),
            ("mailbox_capacity", self.mailbox_capacity),
            ("max_clients", self.max_clients),
        ] {
            if value == 0 {
                return Err(RouterError::ZeroCapacity { field });
            }
        }
        Ok(())
    }
}
