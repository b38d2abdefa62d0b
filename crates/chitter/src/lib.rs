//! # Chitter
//!
//! A minimal TCP chat relay.
//!
//! Clients send newline-terminated lines. A plain line (or `all:<text>`) is
//! broadcast to everyone else, `<id>:<text>` goes to one client, and
//! `whoami` returns the sender's own ID.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chitter::prelude::*;
//!
//! # async fn start() -> Result<(), ChitterError> {
//! let server = ChitterServer::builder()
//!     .bind("127.0.0.1:4000")
//!     .build()
//!     .await?;
//! server.run().await
//! # }
//! ```

pub mod cli;
pub mod client;
mod config;
mod error;
mod server;

pub use config::RelayConfig;
pub use error::ChitterError;
pub use server::{ChitterServer, ChitterServerBuilder};

/// Convenience re-exports for common usage.
///
/// ```rust
/// use chitter::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        ChitterError, ChitterServer, ChitterServerBuilder, RelayConfig,
    };

    pub use chitter_protocol::{ClientId, Command, InboundEvent};
    pub use chitter_router::{
        RouterConfig, RouterError, RouterHandle, RouterInfo,
    };
    pub use chitter_session::{PeerExit, SessionError};
    pub use chitter_transport::TransportError;
}
