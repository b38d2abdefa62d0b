//! Message routing for Chitter.
//!
//! The router runs as a single Tokio task (actor model) that owns the
//! registry of connected clients and their mailboxes. Sessions never touch
//! the registry; they talk to the router through a [`RouterHandle`].
//!
//! # Key types
//!
//! - [`spawn_router`] — starts the actor and returns its handle
//! - [`RouterHandle`] — register clients, submit events, query a snapshot
//! - [`Registration`] — the ID and mailbox handed to a new session
//! - [`RouterConfig`] — channel capacities and the client limit

mod config;
mod error;
mod router;

pub use config::RouterConfig;
pub use error::RouterError;
pub use router::{Mailbox, Registration, RouterHandle, RouterInfo, spawn_router};
