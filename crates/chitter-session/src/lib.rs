//! Client sessions for Chitter.
//!
//! A session owns one connection for its whole life:
//!
//! 1. **Server side** ([`ClientSession`]) — reads lines from a client,
//!    parses them, answers `whoami` and self-addressed messages itself,
//!    forwards everything else to the router, and writes the client's
//!    mailbox back out to the socket.
//! 2. **Client side** ([`PeerSession`]) — bridges a local console to the
//!    relay: console lines go to the socket, socket lines go to the console.
//!
//! # How it fits in the stack
//!
//! ```text
//! Router (above)  ← receives InboundEvents, fills mailboxes
//!     ↕
//! Session (this crate)  ← one per connection
//!     ↕
//! Transport (below)  ← LineReader / ConnectionWriter
//! ```

mod client;
mod error;
mod peer;

pub use client::ClientSession;
pub use error::SessionError;
pub use peer::{PeerExit, PeerSession};
