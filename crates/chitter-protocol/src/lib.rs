//! Line protocol for Chitter.
//!
//! This crate defines the "language" spoken between a chat client and the
//! relay:
//!
//! - **Types** ([`ClientId`], [`InboundEvent`]) — who is talking, and what a
//!   session asks the router to do.
//! - **Commands** ([`Command`]) — how a raw input line is classified.
//! - **Replies** ([`reply`]) — the exact bytes the relay writes back.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while interpreting a
//!   line.
//!
//! # Architecture
//!
//! The protocol layer sits between transport (raw lines) and the router
//! (delivery). It knows nothing about sockets or mailboxes.
//!
//! ```text
//! Transport (lines) → Protocol (Command, InboundEvent) → Router (mailboxes)
//! ```

mod command;
mod error;
pub mod reply;
mod types;

pub use command::Command;
pub use error::ProtocolError;
pub use types::{ClientId, InboundEvent};
