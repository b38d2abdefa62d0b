//! Bytes the relay writes back to clients.
//!
//! Relayed messages carry their sender's ID (`"3: hello\n"`). Messages the
//! relay itself originates start with [`NOTICE_PREFIX`].

use crate::ClientId;

/// Prefix of every message generated by the relay rather than a client.
pub const NOTICE_PREFIX: &str = "chitter: ";

/// Sent to a client that addresses a private message to itself.
pub const SELF_MESSAGE_REJECTED: &[u8] =
    b"chitter: Did you really just try to PM yourself?\n";

/// `"{sender}: {payload}"` — a relayed broadcast or private message.
pub fn relayed(sender: ClientId, payload: &[u8]) -> Vec<u8> {
    let mut out = format!("{sender}: ").into_bytes();
    out.extend_from_slice(payload);
    out
}

/// Answer to `whoami`.
pub fn whoami(id: ClientId) -> Vec<u8> {
    format!("{NOTICE_PREFIX}{id}\n").into_bytes()
}

/// Sent back to the sender of a private message whose recipient is gone.
pub fn unknown_recipient(recipient: ClientId) -> Vec<u8> {
    format!("{NOTICE_PREFIX}No active user with ID {recipient}\n").into_bytes()
}
