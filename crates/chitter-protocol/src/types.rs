//! Core protocol types.

use std::fmt;
use std::str::FromStr;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A unique identifier for a connected client.
///
/// Assigned by the router in increasing order starting at 0 and never
/// reused. It appears on the wire as a bare decimal number (`"3: hi"`), so
/// `Display` prints only the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(pub u64);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parses a decimal, non-negative client ID.
///
/// Signs and surrounding whitespace are rejected, so `"-1"` and `" 2"` are
/// not IDs. Trimming is the caller's job.
impl FromStr for ClientId {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ProtocolError::InvalidClientId(s.to_string()));
        }
        s.parse::<u64>()
            .map(ClientId)
            .map_err(|_| ProtocolError::InvalidClientId(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// InboundEvent — what a session asks the router to do
// ---------------------------------------------------------------------------

/// A request from a client session to the router.
///
/// `payload` is the message body exactly as it will be relayed: leading
/// spaces and tabs already stripped, trailing newline kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// Deliver to every connected client except the sender.
    Broadcast { sender: ClientId, payload: Vec<u8> },

    /// Deliver to one client.
    PrivateMessage {
        sender: ClientId,
        recipient: ClientId,
        payload: Vec<u8>,
    },

    /// The sender's stream has ended; forget it.
    Disconnect { sender: ClientId },
}

impl InboundEvent {
    /// Returns the client that produced this event.
    pub fn sender(&self) -> ClientId {
        match self {
            Self::Broadcast { sender, .. }
            | Self::PrivateMessage { sender, .. }
            | Self::Disconnect { sender } => *sender,
        }
    }
}
