//! Classification of raw input lines.
//!
//! Every line a client sends is either plain text (broadcast to everyone)
//! or `prefix:rest`, where the prefix picks the command. The decision is
//! made once, here, and the rest of the system matches on [`Command`].

use crate::ClientId;

const WHOAMI: &[u8] = b"whoami";
const ALL: &[u8] = b"all";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `whoami:` (or a bare `whoami` line) — ask for your own ID.
    /// Answered by the session itself; never reaches the router.
    Whoami,

    /// `all:<payload>` or a line without any `:` — send to everyone else.
    Broadcast(Vec<u8>),

    /// `<id>:<payload>` — send to a single client.
    Private {
        recipient: ClientId,
        payload: Vec<u8>,
    },

    /// Any other prefix. Carries the (trimmed) prefix for logging.
    Unrecognized(String),
}

impl Command {
    /// Classifies one line (trailing `\n` included).
    ///
    /// - No `:` → the whole line, minus leading spaces/tabs, is a broadcast.
    ///   A line that is just `whoami` counts as [`Command::Whoami`].
    /// - Otherwise the bytes before the first `:` are trimmed of surrounding
    ///   whitespace to form the prefix, and the bytes after it lose their
    ///   leading spaces/tabs to form the payload. The newline always stays
    ///   in the payload.
    pub fn parse(line: &[u8]) -> Self {
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            if line.trim_ascii() == WHOAMI {
                return Self::Whoami;
            }
            return Self::Broadcast(trim_leading_blanks(line).to_vec());
        };

        let prefix = line[..colon].trim_ascii();
        let rest = trim_leading_blanks(&line[colon + 1..]);

        if prefix == WHOAMI {
            return Self::Whoami;
        }
        if prefix == ALL {
            return Self::Broadcast(rest.to_vec());
        }

        let prefix = String::from_utf8_lossy(prefix);
        match prefix.parse::<ClientId>() {
            Ok(recipient) => Self::Private {
                recipient,
                payload: rest.to_vec(),
            },
            Err(_) => Self::Unrecognized(prefix.into_owned()),
        }
    }
}

/// Strips spaces and tabs (only) from the start of `bytes`.
fn trim_leading_blanks(bytes: &[u8]) -> &[u8] {
    let start = bytes
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(bytes.len());
    &bytes[start..]
}
