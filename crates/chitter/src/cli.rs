use std::path::PathBuf;

use clap::Parser;

/// A minimal TCP chat relay.
///
/// `chitter <PORT>` runs a relay; `chitter -c <HOST> <PORT>` joins one.
#[derive(Parser, Debug)]
#[command(name = "chitter", author, version, about, long_about = None)]
pub struct Cli {
    /// Connect to the relay at HOST instead of running one.
    #[arg(short = 'c', long = "connect", value_name = "HOST")]
    pub connect: Option<String>,

    /// Port to listen on, or to connect to with -c.
    pub port: u16,

    /// JSON file with relay settings (server mode).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// What the process should do, decided from the arguments alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Server { port: u16 },
    Client { host: String, port: u16 },
}

impl Cli {
    pub fn mode(&self) -> Mode {
        match &self.connect {
            Some(host) => Mode::Client {
                host: host.clone(),
                port: self.port,
            },
            None => Mode::Server { port: self.port },
        }
    }
}
