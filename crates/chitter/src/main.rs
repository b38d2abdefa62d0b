use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::info;

use chitter::cli::{Cli, Mode};
use chitter::{ChitterServer, RelayConfig, client};

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building the Tokio runtime")?;
    let result = runtime.block_on(run(cli));

    // Stdin is read on a blocking thread that only returns on the next
    // input line, so the runtime must not wait for it.
    runtime.shutdown_background();
    result
}

async fn run(cli: Cli) -> Result<()> {
    match cli.mode() {
        Mode::Server { port } => {
            let config = match &cli.config {
                Some(path) => RelayConfig::from_json_file(path)
                    .with_context(|| format!("loading {}", path.display()))?,
                None => RelayConfig::default(),
            };
            let addr = config.bind_addr(port);

            let server = ChitterServer::builder()
                .bind(&addr)
                .config(config)
                .build()
                .await
                .with_context(|| format!("starting relay on {addr}"))?;
            info!(addr = %server.local_addr()?, "listening for connections");
            println!("Use Ctrl+C to close the server");

            tokio::select! {
                result = server.run() => result.context("relay stopped")?,
                _ = tokio::signal::ctrl_c() => info!("shutting down"),
            }
        }
        Mode::Client { host, port } => {
            let addr = format!("{host}:{port}");
            client::connect_and_relay(
                &addr,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await
            .with_context(|| format!("relaying with {addr}"))?;
        }
    }

    Ok(())
}
