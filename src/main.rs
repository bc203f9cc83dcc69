use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gh_proxy::config::{load_config, ProxyConfig};
use gh_proxy::lifecycle::signals;
use gh_proxy::{Denylist, HttpServer, Shutdown};

/// GitHub reverse proxy gateway.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to a TOML configuration file (compiled defaults when absent).
    #[arg(long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gh_proxy=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("gh-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream_timeout_secs = config.upstream.timeout_secs,
        denylist_path = %config.denylist.path,
        "Configuration loaded"
    );

    // Denylist loads once, then is frozen for the lifetime of the process.
    let denylist = Arc::new(Denylist::load(Path::new(&config.denylist.path)));

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            gh_proxy::observability::metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        signal_shutdown.trigger();
    });

    let server = HttpServer::new(&config, denylist)?;
    server.run(listener, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
