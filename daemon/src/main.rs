//! Daemon entry point

use anyhow::Context;
use clap::Parser;
use roulette::RouletteController;
use std::path::PathBuf;
use std::sync::Arc;
use tab_roulette_core::protocol::default_socket_path;
use tab_roulette_daemon::logger::{DaemonLogger, LoggerConfig};
use tab_roulette_daemon::server::RouletteServer;
use tab_source::{CdpTabSource, DEFAULT_DEBUG_PORT};
use tracing::{info, warn};

/// Close a random tab, with a five minute undo.
#[derive(Parser, Debug)]
#[command(name = "tab-roulette-daemon", version)]
#[command(about = "Daemon bridging the tab-roulette CLI to a running browser", long_about = None)]
struct Args {
    /// Unix socket to listen on.
    #[arg(long)]
    socket: Option<PathBuf>,

    /// DevTools debugging port of the running browser.
    #[arg(long, default_value_t = DEFAULT_DEBUG_PORT)]
    debug_port: u16,

    /// Log level when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Append logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    DaemonLogger::init(LoggerConfig {
        level: args.log_level.clone(),
        log_file_path: args.log_file.clone(),
        ..Default::default()
    })
    .map_err(|e| anyhow::anyhow!("failed to initialize logging: {e}"))?;

    let source =
        CdpTabSource::with_port(args.debug_port).context("failed to build the browser client")?;

    // Probe once up front so a missing browser shows up at startup
    // instead of on the first close. The daemon still starts either way;
    // the browser may be launched later.
    match source.probe().await {
        Ok(version) => info!(
            "Connected to {} (DevTools protocol {})",
            version.browser, version.protocol_version
        ),
        Err(e) => warn!(
            "Browser not reachable on port {}: {}",
            args.debug_port, e
        ),
    }

    let socket_path = args.socket.unwrap_or_else(default_socket_path);
    let controller = Arc::new(RouletteController::new(Arc::new(source)));
    let server = RouletteServer::bind(&socket_path, controller)?;

    tokio::select! {
        result = server.serve() => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutting down");
            server.cleanup();
            Ok(())
        }
    }
}
