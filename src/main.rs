//! Taco Spin Observatory
//!
//! Counts the mighty taco's rotations server-side and streams the total to
//! native watchers over WebSocket. The `start`/`end` subcommands drive the
//! same HTTP controls the original page buttons did.

mod client;
mod protocol;
mod server;
mod spin;

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use client::{ConsoleView, SpinClient, SpinControls};
use server::{ServerConfig, SpinServer};

/// Taco Spin Observatory
///
/// Rotation-counting server and native spin watcher
#[derive(Parser, Debug)]
#[command(name = "taco-spin")]
#[command(version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the spin observatory server
    Serve {
        /// Bind address
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Watch rotation updates over WebSocket
    Watch {
        /// Server host (hostname:port)
        #[arg(long, default_value = "127.0.0.1:8080")]
        host: String,
    },

    /// Start a spin
    Start {
        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server: String,
    },

    /// End the spin and report the final rotation count
    End {
        /// Server base URL
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        server: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    match args.command {
        Command::Serve { bind, port } => {
            info!("taco-spin v{}", env!("CARGO_PKG_VERSION"));

            let config = ServerConfig::new(bind, port);
            let server = Arc::new(SpinServer::new(config));
            let server_handle = Arc::clone(&server);

            // Spawn shutdown signal handler
            tokio::spawn(async move {
                shutdown_signal().await;
                info!("Initiating graceful shutdown...");
                server_handle.shutdown();
            });

            server.run().await?;
            info!("Server shutdown complete");
        }

        Command::Watch { host } => {
            let view = Arc::new(ConsoleView::new());
            let watcher = SpinClient::new(host, view);
            watcher.run().await?;
        }

        Command::Start { server } => {
            let controls = SpinControls::new(server);
            if let Err(err) = controls.start_spin().await {
                error!(%err, "failed to start the spin");
                return Err(err.into());
            }
            info!("spin start requested");
        }

        Command::End { server } => {
            let controls = SpinControls::new(server);
            let view = ConsoleView::new();
            match controls.end_spin(&view).await {
                Ok(total) => info!(total, "spin ended"),
                Err(err) => {
                    error!(%err, "failed to end the spin");
                    return Err(err.into());
                }
            }
        }
    }

    Ok(())
}

/// Wait for shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }
}
