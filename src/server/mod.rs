//! Spin observatory server
//!
//! Serves the HTTP control endpoints and the WebSocket status push on a
//! single listener, and runs the rotation daemon in the background.

mod daemon;
mod http;
mod ws;

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tracing::info;

use crate::spin::SpinState;

/// Configuration for the spin server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to
    pub bind: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(bind: String, port: u16) -> Self {
        Self { bind, port }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Spin observatory server: HTTP control surface plus WebSocket pushes
pub struct SpinServer {
    config: ServerConfig,
    state: Arc<SpinState>,
    shutdown_tx: broadcast::Sender<()>,
}

impl SpinServer {
    /// Create a new server
    pub fn new(config: ServerConfig) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            config,
            state: Arc::new(SpinState::new()),
            shutdown_tx,
        }
    }

    /// Trigger server shutdown
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Run the server until a shutdown signal arrives
    ///
    /// Binds the listener, spawns the rotation daemon, and serves HTTP and
    /// WebSocket traffic from the same port.
    pub async fn run(&self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr();
        let listener = TcpListener::bind(&addr).await?;
        info!("spin server listening on http://{addr} (ws://{addr}/ws)");

        let daemon =
            daemon::spawn_rotation_daemon(Arc::clone(&self.state), self.shutdown_tx.subscribe());

        let app = http::router(Arc::clone(&self.state));
        let mut shutdown_rx = self.shutdown_tx.subscribe();
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            let _ = shutdown_rx.recv().await;
            info!("shutdown signal received, stopping server");
        })
        .await?;

        daemon.await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_socket_addr() {
        let config = ServerConfig::new("127.0.0.1".to_string(), 8080);
        assert_eq!(config.socket_addr(), "127.0.0.1:8080");
    }
}
