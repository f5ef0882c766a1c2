//! WebSocket status push
//!
//! Each connected watcher gets one push loop: every three seconds, while a
//! spin is active, the current rotation total goes out as a JSON text
//! frame. Inbound frames are the watcher's status checks and acks; they
//! are logged and otherwise ignored.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::ws::{Message, WebSocket},
    extract::{ConnectInfo, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::time;
use tracing::{debug, error, info, warn};

use crate::protocol::{RotationStatus, PUSH_INTERVAL};
use crate::spin::SpinState;

/// Upgrade `GET /ws` to a WebSocket and hand it to the push loop
pub async fn ws_handler(
    State(state): State<Arc<SpinState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    info!(%peer, "new watcher connection");
    ws.on_upgrade(move |socket| push_rotations(socket, state, peer))
}

/// Drive a single watcher connection until it closes
async fn push_rotations(socket: WebSocket, state: Arc<SpinState>, peer: SocketAddr) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let mut push = time::interval(PUSH_INTERVAL);

    loop {
        tokio::select! {
            _ = push.tick() => {
                let Some(total) = state.spinning_total().await else {
                    continue;
                };
                let status = RotationStatus::new(total);
                let json = match status.to_json() {
                    Ok(json) => json,
                    Err(err) => {
                        error!(%peer, %err, "failed to encode rotation status");
                        continue;
                    }
                };
                if let Err(err) = ws_tx.send(Message::Text(json.into())).await {
                    debug!(%peer, %err, "push failed, dropping watcher");
                    break;
                }
            }
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        debug!(%peer, frame = %text.as_str(), "watcher frame");
                    }
                    Some(Ok(Message::Binary(data))) => {
                        warn!(%peer, len = data.len(), "ignoring binary frame");
                    }
                    Some(Ok(Message::Ping(data))) => {
                        if ws_tx.send(Message::Pong(data)).await.is_err() {
                            break;
                        }
                    }
                    Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) => {
                        info!(%peer, "watcher requested close");
                        break;
                    }
                    Some(Err(err)) => {
                        error!(%peer, %err, "watcher socket error");
                        break;
                    }
                    None => {
                        info!(%peer, "watcher disconnected");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::http;

    use tokio::time::{timeout, Duration};
    use tokio_tungstenite::{connect_async, tungstenite};

    async fn serve_ws(state: Arc<SpinState>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = http::router(state);
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });
        format!("ws://{addr}/ws")
    }

    #[tokio::test]
    async fn test_idle_server_pushes_nothing() {
        let state = Arc::new(SpinState::new());
        let url = serve_ws(Arc::clone(&state)).await;
        let (mut ws, _) = connect_async(url.as_str()).await.unwrap();

        // No spin in progress: the push loop ticks but must stay quiet
        let quiet = timeout(Duration::from_millis(500), ws.next()).await;
        assert!(quiet.is_err());
    }

    #[tokio::test]
    async fn test_spinning_server_pushes_rotation_status() {
        let state = Arc::new(SpinState::new());
        let url = serve_ws(Arc::clone(&state)).await;
        let (mut ws, _) = connect_async(url.as_str()).await.unwrap();

        state.start().await;
        for _ in 0..3 {
            assert!(state.increment().await.is_some());
        }

        let frame = timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("no push within one interval")
            .unwrap()
            .unwrap();
        match frame {
            tungstenite::Message::Text(text) => {
                assert_eq!(text, r#"{"total_count":3}"#);
            }
            other => panic!("expected text frame, got {other:?}"),
        }

        // Pushes keep coming on the loop's own cadence while spinning
        let next = timeout(Duration::from_secs(5), ws.next())
            .await
            .expect("no second push")
            .unwrap()
            .unwrap();
        assert_eq!(next, tungstenite::Message::Text(r#"{"total_count":3}"#.to_string()));
    }

    #[tokio::test]
    async fn test_finished_spin_stops_pushes() {
        let state = Arc::new(SpinState::new());
        let url = serve_ws(Arc::clone(&state)).await;

        state.start().await;
        assert!(state.increment().await.is_some());
        state.finish().await.unwrap();

        let (mut ws, _) = connect_async(url.as_str()).await.unwrap();
        let quiet = timeout(Duration::from_millis(500), ws.next()).await;
        assert!(quiet.is_err());
    }
}
