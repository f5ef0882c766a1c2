//! WebSocket watcher
//!
//! Holds the one connection to the observatory, mirrors every rotation
//! status into the view, and acknowledges each status five seconds after
//! it arrives. There is no reconnect: a transport error or a close from
//! the peer ends the watcher, exactly like the page it replaces.

use std::sync::Arc;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio::time;
use tokio_tungstenite::{connect_async, tungstenite, tungstenite::Message, WebSocketStream};
use tracing::{debug, error, info, warn};

use super::view::SpinView;
use crate::protocol::{
    observed_message, RotationStatus, ACK_DELAY, ACK_FRAME, CLIENT_CLOSED_FRAME,
    STATUS_CHECK_FRAME,
};

/// Errors that can occur while watching
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),
}

type WsSink<S> = SplitSink<WebSocketStream<S>, Message>;

/// Native counterpart of the browser spin page
///
/// One instance owns one connection and one view; nothing else shares
/// its state.
pub struct SpinClient {
    host: String,
    view: Arc<dyn SpinView>,
}

impl SpinClient {
    /// Create a watcher for `ws://<host>/ws`
    pub fn new(host: impl Into<String>, view: Arc<dyn SpinView>) -> Self {
        Self {
            host: host.into(),
            view,
        }
    }

    /// Connect and run until the connection ends
    pub async fn run(&self) -> Result<(), ClientError> {
        info!(host = %self.host, "connecting to spin observatory");
        let url = format!("ws://{}/ws", self.host);
        let (ws_stream, _) = connect_async(url.as_str()).await?;
        info!("successfully connected");
        self.drive(ws_stream).await
    }

    /// Event loop over an established connection
    ///
    /// Sends the empty status-check frame first, then handles inbound
    /// frames one at a time. Ack timers run as independent tasks and hand
    /// their frames back through the writer channel, so a burst of status
    /// updates produces one ack per update, each on its own clock.
    async fn drive<S>(&self, ws_stream: WebSocketStream<S>) -> Result<(), ClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (mut ws_tx, mut ws_rx) = ws_stream.split();
        let (out_tx, mut out_rx) = mpsc::channel::<Message>(64);

        // Status check: exactly one empty frame before any other traffic
        ws_tx
            .send(Message::Text(STATUS_CHECK_FRAME.to_string()))
            .await?;

        loop {
            tokio::select! {
                Some(frame) = out_rx.recv() => {
                    if let Err(err) = ws_tx.send(frame).await {
                        debug!(%err, "ack not delivered");
                        break;
                    }
                }
                msg = ws_rx.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_status_frame(&text, &out_tx);
                        }
                        Some(Ok(Message::Binary(data))) => {
                            warn!(len = data.len(), "ignoring binary frame");
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if ws_tx.send(Message::Pong(data)).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Pong(_))) => {}
                        Some(Ok(Message::Close(frame))) => {
                            info!(?frame, "socket closed connection");
                            break;
                        }
                        Some(Ok(Message::Frame(_))) => {}
                        Some(Err(err)) => {
                            error!(%err, "socket error");
                            break;
                        }
                        None => {
                            info!("connection closed");
                            break;
                        }
                    }
                }
            }
        }

        // The page always announced its departure, delivered or not
        send_close_notice(&mut ws_tx).await;
        Ok(())
    }

    /// Handle one inbound status frame
    fn handle_status_frame(&self, text: &str, out_tx: &mpsc::Sender<Message>) {
        let status = match RotationStatus::from_json(text) {
            Ok(status) => status,
            Err(err) => {
                warn!(%err, frame = %text, "discarding malformed rotation status");
                return;
            }
        };

        self.view.set_spinning(true);
        self.view.show_message(&observed_message(status.total_count));

        let ack_tx = out_tx.clone();
        tokio::spawn(async move {
            time::sleep(ACK_DELAY).await;
            if ack_tx
                .send(Message::Text(ACK_FRAME.to_string()))
                .await
                .is_err()
            {
                debug!("watcher gone before ack was due");
            }
        });
    }
}

/// Attempt the literal close notice. Returns whether it was delivered;
/// a send on an already-closing socket is expected to fail and only
/// gets a debug log.
async fn send_close_notice<S>(ws_tx: &mut WsSink<S>) -> bool
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    match ws_tx
        .send(Message::Text(CLIENT_CLOSED_FRAME.to_string()))
        .await
    {
        Ok(()) => true,
        Err(err) => {
            debug!(%err, "close notice not delivered");
            false
        }
    }
}
