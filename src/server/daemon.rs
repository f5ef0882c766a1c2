//! Rotation daemon
//!
//! Background task that turns the taco: while a spin is active it records
//! one rotation every 0..1000 ms, with the lap time drawn fresh each turn.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, trace};

use crate::spin::SpinState;

/// Spawn the rotation daemon. It runs until the shutdown channel fires.
pub fn spawn_rotation_daemon(
    state: Arc<SpinState>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            // rng must not be held across an await point
            let lap = Duration::from_millis(rand::thread_rng().gen_range(0..1000));
            tokio::select! {
                _ = time::sleep(lap) => {
                    if let Some(total) = state.increment().await {
                        trace!(total, "rotation observed");
                    }
                }
                _ = shutdown_rx.recv() => {
                    debug!("rotation daemon stopping");
                    break;
                }
            }
        }
    })
}
