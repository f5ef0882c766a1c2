//! Shared spin state
//!
//! Single source of truth for the server: the counter plus the current
//! spin record behind one lock, shared across the HTTP handlers, the
//! WebSocket push loops, and the rotation daemon.

use thiserror::Error;
use tokio::sync::RwLock;

use super::{Counter, SpinRecord};
use crate::protocol::SpinResult;

/// Errors that can occur when ending a spin
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpinError {
    #[error("the mighty taco has not yet started to spin")]
    NotStarted,

    #[error("the mighty taco has already made its decision")]
    AlreadyFinished,
}

#[derive(Debug, Default)]
struct Inner {
    counter: Counter,
    record: SpinRecord,
}

/// Shared state for the spin observatory server
#[derive(Debug, Default)]
pub struct SpinState {
    inner: RwLock<Inner>,
}

impl SpinState {
    /// Create fresh state with no spin in progress
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new spin: reset the counter and stamp a new start time.
    /// Returns the start timestamp.
    pub async fn start(&self) -> i64 {
        let mut inner = self.inner.write().await;
        inner.counter.reset();
        inner.record.restart();
        inner.record.start
    }

    /// End the current spin and return the final result
    pub async fn finish(&self) -> Result<SpinResult, SpinError> {
        let mut inner = self.inner.write().await;
        if inner.record.start == 0 {
            return Err(SpinError::NotStarted);
        }
        if inner.record.end != 0 {
            return Err(SpinError::AlreadyFinished);
        }
        inner.record.finish();
        Ok(Self::result_of(&inner))
    }

    /// Snapshot of the current start/end/total
    pub async fn status(&self) -> SpinResult {
        let inner = self.inner.read().await;
        Self::result_of(&inner)
    }

    /// Whether a spin is currently active
    pub async fn is_spinning(&self) -> bool {
        self.inner.read().await.record.is_spinning()
    }

    /// Record one rotation if a spin is active. Returns the new total,
    /// or None when nothing is spinning.
    pub async fn increment(&self) -> Option<u64> {
        let mut inner = self.inner.write().await;
        if !inner.record.is_spinning() {
            return None;
        }
        inner.counter.increment();
        Some(inner.counter.total())
    }

    /// Current rotation total while spinning, None otherwise
    pub async fn spinning_total(&self) -> Option<u64> {
        let inner = self.inner.read().await;
        inner.record.is_spinning().then(|| inner.counter.total())
    }

    fn result_of(inner: &Inner) -> SpinResult {
        SpinResult {
            start: inner.record.start,
            end: inner.record.end,
            total_count: inner.counter.total(),
        }
    }
}
