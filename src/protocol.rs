//! Wire protocol for the spin observatory
//!
//! Defines the JSON payloads exchanged over the WebSocket and HTTP
//! endpoints, the literal text frames the client sends back, and the
//! timing constants both sides agree on.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Delay between receiving a rotation status and acknowledging it
pub const ACK_DELAY: Duration = Duration::from_millis(5000);

/// Interval between server-side status pushes while a spin is active
pub const PUSH_INTERVAL: Duration = Duration::from_secs(3);

/// Empty frame sent by the client immediately after connecting
pub const STATUS_CHECK_FRAME: &str = "";

/// Acknowledgment frame sent [`ACK_DELAY`] after each status message
pub const ACK_FRAME: &str = "Ack";

/// Best-effort frame the client attempts to send when the connection closes
pub const CLIENT_CLOSED_FRAME: &str = "Client Closed!";

/// Protocol-related errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("invalid rotation status: {0}")]
    InvalidStatus(#[from] serde_json::Error),
}

/// Result type for protocol operations
pub type ProtocolResult<T> = Result<T, ProtocolError>;

// ============================================================================
// Payloads
// ============================================================================

/// Rotation status pushed by the server over the WebSocket
///
/// Unknown fields are ignored on parse so older servers that include extra
/// bookkeeping (e.g. a start timestamp) remain readable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RotationStatus {
    /// Total observed rotations so far
    pub total_count: u64,
}

impl RotationStatus {
    /// Create a status for the given rotation total
    pub fn new(total_count: u64) -> Self {
        Self { total_count }
    }

    /// Parse a status from a JSON text frame
    pub fn from_json(json: &str) -> ProtocolResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the status to JSON
    pub fn to_json(&self) -> ProtocolResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Final result of a spin, returned by `GET /end` and `GET /`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpinResult {
    /// Unix timestamp when the spin started (0 if never started)
    pub start: i64,
    /// Unix timestamp when the spin ended (0 while still spinning)
    pub end: i64,
    /// Total observed rotations
    pub total_count: u64,
}

// ============================================================================
// Display messages
// ============================================================================

/// Message shown while rotations are being observed
pub fn observed_message(total_count: u64) -> String {
    format!("The mighty taco spins have been observed at {total_count} rotations")
}

/// Message shown once the spin has completed
pub fn completed_message(total_count: u64) -> String {
    format!("The mighty taco has completed its rotations at {total_count} rotations")
}
