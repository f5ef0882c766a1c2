//! Spin record
//!
//! Tracks the start and end timestamps of the current spin. A spin is
//! active while it has a start stamp and no end stamp.

use std::time::{SystemTime, UNIX_EPOCH};

/// Start/end window of a single spin
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpinRecord {
    /// Unix timestamp when the spin started (0 if never started)
    pub start: i64,
    /// Unix timestamp when the spin ended (0 while active)
    pub end: i64,
}

impl SpinRecord {
    /// Create an empty record (no spin yet)
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp a new start time and clear any previous end
    pub fn restart(&mut self) {
        self.start = unix_now();
        self.end = 0;
    }

    /// Stamp the end time
    pub fn finish(&mut self) {
        self.end = unix_now();
    }

    /// Whether a spin is currently active
    pub fn is_spinning(&self) -> bool {
        self.start != 0 && self.end == 0
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_record_is_not_spinning() {
        assert!(!SpinRecord::new().is_spinning());
    }

    #[test]
    fn test_restart_starts_spinning() {
        let mut record = SpinRecord::new();
        record.restart();
        assert!(record.start > 0);
        assert_eq!(record.end, 0);
        assert!(record.is_spinning());
    }

    #[test]
    fn test_finish_stops_spinning() {
        let mut record = SpinRecord::new();
        record.restart();
        record.finish();
        assert!(record.end >= record.start);
        assert!(!record.is_spinning());
    }

    #[test]
    fn test_restart_clears_previous_end() {
        let mut record = SpinRecord::new();
        record.restart();
        record.finish();
        record.restart();
        assert_eq!(record.end, 0);
        assert!(record.is_spinning());
    }
}
