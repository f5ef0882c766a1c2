//! Rotation counter
//!
//! Counts observed rotations with explicit rollover tracking so the total
//! survives a u64 wraparound.

/// Wrapping rotation counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counter {
    count: u64,
    rollovers: u64,
}

impl Counter {
    /// Create a fresh counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one rotation, bumping the rollover count on wraparound
    pub fn increment(&mut self) {
        let (next, wrapped) = self.count.overflowing_add(1);
        self.count = next;
        if wrapped {
            self.rollovers = self.rollovers.wrapping_add(1);
        }
    }

    /// Reset the counter and its rollovers to zero
    pub fn reset(&mut self) {
        self.count = 0;
        self.rollovers = 0;
    }

    /// Current raw count since the last reset or rollover
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Number of times the count has wrapped
    pub fn rollovers(&self) -> u64 {
        self.rollovers
    }

    /// Total rotations: the count plus u64::MAX per rollover, in wrapping
    /// arithmetic to match the original uint64 overflow behavior
    pub fn total(&self) -> u64 {
        self.count.wrapping_add(u64::MAX.wrapping_mul(self.rollovers))
    }
}
