//! Spin domain state
//!
//! The rotation counter, the start/end record of a spin, and the shared
//! state handle the server hands to its HTTP and WebSocket handlers.

mod counter;
mod record;
mod state;

pub use counter::Counter;
pub use record::SpinRecord;
pub use state::{SpinError, SpinState};
