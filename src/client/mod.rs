//! Native spin watcher
//!
//! Client-side counterpart of the observatory: one WebSocket connection
//! that mirrors rotation updates into a [`SpinView`], plus the two HTTP
//! controls that start and end a spin.

mod http;
mod socket;
mod view;

pub use http::{ControlError, SpinControls};
pub use socket::{ClientError, SpinClient};
pub use view::{ConsoleView, SpinView};

#[cfg(test)]
pub(crate) use view::RecordingView;
