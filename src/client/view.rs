//! Spin display
//!
//! The watcher renders into a [`SpinView`]: a spinning indicator plus a
//! single message line. The terminal view is the default; tests install a
//! recording view instead.

use std::sync::Mutex;

use tracing::{debug, info};

/// Where rotation updates land
///
/// Implementations must tolerate being called from multiple tasks; the
/// watcher itself only touches the view from its event loop.
pub trait SpinView: Send + Sync {
    /// Toggle the spinning indicator
    fn set_spinning(&self, spinning: bool);

    /// Replace the message line
    fn show_message(&self, message: &str);
}

/// Terminal-backed view: messages go to the log, indicator transitions
/// are traced
#[derive(Debug, Default)]
pub struct ConsoleView {
    spinning: Mutex<bool>,
}

impl ConsoleView {
    /// Create a view with the indicator off
    pub fn new() -> Self {
        Self::default()
    }
}

impl SpinView for ConsoleView {
    fn set_spinning(&self, spinning: bool) {
        let mut current = match self.spinning.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if *current != spinning {
            debug!(spinning, "spin indicator changed");
        }
        *current = spinning;
    }

    fn show_message(&self, message: &str) {
        info!("{message}");
    }
}

/// Test view that records every call
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    pub spinning: Mutex<Vec<bool>>,
    pub messages: Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_spinning(&self) -> Option<bool> {
        self.spinning.lock().unwrap().last().copied()
    }

    pub fn last_message(&self) -> Option<String> {
        self.messages.lock().unwrap().last().cloned()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }
}

#[cfg(test)]
impl SpinView for RecordingView {
    fn set_spinning(&self, spinning: bool) {
        self.spinning.lock().unwrap().push(spinning);
    }

    fn show_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_view_tracks_indicator() {
        let view = ConsoleView::new();
        view.set_spinning(true);
        assert!(*view.spinning.lock().unwrap());
        view.set_spinning(false);
        assert!(!*view.spinning.lock().unwrap());
    }

    #[test]
    fn test_recording_view_captures_calls() {
        let view = RecordingView::new();
        view.set_spinning(true);
        view.show_message("hello");
        assert_eq!(view.last_spinning(), Some(true));
        assert_eq!(view.last_message().as_deref(), Some("hello"));
    }
}
