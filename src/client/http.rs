//! Spin controls
//!
//! The two HTTP verbs the page exposed as buttons: start a spin and end
//! it. Starting ignores the response entirely; ending reads the final
//! rotation total and settles the view.

use thiserror::Error;

use super::view::SpinView;
use crate::protocol::{completed_message, RotationStatus};

/// Errors from the spin control endpoints
#[derive(Debug, Error)]
pub enum ControlError {
    #[error("spin control request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// HTTP client for `/start` and `/end`
pub struct SpinControls {
    base_url: String,
    http: reqwest::Client,
}

impl SpinControls {
    /// Create controls against a server base URL, e.g. `http://127.0.0.1:8080`
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Start a spin. The response body and status are ignored; only a
    /// transport failure surfaces as an error.
    pub async fn start_spin(&self) -> Result<(), ControlError> {
        self.http
            .get(format!("{}/start", self.base_url))
            .send()
            .await?;
        Ok(())
    }

    /// End the spin: read the final total, settle the view, and return
    /// the count
    pub async fn end_spin(&self, view: &dyn SpinView) -> Result<u64, ControlError> {
        let status: RotationStatus = self
            .http
            .get(format!("{}/end", self.base_url))
            .send()
            .await?
            .json()
            .await?;

        view.set_spinning(false);
        view.show_message(&completed_message(status.total_count));
        Ok(status.total_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::RecordingView;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use axum::{routing::get, Json, Router};

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_start_spin_issues_one_get_and_ignores_response() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counted = Arc::clone(&hits);
        let app = Router::new().route(
            "/start",
            get(move || {
                let counted = Arc::clone(&counted);
                async move {
                    counted.fetch_add(1, Ordering::SeqCst);
                    "Start time set to: 1\n"
                }
            }),
        );

        let controls = SpinControls::new(serve(app).await);
        controls.start_spin().await.unwrap();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_end_spin_settles_view_with_final_total() {
        let app = Router::new().route(
            "/end",
            get(|| async {
                Json(serde_json::json!({"start": 100, "end": 200, "total_count": 42}))
            }),
        );

        let controls = SpinControls::new(serve(app).await);
        let view = RecordingView::new();
        let total = controls.end_spin(&view).await.unwrap();

        assert_eq!(total, 42);
        assert_eq!(view.last_spinning(), Some(false));
        assert_eq!(
            view.last_message().as_deref(),
            Some("The mighty taco has completed its rotations at 42 rotations")
        );
    }

    #[tokio::test]
    async fn test_end_spin_non_json_response_is_an_error() {
        let app = Router::new().route(
            "/end",
            get(|| async { "the mighty taco has not yet started to spin" }),
        );

        let controls = SpinControls::new(serve(app).await);
        let view = RecordingView::new();
        let result = controls.end_spin(&view).await;

        assert!(result.is_err());
        // The view stays untouched on failure
        assert_eq!(view.message_count(), 0);
        assert_eq!(view.last_spinning(), None);
    }
}
