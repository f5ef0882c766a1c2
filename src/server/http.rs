//! HTTP control endpoints
//!
//! `/start` begins a spin, `/end` finishes it and reports the result,
//! `/` reports the current status. All three are GETs with no parameters.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tracing::info;

use super::ws;
use crate::spin::SpinState;

/// Build the router for the spin server
pub fn router(state: Arc<SpinState>) -> Router {
    Router::new()
        .route("/", get(status_handler))
        .route("/start", get(start_handler))
        .route("/end", get(end_handler))
        .route("/ws", get(ws::ws_handler))
        .with_state(state)
}

/// Start a new spin: reset the counter and stamp the start time
async fn start_handler(State(state): State<Arc<SpinState>>) -> String {
    let start = state.start().await;
    info!(start, "the mighty taco has started to spin");
    format!("Start time set to: {start}\n")
}

/// End the current spin and return the final result as JSON
async fn end_handler(State(state): State<Arc<SpinState>>) -> Response {
    match state.finish().await {
        Ok(result) => {
            info!(
                end = result.end,
                total_count = result.total_count,
                "the mighty taco has completed its rotations"
            );
            Json(result).into_response()
        }
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}

/// Report the current start/end/total as JSON
async fn status_handler(State(state): State<Arc<SpinState>>) -> Response {
    let result = state.status().await;
    Json(result).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::SpinResult;
    use crate::spin::SpinError;

    #[tokio::test]
    async fn test_start_handler_response_text() {
        let state = Arc::new(SpinState::new());
        let body = start_handler(State(Arc::clone(&state))).await;
        assert!(body.starts_with("Start time set to: "));
        assert!(state.is_spinning().await);
    }

    #[tokio::test]
    async fn test_end_without_start_is_rejected() {
        let state = Arc::new(SpinState::new());
        let response = end_handler(State(state)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_end_after_start_reports_total() {
        let state = Arc::new(SpinState::new());
        state.start().await;
        for _ in 0..3 {
            let total = state.increment().await;
            assert!(total.is_some());
        }

        let result = state.finish().await.unwrap();
        assert_eq!(result.total_count, 3);
        assert!(!state.is_spinning().await);
    }

    #[tokio::test]
    async fn test_double_end_is_rejected() {
        let state = Arc::new(SpinState::new());
        state.start().await;
        state.finish().await.unwrap();
        assert_eq!(state.finish().await, Err(SpinError::AlreadyFinished));
    }

    #[tokio::test]
    async fn test_status_reports_idle_state() {
        let state = Arc::new(SpinState::new());
        let result: SpinResult = state.status().await;
        assert_eq!(result.start, 0);
        assert_eq!(result.end, 0);
        assert_eq!(result.total_count, 0);
    }
}
