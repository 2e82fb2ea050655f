use axum::{extract::State, http::StatusCode};
use tracing::{info, warn};

use crate::state::ServerState;

/// Liveness probe.
pub async fn status() -> &'static str {
    "OK"
}

/// Ask the server loop to stop accepting connections and drain.
pub async fn shutdown(State(state): State<ServerState>) -> (StatusCode, &'static str) {
    match &state.shutdown {
        Some(handle) => {
            if handle.trigger() {
                info!(event = "shutdown_requested", "shutdown requested over http");
            }
            (StatusCode::OK, "server shutting down...")
        }
        None => {
            warn!(event = "shutdown_unsupported", "no shutdown handle wired");
            (StatusCode::NOT_IMPLEMENTED, "unable to shutdown server!")
        }
    }
}
