use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: String,
    pub text: String,
    pub error: String,
}

/// Read-only projection of the current job snapshot. Never blocks on the
/// background task.
pub async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.orchestrator.snapshot();

    Json(StatusResponse {
        status: snapshot.status.as_str().to_string(),
        text: snapshot.text,
        error: snapshot.error,
    })
}
