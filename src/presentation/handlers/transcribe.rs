use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use bytes::Bytes;
use serde::Serialize;

use crate::application::services::SubmitError;
use crate::presentation::state::AppState;

const UPLOAD_FIELD: &str = "file";

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn transcribe_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut upload: Option<(String, Bytes)> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some(UPLOAD_FIELD) {
                    continue;
                }
                let file_name = field.file_name().unwrap_or("").to_string();
                match field.bytes().await {
                    Ok(data) => {
                        upload = Some((file_name, data));
                        break;
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to read upload bytes");
                        return no_file_response();
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart body");
                return no_file_response();
            }
        }
    }

    let Some((file_name, data)) = upload else {
        tracing::warn!("Transcribe request without a '{}' field", UPLOAD_FIELD);
        return no_file_response();
    };

    match state.orchestrator.submit(&file_name, data).await {
        Ok(()) => (
            StatusCode::OK,
            Json(TranscribeResponse {
                status: "uploaded".to_string(),
            }),
        )
            .into_response(),
        Err(SubmitError::Busy) => {
            tracing::debug!("Submission rejected: job already in flight");
            (
                StatusCode::CONFLICT,
                Json(ErrorResponse {
                    error: "busy".to_string(),
                }),
            )
                .into_response()
        }
        Err(e @ (SubmitError::EmptyUpload | SubmitError::MissingFileName)) => {
            tracing::warn!(error = %e, "Rejecting unusable upload");
            no_file_response()
        }
        Err(SubmitError::Staging(e)) => {
            tracing::error!(error = %e, "Failed to stage upload");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("failed to stage upload: {}", e),
                }),
            )
                .into_response()
        }
    }
}

fn no_file_response() -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "no file".to_string(),
        }),
    )
        .into_response()
}
