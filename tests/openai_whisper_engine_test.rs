use std::path::Path;

use axum::Router;
use axum::response::IntoResponse;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use songkhla::application::ports::{TranscriptionEngine, TranscriptionError};
use songkhla::infrastructure::audio::OpenAiWhisperEngine;

async fn start_mock_whisper_server(
    response_status: u16,
    response_body: &'static str,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new().route(
        "/audio/transcriptions",
        post(move || async move {
            let status = axum::http::StatusCode::from_u16(response_status).unwrap();
            (status, response_body).into_response()
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}

fn write_test_audio(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("voice.wav");
    std::fs::write(&path, b"RIFFfake wav bytes").unwrap();
    path
}

#[tokio::test]
async fn given_valid_audio_file_when_transcribing_then_returns_trimmed_text() {
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, "Hello from the Whisper API\n").await;
    let dir = tempfile::TempDir::new().unwrap();
    let audio = write_test_audio(&dir);

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);
    let result = engine.transcribe(&audio, "th").await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "Hello from the Whisper API");
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_api_error_status_when_transcribing_then_returns_api_error() {
    let (base_url, shutdown_tx) =
        start_mock_whisper_server(400, r#"{"error": {"message": "bad audio"}}"#).await;
    let dir = tempfile::TempDir::new().unwrap();
    let audio = write_test_audio(&dir);

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);
    let result = engine.transcribe(&audio, "th").await;

    assert!(matches!(
        result,
        Err(TranscriptionError::ApiRequestFailed(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_missing_audio_file_when_transcribing_then_returns_unreadable() {
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, "unused").await;

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);
    let result = engine
        .transcribe(Path::new("/nonexistent/voice.wav"), "th")
        .await;

    assert!(matches!(
        result,
        Err(TranscriptionError::AudioUnreadable(_))
    ));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_empty_transcript_when_transcribing_then_returns_empty_string() {
    let (base_url, shutdown_tx) = start_mock_whisper_server(200, "").await;
    let dir = tempfile::TempDir::new().unwrap();
    let audio = write_test_audio(&dir);

    let engine = OpenAiWhisperEngine::new("test-key".to_string(), Some(base_url), None);
    let result = engine.transcribe(&audio, "th").await;

    assert!(result.is_ok());
    assert_eq!(result.unwrap(), "");
    shutdown_tx.send(()).ok();
}
