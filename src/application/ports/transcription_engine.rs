use std::path::Path;

use async_trait::async_trait;

/// Boundary to the external speech-to-text engine: waveform path plus a
/// language hint in, transcript text out.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, audio: &Path, language: &str)
        -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("audio unreadable: {0}")]
    AudioUnreadable(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),
}
