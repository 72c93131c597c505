use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

/// Runs a local whisper.cpp-style CLI and reads the transcript from stdout.
pub struct WhisperCliEngine {
    binary: String,
    model_path: PathBuf,
}

impl WhisperCliEngine {
    pub fn new(binary: impl Into<String>, model_path: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            model_path: model_path.into(),
        }
    }
}

#[async_trait]
impl TranscriptionEngine for WhisperCliEngine {
    async fn transcribe(
        &self,
        audio: &Path,
        language: &str,
    ) -> Result<String, TranscriptionError> {
        if let Err(e) = tokio::fs::metadata(audio).await {
            return Err(TranscriptionError::AudioUnreadable(format!(
                "{}: {}",
                audio.display(),
                e
            )));
        }

        tracing::debug!(
            audio = %audio.display(),
            model = %self.model_path.display(),
            language = %language,
            "Running local whisper transcription"
        );

        let output = Command::new(&self.binary)
            .arg("-m")
            .arg(&self.model_path)
            .args(["-l", language])
            .args(["--no-prints", "--no-timestamps"])
            .arg("-f")
            .arg(audio)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    TranscriptionError::EngineUnavailable(format!("{}: {}", self.binary, e))
                } else {
                    TranscriptionError::TranscriptionFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("")
                .trim();
            return Err(TranscriptionError::TranscriptionFailed(format!(
                "{} exited with {}: {}",
                self.binary, output.status, detail
            )));
        }

        let transcript = String::from_utf8_lossy(&output.stdout).trim().to_string();

        tracing::info!(chars = transcript.len(), "Local whisper transcription completed");

        Ok(transcript)
    }
}
