use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::{AudioNormalizer, ConversionError};
use crate::infrastructure::storage::SpoolDir;

/// Re-encodes an arbitrary audio/video container to mono 16 kHz WAV by
/// invoking an external ffmpeg binary.
pub struct FfmpegNormalizer {
    binary: String,
    spool: Arc<SpoolDir>,
}

impl FfmpegNormalizer {
    pub fn new(binary: impl Into<String>, spool: Arc<SpoolDir>) -> Self {
        Self {
            binary: binary.into(),
            spool,
        }
    }
}

#[async_trait]
impl AudioNormalizer for FfmpegNormalizer {
    async fn normalize(&self, input: &Path) -> Result<PathBuf, ConversionError> {
        if let Err(e) = tokio::fs::metadata(input).await {
            return Err(ConversionError::InputUnreadable(format!(
                "{}: {}",
                input.display(),
                e
            )));
        }

        let output_path = self.spool.unique_wav_path();

        tracing::debug!(
            input = %input.display(),
            output = %output_path.display(),
            "Re-encoding to mono 16 kHz wav"
        );

        let output = Command::new(&self.binary)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .args(["-ac", "1", "-ar", "16000"])
            .arg(&output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    ConversionError::ToolUnavailable(format!("{}: {}", self.binary, e))
                } else {
                    ConversionError::ReencodeFailed(e.to_string())
                }
            })?;

        if !output.status.success() {
            // ffmpeg can leave a partial output behind; a failed conversion
            // must not create temp files.
            if let Err(e) = tokio::fs::remove_file(&output_path).await {
                if e.kind() != io::ErrorKind::NotFound {
                    tracing::warn!(
                        error = %e,
                        path = %output_path.display(),
                        "Failed to remove partial re-encode output"
                    );
                }
            }

            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = stderr
                .lines()
                .rev()
                .find(|line| !line.trim().is_empty())
                .unwrap_or("")
                .trim();
            return Err(ConversionError::ReencodeFailed(format!(
                "{} exited with {}: {}",
                self.binary, output.status, detail
            )));
        }

        Ok(output_path)
    }
}
