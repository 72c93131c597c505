use std::path::{Path, PathBuf};

use async_trait::async_trait;

/// Boundary to the external re-encoding tool. Takes an arbitrary audio or
/// video container and produces a mono 16 kHz waveform file. On success
/// exactly one new temp file exists at the returned path; on failure none.
#[async_trait]
pub trait AudioNormalizer: Send + Sync {
    async fn normalize(&self, input: &Path) -> Result<PathBuf, ConversionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("re-encoding failed: {0}")]
    ReencodeFailed(String),
    #[error("re-encoder unavailable: {0}")]
    ToolUnavailable(String),
    #[error("input unreadable: {0}")]
    InputUnreadable(String),
}
