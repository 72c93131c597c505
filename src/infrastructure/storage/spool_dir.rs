use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::domain::UploadedArtifact;

/// Temp file manager for in-flight jobs. Hands out uniquely named paths
/// under one base directory and removes a finished job's artifacts.
pub struct SpoolDir {
    base: PathBuf,
}

impl SpoolDir {
    pub fn new(base: PathBuf) -> io::Result<Self> {
        std::fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Staging path for an upload. Only the extension of the client-supplied
    /// name survives; the rest is replaced with a fresh uuid, so uploads can
    /// neither collide nor escape the spool directory.
    pub fn unique_path(&self, file_name: &str) -> PathBuf {
        let stem = Uuid::new_v4().simple().to_string();
        let ext: String = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                e.chars()
                    .filter(|c| c.is_ascii_alphanumeric())
                    .collect::<String>()
                    .to_ascii_lowercase()
            })
            .unwrap_or_default();

        if ext.is_empty() {
            self.base.join(stem)
        } else {
            self.base.join(format!("{}.{}", stem, ext))
        }
    }

    /// Output path for a normalized waveform derivative.
    pub fn unique_wav_path(&self) -> PathBuf {
        self.base
            .join(format!("{}.wav", Uuid::new_v4().simple()))
    }

    /// Best-effort removal of every temp file the artifact owns. Cleanup
    /// failures are logged and never escalated over the job's own result.
    pub async fn discard(&self, artifact: &UploadedArtifact) {
        for path in artifact.paths() {
            match tokio::fs::remove_file(path).await {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "Removed spool file");
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        path = %path.display(),
                        "Failed to remove spool file"
                    );
                }
            }
        }
    }
}
