use std::path::{Path, PathBuf};

/// Temp files belonging to one in-flight job: the staged upload and, when
/// re-encoding happened, the normalized derivative. Owned exclusively by the
/// background task and discarded before it exits.
#[derive(Debug)]
pub struct UploadedArtifact {
    original: PathBuf,
    derived: Option<PathBuf>,
}

impl UploadedArtifact {
    pub fn new(original: PathBuf) -> Self {
        Self {
            original,
            derived: None,
        }
    }

    pub fn original(&self) -> &Path {
        &self.original
    }

    pub fn set_derived(&mut self, path: PathBuf) {
        self.derived = Some(path);
    }

    /// The path the transcription engine should consume: the normalized
    /// derivative when one exists, the staged upload otherwise.
    pub fn working_path(&self) -> &Path {
        self.derived.as_deref().unwrap_or(&self.original)
    }

    /// Whether the staged upload already carries the canonical waveform
    /// extension (case-insensitive).
    pub fn is_waveform(&self) -> bool {
        self.original
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"))
    }

    /// Every path this artifact owns, for cleanup.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        std::iter::once(self.original.as_path()).chain(self.derived.as_deref())
    }
}
