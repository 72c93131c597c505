use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;

use crate::application::ports::{
    AudioNormalizer, ConversionError, TranscriptionEngine, TranscriptionError,
};
use crate::domain::{JobSnapshot, JobStatus, UploadedArtifact};
use crate::infrastructure::storage::SpoolDir;

/// Owner of the single job slot. Holds the exclusivity gate and the published
/// snapshot behind one mutex, so accepting a submission and claiming the slot
/// is a single atomic step, and a status poll can never observe a half
/// published transition.
///
/// Cheap to clone; all clones share the same slot.
#[derive(Clone)]
pub struct JobOrchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<JobState>,
    spool: Arc<SpoolDir>,
    normalizer: Arc<dyn AudioNormalizer>,
    engine: Arc<dyn TranscriptionEngine>,
    language: String,
}

struct JobState {
    in_flight: bool,
    snapshot: JobSnapshot,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("a transcription job is already in flight")]
    Busy,
    #[error("uploaded file is empty")]
    EmptyUpload,
    #[error("missing file name")]
    MissingFileName,
    #[error("failed to stage upload: {0}")]
    Staging(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("audio conversion: {0}")]
    Conversion(#[from] ConversionError),
    #[error("transcription: {0}")]
    Transcription(#[from] TranscriptionError),
}

impl JobOrchestrator {
    pub fn new(
        spool: Arc<SpoolDir>,
        normalizer: Arc<dyn AudioNormalizer>,
        engine: Arc<dyn TranscriptionEngine>,
        language: String,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(JobState {
                    in_flight: false,
                    snapshot: JobSnapshot::idle(),
                }),
                spool,
                normalizer,
                engine,
                language,
            }),
        }
    }

    /// Non-blocking read of the last published status/text/error triple.
    pub fn snapshot(&self) -> JobSnapshot {
        self.inner.state().snapshot.clone()
    }

    /// Accept an upload and schedule the transcription job, or reject it
    /// without queueing. No transcription work happens on the caller's path;
    /// the upload is staged to the spool directory and the job runs in a
    /// spawned task.
    pub async fn submit(&self, file_name: &str, data: Bytes) -> Result<(), SubmitError> {
        if file_name.is_empty() {
            return Err(SubmitError::MissingFileName);
        }
        if data.is_empty() {
            return Err(SubmitError::EmptyUpload);
        }

        {
            let mut state = self.inner.state();
            if state.in_flight {
                return Err(SubmitError::Busy);
            }
            state.in_flight = true;
        }
        let gate = FlightGuard(Arc::clone(&self.inner));

        let staged = self.inner.spool.unique_path(file_name);
        if let Err(e) = tokio::fs::write(&staged, &data).await {
            tracing::error!(error = %e, path = %staged.display(), "Failed to stage upload");
            drop(gate);
            return Err(SubmitError::Staging(e));
        }

        tracing::info!(
            file_name = %file_name,
            bytes = data.len(),
            staged = %staged.display(),
            "Upload accepted, scheduling transcription job"
        );

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.run_job(UploadedArtifact::new(staged), gate).await;
        });

        Ok(())
    }
}

impl Inner {
    async fn run_job(&self, mut artifact: UploadedArtifact, gate: FlightGuard) {
        self.publish_status(JobStatus::Listening);

        match self.run_pipeline(&mut artifact).await {
            Ok(text) => {
                tracing::info!(chars = text.len(), "Transcription job completed");
                let mut state = self.state();
                state.snapshot.text = text;
                state.snapshot.status = JobStatus::Done;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Transcription job failed");
                let mut state = self.state();
                state.snapshot.error = e.to_string();
                state.snapshot.status = JobStatus::Error;
            }
        }

        self.spool.discard(&artifact).await;
        drop(gate);
    }

    async fn run_pipeline(&self, artifact: &mut UploadedArtifact) -> Result<String, JobError> {
        if !artifact.is_waveform() {
            tracing::debug!(
                input = %artifact.original().display(),
                "Upload is not a waveform, re-encoding"
            );
            let derived = self.normalizer.normalize(artifact.original()).await?;
            artifact.set_derived(derived);
        }

        let text = self
            .engine
            .transcribe(artifact.working_path(), &self.language)
            .await?;

        Ok(text)
    }

    fn publish_status(&self, status: JobStatus) {
        tracing::debug!(status = %status, "Job status transition");
        self.state().snapshot.status = status;
    }

    fn state(&self) -> MutexGuard<'_, JobState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Frees the job slot when dropped, so every exit path of the background
/// task, including a panic, releases the exclusivity gate.
struct FlightGuard(Arc<Inner>);

impl Drop for FlightGuard {
    fn drop(&mut self) {
        self.0.state().in_flight = false;
    }
}
