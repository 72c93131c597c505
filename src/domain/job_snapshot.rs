use super::JobStatus;

/// Externally visible state of the job slot at the moment of a status poll.
///
/// `text` holds the last successful transcript and `error` the last failure
/// message; each persists until overwritten by a later run. `status` is the
/// freshness signal that tells pollers which of the two belongs to the most
/// recent run.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub status: JobStatus,
    pub text: String,
    pub error: String,
}

impl JobSnapshot {
    pub fn idle() -> Self {
        Self {
            status: JobStatus::Idle,
            text: String::new(),
            error: String::new(),
        }
    }
}

impl Default for JobSnapshot {
    fn default() -> Self {
        Self::idle()
    }
}
