mod job_snapshot;
mod job_status;
mod uploaded_artifact;

pub use job_snapshot::JobSnapshot;
pub use job_status::JobStatus;
pub use uploaded_artifact::UploadedArtifact;
