mod job_orchestrator;

pub use job_orchestrator::{JobError, JobOrchestrator, SubmitError};
