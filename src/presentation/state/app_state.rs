use crate::application::services::JobOrchestrator;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: JobOrchestrator,
}
