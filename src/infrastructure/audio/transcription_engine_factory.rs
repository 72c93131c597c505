use std::sync::Arc;

use crate::application::ports::{TranscriptionEngine, TranscriptionError};

use super::openai_whisper_engine::OpenAiWhisperEngine;
use super::whisper_cli_engine::WhisperCliEngine;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TranscriptionProvider {
    Local,
    OpenAi,
}

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        provider: TranscriptionProvider,
        whisper_binary: &str,
        model: &str,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match provider {
            TranscriptionProvider::Local => {
                Ok(Arc::new(WhisperCliEngine::new(whisper_binary, model)))
            }
            TranscriptionProvider::OpenAi => {
                let key = api_key.ok_or_else(|| {
                    TranscriptionError::EngineUnavailable(
                        "API key required for the Whisper API provider".to_string(),
                    )
                })?;
                let engine = OpenAiWhisperEngine::new(key, base_url, Some(model.to_string()));
                Ok(Arc::new(engine))
            }
        }
    }
}
