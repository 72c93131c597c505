mod ffmpeg_normalizer;
mod openai_whisper_engine;
mod transcription_engine_factory;
mod whisper_cli_engine;

pub use ffmpeg_normalizer::FfmpegNormalizer;
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::{TranscriptionEngineFactory, TranscriptionProvider};
pub use whisper_cli_engine::WhisperCliEngine;
