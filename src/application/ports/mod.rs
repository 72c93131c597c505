mod audio_normalizer;
mod transcription_engine;

pub use audio_normalizer::{AudioNormalizer, ConversionError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
