mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    LoggingSettings, NormalizerSettings, ServerSettings, Settings, SpoolSettings,
    TranscriptionProviderSetting, TranscriptionSettings,
};
