mod health;
mod status;
mod transcribe;

pub use health::health_handler;
pub use status::status_handler;
pub use transcribe::transcribe_handler;
