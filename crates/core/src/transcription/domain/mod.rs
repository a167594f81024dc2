pub mod device;
pub mod transcript;
pub mod transcription_engine;
