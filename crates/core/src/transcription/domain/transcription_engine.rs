use std::path::PathBuf;

use thiserror::Error;

use super::transcript::TranscriptionResult;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("failed to load model '{model}': {reason}")]
    Load { model: String, reason: String },
    #[error("failed to decode audio from {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("transcription failed: {reason}")]
    Inference { reason: String },
}

/// Everything the engine needs for one run, assembled once by the
/// orchestrator.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscriptionRequest {
    /// Source container, or the staged intermediate audio when a track
    /// was isolated.
    pub input: PathBuf,
    /// Model identifier; validity is the engine's to judge at load time.
    pub model: String,
    /// Forced language code, `None` for auto-detection.
    pub language: Option<String>,
    /// Resolved compute device identifier.
    pub device: String,
}

/// Domain interface for the speech-recognition engine.
///
/// A single synchronous call: load the named model on the requested
/// device, run inference over the whole input, return the complete
/// result. The model is loaded fresh on every call; nothing is cached
/// across runs. Failures are fatal to the run, never retried.
pub trait TranscriptionEngine: Send {
    fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResult, EngineError>;
}
