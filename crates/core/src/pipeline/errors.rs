use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::extraction::domain::track_extractor::ExtractionError;
use crate::transcription::domain::transcription_engine::EngineError;

use super::transcript_writer::WriteError;

/// Fatal conditions that abort a pipeline run.
///
/// Nothing here is retried or recovered; the caller reports the message
/// and exits non-zero. Staged-resource cleanup happens regardless of the
/// variant and never replaces it.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("no valid input file selected or provided")]
    NoInput,
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("failed to create staging directory: {0}")]
    Staging(#[source] io::Error),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Write(#[from] WriteError),
}
