use std::path::{Path, PathBuf};
use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("FFmpeg not found. Please install FFmpeg and ensure it is in your PATH")]
    ToolMissing,
    #[error("failed to launch FFmpeg: {0}")]
    Launch(#[source] std::io::Error),
    #[error("FFmpeg failed to extract audio track {track} ({status}): {stderr}")]
    Failed {
        track: usize,
        status: ExitStatus,
        stderr: String,
    },
}

/// Domain interface for isolating one audio stream of a media container
/// into a normalized intermediate audio file.
pub trait TrackExtractor: Send {
    /// Verify the external tool is present, before any file work happens.
    fn ensure_available(&self) -> Result<(), ExtractionError>;

    /// Extract the `track`-th audio stream of `src` (0-based, counted
    /// among audio streams only) into `staging_dir` and return the path
    /// of the produced file. Whether the index actually exists is the
    /// tool's to judge; an out-of-range index surfaces as `Failed`.
    fn extract(
        &self,
        src: &Path,
        track: usize,
        staging_dir: &Path,
    ) -> Result<PathBuf, ExtractionError>;
}
