use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::extraction::domain::track_extractor::{ExtractionError, TrackExtractor};
use crate::shared::constants::{ENGINE_SAMPLE_RATE, STAGED_AUDIO_FILENAME};

/// Track extractor that shells out to the `ffmpeg` binary.
///
/// The tool's exit status is the sole success signal; stderr is captured
/// for diagnostics.
pub struct FfmpegExtractor {
    binary: OsString,
}

impl FfmpegExtractor {
    pub fn new() -> Self {
        Self {
            binary: OsString::from("ffmpeg"),
        }
    }

    /// Use a different binary name or path instead of the `ffmpeg` found
    /// on PATH.
    pub fn with_binary(binary: impl Into<OsString>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for FfmpegExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Arguments requesting: quiet logging, unconditional overwrite, no
/// video, the `track`-th audio stream, transcoded to mono 16 kHz
/// 16-bit PCM.
fn extract_args(src: &Path, track: usize, dest: &Path) -> Vec<OsString> {
    vec![
        "-hide_banner".into(),
        "-loglevel".into(),
        "error".into(),
        "-y".into(),
        "-i".into(),
        src.as_os_str().into(),
        "-vn".into(),
        "-map".into(),
        format!("0:a:{track}").into(),
        "-acodec".into(),
        "pcm_s16le".into(),
        "-ar".into(),
        ENGINE_SAMPLE_RATE.to_string().into(),
        "-ac".into(),
        "1".into(),
        dest.as_os_str().into(),
    ]
}

impl TrackExtractor for FfmpegExtractor {
    fn ensure_available(&self) -> Result<(), ExtractionError> {
        let probe = Command::new(&self.binary)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        match probe {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ExtractionError::ToolMissing),
            Err(e) => Err(ExtractionError::Launch(e)),
        }
    }

    fn extract(
        &self,
        src: &Path,
        track: usize,
        staging_dir: &Path,
    ) -> Result<PathBuf, ExtractionError> {
        let dest = staging_dir.join(STAGED_AUDIO_FILENAME);
        log::debug!(
            "extracting audio track {track} of {} to {}",
            src.display(),
            dest.display()
        );

        let output = Command::new(&self.binary)
            .args(extract_args(src, track, &dest))
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ExtractionError::ToolMissing,
                _ => ExtractionError::Launch(e),
            })?;

        if !output.status.success() {
            return Err(ExtractionError::Failed {
                track,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(dest)
    }
}
