use std::path::PathBuf;

use crate::extraction::domain::track_extractor::TrackExtractor;
use crate::picker::domain::file_picker::FilePicker;
use crate::shared::staging::StagingDir;
use crate::transcription::domain::device::{resolve_device, AcceleratorProbe};
use crate::transcription::domain::transcription_engine::{
    TranscriptionEngine, TranscriptionRequest,
};

use super::errors::PipelineError;
use super::transcript_writer::write_transcript;

/// Per-run configuration, assembled by the caller from CLI flags.
#[derive(Clone, Debug, Default)]
pub struct TranscribeOptions {
    /// Input media path; when absent the interactive picker decides.
    pub input: Option<PathBuf>,
    /// Model identifier handed to the engine.
    pub model: String,
    /// Forced language code; `None` lets the engine detect one.
    pub language: Option<String>,
    /// 0-based audio stream to isolate before transcription.
    pub audio_track: Option<usize>,
    /// Output directory; defaults to the input file's directory.
    pub outdir: Option<PathBuf>,
    /// Forced compute device; `None` probes for an accelerator.
    pub device: Option<String>,
}

/// Linear orchestration of one transcription run:
/// resolve input → optionally isolate a track → transcribe → write the
/// transcript → drop staged resources.
///
/// Every failure aborts the run. Staging cleanup happens on all paths
/// that created it — explicitly on the success and extraction-failure
/// paths, through `StagingDir`'s drop on the others — and its own
/// failures are swallowed.
pub struct TranscribeUseCase {
    picker: Box<dyn FilePicker>,
    extractor: Box<dyn TrackExtractor>,
    engine: Box<dyn TranscriptionEngine>,
    probe: Box<dyn AcceleratorProbe>,
}

impl TranscribeUseCase {
    pub fn new(
        picker: Box<dyn FilePicker>,
        extractor: Box<dyn TrackExtractor>,
        engine: Box<dyn TranscriptionEngine>,
        probe: Box<dyn AcceleratorProbe>,
    ) -> Self {
        Self {
            picker,
            extractor,
            engine,
            probe,
        }
    }

    /// Run the pipeline start to finish and return the transcript path.
    pub fn run(&self, options: &TranscribeOptions) -> Result<PathBuf, PipelineError> {
        // 1. Resolve the input file (explicit flag or interactive picker)
        let source = match &options.input {
            Some(path) => path.clone(),
            None => self.picker.pick_file().ok_or(PipelineError::NoInput)?,
        };
        if !source.exists() {
            return Err(PipelineError::InputNotFound(source));
        }

        // 2. Resolve the compute device
        let device = resolve_device(options.device.as_deref(), self.probe.as_ref());
        log::debug!("using device {device}");

        // 3. Isolate the requested audio track into staging, if asked to
        let mut staging: Option<StagingDir> = None;
        let engine_input = match options.audio_track {
            Some(track) => {
                self.extractor.ensure_available()?;
                let dir = StagingDir::create().map_err(PipelineError::Staging)?;
                match self.extractor.extract(&source, track, dir.path()) {
                    Ok(staged) => {
                        staging = Some(dir);
                        staged
                    }
                    Err(e) => {
                        dir.release();
                        return Err(e.into());
                    }
                }
            }
            None => source.clone(),
        };

        // 4. Transcribe the staged audio, or the container directly
        let request = TranscriptionRequest {
            input: engine_input,
            model: options.model.clone(),
            language: options.language.clone(),
            device,
        };
        let result = self.engine.transcribe(&request)?;

        // 5. Persist the transcript
        let output = write_transcript(&result, &source, options.outdir.as_deref())?;

        // 6. Drop staged audio before reporting success
        if let Some(dir) = staging.take() {
            dir.release();
        }

        log::info!("transcript written to {}", output.display());
        Ok(output)
    }
}
