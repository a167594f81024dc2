use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_decoder::AudioDecoder;
use crate::shared::constants::{CPU_DEVICE, ENGINE_SAMPLE_RATE};
use crate::transcription::domain::transcript::{TranscriptSegment, TranscriptionResult};
use crate::transcription::domain::transcription_engine::{
    EngineError, TranscriptionEngine, TranscriptionRequest,
};

use super::model_resolver::{self, ProgressFn};

/// Speech recognition backed by whisper.cpp via whisper-rs.
///
/// Resolves the ggml weights for the requested model (downloading them
/// into the cache on first use), decodes the input through the injected
/// decoder, and runs greedy inference over the whole clip in one pass.
pub struct WhisperEngine {
    decoder: Box<dyn AudioDecoder>,
    download_progress: Option<ProgressFn>,
}

impl WhisperEngine {
    pub fn new(decoder: Box<dyn AudioDecoder>) -> Self {
        Self {
            decoder,
            download_progress: None,
        }
    }

    /// Report model-download progress through `progress`.
    pub fn with_download_progress(mut self, progress: ProgressFn) -> Self {
        self.download_progress = Some(progress);
        self
    }

    fn load_context(&self, model: &str, device: &str) -> Result<WhisperContext, EngineError> {
        let load_err = |reason: String| EngineError::Load {
            model: model.to_string(),
            reason,
        };

        let filename = model_resolver::model_filename(model).ok_or_else(|| {
            load_err("unknown model size (expected tiny, base, small, medium or large)".to_string())
        })?;
        let model_path = model_resolver::resolve(&filename, self.download_progress.as_ref())
            .map_err(|e| load_err(e.to_string()))?;
        let path_str = model_path
            .to_str()
            .ok_or_else(|| load_err(format!("model path is not valid UTF-8: {}", model_path.display())))?;

        let mut ctx_params = WhisperContextParameters::default();
        ctx_params.use_gpu(device != CPU_DEVICE);

        log::info!("loading model '{model}' on {device}");
        WhisperContext::new_with_params(path_str, ctx_params).map_err(|e| load_err(e.to_string()))
    }
}

impl TranscriptionEngine for WhisperEngine {
    fn transcribe(
        &self,
        request: &TranscriptionRequest,
    ) -> Result<TranscriptionResult, EngineError> {
        let ctx = self.load_context(&request.model, &request.device)?;
        let mut state = ctx.create_state().map_err(|e| EngineError::Load {
            model: request.model.clone(),
            reason: format!("failed to create decoding state: {e}"),
        })?;

        let clip = self
            .decoder
            .decode(&request.input, ENGINE_SAMPLE_RATE)
            .map_err(|e| EngineError::Decode {
                path: request.input.clone(),
                reason: e.to_string(),
            })?;
        log::debug!(
            "decoded {:.1}s of audio from {}",
            clip.duration(),
            request.input.display()
        );

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
        params.set_language(Some(request.language.as_deref().unwrap_or("auto")));
        params.set_translate(false);
        params.set_token_timestamps(true);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(worker_threads());

        state
            .full(params, clip.samples())
            .map_err(|e| EngineError::Inference {
                reason: e.to_string(),
            })?;

        let mut text = String::new();
        let mut segments = Vec::new();
        let segment_count = state.full_n_segments();

        for index in 0..segment_count {
            let segment = match state.get_segment(index) {
                Some(s) => s,
                None => continue,
            };

            let mut piece = String::new();
            let mut bounds: Option<(i64, i64)> = None;

            for token_index in 0..segment.n_tokens() {
                let token = match segment.get_token(token_index) {
                    Some(t) => t,
                    None => continue,
                };
                let token_text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens ([_BEG_], <|endoftext|>, ...)
                let trimmed = token_text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                let data = token.token_data();
                bounds = Some(match bounds {
                    Some((start, _)) => (start, data.t1),
                    None => (data.t0, data.t1),
                });
                piece.push_str(token_text);
            }

            let Some((start, end)) = bounds else { continue };
            text.push_str(&piece);

            // Token timestamps are in centiseconds (10 ms units)
            segments.push(TranscriptSegment {
                start_time: start as f64 / 100.0,
                end_time: end as f64 / 100.0,
                text: piece.trim().to_string(),
            });
        }

        let language = match &request.language {
            Some(code) => Some(code.clone()),
            None => state
                .full_lang_id_from_state()
                .ok()
                .and_then(whisper_rs::get_lang_str)
                .map(|lang| lang.to_string()),
        };

        Ok(TranscriptionResult {
            text,
            segments,
            language,
        })
    }
}

fn worker_threads() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(4) as i32
}
