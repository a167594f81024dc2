use std::path::PathBuf;
use std::process;

use clap::Parser;

use mediascribe_core::audio::infrastructure::ffmpeg_decoder::FfmpegDecoder;
use mediascribe_core::extraction::infrastructure::ffmpeg_extractor::FfmpegExtractor;
use mediascribe_core::picker::infrastructure::dialog_picker::DialogPicker;
use mediascribe_core::pipeline::transcribe_use_case::{TranscribeOptions, TranscribeUseCase};
use mediascribe_core::shared::constants::DEFAULT_MODEL;
use mediascribe_core::transcription::infrastructure::system_probe::SystemAcceleratorProbe;
use mediascribe_core::transcription::infrastructure::whisper_engine::WhisperEngine;

/// Transcribe audio and video files with a local speech model.
#[derive(Parser)]
#[command(name = "mediascribe")]
struct Cli {
    /// Path to the input media file. If omitted, a file picker will open.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Model size (e.g. "small", "medium", "large").
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    model: String,

    /// Force a language code (e.g. "en"); default auto-detect.
    #[arg(short, long)]
    language: Option<String>,

    /// Audio track index to extract (0-based). If omitted, the engine
    /// uses the default track.
    #[arg(long)]
    audio_track: Option<usize>,

    /// Optional output directory for the transcript.
    #[arg(long)]
    outdir: Option<PathBuf>,

    /// Force device, e.g. "cuda" or "cpu".
    #[arg(long)]
    device: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let engine = WhisperEngine::new(Box::new(FfmpegDecoder))
        .with_download_progress(Box::new(download_progress));
    let use_case = TranscribeUseCase::new(
        Box::new(DialogPicker),
        Box::new(FfmpegExtractor::new()),
        Box::new(engine),
        Box::new(SystemAcceleratorProbe),
    );

    let options = TranscribeOptions {
        input: cli.input,
        model: cli.model,
        language: cli.language,
        audio_track: cli.audio_track,
        outdir: cli.outdir,
        device: cli.device,
    };

    let output = use_case.run(&options)?;
    println!("Transcript saved to: {}", output.display());
    Ok(())
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading model... {pct}%");
    } else {
        eprint!("\rDownloading model... {downloaded} bytes");
    }
    if total > 0 && downloaded >= total {
        eprintln!();
    }
}
