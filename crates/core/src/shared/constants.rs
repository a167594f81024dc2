/// Sample rate the speech engine consumes.
pub const ENGINE_SAMPLE_RATE: u32 = 16000;

/// Fixed name of the intermediate audio file inside a staging directory.
pub const STAGED_AUDIO_FILENAME: &str = "audio_track.wav";

/// Model loaded when the user does not pick one.
pub const DEFAULT_MODEL: &str = "medium";

/// Device identifier for the CPU fallback.
pub const CPU_DEVICE: &str = "cpu";

/// Device identifier reported when an NVIDIA GPU is usable.
pub const CUDA_DEVICE: &str = "cuda";

pub const MEDIA_EXTENSIONS: &[&str] = &[
    "mkv", "mp4", "mov", "m4a", "mp3", "wav", "flac", "aac", "ogg", "wma",
];

pub const WHISPER_MODEL_BASE_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main";
