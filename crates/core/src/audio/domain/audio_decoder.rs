use std::path::Path;

use super::audio_clip::AudioClip;

/// Domain interface for decoding a media file into engine-ready audio.
///
/// Implementations resample to the requested rate and downmix to mono.
/// A file without any audio stream is an error, not an empty clip.
pub trait AudioDecoder: Send {
    fn decode(
        &self,
        path: &Path,
        sample_rate: u32,
    ) -> Result<AudioClip, Box<dyn std::error::Error>>;
}
