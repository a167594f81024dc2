use std::path::Path;

use crate::audio::domain::audio_clip::AudioClip;
use crate::audio::domain::audio_decoder::AudioDecoder;

/// Decoder backed by ffmpeg-next.
///
/// Accepts anything FFmpeg can demux: full containers with their default
/// audio stream as well as the staged WAV produced by track extraction.
pub struct FfmpegDecoder;

impl AudioDecoder for FfmpegDecoder {
    fn decode(
        &self,
        path: &Path,
        sample_rate: u32,
    ) -> Result<AudioClip, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut input = ffmpeg_next::format::input(path)?;
        let stream = input
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or_else(|| format!("no audio stream in {}", path.display()))?;
        let stream_index = stream.index();
        let parameters = stream.parameters();

        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(parameters)?;
        let mut decoder = codec_ctx.decoder().audio()?;

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Planar),
            ffmpeg_next::ChannelLayout::MONO,
            sample_rate,
        )?;

        let mut samples: Vec<f32> = Vec::new();
        let mut decoded = ffmpeg_next::util::frame::audio::Audio::empty();
        let mut resampled = ffmpeg_next::util::frame::audio::Audio::empty();

        for (packet_stream, packet) in input.packets() {
            if packet_stream.index() != stream_index {
                continue;
            }
            decoder.send_packet(&packet)?;
            drain_decoder(
                &mut decoder,
                &mut resampler,
                &mut decoded,
                &mut resampled,
                &mut samples,
            )?;
        }

        decoder.send_eof()?;
        drain_decoder(
            &mut decoder,
            &mut resampler,
            &mut decoded,
            &mut resampled,
            &mut samples,
        )?;

        // The resampler may still hold buffered output after EOF.
        if let Ok(Some(delay)) = resampler.flush(&mut resampled) {
            if delay.output > 0 {
                append_plane(&resampled, &mut samples);
            }
        }

        Ok(AudioClip::new(samples, sample_rate))
    }
}

fn drain_decoder(
    decoder: &mut ffmpeg_next::decoder::Audio,
    resampler: &mut ffmpeg_next::software::resampling::Context,
    decoded: &mut ffmpeg_next::util::frame::audio::Audio,
    resampled: &mut ffmpeg_next::util::frame::audio::Audio,
    out: &mut Vec<f32>,
) -> Result<(), ffmpeg_next::Error> {
    while decoder.receive_frame(decoded).is_ok() {
        resampler.run(decoded, resampled)?;
        append_plane(resampled, out);
    }
    Ok(())
}

/// Planar mono frame: every sample lives in plane 0 as raw f32.
fn append_plane(frame: &ffmpeg_next::util::frame::audio::Audio, out: &mut Vec<f32>) {
    let count = frame.samples();
    if count == 0 {
        return;
    }
    let plane = frame.data(0);
    let floats = unsafe { std::slice::from_raw_parts(plane.as_ptr() as *const f32, count) };
    out.extend_from_slice(floats);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_nonexistent_file_is_an_error() {
        let decoder = FfmpegDecoder;
        let path = if cfg!(windows) {
            Path::new("Z:\\nonexistent\\clip.mp4")
        } else {
            Path::new("/nonexistent/clip.mp4")
        };
        assert!(decoder.decode(path, 16000).is_err());
    }
}
