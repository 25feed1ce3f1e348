use std::path::PathBuf;

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::microphone::Microphone;
use crate::shared::constants::WHISPER_SAMPLE_RATE;

/// Records audio via ffmpeg-next from a capture device (e.g. an ALSA or
/// AVFoundation source) or, mostly for development and tests, a plain
/// audio file.
///
/// Each `record` call opens the source fresh, decodes up to the requested
/// window, and resamples to mono f32 at the recognizer's sample rate.
pub struct FfmpegMicrophone {
    source: PathBuf,
    target_sample_rate: u32,
}

impl FfmpegMicrophone {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            target_sample_rate: WHISPER_SAMPLE_RATE,
        }
    }
}

impl Microphone for FfmpegMicrophone {
    fn record(&mut self, seconds: f64) -> Result<AudioSegment, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let mut ictx = ffmpeg_next::format::input(&self.source)?;

        let audio_stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Audio)
            .ok_or("no audio stream on capture source")?;

        let audio_stream_index = audio_stream.index();
        let codec_ctx =
            ffmpeg_next::codec::context::Context::from_parameters(audio_stream.parameters())?;
        let mut decoder = codec_ctx.decoder().audio()?;

        let mut resampler = ffmpeg_next::software::resampling::Context::get(
            decoder.format(),
            decoder.channel_layout(),
            decoder.rate(),
            ffmpeg_next::format::Sample::F32(ffmpeg_next::format::sample::Type::Planar),
            ffmpeg_next::ChannelLayout::MONO,
            self.target_sample_rate,
        )?;

        let wanted = (seconds * self.target_sample_rate as f64) as usize;
        let mut samples: Vec<f32> = Vec::with_capacity(wanted);
        let mut decoded = ffmpeg_next::util::frame::audio::Audio::empty();
        let mut resampled = ffmpeg_next::util::frame::audio::Audio::empty();

        'packets: for (stream, packet) in ictx.packets() {
            if stream.index() != audio_stream_index {
                continue;
            }

            decoder.send_packet(&packet)?;

            while decoder.receive_frame(&mut decoded).is_ok() {
                resampler.run(&decoded, &mut resampled)?;
                extract_f32_samples(&resampled, &mut samples);
                if samples.len() >= wanted {
                    break 'packets;
                }
            }
        }

        // Flush the decoder and resampler for whatever is still buffered
        if samples.len() < wanted {
            let _ = decoder.send_eof();
            while decoder.receive_frame(&mut decoded).is_ok() {
                resampler.run(&decoded, &mut resampled)?;
                extract_f32_samples(&resampled, &mut samples);
            }
            if let Ok(Some(delay)) = resampler.flush(&mut resampled) {
                if delay.output > 0 {
                    extract_f32_samples(&resampled, &mut samples);
                }
            }
        }

        samples.truncate(wanted);
        Ok(AudioSegment::new(samples, self.target_sample_rate, 1))
    }
}

/// Extract f32 samples from a planar mono resampled frame.
fn extract_f32_samples(frame: &ffmpeg_next::util::frame::audio::Audio, out: &mut Vec<f32>) {
    let num_samples = frame.samples();
    if num_samples == 0 {
        return;
    }
    let data = frame.data(0);
    let floats = unsafe { std::slice::from_raw_parts(data.as_ptr() as *const f32, num_samples) };
    out.extend_from_slice(floats);
}
