use super::audio_segment::AudioSegment;

/// Captures bounded windows of audio from an input device.
///
/// Implementations handle device I/O and format conversion; callers get
/// mono PCM at the sample rate they asked the implementation for.
pub trait Microphone: Send {
    /// Records up to `seconds` of audio. A shorter (or empty) segment means
    /// the stream ended early, which callers treat as no speech.
    fn record(&mut self, seconds: f64) -> Result<AudioSegment, Box<dyn std::error::Error>>;
}
