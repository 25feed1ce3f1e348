use std::path::{Path, PathBuf};

use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

use crate::audio::domain::audio_segment::AudioSegment;
use crate::audio::domain::microphone::Microphone;
use crate::speech::domain::listener::{CommandListener, Transcription};

/// Command listener backed by whisper.cpp via whisper-rs.
///
/// Records a bounded window from the microphone, transcribes it with the
/// Whisper tiny.en model, and lowercases the result for keyword matching.
pub struct WhisperListener {
    model_path: PathBuf,
    microphone: Box<dyn Microphone>,
    listen_seconds: f64,
}

impl WhisperListener {
    pub fn new(
        model_path: &Path,
        microphone: Box<dyn Microphone>,
        listen_seconds: f64,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if !model_path.exists() {
            return Err(format!("Whisper model not found at: {}", model_path.display()).into());
        }
        Ok(Self {
            model_path: model_path.to_path_buf(),
            microphone,
            listen_seconds,
        })
    }

    fn transcribe(&self, audio: &AudioSegment) -> Result<String, Box<dyn std::error::Error>> {
        let ctx = WhisperContext::new_with_params(
            self.model_path.to_str().ok_or("Invalid model path")?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| format!("Failed to load Whisper model: {e}"))?;

        let mut state = ctx
            .create_state()
            .map_err(|e| format!("Failed to create Whisper state: {e}"))?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 0 });
        params.set_language(Some("en"));
        params.set_translate(false);
        params.set_print_special(false);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);
        params.set_n_threads(num_cpus().min(4) as i32);

        state
            .full(params, audio.samples())
            .map_err(|e| format!("Whisper inference failed: {e}"))?;

        let mut transcript = String::new();
        let num_segments = state.full_n_segments();

        for seg_idx in 0..num_segments {
            let segment = match state.get_segment(seg_idx) {
                Some(s) => s,
                None => continue,
            };

            let n_tokens = segment.n_tokens();
            for tok_idx in 0..n_tokens {
                let token = match segment.get_token(tok_idx) {
                    Some(t) => t,
                    None => continue,
                };

                let text = match token.to_str() {
                    Ok(t) => t,
                    Err(_) => continue,
                };

                // Skip special tokens ([_BEG_], <|endoftext|>, ...)
                let trimmed = text.trim();
                if trimmed.is_empty() || trimmed.starts_with('[') || trimmed.starts_with('<') {
                    continue;
                }

                transcript.push_str(text);
            }
        }

        Ok(transcript.trim().to_lowercase())
    }
}

impl CommandListener for WhisperListener {
    fn listen(&mut self) -> Transcription {
        let audio = match self.microphone.record(self.listen_seconds) {
            Ok(audio) => audio,
            Err(e) => return Transcription::ServiceError(e.to_string()),
        };

        if audio.is_empty() {
            return Transcription::Timeout;
        }

        match self.transcribe(&audio) {
            Ok(text) if text.is_empty() => Transcription::Unrecognized,
            Ok(text) => Transcription::Heard(text),
            Err(e) => Transcription::ServiceError(e.to_string()),
        }
    }
}

fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SilentMicrophone;

    impl Microphone for SilentMicrophone {
        fn record(&mut self, _seconds: f64) -> Result<AudioSegment, Box<dyn std::error::Error>> {
            Ok(AudioSegment::new(Vec::new(), 16000, 1))
        }
    }

    #[test]
    fn test_new_nonexistent_model_returns_error() {
        let result = WhisperListener::new(
            Path::new("/nonexistent/model.bin"),
            Box::new(SilentMicrophone),
            4.0,
        );
        let err = result.err().expect("missing model should fail").to_string();
        assert!(err.contains("not found"), "got: {err}");
    }
}
