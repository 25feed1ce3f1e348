pub mod audio_segment;
pub mod microphone;
