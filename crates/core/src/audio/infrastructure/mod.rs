pub mod ffmpeg_microphone;
