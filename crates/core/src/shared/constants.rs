pub const FACE_MODEL_NAME: &str = "yolo11n-pose_widerface.onnx";
pub const FACE_MODEL_URL: &str =
    "https://github.com/neutrinographics/faceguard/releases/download/v0.1.0/yolo11n-pose_widerface.onnx";

pub const WHISPER_MODEL_NAME: &str = "ggml-tiny.en.bin";
pub const WHISPER_MODEL_URL: &str =
    "https://huggingface.co/ggerganov/whisper.cpp/resolve/main/ggml-tiny.en.bin";
pub const WHISPER_SAMPLE_RATE: u32 = 16000;

/// Minimum seconds between movement instructions.
pub const DEFAULT_GUIDANCE_INTERVAL: f64 = 4.0;

/// Minimum seconds between spoken countdown numbers (shorter than the
/// guidance interval so the countdown keeps pace with the stable phase).
pub const DEFAULT_COUNTDOWN_INTERVAL: f64 = 0.9;

/// Grace period at session start before any guidance is spoken.
pub const DEFAULT_INITIAL_WAIT: f64 = 5.0;

/// Consecutive contained frames required before capture (~1 second at 30 fps).
pub const DEFAULT_REQUIRED_STABLE_FRAMES: u32 = 30;

/// Fraction of a frame dimension treated as "near the border" when guessing
/// which edge a lost face slipped out of.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.15;

/// Listening window per voice-command attempt, in seconds.
pub const DEFAULT_LISTEN_SECONDS: f64 = 4.0;

/// Voice-command rounds before the target position falls back to center.
pub const MAX_TARGET_ATTEMPTS: u32 = 3;
