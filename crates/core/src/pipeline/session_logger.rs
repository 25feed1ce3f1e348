/// Cross-cutting logger for session events.
///
/// Decouples the capture session from output mechanisms so the CLI can
/// narrate the session while tests stay silent.
pub trait SessionLogger: Send {
    /// Record a line handed to the speaker.
    fn utterance(&mut self, text: &str);

    /// Report per-frame diagnostics (zone, containment, countdown).
    fn frame_status(&mut self, frame_index: usize, status: &str);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);
}

/// Silent logger that discards all events.
pub struct NullSessionLogger;

impl SessionLogger for NullSessionLogger {
    fn utterance(&mut self, _text: &str) {}
    fn frame_status(&mut self, _frame_index: usize, _status: &str) {}
    fn info(&mut self, _message: &str) {}
}

/// CLI-oriented logger. Spoken lines are echoed to stdout so a muted or
/// broken synthesizer still leaves a usable transcript; frame status is
/// throttled to every `throttle_frames` frames to keep the output sane
/// at 30 fps.
pub struct StdoutSessionLogger {
    throttle_frames: usize,
}

impl StdoutSessionLogger {
    pub fn new(throttle_frames: usize) -> Self {
        Self {
            throttle_frames: throttle_frames.max(1),
        }
    }
}

impl SessionLogger for StdoutSessionLogger {
    fn utterance(&mut self, text: &str) {
        println!("[APP]: {text}");
    }

    fn frame_status(&mut self, frame_index: usize, status: &str) {
        if frame_index % self.throttle_frames == 0 {
            println!("[FRAME {frame_index}]: {status}");
        }
    }

    fn info(&mut self, message: &str) {
        println!("[INFO]: {message}");
    }
}
