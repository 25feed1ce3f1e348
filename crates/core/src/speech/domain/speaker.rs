/// Domain interface for text-to-speech output.
///
/// Speech is fire-and-forget: the session never waits on playback and a
/// broken synthesizer must not break guidance, so implementations catch
/// their own failures and log them instead of returning errors.
pub trait Speaker: Send {
    fn speak(&self, text: &str);
}

/// Speaker that discards everything. Used in tests and by `--mute` runs,
/// where spoken lines still reach the session log.
pub struct NullSpeaker;

impl Speaker for NullSpeaker {
    fn speak(&self, _text: &str) {}
}
