/// Outcome of one listening window. Recognition trouble is data, not an
/// error: callers branch on the variant instead of catching anything.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transcription {
    /// Lowercased transcript of what was heard.
    Heard(String),
    /// The window elapsed without speech.
    Timeout,
    /// Audio was captured but produced no usable transcript.
    Unrecognized,
    /// The recognizer or capture device failed.
    ServiceError(String),
}

/// Domain interface for capturing one spoken command.
pub trait CommandListener: Send {
    fn listen(&mut self) -> Transcription;
}
