use crate::guidance::domain::zone::FrameGeometry;
use crate::shared::frame::Frame;

/// Pulls frames from a live capture device (or a recorded stand-in).
///
/// The resolution is fixed once `open` succeeds. `read` distinguishes a
/// clean end of stream (`Ok(None)`) from a device failure (`Err`); the
/// session treats the former as a quit and the latter as fatal, with no
/// retry.
pub trait Camera: Send {
    fn open(&mut self) -> Result<FrameGeometry, Box<dyn std::error::Error>>;

    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;

    /// Releases the device.
    fn close(&mut self);
}
