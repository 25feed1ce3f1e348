use crate::guidance::domain::overlay::OverlayPlan;
use crate::shared::frame::Frame;
use crate::video::domain::display::{DisplayEvent, DisplaySurface};

/// Display that shows nothing and never quits. Used for headless runs,
/// where the session ends by capture, end of stream, or Ctrl-C.
pub struct NullDisplay;

impl DisplaySurface for NullDisplay {
    fn present(
        &mut self,
        _frame: &Frame,
        _overlay: &OverlayPlan,
    ) -> Result<DisplayEvent, Box<dyn std::error::Error>> {
        Ok(DisplayEvent::Continue)
    }
}
