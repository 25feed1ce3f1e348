use crate::guidance::domain::overlay::OverlayPlan;
use crate::shared::frame::Frame;

/// What the display layer reported back after showing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    Continue,
    /// The user asked to quit; ends the session without implying failure.
    Quit,
}

/// Shows the live feed with its overlay annotations.
///
/// The frame passed in is the undecorated capture; implementations that
/// actually render draw the overlay onto their own copy so the saved
/// photo stays clean.
pub trait DisplaySurface: Send {
    fn present(
        &mut self,
        frame: &Frame,
        overlay: &OverlayPlan,
    ) -> Result<DisplayEvent, Box<dyn std::error::Error>>;
}
