use crate::detection::domain::facing::FacingHint;
use crate::shared::face_box::FaceBox;

use super::zone::{Bounds, FrameGeometry, Zone};

/// Everything the display layer should draw over a frame: pure data, no
/// pixels. The zone grid and center box derive from the geometry; the rest
/// is filled in per frame by the decision engine.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPlan {
    pub geometry: FrameGeometry,
    pub target: Zone,
    pub face_box: Option<FaceBox>,
    pub face_center: Option<(i32, i32)>,
    /// Countdown number to show while the face is holding in the target.
    pub countdown: Option<u32>,
    pub facing: FacingHint,
}

impl OverlayPlan {
    pub fn new(geometry: FrameGeometry, target: Zone) -> Self {
        Self {
            geometry,
            target,
            face_box: None,
            face_center: None,
            countdown: None,
            facing: FacingHint::Unknown,
        }
    }

    /// The mid-vertical and mid-horizontal quadrant dividers, as
    /// `((x1, y1), (x2, y2))` segments.
    pub fn zone_lines(&self) -> [((i32, i32), (i32, i32)); 2] {
        let (w, h) = (self.geometry.width as i32, self.geometry.height as i32);
        let (mx, my) = (self.geometry.mid_x(), self.geometry.mid_y());
        [((mx, 0), (mx, h)), ((0, my), (w, my))]
    }

    pub fn center_rect(&self) -> Bounds {
        self.geometry.center_rect()
    }

    /// Outline of the zone the user should move into.
    pub fn target_outline(&self) -> Bounds {
        self.target.bounds(&self.geometry)
    }
}
