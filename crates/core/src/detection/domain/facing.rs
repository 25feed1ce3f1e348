use super::face_detector::FaceObservation;

/// Eye tilt beyond this fraction of the box height means the geometry is
/// unreliable and no hint is given.
const TILT_LIMIT: f64 = 0.18;

/// Eye-midpoint offset within this fraction of the box width counts as
/// facing the camera.
const CENTER_THRESHOLD: f64 = 0.15;

/// Coarse orientation signal derived from the eye landmarks relative to
/// the face box. Display-only: it annotates the overlay and never gates
/// guidance or capture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FacingHint {
    Facing,
    RotateLeft,
    RotateRight,
    #[default]
    Unknown,
}

impl FacingHint {
    pub fn from_observation(observation: &FaceObservation) -> FacingHint {
        let Some([left, right]) = observation.eyes else {
            return FacingHint::Unknown;
        };
        let face = &observation.face;

        // Eyes should be roughly level; a strong tilt makes the horizontal
        // offset meaningless.
        if (left.1 - right.1).abs() > face.h as f64 * TILT_LIMIT {
            return FacingHint::Unknown;
        }

        let eye_mid_x = (left.0 + right.0) / 2.0;
        let face_center_x = face.x as f64 + face.w as f64 / 2.0;
        let offset = (eye_mid_x - face_center_x) / face.w as f64;

        if offset.abs() <= CENTER_THRESHOLD {
            FacingHint::Facing
        } else if offset < 0.0 {
            FacingHint::RotateLeft
        } else {
            FacingHint::RotateRight
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FacingHint::Facing => "facing",
            FacingHint::RotateLeft => "rotate left",
            FacingHint::RotateRight => "rotate right",
            FacingHint::Unknown => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::face_box::FaceBox;

    fn observation(eyes: Option<[(f64, f64); 2]>) -> FaceObservation {
        FaceObservation {
            face: FaceBox::new(100, 100, 100, 100),
            eyes,
        }
    }

    #[test]
    fn test_no_eyes_is_unknown() {
        assert_eq!(
            FacingHint::from_observation(&observation(None)),
            FacingHint::Unknown
        );
    }

    #[test]
    fn test_centered_eyes_are_facing() {
        // Box center x = 150, eyes symmetric around it
        let obs = observation(Some([(130.0, 140.0), (170.0, 140.0)]));
        assert_eq!(FacingHint::from_observation(&obs), FacingHint::Facing);
    }

    #[test]
    fn test_eyes_far_left_hint_rotate_left() {
        let obs = observation(Some([(105.0, 140.0), (130.0, 140.0)]));
        assert_eq!(FacingHint::from_observation(&obs), FacingHint::RotateLeft);
    }

    #[test]
    fn test_eyes_far_right_hint_rotate_right() {
        let obs = observation(Some([(170.0, 140.0), (195.0, 140.0)]));
        assert_eq!(FacingHint::from_observation(&obs), FacingHint::RotateRight);
    }

    #[test]
    fn test_strong_tilt_is_unknown() {
        let obs = observation(Some([(130.0, 120.0), (170.0, 160.0)]));
        assert_eq!(FacingHint::from_observation(&obs), FacingHint::Unknown);
    }
}
