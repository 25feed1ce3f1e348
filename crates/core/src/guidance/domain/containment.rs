use crate::shared::face_box::FaceBox;

use super::zone::{FrameGeometry, Zone};

/// Whether a face box lies entirely within the target zone.
///
/// Center requires strict box-in-box containment in the center rectangle;
/// each corner requires the box to stay inside its quadrant relative to the
/// frame midpoint. No partial-containment tolerance: a box touching the
/// wrong side of a boundary fails, which is what forces the stability
/// phase to converge on a clean framing.
pub fn is_fully_in_target(face: &FaceBox, target: Zone, geometry: &FrameGeometry) -> bool {
    let (mx, my) = (geometry.mid_x(), geometry.mid_y());
    match target {
        Zone::Center => {
            let c = geometry.center_rect();
            face.x >= c.left && face.right() <= c.right && face.y >= c.top && face.bottom() <= c.bottom
        }
        Zone::TopLeft => face.right() <= mx && face.bottom() <= my,
        Zone::TopRight => face.x >= mx && face.bottom() <= my,
        Zone::BottomLeft => face.right() <= mx && face.y >= my,
        Zone::BottomRight => face.x >= mx && face.y >= my,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const GEO: FrameGeometry = FrameGeometry {
        width: 640,
        height: 480,
    };

    #[test]
    fn test_center_contains_spec_scenario_box() {
        // Center rect is (224..416, 132..348); box spans (260..380, 180..330)
        let face = FaceBox::new(260, 180, 120, 150);
        assert!(is_fully_in_target(&face, Zone::Center, &GEO));
    }

    #[rstest]
    #[case::left_edge_out(FaceBox::new(200, 180, 120, 150))]
    #[case::right_edge_out(FaceBox::new(320, 180, 120, 150))]
    #[case::top_edge_out(FaceBox::new(260, 100, 120, 150))]
    #[case::bottom_edge_out(FaceBox::new(260, 220, 120, 150))]
    fn test_center_rejects_any_protruding_edge(#[case] face: FaceBox) {
        assert!(!is_fully_in_target(&face, Zone::Center, &GEO));
    }

    #[test]
    fn test_corner_containment() {
        let face = FaceBox::new(40, 40, 100, 100);
        assert!(is_fully_in_target(&face, Zone::TopLeft, &GEO));
        assert!(!is_fully_in_target(&face, Zone::TopRight, &GEO));
        assert!(!is_fully_in_target(&face, Zone::BottomLeft, &GEO));
        assert!(!is_fully_in_target(&face, Zone::BottomRight, &GEO));
    }

    #[test]
    fn test_box_straddling_midline_fits_no_corner() {
        let face = FaceBox::new(280, 200, 100, 100);
        for zone in [
            Zone::TopLeft,
            Zone::TopRight,
            Zone::BottomLeft,
            Zone::BottomRight,
        ] {
            assert!(!is_fully_in_target(&face, zone, &GEO), "{zone}");
        }
    }

    #[test]
    fn test_box_touching_midline_counts_as_contained() {
        // Inclusive comparisons: a box ending exactly on the midline stays
        // inside the top-left quadrant.
        let face = FaceBox::new(220, 140, 100, 100);
        assert!(is_fully_in_target(&face, Zone::TopLeft, &GEO));
    }

    #[test]
    fn test_bottom_right_quadrant() {
        let face = FaceBox::new(400, 300, 120, 120);
        assert!(is_fully_in_target(&face, Zone::BottomRight, &GEO));
    }

    #[test]
    fn test_classified_center_but_not_contained() {
        // The center point of this box classifies as Center while the box
        // itself pokes out of the center rectangle; containment is the
        // stricter judge.
        let face = FaceBox::new(230, 132, 250, 216);
        let center = face.center();
        assert_eq!(Zone::classify(center, &GEO), Zone::Center);
        assert!(!is_fully_in_target(&face, Zone::Center, &GEO));
    }
}
