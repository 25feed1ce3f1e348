use crate::guidance::domain::overlay::OverlayPlan;
use crate::guidance::domain::zone::Bounds;
use crate::shared::frame::Frame;

const WHITE: [u8; 3] = [255, 255, 255];
const GREEN: [u8; 3] = [0, 255, 0];
const BLUE: [u8; 3] = [0, 0, 255];
const RED: [u8; 3] = [255, 0, 0];

const LINE_THICKNESS: i32 = 2;
const BOX_THICKNESS: i32 = 3;
const DOT_RADIUS: i32 = 5;

/// Draws an [`OverlayPlan`] into a frame's pixels: the quadrant dividers,
/// the center box, the target outline, the face box, and the face-center
/// dot. Callers own the decision of which frame copy to decorate; the
/// captured photo must never pass through here.
pub fn render(frame: &mut Frame, overlay: &OverlayPlan) {
    let [vertical, horizontal] = overlay.zone_lines();
    draw_vline(frame, vertical.0 .0, vertical.0 .1, vertical.1 .1, LINE_THICKNESS, WHITE);
    draw_hline(frame, horizontal.0 .1, horizontal.0 .0, horizontal.1 .0, LINE_THICKNESS, WHITE);

    draw_rect(frame, overlay.center_rect(), LINE_THICKNESS, GREEN);
    draw_rect(frame, overlay.target_outline(), BOX_THICKNESS, GREEN);

    if let Some(face) = overlay.face_box {
        let bounds = Bounds {
            left: face.x,
            top: face.y,
            right: face.right(),
            bottom: face.bottom(),
        };
        draw_rect(frame, bounds, BOX_THICKNESS, BLUE);
    }

    if let Some((cx, cy)) = overlay.face_center {
        fill_dot(frame, cx, cy, DOT_RADIUS, RED);
    }
}

fn set_pixel(frame: &mut Frame, x: i32, y: i32, color: [u8; 3]) {
    if x < 0 || y < 0 || x >= frame.width() as i32 || y >= frame.height() as i32 {
        return;
    }
    let offset = (y as usize * frame.width() as usize + x as usize) * 3;
    frame.data_mut()[offset..offset + 3].copy_from_slice(&color);
}

fn draw_hline(frame: &mut Frame, y: i32, x1: i32, x2: i32, thickness: i32, color: [u8; 3]) {
    for dy in 0..thickness {
        for x in x1..x2 {
            set_pixel(frame, x, y + dy, color);
        }
    }
}

fn draw_vline(frame: &mut Frame, x: i32, y1: i32, y2: i32, thickness: i32, color: [u8; 3]) {
    for dx in 0..thickness {
        for y in y1..y2 {
            set_pixel(frame, x + dx, y, color);
        }
    }
}

fn draw_rect(frame: &mut Frame, bounds: Bounds, thickness: i32, color: [u8; 3]) {
    draw_hline(frame, bounds.top, bounds.left, bounds.right, thickness, color);
    draw_hline(
        frame,
        bounds.bottom - thickness,
        bounds.left,
        bounds.right,
        thickness,
        color,
    );
    draw_vline(frame, bounds.left, bounds.top, bounds.bottom, thickness, color);
    draw_vline(
        frame,
        bounds.right - thickness,
        bounds.top,
        bounds.bottom,
        thickness,
        color,
    );
}

fn fill_dot(frame: &mut Frame, cx: i32, cy: i32, radius: i32, color: [u8; 3]) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                set_pixel(frame, cx + dx, cy + dy, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::domain::zone::{FrameGeometry, Zone};
    use crate::shared::face_box::FaceBox;

    fn black_frame(width: u32, height: u32) -> Frame {
        Frame::new(vec![0u8; (width * height * 3) as usize], width, height, 0)
    }

    fn pixel(frame: &Frame, x: u32, y: u32) -> [u8; 3] {
        let offset = ((y * frame.width() + x) * 3) as usize;
        frame.data()[offset..offset + 3].try_into().unwrap()
    }

    #[test]
    fn test_render_draws_quadrant_lines() {
        let mut frame = black_frame(640, 480);
        let overlay = OverlayPlan::new(FrameGeometry::new(640, 480), Zone::Center);
        render(&mut frame, &overlay);

        assert_eq!(pixel(&frame, 320, 10), WHITE); // vertical divider
        assert_eq!(pixel(&frame, 10, 240), WHITE); // horizontal divider
        assert_eq!(pixel(&frame, 10, 10), [0, 0, 0]); // background untouched
    }

    #[test]
    fn test_render_draws_face_annotations() {
        let mut frame = black_frame(640, 480);
        let mut overlay = OverlayPlan::new(FrameGeometry::new(640, 480), Zone::Center);
        let face = FaceBox::new(100, 100, 80, 80);
        overlay.face_box = Some(face);
        overlay.face_center = Some(face.center());
        render(&mut frame, &overlay);

        assert_eq!(pixel(&frame, 120, 100), BLUE); // top edge of the face box
        assert_eq!(pixel(&frame, 140, 140), RED); // center dot
    }

    #[test]
    fn test_render_clips_at_frame_edges() {
        // A face box poking past the frame must not panic or wrap around.
        let mut frame = black_frame(64, 48);
        let mut overlay = OverlayPlan::new(FrameGeometry::new(64, 48), Zone::Center);
        overlay.face_box = Some(FaceBox::new(50, 30, 30, 30));
        overlay.face_center = Some((63, 47));
        render(&mut frame, &overlay);
        assert_eq!(pixel(&frame, 63, 47), RED);
    }
}
