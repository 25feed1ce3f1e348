/// An axis-aligned face bounding box reported by a detector.
///
/// Origin is the frame's top-left corner; `w` and `h` are positive. Boxes
/// are produced fresh every frame and never mutated by the guidance core.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaceBox {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl FaceBox {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        debug_assert!(w > 0 && h > 0, "face box must have positive dimensions");
        Self { x, y, w, h }
    }

    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Pixel at the middle of the box (integer division, as drawn on screen).
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.w / 2, self.y + self.h / 2)
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn iou(&self, other: &FaceBox) -> f64 {
        let ix1 = self.x.max(other.x);
        let iy1 = self.y.max(other.y);
        let ix2 = self.right().min(other.right());
        let iy2 = self.bottom().min(other.bottom());

        let inter = (ix2 - ix1).max(0) as f64 * (iy2 - iy1).max(0) as f64;
        if inter == 0.0 {
            return 0.0;
        }

        inter / (self.area() as f64 + other.area() as f64 - inter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_area_and_edges() {
        let b = FaceBox::new(10, 20, 100, 150);
        assert_eq!(b.area(), 15_000);
        assert_eq!(b.right(), 110);
        assert_eq!(b.bottom(), 170);
    }

    #[test]
    fn test_center_uses_integer_division() {
        let b = FaceBox::new(0, 0, 5, 5);
        assert_eq!(b.center(), (2, 2));
    }

    #[test]
    fn test_iou_identical() {
        let b = FaceBox::new(10, 10, 100, 100);
        assert_relative_eq!(b.iou(&b), 1.0);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = FaceBox::new(0, 0, 50, 50);
        let b = FaceBox::new(100, 100, 50, 50);
        assert_relative_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_partial_overlap() {
        // intersection 50x100 = 5000, union 15000
        let a = FaceBox::new(0, 0, 100, 100);
        let b = FaceBox::new(50, 0, 100, 100);
        assert_relative_eq!(a.iou(&b), 5000.0 / 15000.0);
    }

    #[test]
    fn test_iou_touching_edges() {
        let a = FaceBox::new(0, 0, 50, 50);
        let b = FaceBox::new(50, 0, 50, 50);
        assert_relative_eq!(a.iou(&b), 0.0);
    }
}
