/// Fraction of the frame width covered by the center zone.
pub const CENTER_WIDTH_RATIO: f64 = 0.30;

/// Fraction of the frame height covered by the center zone.
pub const CENTER_HEIGHT_RATIO: f64 = 0.45;

/// Camera resolution, fixed for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
}

/// Inclusive-edge rectangle in frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl FrameGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "frame dimensions must be positive");
        Self { width, height }
    }

    pub fn mid_x(&self) -> i32 {
        self.width as i32 / 2
    }

    pub fn mid_y(&self) -> i32 {
        self.height as i32 / 2
    }

    /// Bounds of the fixed-proportion center zone, computed with the same
    /// integer arithmetic used to draw it.
    pub fn center_rect(&self) -> Bounds {
        let cw = (self.width as f64 * CENTER_WIDTH_RATIO) as i32;
        let ch = (self.height as f64 * CENTER_HEIGHT_RATIO) as i32;
        Bounds {
            left: self.mid_x() - cw / 2,
            top: self.mid_y() - ch / 2,
            right: self.mid_x() + cw / 2,
            bottom: self.mid_y() + ch / 2,
        }
    }
}

/// The five regions of the frame a face can occupy, also used as the
/// capture target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Zone {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Center,
}

impl Zone {
    pub const ALL: [Zone; 5] = [
        Zone::TopLeft,
        Zone::TopRight,
        Zone::BottomLeft,
        Zone::BottomRight,
        Zone::Center,
    ];

    /// Classifies a point into a zone: strictly inside the center rectangle
    /// wins, otherwise the quadrant relative to the frame midpoint, with
    /// points exactly on a midline falling to the right/bottom half.
    pub fn classify(point: (i32, i32), geometry: &FrameGeometry) -> Zone {
        let (px, py) = point;
        let c = geometry.center_rect();
        if px > c.left && px < c.right && py > c.top && py < c.bottom {
            return Zone::Center;
        }
        match (px < geometry.mid_x(), py < geometry.mid_y()) {
            (true, true) => Zone::TopLeft,
            (false, true) => Zone::TopRight,
            (true, false) => Zone::BottomLeft,
            (false, false) => Zone::BottomRight,
        }
    }

    /// Rectangle covered by this zone, used for overlay highlighting.
    pub fn bounds(&self, geometry: &FrameGeometry) -> Bounds {
        let (mx, my) = (geometry.mid_x(), geometry.mid_y());
        let (w, h) = (geometry.width as i32, geometry.height as i32);
        match self {
            Zone::TopLeft => Bounds {
                left: 0,
                top: 0,
                right: mx,
                bottom: my,
            },
            Zone::TopRight => Bounds {
                left: mx,
                top: 0,
                right: w,
                bottom: my,
            },
            Zone::BottomLeft => Bounds {
                left: 0,
                top: my,
                right: mx,
                bottom: h,
            },
            Zone::BottomRight => Bounds {
                left: mx,
                top: my,
                right: w,
                bottom: h,
            },
            Zone::Center => geometry.center_rect(),
        }
    }

    /// How the zone is referred to in spoken prompts.
    pub fn spoken_name(&self) -> &'static str {
        match self {
            Zone::TopLeft => "top left",
            Zone::TopRight => "top right",
            Zone::BottomLeft => "bottom left",
            Zone::BottomRight => "bottom right",
            Zone::Center => "center",
        }
    }

    /// First zone whose spoken name occurs in `text`, for matching voice
    /// commands and CLI flags ("top left" and "top-left" both match).
    pub fn match_in(text: &str) -> Option<Zone> {
        let normalized = text.to_lowercase().replace('-', " ");
        Zone::ALL
            .into_iter()
            .find(|z| normalized.contains(z.spoken_name()))
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.spoken_name())
    }
}
