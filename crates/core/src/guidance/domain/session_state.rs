use crate::shared::face_box::FaceBox;

use super::offscreen::OffscreenCursor;

/// The one mutable record of a capture session, owned exclusively by the
/// frame decision engine. Everything the per-frame logic remembers between
/// frames lives here, so the engine itself stays a pure function of
/// `(state, detections, now)`.
#[derive(Clone, Debug)]
pub struct SessionState {
    /// Terminal flag; set exactly once, never cleared.
    pub captured_image: bool,
    /// Wall-clock time of the last spoken line, for rate limiting.
    pub last_guidance_at: f64,
    /// Consecutive frames the face has been fully contained in the target.
    pub frames_in_target: u32,
    /// Whether the "hold still" cue for the current stable run was spoken.
    pub countdown_announced: bool,
    /// Last countdown number spoken, to avoid repeating it.
    pub last_countdown_value: Option<u32>,
    /// Most recent face sighting, used for the lost-face heuristic while
    /// it is still fresh.
    pub last_known_box: Option<FaceBox>,
    pub last_seen_at: Option<f64>,
    /// Position in the scripted no-face recovery sequence.
    pub offscreen_cursor: OffscreenCursor,
    /// Set once a face has been seen or the start-up grace period passed;
    /// no guidance is spoken before then.
    pub initial_grace_elapsed: bool,
    /// Session start time, for the initial grace window.
    pub started_at: f64,
}

impl SessionState {
    /// `guidance_interval` backdates the last-guidance stamp so the first
    /// instruction can fire immediately once the grace period is over.
    pub fn new(now: f64, guidance_interval: f64) -> Self {
        Self {
            captured_image: false,
            last_guidance_at: now - guidance_interval,
            frames_in_target: 0,
            countdown_announced: false,
            last_countdown_value: None,
            last_known_box: None,
            last_seen_at: None,
            offscreen_cursor: OffscreenCursor::Initial,
            initial_grace_elapsed: false,
            started_at: now,
        }
    }

    /// Records a sighting and rewinds the off-screen script.
    pub fn note_sighting(&mut self, face: FaceBox, now: f64) {
        self.last_known_box = Some(face);
        self.last_seen_at = Some(now);
        self.offscreen_cursor = OffscreenCursor::Initial;
    }

    /// Whether the last sighting is recent enough to steer the lost-face
    /// heuristic.
    pub fn sighting_is_fresh(&self, now: f64, guidance_interval: f64) -> bool {
        self.last_seen_at
            .is_some_and(|seen| now - seen <= guidance_interval)
    }
}
