use crate::detection::domain::face_detector::FaceObservation;
use crate::detection::domain::facing::FacingHint;
use crate::shared::face_box::FaceBox;

use super::config::GuidanceConfig;
use super::containment::is_fully_in_target;
use super::overlay::OverlayPlan;
use super::phrase::phrase_for;
use super::session_state::SessionState;
use super::zone::{FrameGeometry, Zone};

/// Spoken once on the transition into the stable phase.
pub const HOLD_STILL_CUE: &str = "Hold still";

/// What the session should do with the current frame.
#[derive(Clone, Debug)]
pub struct FrameDecision {
    /// At most one spoken line per frame.
    pub utterance: Option<String>,
    /// Set on exactly one frame per session: capture the undecorated frame
    /// and wind the session down.
    pub capture: bool,
    pub overlay: OverlayPlan,
}

/// Per-frame decision logic of a capture session.
///
/// The engine holds only immutable session parameters; everything mutable
/// lives in the [`SessionState`] passed into [`decide`](Self::decide), so
/// the whole state machine runs under test with hand-fed detections and
/// timestamps, without a camera or microphone.
pub struct FrameDecisionEngine {
    geometry: FrameGeometry,
    target: Zone,
    config: GuidanceConfig,
}

impl FrameDecisionEngine {
    pub fn new(geometry: FrameGeometry, target: Zone, config: GuidanceConfig) -> Self {
        Self {
            geometry,
            target,
            config,
        }
    }

    /// Advances the session by one frame. `faces` is the raw detector
    /// output for this frame (any order); `now` is wall-clock seconds.
    pub fn decide(
        &self,
        state: &mut SessionState,
        faces: &[FaceObservation],
        now: f64,
    ) -> FrameDecision {
        let mut overlay = OverlayPlan::new(self.geometry, self.target);
        let mut utterance: Option<String> = None;
        let mut capture = false;

        if state.captured_image {
            return FrameDecision {
                utterance,
                capture,
                overlay,
            };
        }

        // Start-up grace: say nothing until a face shows up or the wait
        // window runs out.
        if !state.initial_grace_elapsed {
            if !faces.is_empty() || now - state.started_at >= self.config.initial_wait {
                state.initial_grace_elapsed = true;
            } else {
                return FrameDecision {
                    utterance,
                    capture,
                    overlay,
                };
            }
        }

        if let Some(active) = FaceObservation::largest(faces) {
            let face = active.face;
            overlay.face_box = Some(face);
            overlay.face_center = Some(face.center());
            overlay.facing = FacingHint::from_observation(active);
            state.note_sighting(face, now);

            if is_fully_in_target(&face, self.target, &self.geometry) {
                state.frames_in_target += 1;

                let countdown = self.countdown_value(state.frames_in_target);
                overlay.countdown = Some(countdown);

                if state.frames_in_target >= self.config.required_stable_frames {
                    state.captured_image = true;
                    capture = true;
                } else if state.frames_in_target == 1 && !state.countdown_announced {
                    state.countdown_announced = true;
                    utterance = Some(HOLD_STILL_CUE.to_string());
                    state.last_guidance_at = now;
                } else if Some(countdown) != state.last_countdown_value
                    && now - state.last_guidance_at >= self.config.countdown_interval
                {
                    state.last_countdown_value = Some(countdown);
                    utterance = Some(countdown.to_string());
                    state.last_guidance_at = now;
                }
            } else {
                state.frames_in_target = 0;
                state.countdown_announced = false;

                if now - state.last_guidance_at >= self.config.guidance_interval {
                    let current = Zone::classify(face.center(), &self.geometry);
                    utterance = Some(phrase_for(current, self.target));
                    state.last_guidance_at = now;
                }
            }
        } else {
            state.frames_in_target = 0;
            state.countdown_announced = false;
            state.last_countdown_value = None;

            if now - state.last_guidance_at >= self.config.guidance_interval {
                let line = match state.last_known_box {
                    Some(last) if state.sighting_is_fresh(now, self.config.guidance_interval) => {
                        self.lost_face_line(last)
                    }
                    _ => state.offscreen_cursor.fire().to_string(),
                };
                utterance = Some(line);
                state.last_guidance_at = now;
            }
        }

        FrameDecision {
            utterance,
            capture,
            overlay,
        }
    }

    /// Countdown number shown and spoken during the stable phase: scales
    /// the remaining frames linearly onto 3..1.
    fn countdown_value(&self, frames_in_target: u32) -> u32 {
        let required = self.config.required_stable_frames.max(1);
        let remaining = required.saturating_sub(frames_in_target);
        let scaled = (3.0 * remaining as f64 / required as f64).ceil() as u32;
        scaled.clamp(1, 3)
    }

    /// Guesses which edge a just-lost face slipped out of and nudges the
    /// user back. Branches are checked in fixed priority order; exactly
    /// one fires.
    fn lost_face_line(&self, last: FaceBox) -> String {
        let fw = self.geometry.width as f64;
        let fh = self.geometry.height as f64;
        let threshold = self.config.edge_threshold;

        if (last.x as f64) < fw * threshold {
            "Take one side-step to your right".to_string()
        } else if (last.right() as f64) > fw * (1.0 - threshold) {
            "Take one side-step to your left".to_string()
        } else if (last.y as f64) < fh * threshold {
            "Take one step backwards without turning around".to_string()
        } else if (last.bottom() as f64) > fh * (1.0 - threshold) {
            "Take one step forward".to_string()
        } else {
            let last_zone = Zone::classify(last.center(), &self.geometry);
            format!(
                "I lost your face. {}",
                phrase_for(last_zone, self.target)
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEO: FrameGeometry = FrameGeometry {
        width: 640,
        height: 480,
    };

    fn config() -> GuidanceConfig {
        GuidanceConfig {
            guidance_interval: 4.0,
            countdown_interval: 0.9,
            initial_wait: 5.0,
            required_stable_frames: 10,
            edge_threshold: 0.15,
        }
    }

    fn engine(target: Zone) -> FrameDecisionEngine {
        FrameDecisionEngine::new(GEO, target, config())
    }

    fn faces(x: i32, y: i32, w: i32, h: i32) -> Vec<FaceObservation> {
        vec![FaceObservation {
            face: FaceBox::new(x, y, w, h),
            eyes: None,
        }]
    }

    // A box well inside the 640x480 center rectangle (224..416, 132..348).
    fn centered_faces() -> Vec<FaceObservation> {
        faces(260, 180, 120, 150)
    }

    #[test]
    fn test_initial_grace_suppresses_guidance() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);

        for i in 0..4 {
            let decision = engine.decide(&mut state, &[], i as f64);
            assert!(decision.utterance.is_none(), "frame {i}");
            assert!(!state.initial_grace_elapsed);
        }

        // Window expires at 5 s; guidance may fire from then on.
        let decision = engine.decide(&mut state, &[], 5.0);
        assert!(state.initial_grace_elapsed);
        assert!(decision.utterance.is_some());
    }

    #[test]
    fn test_first_sighting_ends_grace_immediately() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);

        let decision = engine.decide(&mut state, &centered_faces(), 0.5);
        assert!(state.initial_grace_elapsed);
        // Contained on first sight: straight into the stable phase.
        assert_eq!(decision.utterance.as_deref(), Some(HOLD_STILL_CUE));
    }

    #[test]
    fn test_stable_run_counts_speaks_and_captures_once() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(10.0, 4.0);

        let mut spoken = Vec::new();
        let mut captures = 0;
        // One frame per second so the countdown gate never suppresses a
        // changed value.
        for i in 0..10 {
            let now = 10.0 + i as f64;
            let decision = engine.decide(&mut state, &centered_faces(), now);
            if let Some(text) = decision.utterance {
                spoken.push(text);
            }
            if decision.capture {
                captures += 1;
                assert_eq!(state.frames_in_target, 10);
            }
        }

        assert_eq!(captures, 1);
        assert!(state.captured_image);
        // required=10: values run 3,3,3,2,2,2,1,1,1 after the cue; spoken
        // once each on change.
        assert_eq!(spoken, vec![HOLD_STILL_CUE.to_string(), "3".into(), "2".into(), "1".into()]);

        // Terminal: nothing more happens after capture.
        let decision = engine.decide(&mut state, &centered_faces(), 30.0);
        assert!(decision.utterance.is_none());
        assert!(!decision.capture);
        assert!(state.captured_image);
    }

    #[test]
    fn test_countdown_is_monotone_nonincreasing_and_bounded() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);

        let mut previous = 3;
        for i in 0..10 {
            let decision = engine.decide(&mut state, &centered_faces(), i as f64 * 0.033);
            let countdown = decision.overlay.countdown.expect("stable frame");
            assert!((1..=3).contains(&countdown));
            assert!(countdown <= previous, "frame {i}");
            previous = countdown;
        }
    }

    #[test]
    fn test_frames_in_target_resets_on_the_exact_break_frame() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);

        for i in 0..3 {
            engine.decide(&mut state, &centered_faces(), i as f64 * 0.1);
        }
        assert_eq!(state.frames_in_target, 3);

        // Face wanders out of the center rectangle.
        let decision = engine.decide(&mut state, &faces(500, 350, 100, 100), 0.4);
        assert_eq!(state.frames_in_target, 0);
        assert!(!state.countdown_announced);
        assert!(!decision.capture);
    }

    #[test]
    fn test_hold_still_respoken_after_each_reentry() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);

        let first = engine.decide(&mut state, &centered_faces(), 0.0);
        assert_eq!(first.utterance.as_deref(), Some(HOLD_STILL_CUE));

        engine.decide(&mut state, &faces(500, 350, 100, 100), 0.1);
        let reentry = engine.decide(&mut state, &centered_faces(), 0.2);
        assert_eq!(reentry.utterance.as_deref(), Some(HOLD_STILL_CUE));
    }

    #[test]
    fn test_misplaced_face_gets_rate_limited_phrase() {
        let engine = engine(Zone::TopLeft);
        let mut state = SessionState::new(0.0, 4.0);

        // Bottom-right box, center (550, 450).
        let decision = engine.decide(&mut state, &faces(500, 400, 100, 100), 0.0);
        assert_eq!(
            decision.utterance.as_deref(),
            Some("Take one step forward and one side-step to your left")
        );

        // Within the guidance interval: silence.
        let decision = engine.decide(&mut state, &faces(500, 400, 100, 100), 1.0);
        assert!(decision.utterance.is_none());

        // Interval elapsed: speaks again.
        let decision = engine.decide(&mut state, &faces(500, 400, 100, 100), 4.0);
        assert!(decision.utterance.is_some());
    }

    #[test]
    fn test_largest_face_wins() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);

        let mut observations = centered_faces();
        observations.extend(faces(20, 20, 200, 200)); // larger, top-left

        let decision = engine.decide(&mut state, &observations, 0.0);
        // The larger face is not contained, so guidance (not a countdown)
        // is the outcome.
        assert_eq!(state.frames_in_target, 0);
        assert_eq!(
            decision.overlay.face_box,
            Some(FaceBox::new(20, 20, 200, 200))
        );
        assert!(decision.utterance.is_some());
    }

    #[test]
    fn test_lost_face_edge_heuristic_priority_order() {
        let engine = engine(Zone::Center);

        // The last sighting lands mid-interval (t=2) so it is still fresh
        // when guidance fires at t=4.1.
        let run = |face_x: i32, face_y: i32| {
            let mut state = SessionState::new(0.0, 4.0);
            engine.decide(&mut state, &faces(face_x, face_y, 60, 60), 0.0);
            engine.decide(&mut state, &faces(face_x, face_y, 60, 60), 2.0);
            engine.decide(&mut state, &[], 4.1).utterance
        };

        // Near the left border (x < 96): side-step right, even when the box
        // is also near the top. Left is checked first.
        assert_eq!(run(20, 20).as_deref(), Some("Take one side-step to your right"));

        // Near the right border (right > 544).
        assert_eq!(run(520, 200).as_deref(), Some("Take one side-step to your left"));

        // Near the top border only (y < 72).
        assert_eq!(
            run(300, 20).as_deref(),
            Some("Take one step backwards without turning around")
        );

        // Near the bottom border only (bottom > 408).
        assert_eq!(run(300, 380).as_deref(), Some("Take one step forward"));
    }

    #[test]
    fn test_lost_face_away_from_edges_replays_phrase_with_preamble() {
        let engine = engine(Zone::TopLeft);
        let mut state = SessionState::new(0.0, 4.0);

        // Centered box, nowhere near a border; last seen mid-interval so
        // the sighting is still fresh when guidance fires.
        engine.decide(&mut state, &faces(300, 200, 60, 60), 0.0);
        engine.decide(&mut state, &faces(300, 200, 60, 60), 2.0);
        let decision = engine.decide(&mut state, &[], 4.0);
        let line = decision.utterance.expect("guidance due");
        assert!(line.starts_with("I lost your face. "), "{line}");
        assert!(line.contains("forward"), "{line}");
        assert!(line.contains("left"), "{line}");
    }

    #[test]
    fn test_stale_sighting_falls_back_to_offscreen_script() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);

        engine.decide(&mut state, &faces(20, 20, 60, 60), 0.0);
        // Sighting is 10 s old (> guidance interval): scripted recovery,
        // not the edge heuristic.
        let decision = engine.decide(&mut state, &[], 10.0);
        assert!(decision
            .utterance
            .unwrap()
            .starts_with("I cannot see your face"));
    }

    #[test]
    fn test_offscreen_script_cycles_in_order() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);
        state.initial_grace_elapsed = true;

        let mut lines = Vec::new();
        let mut now = 10.0;
        for _ in 0..7 {
            let decision = engine.decide(&mut state, &[], now);
            lines.push(decision.utterance.expect("interval elapsed"));
            now += 5.0;
        }

        assert_eq!(lines.len(), 7);
        let unique: std::collections::HashSet<&String> = lines[..6].iter().collect();
        assert_eq!(unique.len(), 6, "first six lines are distinct");
        assert_eq!(lines[6], lines[0], "script wraps after the last line");
    }

    #[test]
    fn test_no_face_frames_between_firings_stay_silent() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);
        state.initial_grace_elapsed = true;

        assert!(engine.decide(&mut state, &[], 10.0).utterance.is_some());
        assert!(engine.decide(&mut state, &[], 11.0).utterance.is_none());
        assert!(engine.decide(&mut state, &[], 13.9).utterance.is_none());
        assert!(engine.decide(&mut state, &[], 14.0).utterance.is_some());
    }

    #[test]
    fn test_sighting_resets_offscreen_script_position() {
        let engine = engine(Zone::Center);
        let mut state = SessionState::new(0.0, 4.0);
        state.initial_grace_elapsed = true;

        // Advance the script twice.
        engine.decide(&mut state, &[], 10.0);
        engine.decide(&mut state, &[], 15.0);

        // A sighting rewinds it; once stale again, the script restarts.
        engine.decide(&mut state, &faces(300, 200, 60, 60), 16.0);
        let decision = engine.decide(&mut state, &[], 30.0);
        assert!(decision
            .utterance
            .unwrap()
            .starts_with("I cannot see your face"));
    }
}
