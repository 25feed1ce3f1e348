use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use thiserror::Error;

use crate::detection::domain::face_detector::FaceDetector;
use crate::guidance::domain::config::GuidanceConfig;
use crate::guidance::domain::frame_engine::FrameDecisionEngine;
use crate::guidance::domain::overlay::OverlayPlan;
use crate::guidance::domain::session_state::SessionState;
use crate::guidance::domain::zone::Zone;
use crate::pipeline::session_logger::SessionLogger;
use crate::shared::frame::Frame;
use crate::speech::domain::speaker::Speaker;
use crate::video::domain::camera::Camera;
use crate::video::domain::display::{DisplayEvent, DisplaySurface};
use crate::video::domain::image_writer::ImageWriter;

/// Spoken when the stability threshold is reached, right before capture.
pub const COMPLETION_CUE: &str = "Perfect! Smile!";

/// Spoken after the photo is on disk.
pub const SAVED_CUE: &str = "Picture has been clicked and saved";

/// Session-fatal failures. Everything else (lost faces, failed speech,
/// a broken display) degrades gracefully inside the loop.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("could not open the camera: {0}")]
    CameraOpen(String),
    #[error("camera read failed: {0}")]
    CameraRead(String),
    #[error("could not save the photo: {0}")]
    Save(String),
}

/// How a session finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The photo was captured and saved at this path.
    Captured(PathBuf),
    /// The stream ended or the user quit before a capture.
    Ended,
}

/// Runs one voice-guided capture session: pull a frame, detect, decide,
/// speak, render, and once the user has held the target zone long enough,
/// save the undecorated frame.
///
/// Single-threaded and frame-synchronous: each iteration completes before
/// the next frame is pulled, and the only mutable session state is the
/// engine's [`SessionState`].
pub struct CaptureSessionUseCase {
    camera: Box<dyn Camera>,
    detector: Box<dyn FaceDetector>,
    speaker: Box<dyn Speaker>,
    display: Box<dyn DisplaySurface>,
    image_writer: Box<dyn ImageWriter>,
    logger: Box<dyn SessionLogger>,
    config: GuidanceConfig,
    output_dir: PathBuf,
    open_viewer: bool,
}

impl CaptureSessionUseCase {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        camera: Box<dyn Camera>,
        detector: Box<dyn FaceDetector>,
        speaker: Box<dyn Speaker>,
        display: Box<dyn DisplaySurface>,
        image_writer: Box<dyn ImageWriter>,
        logger: Box<dyn SessionLogger>,
        config: GuidanceConfig,
        output_dir: PathBuf,
        open_viewer: bool,
    ) -> Self {
        Self {
            camera,
            detector,
            speaker,
            display,
            image_writer,
            logger,
            config,
            output_dir,
            open_viewer,
        }
    }

    pub fn execute(&mut self, target: Zone) -> Result<SessionOutcome, SessionError> {
        let geometry = match self.camera.open() {
            Ok(geometry) => geometry,
            Err(e) => {
                self.say("Sorry, couldn't open the camera at the moment. Please try again later!");
                return Err(SessionError::CameraOpen(e.to_string()));
            }
        };
        self.logger.info(&format!(
            "session started: {}x{}, target {target}",
            geometry.width, geometry.height
        ));

        let engine = FrameDecisionEngine::new(geometry, target, self.config);
        let started = Instant::now();
        let mut state = SessionState::new(0.0, self.config.guidance_interval);

        let outcome = loop {
            let frame = match self.camera.read() {
                Ok(Some(frame)) => frame,
                Ok(None) => break SessionOutcome::Ended,
                Err(e) => {
                    self.say("Session ended!");
                    self.camera.close();
                    return Err(SessionError::CameraRead(e.to_string()));
                }
            };

            // A flaky inference on one frame is handled like an empty
            // frame; only the camera is allowed to kill the session.
            let faces = match self.detector.detect(&frame) {
                Ok(faces) => faces,
                Err(e) => {
                    log::warn!("face detection failed on frame {}: {e}", frame.index());
                    Vec::new()
                }
            };

            let now = started.elapsed().as_secs_f64();
            let decision = engine.decide(&mut state, &faces, now);

            if let Some(text) = &decision.utterance {
                self.logger.utterance(text);
                self.speaker.speak(text);
            }
            self.logger.frame_status(frame.index(), &status_line(&decision.overlay));

            if decision.capture {
                self.say(COMPLETION_CUE);
                // `frame` never had overlay pixels drawn on it; this is
                // the clean capture.
                let path = self.save(&frame)?;
                self.say(SAVED_CUE);
                self.logger.info(&format!("image saved: {}", path.display()));

                if self.open_viewer {
                    if let Err(e) = open::that(&path) {
                        log::warn!("image saved but couldn't be opened in a viewer: {e}");
                    }
                }

                // One last annotated frame so the countdown doesn't vanish
                // abruptly mid-display.
                let _ = self.display.present(&frame, &decision.overlay);
                break SessionOutcome::Captured(path);
            }

            match self.display.present(&frame, &decision.overlay) {
                Ok(DisplayEvent::Quit) => break SessionOutcome::Ended,
                Ok(DisplayEvent::Continue) => {}
                Err(e) => log::warn!("display failure: {e}"),
            }
        };

        self.camera.close();
        match &outcome {
            SessionOutcome::Captured(_) => self.say("Goodbye!"),
            SessionOutcome::Ended => self.say("Session ended!"),
        }
        Ok(outcome)
    }

    fn say(&mut self, text: &str) {
        self.logger.utterance(text);
        self.speaker.speak(text);
    }

    fn save(&self, frame: &Frame) -> Result<PathBuf, SessionError> {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let path = self.output_dir.join(format!("selfie_{stamp}.jpg"));
        self.image_writer
            .write(&path, frame)
            .map_err(|e| SessionError::Save(e.to_string()))?;
        Ok(path)
    }
}

fn status_line(overlay: &OverlayPlan) -> String {
    let mut line = match (overlay.face_box, overlay.countdown) {
        (Some(face), Some(countdown)) => format!(
            "face at ({}, {}), holding target, countdown {countdown}",
            face.x, face.y
        ),
        (Some(face), None) => {
            let zone = Zone::classify(
                overlay.face_center.unwrap_or(face.center()),
                &overlay.geometry,
            );
            format!("face at ({}, {}) in {zone}, target {}", face.x, face.y, overlay.target)
        }
        _ => "no face".to_string(),
    };
    let facing = overlay.facing.label();
    if !facing.is_empty() {
        line.push_str(&format!(", {facing}"));
    }
    line
}
