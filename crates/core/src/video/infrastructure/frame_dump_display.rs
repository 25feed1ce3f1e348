use std::path::PathBuf;

use crate::guidance::domain::overlay::OverlayPlan;
use crate::shared::frame::Frame;
use crate::video::domain::display::{DisplayEvent, DisplaySurface};
use crate::video::domain::image_writer::ImageWriter;
use crate::video::infrastructure::image_file_writer::ImageFileWriter;

use super::overlay_renderer;

/// Headless display that renders the overlay onto a copy of every Nth
/// frame and writes it to a directory, for checking what the session saw.
pub struct FrameDumpDisplay {
    dir: PathBuf,
    every: usize,
    presented: usize,
    writer: ImageFileWriter,
}

impl FrameDumpDisplay {
    pub fn new(dir: PathBuf, every: usize) -> Self {
        Self {
            dir,
            every: every.max(1),
            presented: 0,
            writer: ImageFileWriter::new(),
        }
    }
}

impl DisplaySurface for FrameDumpDisplay {
    fn present(
        &mut self,
        frame: &Frame,
        overlay: &OverlayPlan,
    ) -> Result<DisplayEvent, Box<dyn std::error::Error>> {
        let due = self.presented % self.every == 0;
        self.presented += 1;
        if !due {
            return Ok(DisplayEvent::Continue);
        }

        // Decorate a copy; the caller's frame stays clean for capture.
        let mut annotated = frame.clone();
        overlay_renderer::render(&mut annotated, overlay);

        let path = self.dir.join(format!("frame_{:05}.png", frame.index()));
        self.writer.write(&path, &annotated)?;
        if let Some(countdown) = overlay.countdown {
            log::debug!("frame {}: hold still... {countdown}", frame.index());
        }

        Ok(DisplayEvent::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::domain::zone::{FrameGeometry, Zone};

    fn frame(index: usize) -> Frame {
        Frame::new(vec![0u8; 64 * 48 * 3], 64, 48, index)
    }

    #[test]
    fn test_dumps_every_nth_frame() {
        let dir = tempfile::tempdir().unwrap();
        let mut display = FrameDumpDisplay::new(dir.path().to_path_buf(), 3);
        let overlay = OverlayPlan::new(FrameGeometry::new(64, 48), Zone::Center);

        for i in 0..7 {
            let event = display.present(&frame(i), &overlay).unwrap();
            assert_eq!(event, DisplayEvent::Continue);
        }

        let mut dumped: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        dumped.sort();
        assert_eq!(
            dumped,
            vec!["frame_00000.png", "frame_00003.png", "frame_00006.png"]
        );
    }

    #[test]
    fn test_presented_frame_is_not_mutated() {
        let dir = tempfile::tempdir().unwrap();
        let mut display = FrameDumpDisplay::new(dir.path().to_path_buf(), 1);
        let overlay = OverlayPlan::new(FrameGeometry::new(64, 48), Zone::Center);

        let original = frame(0);
        display.present(&original, &overlay).unwrap();
        assert!(original.data().iter().all(|&b| b == 0));
    }
}
