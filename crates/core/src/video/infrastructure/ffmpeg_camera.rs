use std::path::PathBuf;

use crate::guidance::domain::zone::FrameGeometry;
use crate::shared::frame::Frame;
use crate::video::domain::camera::Camera;

/// Camera backed by ffmpeg-next (libavformat + libavcodec).
///
/// The source may be a capture device path (e.g. `/dev/video0`, which
/// needs ffmpeg built with libavdevice) or any video file, handy for
/// driving a session from a recording. Every decoded frame is scaled to
/// RGB24 at the source resolution.
pub struct FfmpegCamera {
    source: PathBuf,
    input_ctx: Option<ffmpeg_next::format::context::Input>,
    decoder: Option<ffmpeg_next::decoder::Video>,
    scaler: Option<ffmpeg_next::software::scaling::Context>,
    video_stream_index: usize,
    width: u32,
    height: u32,
    frame_index: usize,
    flushing: bool,
    done: bool,
}

// Safety: FfmpegCamera is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegCamera {}

impl FfmpegCamera {
    pub fn new(source: PathBuf) -> Self {
        Self {
            source,
            input_ctx: None,
            decoder: None,
            scaler: None,
            video_stream_index: 0,
            width: 0,
            height: 0,
            frame_index: 0,
            flushing: false,
            done: false,
        }
    }
}

impl Camera for FfmpegCamera {
    fn open(&mut self) -> Result<FrameGeometry, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(&self.source)?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("No video stream found")?;

        let video_stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        self.video_stream_index = video_stream_index;
        self.width = width;
        self.height = height;
        self.decoder = Some(decoder);
        self.scaler = Some(scaler);
        self.input_ctx = Some(ictx);
        self.frame_index = 0;
        self.flushing = false;
        self.done = false;

        Ok(FrameGeometry::new(width, height))
    }

    fn read(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        if self.done {
            return Ok(None);
        }

        let ictx = self.input_ctx.as_mut().ok_or("camera not opened")?;
        let decoder = self.decoder.as_mut().ok_or("camera not opened")?;
        let scaler = self.scaler.as_mut().ok_or("camera not opened")?;

        if let Some(frame) =
            receive_rgb_frame(decoder, scaler, self.width, self.height, &mut self.frame_index)?
        {
            return Ok(Some(frame));
        }

        if self.flushing {
            self.done = true;
            return Ok(None);
        }

        loop {
            let Some((stream, packet)) = ictx.packets().next() else {
                // End of stream: flush whatever the decoder still holds.
                let _ = decoder.send_eof();
                self.flushing = true;
                if let Some(frame) = receive_rgb_frame(
                    decoder,
                    scaler,
                    self.width,
                    self.height,
                    &mut self.frame_index,
                )? {
                    return Ok(Some(frame));
                }
                self.done = true;
                return Ok(None);
            };

            if stream.index() != self.video_stream_index {
                continue;
            }

            if decoder.send_packet(&packet).is_err() {
                continue;
            }

            if let Some(frame) = receive_rgb_frame(
                decoder,
                scaler,
                self.width,
                self.height,
                &mut self.frame_index,
            )? {
                return Ok(Some(frame));
            }
        }
    }

    fn close(&mut self) {
        self.input_ctx = None;
        self.decoder = None;
        self.scaler = None;
        self.done = true;
    }
}

fn receive_rgb_frame(
    decoder: &mut ffmpeg_next::decoder::Video,
    scaler: &mut ffmpeg_next::software::scaling::Context,
    width: u32,
    height: u32,
    frame_index: &mut usize,
) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
    let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
    if decoder.receive_frame(&mut decoded).is_err() {
        return Ok(None);
    }

    let mut rgb_frame = ffmpeg_next::util::frame::video::Video::empty();
    scaler.run(&decoded, &mut rgb_frame)?;

    let pixels = extract_rgb_pixels(&rgb_frame, width, height);
    let frame = Frame::new(pixels, width, height, *frame_index);
    *frame_index += 1;
    Ok(Some(frame))
}

/// Copies RGB24 rows out of an ffmpeg frame, dropping stride padding.
fn extract_rgb_pixels(
    rgb_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let w = width as usize;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(w * h * 3);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + w * 3]);
    }
    pixels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_nonexistent_source_is_an_error() {
        let path = if cfg!(windows) {
            PathBuf::from("Z:\\nonexistent\\camera")
        } else {
            PathBuf::from("/nonexistent/camera")
        };
        let mut camera = FfmpegCamera::new(path);
        assert!(camera.open().is_err());
    }

    #[test]
    fn test_read_before_open_is_an_error() {
        let mut camera = FfmpegCamera::new(PathBuf::from("unused"));
        assert!(camera.read().is_err());
    }
}
