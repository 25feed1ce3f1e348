pub mod ffmpeg_camera;
pub mod frame_dump_display;
pub mod image_file_writer;
pub mod null_display;
pub mod overlay_renderer;
