mod settings;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use posecue_core::audio::infrastructure::ffmpeg_microphone::FfmpegMicrophone;
use posecue_core::detection::domain::face_detector::FaceDetector;
use posecue_core::detection::infrastructure::model_resolver;
use posecue_core::detection::infrastructure::onnx_face_detector::OnnxFaceDetector;
use posecue_core::guidance::domain::zone::Zone;
use posecue_core::pipeline::capture_session_use_case::{CaptureSessionUseCase, SessionOutcome};
use posecue_core::pipeline::session_logger::StdoutSessionLogger;
use posecue_core::shared::constants::{
    FACE_MODEL_NAME, FACE_MODEL_URL, MAX_TARGET_ATTEMPTS, WHISPER_MODEL_NAME, WHISPER_MODEL_URL,
};
use posecue_core::speech::domain::listener::CommandListener;
use posecue_core::speech::domain::speaker::{NullSpeaker, Speaker};
use posecue_core::speech::domain::target_prompt::elicit_target;
use posecue_core::speech::infrastructure::command_speaker::CommandSpeaker;
use posecue_core::speech::infrastructure::whisper_listener::WhisperListener;
use posecue_core::video::domain::display::DisplaySurface;
use posecue_core::video::infrastructure::ffmpeg_camera::FfmpegCamera;
use posecue_core::video::infrastructure::frame_dump_display::FrameDumpDisplay;
use posecue_core::video::infrastructure::image_file_writer::ImageFileWriter;
use posecue_core::video::infrastructure::null_display::NullDisplay;

use settings::Settings;

/// Voice-guided selfie positioning and capture.
#[derive(Parser)]
#[command(name = "posecue")]
struct Cli {
    /// Camera device or video file to read frames from.
    #[arg(long, default_value = "/dev/video0")]
    camera: PathBuf,

    /// Microphone device or audio file for voice commands.
    #[arg(long, default_value = "default")]
    microphone: PathBuf,

    /// Skip the voice prompt and use this target zone
    /// (top-left, top-right, bottom-left, bottom-right, center).
    #[arg(long)]
    target: Option<String>,

    /// Directory the captured photo is saved into.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Consecutive stable frames required before capture.
    #[arg(long)]
    stable_frames: Option<u32>,

    /// Seconds between movement instructions.
    #[arg(long)]
    guidance_interval: Option<f64>,

    /// Seconds to wait for a first face before guidance starts.
    #[arg(long)]
    initial_wait: Option<f64>,

    /// Border-proximity fraction for the lost-face heuristic (0.0-0.5).
    #[arg(long)]
    edge_threshold: Option<f64>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long)]
    confidence: Option<f64>,

    /// Listening window per voice-command attempt, in seconds.
    #[arg(long)]
    listen_seconds: Option<f64>,

    /// Dump every Nth annotated frame into this directory.
    #[arg(long)]
    dump_frames: Option<PathBuf>,

    /// Frame-dump interval used with --dump-frames.
    #[arg(long, default_value = "10")]
    dump_every: usize,

    /// Disable spoken output; lines still go to the session log.
    #[arg(long)]
    mute: bool,

    /// Don't open the captured photo in the platform viewer.
    #[arg(long)]
    no_open: bool,

    /// Persist the effective tunables as the new defaults.
    #[arg(long)]
    save_settings: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = effective_settings(&cli);
    if cli.save_settings {
        settings.save();
    }

    let speaker: Box<dyn Speaker> = if cli.mute {
        Box::new(NullSpeaker)
    } else {
        Box::new(CommandSpeaker::new())
    };

    let target = choose_target(&cli, &settings, speaker.as_ref());
    log::info!("target position: {target}");

    let detector = build_detector(&settings)?;

    let display: Box<dyn DisplaySurface> = match &cli.dump_frames {
        Some(dir) => Box::new(FrameDumpDisplay::new(dir.clone(), cli.dump_every)),
        None => Box::new(NullDisplay),
    };

    let output_dir = cli
        .output_dir
        .clone()
        .or_else(|| settings.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("images"));

    let mut session = CaptureSessionUseCase::new(
        Box::new(FfmpegCamera::new(cli.camera.clone())),
        detector,
        speaker,
        display,
        Box::new(ImageFileWriter::new()),
        Box::new(StdoutSessionLogger::new(30)),
        settings.guidance_config(),
        output_dir,
        !cli.no_open,
    );

    match session.execute(target)? {
        SessionOutcome::Captured(path) => println!("Saved {}", path.display()),
        SessionOutcome::Ended => println!("Session ended without a capture."),
    }

    Ok(())
}

/// Persisted settings with command-line overrides applied on top.
fn effective_settings(cli: &Cli) -> Settings {
    let mut settings = Settings::load();
    if let Some(value) = cli.stable_frames {
        settings.required_stable_frames = value;
    }
    if let Some(value) = cli.guidance_interval {
        settings.guidance_interval = value;
    }
    if let Some(value) = cli.initial_wait {
        settings.initial_wait = value;
    }
    if let Some(value) = cli.edge_threshold {
        settings.edge_threshold = value;
    }
    if let Some(value) = cli.confidence {
        settings.confidence = value;
    }
    if let Some(value) = cli.listen_seconds {
        settings.listen_seconds = value;
    }
    if cli.output_dir.is_some() {
        settings.output_dir = cli.output_dir.clone();
    }
    settings
}

/// Target zone from the flag when given, otherwise by voice; falls back
/// to center when neither works out.
fn choose_target(cli: &Cli, settings: &Settings, speaker: &dyn Speaker) -> Zone {
    if let Some(requested) = &cli.target {
        match Zone::match_in(requested) {
            Some(zone) => return zone,
            None => log::warn!("unrecognized --target {requested:?}; asking by voice instead"),
        }
    }

    match build_listener(cli, settings) {
        Ok(mut listener) => elicit_target(listener.as_mut(), speaker, MAX_TARGET_ATTEMPTS),
        Err(e) => {
            log::warn!("voice target selection unavailable: {e}");
            speaker.speak("Setting the position as center by default!");
            Zone::Center
        }
    }
}

fn build_listener(
    cli: &Cli,
    settings: &Settings,
) -> Result<Box<dyn CommandListener>, Box<dyn std::error::Error>> {
    let model_path = model_resolver::resolve(WHISPER_MODEL_NAME, WHISPER_MODEL_URL, None, None)?;
    let microphone = FfmpegMicrophone::new(cli.microphone.clone());
    let listener = WhisperListener::new(&model_path, Box::new(microphone), settings.listen_seconds)?;
    Ok(Box::new(listener))
}

fn build_detector(settings: &Settings) -> Result<Box<dyn FaceDetector>, Box<dyn std::error::Error>> {
    let model_path = model_resolver::resolve(
        FACE_MODEL_NAME,
        FACE_MODEL_URL,
        None,
        Some(Box::new(|done, total| {
            if total > 0 {
                log::info!("downloading face model: {done}/{total} bytes");
            }
        })),
    )?;
    let detector = OnnxFaceDetector::new(&model_path, settings.confidence)?;
    Ok(Box::new(detector))
}
