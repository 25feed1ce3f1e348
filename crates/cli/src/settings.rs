use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use posecue_core::guidance::domain::config::GuidanceConfig;
use posecue_core::shared::constants::{
    DEFAULT_COUNTDOWN_INTERVAL, DEFAULT_EDGE_THRESHOLD, DEFAULT_GUIDANCE_INTERVAL,
    DEFAULT_INITIAL_WAIT, DEFAULT_LISTEN_SECONDS, DEFAULT_REQUIRED_STABLE_FRAMES,
};

/// Persisted user preferences, merged under any command-line overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub guidance_interval: f64,
    pub countdown_interval: f64,
    pub initial_wait: f64,
    pub required_stable_frames: u32,
    pub edge_threshold: f64,
    #[serde(default = "default_listen_seconds")]
    pub listen_seconds: f64,
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_listen_seconds() -> f64 {
    DEFAULT_LISTEN_SECONDS
}

fn default_confidence() -> f64 {
    posecue_core::detection::infrastructure::onnx_face_detector::DEFAULT_CONFIDENCE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            guidance_interval: DEFAULT_GUIDANCE_INTERVAL,
            countdown_interval: DEFAULT_COUNTDOWN_INTERVAL,
            initial_wait: DEFAULT_INITIAL_WAIT,
            required_stable_frames: DEFAULT_REQUIRED_STABLE_FRAMES,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            listen_seconds: default_listen_seconds(),
            confidence: default_confidence(),
            output_dir: None,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("Posecue").join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .and_then(|json| serde_json::from_str(&json).ok())
            .unwrap_or_default()
    }

    pub fn save(&self) {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                let _ = fs::create_dir_all(parent);
            }
            if let Ok(json) = serde_json::to_string_pretty(self) {
                let _ = fs::write(path, json);
            }
        }
    }

    pub fn guidance_config(&self) -> GuidanceConfig {
        GuidanceConfig {
            guidance_interval: self.guidance_interval,
            countdown_interval: self.countdown_interval,
            initial_wait: self.initial_wait,
            required_stable_frames: self.required_stable_frames,
            edge_threshold: self.edge_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_core_constants() {
        let settings = Settings::default();
        assert_eq!(settings.guidance_interval, DEFAULT_GUIDANCE_INTERVAL);
        assert_eq!(settings.required_stable_frames, DEFAULT_REQUIRED_STABLE_FRAMES);
        assert!(settings.output_dir.is_none());
    }

    #[test]
    fn test_roundtrips_through_json() {
        let mut settings = Settings::default();
        settings.required_stable_frames = 45;
        settings.output_dir = Some(PathBuf::from("/tmp/selfies"));

        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.required_stable_frames, 45);
        assert_eq!(back.output_dir, Some(PathBuf::from("/tmp/selfies")));
    }

    #[test]
    fn test_missing_optional_fields_take_defaults() {
        let json = r#"{
            "guidance_interval": 3.0,
            "countdown_interval": 0.9,
            "initial_wait": 5.0,
            "required_stable_frames": 30,
            "edge_threshold": 0.15
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.guidance_interval, 3.0);
        assert_eq!(settings.listen_seconds, DEFAULT_LISTEN_SECONDS);
        assert!(settings.confidence > 0.0);
    }
}
