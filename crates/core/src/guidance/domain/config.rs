use crate::shared::constants::{
    DEFAULT_COUNTDOWN_INTERVAL, DEFAULT_EDGE_THRESHOLD, DEFAULT_GUIDANCE_INTERVAL,
    DEFAULT_INITIAL_WAIT, DEFAULT_REQUIRED_STABLE_FRAMES,
};

/// Tunables of the guidance state machine. All timings are wall-clock
/// seconds; the engine never sleeps, it only compares elapsed time.
#[derive(Clone, Copy, Debug)]
pub struct GuidanceConfig {
    /// Minimum seconds between movement instructions.
    pub guidance_interval: f64,
    /// Minimum seconds between spoken countdown numbers; shorter than
    /// `guidance_interval` so the countdown can keep pace.
    pub countdown_interval: f64,
    /// Grace period at session start before any guidance is spoken.
    pub initial_wait: f64,
    /// Consecutive contained frames required before capture fires.
    pub required_stable_frames: u32,
    /// Border-proximity fraction used by the lost-face edge heuristic.
    pub edge_threshold: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            guidance_interval: DEFAULT_GUIDANCE_INTERVAL,
            countdown_interval: DEFAULT_COUNTDOWN_INTERVAL,
            initial_wait: DEFAULT_INITIAL_WAIT,
            required_stable_frames: DEFAULT_REQUIRED_STABLE_FRAMES,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_interval_is_shorter_than_guidance_interval() {
        let config = GuidanceConfig::default();
        assert!(config.countdown_interval < config.guidance_interval);
    }

    #[test]
    fn test_defaults() {
        let config = GuidanceConfig::default();
        assert_eq!(config.required_stable_frames, 30);
        assert!(config.initial_wait > 0.0);
        assert!(config.edge_threshold > 0.0 && config.edge_threshold < 0.5);
    }
}
