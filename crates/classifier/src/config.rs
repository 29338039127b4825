//! Classifier configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Absence hysteresis thresholds for the presence classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresenceConfig {
    /// Absence shorter than this still counts as Active
    pub short_absence: Duration,
    /// Absence at or beyond this becomes NotAwake
    pub long_absence: Duration,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            short_absence: Duration::from_secs_f64(3.0),
            long_absence: Duration::from_secs_f64(10.0),
        }
    }
}

/// Consecutive-frame debounce thresholds for the single-face classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebounceConfig {
    /// EAR below this counts a drowsy frame
    pub drowsy_ear_threshold: f32,
    /// MAR above this counts a yawn frame
    pub yawn_mar_threshold: f32,
    /// Consecutive drowsy frames before the Drowsy status is confirmed
    pub drowsy_consecutive_frames: u32,
    /// Consecutive yawn frames before the Yawning status is confirmed
    pub yawn_consecutive_frames: u32,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            drowsy_ear_threshold: 0.22,
            yawn_mar_threshold: 0.6,
            drowsy_consecutive_frames: 5,
            yawn_consecutive_frames: 3,
        }
    }
}

/// Combined classifier configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub presence: PresenceConfig,
    #[serde(default)]
    pub debounce: DebounceConfig,
}

impl ClassifierConfig {
    /// Stricter detection: shorter debounce, faster absence escalation
    pub fn strict() -> Self {
        Self {
            presence: PresenceConfig {
                short_absence: Duration::from_secs_f64(2.0),
                long_absence: Duration::from_secs_f64(6.0),
            },
            debounce: DebounceConfig {
                drowsy_consecutive_frames: 3,
                yawn_consecutive_frames: 2,
                ..Default::default()
            },
        }
    }

    /// More lenient detection: longer debounce and absence tolerance
    pub fn lenient() -> Self {
        Self {
            presence: PresenceConfig {
                short_absence: Duration::from_secs_f64(5.0),
                long_absence: Duration::from_secs_f64(15.0),
            },
            debounce: DebounceConfig {
                drowsy_consecutive_frames: 8,
                yawn_consecutive_frames: 5,
                ..Default::default()
            },
        }
    }
}
