//! Eye-openness ratio (EAR) extraction

use crate::{FeatureError, SmoothingWindow};
use face_landmarks::{
    gather_points, HeadPose, Point2, LEFT_EYE_RATIO_POINTS, RIGHT_EYE_RATIO_POINTS,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Head-pose compensation multipliers for the EAR.
///
/// Heuristic constants without a documented derivation; kept configurable
/// rather than hard-coded. Each compensation applies independently and they
/// compose multiplicatively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseCompensation {
    /// Applied when pitch exceeds this (looking up), degrees
    pub pitch_up_threshold: f32,
    pub pitch_up_gain: f32,
    /// Applied when pitch is below this (looking down), degrees
    pub pitch_down_threshold: f32,
    pub pitch_down_gain: f32,
    /// Applied when |yaw| exceeds this (side view), degrees
    pub yaw_threshold: f32,
    pub yaw_gain: f32,
}

impl Default for PoseCompensation {
    fn default() -> Self {
        Self {
            pitch_up_threshold: 10.0,
            pitch_up_gain: 1.1,
            pitch_down_threshold: -10.0,
            pitch_down_gain: 0.95,
            yaw_threshold: 20.0,
            yaw_gain: 1.05,
        }
    }
}

/// EAR extractor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EyeConfig {
    /// Horizontal eye distance below this discards the sample (pixels)
    pub min_horizontal_dist: f32,
    /// Trailing smoothing window length (raw samples)
    pub smoothing_window: usize,
    /// Initial EAR reported before any valid sample arrives
    pub initial_ear: f32,
    /// Head-pose compensation constants
    pub compensation: PoseCompensation,
    /// Pose angles beyond which the measurement is flagged unreliable
    pub reliable_pitch_limit: f32,
    pub reliable_yaw_limit: f32,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            min_horizontal_dist: 0.5,
            smoothing_window: 8,
            initial_ear: 0.3,
            compensation: PoseCompensation::default(),
            reliable_pitch_limit: 30.0,
            reliable_yaw_limit: 35.0,
        }
    }
}

/// Summary statistics over the recent EAR history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EyeStatistics {
    pub current_ear: f32,
    pub average_ear: f32,
    pub min_ear: f32,
    pub max_ear: f32,
    pub drowsiness_level: u8,
    pub sample_count: usize,
}

/// Computes the smoothed eye-openness ratio from the two 6-point eye models.
///
/// Per eye: `(v1 + v2) / (2 * h)` over two vertical point-pairs and one
/// horizontal pair, clamped to [0, 1]; the final ratio is the mean of both
/// eyes. Missing landmarks or degenerate geometry reuse the last smoothed
/// value instead of surfacing an error.
pub struct EyeOpennessExtractor {
    config: EyeConfig,
    window: SmoothingWindow,
    last_ear: f32,
}

impl EyeOpennessExtractor {
    pub fn new(config: EyeConfig) -> Self {
        let window = SmoothingWindow::new(config.smoothing_window);
        let last_ear = config.initial_ear;
        Self {
            config,
            window,
            last_ear,
        }
    }

    /// Extract the smoothed EAR for one frame.
    pub fn extract(&mut self, landmarks: &[Point2], pose: Option<&HeadPose>) -> f32 {
        let raw = match self.raw_ratio(landmarks) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("EAR sample discarded: {e}");
                return self.last_ear;
            }
        };

        let compensated = match pose {
            Some(pose) => self.compensate(raw, pose).clamp(0.0, 1.0),
            None => raw,
        };

        self.last_ear = self.window.push(compensated);
        self.last_ear
    }

    fn raw_ratio(&self, landmarks: &[Point2]) -> Result<f32, FeatureError> {
        let left = self.single_eye(landmarks, &LEFT_EYE_RATIO_POINTS)?;
        let right = self.single_eye(landmarks, &RIGHT_EYE_RATIO_POINTS)?;
        Ok((left + right) / 2.0)
    }

    fn single_eye(&self, landmarks: &[Point2], indices: &[usize; 6]) -> Result<f32, FeatureError> {
        let p = gather_points(landmarks, indices)?;

        let vertical1 = p[1].distance(&p[5]);
        let vertical2 = p[2].distance(&p[4]);
        let horizontal = p[0].distance(&p[3]);

        if horizontal < self.config.min_horizontal_dist {
            return Err(FeatureError::DegenerateGeometry {
                distance: horizontal,
                min: self.config.min_horizontal_dist,
            });
        }

        Ok(((vertical1 + vertical2) / (2.0 * horizontal)).clamp(0.0, 1.0))
    }

    fn compensate(&self, ear: f32, pose: &HeadPose) -> f32 {
        let c = &self.config.compensation;
        let mut ear = ear;
        if pose.pitch > c.pitch_up_threshold {
            ear *= c.pitch_up_gain;
        } else if pose.pitch < c.pitch_down_threshold {
            ear *= c.pitch_down_gain;
        }
        if pose.yaw.abs() > c.yaw_threshold {
            ear *= c.yaw_gain;
        }
        ear
    }

    /// Last smoothed EAR (the value reused on extraction failure)
    pub fn last_ear(&self) -> f32 {
        self.last_ear
    }

    /// Drowsiness level as a calibrated percentage, a read-only display view
    /// over the smoothed EAR. Not part of the classification decision.
    pub fn drowsiness_level(&self) -> u8 {
        match self.last_ear {
            e if e >= 0.28 => 0,
            e if e >= 0.24 => 20,
            e if e >= 0.20 => 40,
            e if e >= 0.16 => 60,
            e if e >= 0.12 => 80,
            _ => 100,
        }
    }

    /// Human-readable eye state label for display
    pub fn eye_status(&self) -> &'static str {
        match self.drowsiness_level() {
            80..=100 => "Eyes Closed",
            60..=79 => "Very Drowsy",
            40..=59 => "Moderately Drowsy",
            20..=39 => "Slightly Drowsy",
            _ if self.last_ear >= 0.35 => "Wide Awake",
            _ => "Normal",
        }
    }

    /// Whether the current measurement is trustworthy given the head pose
    pub fn is_reliable(&self, pose: Option<&HeadPose>) -> bool {
        match pose {
            Some(pose) => {
                pose.pitch.abs() <= self.config.reliable_pitch_limit
                    && pose.yaw.abs() <= self.config.reliable_yaw_limit
            }
            None => true,
        }
    }

    pub fn statistics(&self) -> EyeStatistics {
        EyeStatistics {
            current_ear: self.last_ear,
            average_ear: self.window.mean(),
            min_ear: self.window.min().unwrap_or(0.0),
            max_ear: self.window.max().unwrap_or(0.0),
            drowsiness_level: self.drowsiness_level(),
            sample_count: self.window.len(),
        }
    }

    /// Clear the history and restore the initial EAR
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_ear = self.config.initial_ear;
    }
}

impl Default for EyeOpennessExtractor {
    fn default() -> Self {
        Self::new(EyeConfig::default())
    }
}
