//! Mouth-openness ratio (MAR) extraction

use crate::{FeatureError, SmoothingWindow};
use face_landmarks::{gather_points, Point2, MOUTH_RATIO_POINTS};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// MAR extractor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MouthConfig {
    /// Mouth-corner distance below this discards the sample (pixels)
    pub min_horizontal_dist: f32,
    /// Trailing smoothing window length (raw samples)
    pub smoothing_window: usize,
    /// Initial MAR reported before any valid sample arrives
    pub initial_mar: f32,
}

impl Default for MouthConfig {
    fn default() -> Self {
        Self {
            min_horizontal_dist: 1.0,
            smoothing_window: 10,
            initial_mar: 0.0,
        }
    }
}

/// Summary statistics over the recent MAR history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MouthStatistics {
    pub current_mar: f32,
    pub average_mar: f32,
    pub min_mar: f32,
    pub max_mar: f32,
    pub yawn_intensity: u8,
    pub sample_count: usize,
}

/// Computes the smoothed mouth-openness ratio from the 6-point mouth model:
/// two vertical lip-center distances over the mouth-corner distance. Same
/// failure handling as the eye extractor; no head-pose compensation.
pub struct MouthOpennessExtractor {
    config: MouthConfig,
    window: SmoothingWindow,
    last_mar: f32,
}

impl MouthOpennessExtractor {
    pub fn new(config: MouthConfig) -> Self {
        let window = SmoothingWindow::new(config.smoothing_window);
        let last_mar = config.initial_mar;
        Self {
            config,
            window,
            last_mar,
        }
    }

    /// Extract the smoothed MAR for one frame.
    pub fn extract(&mut self, landmarks: &[Point2]) -> f32 {
        let raw = match self.raw_ratio(landmarks) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("MAR sample discarded: {e}");
                return self.last_mar;
            }
        };

        self.last_mar = self.window.push(raw);
        self.last_mar
    }

    fn raw_ratio(&self, landmarks: &[Point2]) -> Result<f32, FeatureError> {
        let p = gather_points(landmarks, &MOUTH_RATIO_POINTS)?;

        let vertical1 = p[0].distance(&p[4]);
        let vertical2 = p[1].distance(&p[5]);
        let horizontal = p[2].distance(&p[3]);

        if horizontal < self.config.min_horizontal_dist {
            return Err(FeatureError::DegenerateGeometry {
                distance: horizontal,
                min: self.config.min_horizontal_dist,
            });
        }

        Ok((vertical1 + vertical2) / (2.0 * horizontal))
    }

    /// Last smoothed MAR (the value reused on extraction failure)
    pub fn last_mar(&self) -> f32 {
        self.last_mar
    }

    /// Yawn intensity as a calibrated percentage, a read-only display view
    /// over the smoothed MAR. Not part of the classification decision.
    pub fn yawn_intensity(&self) -> u8 {
        match self.last_mar {
            m if m <= 0.25 => 0,
            m if m <= 0.40 => 20,
            m if m <= 0.55 => 40,
            m if m <= 0.70 => 60,
            m if m <= 0.90 => 80,
            _ => 100,
        }
    }

    /// Human-readable mouth state label for display
    pub fn mouth_status(&self) -> &'static str {
        match self.last_mar {
            m if m > 0.9 => "Yawn",
            m if m > 0.5 => "Wide Open",
            m if m > 0.35 => "Open",
            m if m > 0.25 => "Slightly Open",
            _ => "Closed",
        }
    }

    /// Whether the mouth is significantly open
    pub fn is_mouth_open(&self) -> bool {
        self.last_mar > 0.4
    }

    pub fn statistics(&self) -> MouthStatistics {
        MouthStatistics {
            current_mar: self.last_mar,
            average_mar: self.window.mean(),
            min_mar: self.window.min().unwrap_or(0.0),
            max_mar: self.window.max().unwrap_or(0.0),
            yawn_intensity: self.yawn_intensity(),
            sample_count: self.window.len(),
        }
    }

    /// Clear the history and restore the initial MAR
    pub fn reset(&mut self) {
        self.window.clear();
        self.last_mar = self.config.initial_mar;
    }
}

impl Default for MouthOpennessExtractor {
    fn default() -> Self {
        Self::new(MouthConfig::default())
    }
}
