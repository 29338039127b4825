//! Feature Extraction
//!
//! Computes the eye-openness ratio (EAR) and mouth-openness ratio (MAR) from
//! face-mesh landmarks, with trailing-window smoothing and head-pose
//! compensation. Extraction failures are recoverable: the last smoothed value
//! is reused and the pipeline keeps running.

mod eye;
mod mouth;
mod smoothing;

pub use eye::{EyeConfig, EyeOpennessExtractor, EyeStatistics, PoseCompensation};
pub use mouth::{MouthConfig, MouthOpennessExtractor, MouthStatistics};
pub use smoothing::SmoothingWindow;

use face_landmarks::LandmarkError;
use std::time::Instant;
use thiserror::Error;

/// Feature extraction errors (all recoverable at the extractor boundary)
#[derive(Debug, Clone, Error)]
pub enum FeatureError {
    #[error(transparent)]
    Landmark(#[from] LandmarkError),

    /// Horizontal reference distance too small to divide by
    #[error("degenerate geometry: horizontal distance {distance} below {min}")]
    DegenerateGeometry { distance: f32, min: f32 },
}

/// Smoothed per-frame feature sample consumed by the status classifier
#[derive(Debug, Clone, Copy)]
pub struct FeatureSample {
    /// Eye-openness ratio, smoothed, in [0, 1]
    pub ear: f32,
    /// Mouth-openness ratio, smoothed, >= 0
    pub mar: f32,
    /// Monotonic frame timestamp
    pub timestamp: Instant,
}
