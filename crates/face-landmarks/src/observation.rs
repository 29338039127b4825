//! Per-frame observation produced by the landmark extractor

use crate::Point2;
use std::time::Instant;

/// Immutable per-frame input to the classification pipeline.
///
/// `landmarks` holds the primary face's points and may be empty when no face
/// is present; `face_count` is reported independently by the face detector.
#[derive(Debug, Clone)]
pub struct FrameObservation {
    /// Ordered landmark points of the primary face (possibly empty)
    pub landmarks: Vec<Point2>,
    /// Number of faces detected in the frame
    pub face_count: usize,
    /// Monotonic capture timestamp
    pub timestamp: Instant,
}

impl FrameObservation {
    /// Observation for a frame with exactly one face
    pub fn single_face(landmarks: Vec<Point2>, timestamp: Instant) -> Self {
        Self {
            landmarks,
            face_count: 1,
            timestamp,
        }
    }

    /// Observation for a frame with no face present
    pub fn no_face(timestamp: Instant) -> Self {
        Self {
            landmarks: Vec::new(),
            face_count: 0,
            timestamp,
        }
    }

    /// Observation for a frame with more than one face
    pub fn multiple_faces(face_count: usize, timestamp: Instant) -> Self {
        debug_assert!(face_count > 1);
        Self {
            landmarks: Vec::new(),
            face_count,
            timestamp,
        }
    }
}
