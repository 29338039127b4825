//! Face Landmark Model
//!
//! Frame observations and 2D point geometry for the 468-point face-mesh
//! landmark scheme. The landmark extractor itself is an external collaborator;
//! this crate only defines what it produces.

mod mesh;
mod observation;

pub use mesh::{
    LEFT_EYE_CONTOUR, LEFT_EYE_RATIO_POINTS, MOUTH_CONTOUR, MOUTH_RATIO_POINTS,
    RIGHT_EYE_CONTOUR, RIGHT_EYE_RATIO_POINTS,
};
pub use observation::FrameObservation;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of points produced by the face-mesh collaborator
pub const FACE_MESH_POINTS: usize = 468;

/// Landmark errors
#[derive(Debug, Clone, Error)]
pub enum LandmarkError {
    /// A required landmark index is not present in the frame
    #[error("landmark index {index} missing (frame has {len} points)")]
    InsufficientLandmarks { index: usize, len: usize },
}

/// A 2D landmark point in pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f32,
    pub y: f32,
}

impl Point2 {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point2) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Head pose (Euler angles) from the pose-estimation collaborator
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HeadPose {
    /// Yaw (left-right rotation) in degrees
    pub yaw: f32,
    /// Pitch (up-down tilt) in degrees
    pub pitch: f32,
    /// Roll (side tilt) in degrees
    pub roll: f32,
}

/// Look up a fixed set of landmark indices, failing on the first missing one.
pub fn gather_points<const N: usize>(
    landmarks: &[Point2],
    indices: &[usize; N],
) -> Result<[Point2; N], LandmarkError> {
    let mut points = [Point2::default(); N];
    for (slot, &index) in points.iter_mut().zip(indices.iter()) {
        *slot = *landmarks
            .get(index)
            .ok_or(LandmarkError::InsufficientLandmarks {
                index,
                len: landmarks.len(),
            })?;
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_distance() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_gather_points_missing_index() {
        let landmarks = vec![Point2::default(); 10];
        let result = gather_points(&landmarks, &LEFT_EYE_RATIO_POINTS);
        assert!(matches!(
            result,
            Err(LandmarkError::InsufficientLandmarks { index: 33, len: 10 })
        ));
    }

    #[test]
    fn test_gather_points_complete_mesh() {
        let landmarks = vec![Point2::new(1.0, 2.0); FACE_MESH_POINTS];
        let points = gather_points(&landmarks, &RIGHT_EYE_RATIO_POINTS).unwrap();
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], Point2::new(1.0, 2.0));
    }

    proptest! {
        // Short frames error instead of panicking, for any length
        #[test]
        fn prop_gather_points_errors_on_short_frames(len in 0usize..600) {
            let landmarks = vec![Point2::default(); len];
            let max_index = *MOUTH_RATIO_POINTS.iter().max().unwrap();
            let result = gather_points(&landmarks, &MOUTH_RATIO_POINTS);
            prop_assert_eq!(result.is_ok(), len > max_index);
        }
    }
}
