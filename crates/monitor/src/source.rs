//! Frame sources
//!
//! The camera and landmark model live outside the core; the pipeline only
//! sees `FrameObservation`s. `ScriptedFrameSource` stands in when no capture
//! collaborator is wired, replaying a scripted attentiveness scenario.

use face_landmarks::{
    FrameObservation, Point2, FACE_MESH_POINTS, LEFT_EYE_RATIO_POINTS, MOUTH_RATIO_POINTS,
    RIGHT_EYE_RATIO_POINTS,
};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Per-frame observation supplier
pub trait FrameSource {
    /// The next observation, or `None` when the source is exhausted
    fn next_frame(&mut self) -> Option<FrameObservation>;
}

/// Build a full face mesh whose 6-point eye and mouth models produce the
/// given ratios exactly. Landmarks outside those models sit at the origin.
pub fn synthetic_mesh(ear: f32, mar: f32) -> Vec<Point2> {
    let mut landmarks = vec![Point2::default(); FACE_MESH_POINTS];

    let eye_h = 10.0;
    for indices in [&LEFT_EYE_RATIO_POINTS, &RIGHT_EYE_RATIO_POINTS] {
        landmarks[indices[0]] = Point2::new(0.0, 0.0);
        landmarks[indices[3]] = Point2::new(eye_h, 0.0);
        landmarks[indices[1]] = Point2::new(3.0, 0.0);
        landmarks[indices[5]] = Point2::new(3.0, ear * eye_h);
        landmarks[indices[2]] = Point2::new(7.0, 0.0);
        landmarks[indices[4]] = Point2::new(7.0, ear * eye_h);
    }

    let mouth_h = 20.0;
    let m = &MOUTH_RATIO_POINTS;
    landmarks[m[2]] = Point2::new(0.0, 0.0);
    landmarks[m[3]] = Point2::new(mouth_h, 0.0);
    landmarks[m[0]] = Point2::new(8.0, 0.0);
    landmarks[m[4]] = Point2::new(8.0, mar * mouth_h);
    landmarks[m[1]] = Point2::new(12.0, 0.0);
    landmarks[m[5]] = Point2::new(12.0, mar * mouth_h);

    landmarks
}

/// One stretch of frames sharing the same scripted behavior
#[derive(Debug, Clone, Copy)]
pub enum Phase {
    /// Open eyes, closed mouth
    Attentive { frames: u32 },
    /// Eyes below the drowsy threshold
    Drowsy { frames: u32 },
    /// Mouth above the yawn threshold
    Yawning { frames: u32 },
    /// No face in frame
    Absent { frames: u32 },
    /// More than one face in frame
    Crowd { frames: u32, faces: usize },
}

impl Phase {
    fn frames(self) -> u32 {
        match self {
            Phase::Attentive { frames }
            | Phase::Drowsy { frames }
            | Phase::Yawning { frames }
            | Phase::Absent { frames }
            | Phase::Crowd { frames, .. } => frames,
        }
    }
}

/// Replays a list of phases at a fixed frame interval with its own advancing
/// timestamps, independent of wall-clock pacing.
pub struct ScriptedFrameSource {
    phases: VecDeque<Phase>,
    remaining: u32,
    frame_interval: Duration,
    next_timestamp: Instant,
}

impl ScriptedFrameSource {
    pub fn new(phases: Vec<Phase>, frame_interval: Duration) -> Self {
        let phases: VecDeque<Phase> = phases.into();
        let remaining = phases.front().map(|p| p.frames()).unwrap_or(0);
        Self {
            phases,
            remaining,
            frame_interval,
            next_timestamp: Instant::now(),
        }
    }

    /// The built-in demo scenario: attentiveness, a drowsy spell long enough
    /// to escalate, recovery, a yawn, and a short absence.
    pub fn demo(frame_interval: Duration) -> Self {
        let per_second = (1.0 / frame_interval.as_secs_f64()).round() as u32;
        Self::new(
            vec![
                Phase::Attentive {
                    frames: 3 * per_second,
                },
                Phase::Drowsy {
                    frames: 7 * per_second,
                },
                Phase::Attentive {
                    frames: 3 * per_second,
                },
                Phase::Yawning { frames: per_second },
                Phase::Absent {
                    frames: 4 * per_second,
                },
                Phase::Attentive {
                    frames: 2 * per_second,
                },
            ],
            frame_interval,
        )
    }
}

impl FrameSource for ScriptedFrameSource {
    fn next_frame(&mut self) -> Option<FrameObservation> {
        while self.remaining == 0 {
            self.phases.pop_front();
            self.remaining = self.phases.front().map(|p| p.frames())?;
        }
        let phase = *self.phases.front()?;
        self.remaining -= 1;

        let timestamp = self.next_timestamp;
        self.next_timestamp += self.frame_interval;

        let obs = match phase {
            Phase::Attentive { .. } => {
                FrameObservation::single_face(synthetic_mesh(0.30, 0.10), timestamp)
            }
            Phase::Drowsy { .. } => {
                FrameObservation::single_face(synthetic_mesh(0.10, 0.05), timestamp)
            }
            Phase::Yawning { .. } => {
                FrameObservation::single_face(synthetic_mesh(0.28, 0.80), timestamp)
            }
            Phase::Absent { .. } => FrameObservation::no_face(timestamp),
            Phase::Crowd { faces, .. } => FrameObservation::multiple_faces(faces, timestamp),
        };
        Some(obs)
    }
}
