//! Presence and multiplicity classification

use crate::{PresenceConfig, Status};
use std::time::{Duration, Instant};
use tracing::debug;

/// State machine over the per-frame face count, independent of eye and mouth
/// state. Multiplicity fires on a single frame; absence escalates through
/// Active -> InactiveFaceMissing -> NotAwake as the timer grows, and the
/// timer clears the instant a face reappears.
pub struct PresenceTracker {
    config: PresenceConfig,
    absent_since: Option<Instant>,
}

impl PresenceTracker {
    pub fn new(config: PresenceConfig) -> Self {
        Self {
            config,
            absent_since: None,
        }
    }

    /// Classify the presence signal for one frame.
    ///
    /// Returns `None` for exactly one face, delegating to the single-face
    /// classifier. Any other count yields a definitive status.
    pub fn observe(&mut self, face_count: usize, now: Instant) -> Option<Status> {
        if face_count > 1 {
            // Faces are present, so the absence timer clears
            self.absent_since = None;
            return Some(Status::MultiplePersonsDetected);
        }

        if face_count == 0 {
            let since = *self.absent_since.get_or_insert_with(|| {
                debug!("face lost, absence timer started");
                now
            });
            let elapsed = now.duration_since(since);
            let status = if elapsed >= self.config.long_absence {
                Status::NotAwake
            } else if elapsed >= self.config.short_absence {
                Status::InactiveFaceMissing
            } else {
                Status::Active
            };
            return Some(status);
        }

        self.absent_since = None;
        None
    }

    /// Time the face has been continuously absent (zero when present)
    pub fn absence_duration(&self, now: Instant) -> Duration {
        self.absent_since
            .map(|since| now.duration_since(since))
            .unwrap_or(Duration::ZERO)
    }

    pub fn reset(&mut self) {
        self.absent_since = None;
    }
}

impl Default for PresenceTracker {
    fn default() -> Self {
        Self::new(PresenceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, secs: f64) -> Instant {
        start + Duration::from_secs_f64(secs)
    }

    #[test]
    fn test_multiple_faces_fire_on_single_frame() {
        let mut tracker = PresenceTracker::default();
        let now = Instant::now();
        assert_eq!(
            tracker.observe(2, now),
            Some(Status::MultiplePersonsDetected)
        );
    }

    #[test]
    fn test_single_face_delegates() {
        let mut tracker = PresenceTracker::default();
        assert_eq!(tracker.observe(1, Instant::now()), None);
    }

    #[test]
    fn test_absence_escalates_monotonically() {
        let mut tracker = PresenceTracker::default();
        let start = Instant::now();

        assert_eq!(tracker.observe(0, start), Some(Status::Active));
        assert_eq!(tracker.observe(0, at(start, 2.9)), Some(Status::Active));
        // Exactly at the short threshold
        assert_eq!(
            tracker.observe(0, at(start, 3.0)),
            Some(Status::InactiveFaceMissing)
        );
        assert_eq!(
            tracker.observe(0, at(start, 9.9)),
            Some(Status::InactiveFaceMissing)
        );
        // Exactly at the long threshold
        assert_eq!(tracker.observe(0, at(start, 10.0)), Some(Status::NotAwake));
        assert_eq!(tracker.observe(0, at(start, 60.0)), Some(Status::NotAwake));
    }

    #[test]
    fn test_absence_timer_clears_when_face_returns() {
        let mut tracker = PresenceTracker::default();
        let start = Instant::now();

        tracker.observe(0, start);
        tracker.observe(0, at(start, 5.0));
        assert!(tracker.absence_duration(at(start, 5.0)) > Duration::ZERO);

        // Face back for one frame
        assert_eq!(tracker.observe(1, at(start, 5.1)), None);
        assert_eq!(tracker.absence_duration(at(start, 5.1)), Duration::ZERO);

        // A fresh absence starts from zero again
        assert_eq!(tracker.observe(0, at(start, 5.2)), Some(Status::Active));
    }

    #[test]
    fn test_eleven_second_absence_scenario() {
        let mut tracker = PresenceTracker::default();
        let start = Instant::now();

        let mut statuses = Vec::new();
        for tenths in 0..=110 {
            let now = at(start, tenths as f64 / 10.0);
            statuses.push(tracker.observe(0, now).unwrap());
        }

        assert!(statuses[..30].iter().all(|s| *s == Status::Active));
        assert!(statuses[30..100]
            .iter()
            .all(|s| *s == Status::InactiveFaceMissing));
        assert!(statuses[100..].iter().all(|s| *s == Status::NotAwake));
    }

    #[test]
    fn test_reset_clears_timer() {
        let mut tracker = PresenceTracker::default();
        let start = Instant::now();
        tracker.observe(0, start);
        tracker.reset();
        assert_eq!(tracker.absence_duration(at(start, 5.0)), Duration::ZERO);
        assert_eq!(tracker.observe(0, at(start, 20.0)), Some(Status::Active));
    }
}
