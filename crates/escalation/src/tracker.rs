//! Continuous inactivity duration tracking

use classifier::Status;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Outcome of observing one frame's status against the inactivity window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// Status is Active and no window was open
    Idle,
    /// A window is open; the emergency threshold has not newly been crossed
    Inactive { elapsed: Duration },
    /// The threshold was crossed for the first time in this window
    EmergencyDue { elapsed: Duration },
    /// Status returned to Active; the window just closed
    ReturnedToActive { total: Duration },
}

/// Tracks the contiguous span of non-Active statuses.
///
/// Invariants: the window start is `None` iff the last observed status was
/// Active; the emergency fires at most once per open window and cannot fire
/// again until the window closes and a new one opens.
pub struct InactivityTracker {
    threshold: Duration,
    started_at: Option<Instant>,
    emergency_triggered: bool,
}

impl InactivityTracker {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            started_at: None,
            emergency_triggered: false,
        }
    }

    /// Fold one frame's status into the window state.
    pub fn observe(&mut self, status: Status, now: Instant) -> TrackerEvent {
        if status.is_active() {
            return match self.started_at.take() {
                Some(started) => {
                    let total = now.duration_since(started);
                    self.emergency_triggered = false;
                    info!(total_secs = total.as_secs_f64(), "returned to active");
                    TrackerEvent::ReturnedToActive { total }
                }
                None => TrackerEvent::Idle,
            };
        }

        let started = *self.started_at.get_or_insert_with(|| {
            debug!(%status, "inactivity window opened");
            now
        });
        let elapsed = now.duration_since(started);

        if elapsed >= self.threshold && !self.emergency_triggered {
            self.emergency_triggered = true;
            info!(
                elapsed_secs = elapsed.as_secs_f64(),
                "inactivity threshold crossed"
            );
            TrackerEvent::EmergencyDue { elapsed }
        } else {
            TrackerEvent::Inactive { elapsed }
        }
    }

    /// Current inactive duration, for display (zero when the window is closed)
    pub fn inactive_duration(&self, now: Instant) -> Duration {
        self.started_at
            .map(|started| now.duration_since(started))
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_window_open(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn emergency_triggered(&self) -> bool {
        self.emergency_triggered
    }

    /// Unconditional reset, used on session start/stop
    pub fn reset(&mut self) {
        self.started_at = None;
        self.emergency_triggered = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(start: Instant, secs: f64) -> Instant {
        start + Duration::from_secs_f64(secs)
    }

    fn tracker() -> InactivityTracker {
        InactivityTracker::new(Duration::from_secs_f64(5.0))
    }

    #[test]
    fn test_active_with_no_window_is_idle() {
        let mut t = tracker();
        assert_eq!(t.observe(Status::Active, Instant::now()), TrackerEvent::Idle);
        assert!(!t.is_window_open());
    }

    #[test]
    fn test_window_opens_once_per_contiguous_run() {
        let mut t = tracker();
        let start = Instant::now();

        t.observe(Status::Drowsy, start);
        assert!(t.is_window_open());

        // A different non-Active status does not reopen the window
        let event = t.observe(Status::Yawning, at(start, 2.0));
        assert_eq!(
            event,
            TrackerEvent::Inactive {
                elapsed: Duration::from_secs_f64(2.0)
            }
        );
    }

    #[test]
    fn test_emergency_fires_exactly_once_per_window() {
        let mut t = tracker();
        let start = Instant::now();

        t.observe(Status::Drowsy, start);
        assert!(matches!(
            t.observe(Status::Drowsy, at(start, 5.0)),
            TrackerEvent::EmergencyDue { .. }
        ));
        // Still inactive, but no second trigger
        assert!(matches!(
            t.observe(Status::Drowsy, at(start, 8.0)),
            TrackerEvent::Inactive { .. }
        ));
        assert!(t.emergency_triggered());
    }

    #[test]
    fn test_return_to_active_closes_window_and_rearms() {
        let mut t = tracker();
        let start = Instant::now();

        t.observe(Status::NotAwake, start);
        t.observe(Status::NotAwake, at(start, 6.0));
        let event = t.observe(Status::Active, at(start, 7.0));
        assert_eq!(
            event,
            TrackerEvent::ReturnedToActive {
                total: Duration::from_secs_f64(7.0)
            }
        );
        assert!(!t.is_window_open());
        assert!(!t.emergency_triggered());

        // A new window can trigger again
        t.observe(Status::Drowsy, at(start, 10.0));
        assert!(matches!(
            t.observe(Status::Drowsy, at(start, 15.0)),
            TrackerEvent::EmergencyDue { .. }
        ));
    }

    #[test]
    fn test_trigger_then_immediate_recovery_scenario() {
        let mut t = tracker();
        let start = Instant::now();

        t.observe(Status::InactiveFaceMissing, start);
        assert!(matches!(
            t.observe(Status::InactiveFaceMissing, at(start, 5.0)),
            TrackerEvent::EmergencyDue { .. }
        ));

        // One Active frame closes the window within that frame
        assert!(matches!(
            t.observe(Status::Active, at(start, 5.1)),
            TrackerEvent::ReturnedToActive { .. }
        ));
        assert!(!t.is_window_open());
    }

    #[test]
    fn test_inactive_duration_display() {
        let mut t = tracker();
        let start = Instant::now();
        assert_eq!(t.inactive_duration(start), Duration::ZERO);
        t.observe(Status::Drowsy, start);
        assert_eq!(
            t.inactive_duration(at(start, 3.5)),
            Duration::from_secs_f64(3.5)
        );
    }

    #[test]
    fn test_reset_is_unconditional() {
        let mut t = tracker();
        let start = Instant::now();
        t.observe(Status::Drowsy, start);
        t.observe(Status::Drowsy, at(start, 6.0));
        t.reset();
        assert!(!t.is_window_open());
        assert!(!t.emergency_triggered());
    }
}
