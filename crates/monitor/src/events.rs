//! Pipeline events

use classifier::Status;
use std::time::{Duration, Instant};

/// Event emitted by the frame pipeline onto the monitor channel. The log and
/// feedback sinks subscribe to the drained events; classification itself
/// performs no I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    SessionStarted,
    SessionStopped,
    /// The per-frame status differs from the previous frame's
    StatusChanged {
        old: Status,
        new: Status,
        ear: f32,
        mar: f32,
        at: Instant,
    },
    /// The inactivity threshold was crossed; the wake-up protocol is running
    EmergencyTriggered {
        inactive: Duration,
    },
    /// An inactive span ended with an Active frame
    ReturnedToActive {
        total: Duration,
        ear: f32,
        mar: f32,
    },
}
