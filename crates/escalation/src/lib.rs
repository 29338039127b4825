//! Inactivity Tracking and Emergency Escalation
//!
//! Measures continuous time spent in any non-Active status and drives the
//! emergency wake-up protocol: a flashing visual signal and a repeating voice
//! alert, each running as a cancellable periodic task.

mod config;
mod escalator;
mod tracker;

pub use config::EscalationConfig;
pub use escalator::{EmergencyEscalator, FlashColor, WAKE_UP_MESSAGES};
pub use tracker::{InactivityTracker, TrackerEvent};

use thiserror::Error;

/// Escalation errors (recoverable; the escalator degrades to whichever alert
/// channel remains functional)
#[derive(Debug, Error)]
pub enum EscalationError {
    /// An alert channel's receiver is gone
    #[error("{channel} alert channel unavailable")]
    ChannelUnavailable { channel: &'static str },
}
