//! Voice Feedback
//!
//! Decouples spoken status feedback from the frame pipeline: the pipeline
//! enqueues, a single consumer task drains into the speech sink. The sink is
//! fire-and-forget; a failing sink is logged and never blocks classification.

mod messages;
mod queue;

pub use messages::{messages_for, priority_for};
pub use queue::{FeedbackConfig, FeedbackQueue, FeedbackSink, TracingSink};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Notification priority. High-priority messages preempt pending normal ones
/// and bypass the repeat-suppression window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    Normal,
    High,
}

/// Feedback errors (recoverable; messages are dropped, never retried)
#[derive(Debug, Error)]
pub enum FeedbackError {
    /// The speech sink cannot accept messages
    #[error("speech sink unavailable: {0}")]
    SinkUnavailable(String),
}
