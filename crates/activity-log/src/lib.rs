//! Activity Log
//!
//! Append-only CSV event sink for status changes, session boundaries, and
//! emergency events. Write failures are logged and swallowed; in-memory
//! bookkeeping survives so the pipeline never stalls on persistence. The log
//! reads back into aggregate statistics.

mod logger;
mod stats;

pub use logger::{ActivityLogger, LogRecord, SessionAction};
pub use stats::{InactiveDurationStats, LogStats};

use thiserror::Error;

/// Persistence errors
#[derive(Debug, Error)]
pub enum LogError {
    #[error("log write failed: {0}")]
    Write(#[from] csv::Error),

    #[error("log I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
