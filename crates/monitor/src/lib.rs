//! Attentiveness Monitor
//!
//! Pipeline orchestrator: feeds per-frame observations through feature
//! extraction and classification, tracks inactivity, drives the emergency
//! protocol, and fans events out to the activity log and voice feedback over
//! a channel so classification stays free of I/O.

mod config;
mod events;
mod pipeline;
mod router;
mod source;

pub use config::MonitorConfig;
pub use events::MonitorEvent;
pub use pipeline::MonitorPipeline;
pub use router::EventRouter;
pub use source::{synthetic_mesh, FrameSource, Phase, ScriptedFrameSource};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Orchestrator errors
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Log(#[from] activity_log::LogError),
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_errors_surface_as_monitor_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "log file gone");
        let err = MonitorError::from(activity_log::LogError::Io(io));
        assert!(matches!(err, MonitorError::Log(_)));
        assert!(err.to_string().contains("log file gone"));
    }
}
