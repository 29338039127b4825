//! Status Classification
//!
//! Turns per-frame feature and presence signals into exactly one
//! attentiveness status:
//! - presence/multiplicity classification with absence hysteresis
//! - single-face classification with consecutive-frame debounce

mod config;
mod presence;
mod status;
mod status_classifier;

pub use config::{ClassifierConfig, DebounceConfig, PresenceConfig};
pub use presence::PresenceTracker;
pub use status::Status;
pub use status_classifier::StatusClassifier;
