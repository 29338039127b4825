//! Aggregated pipeline configuration

use crate::MonitorError;
use ::config::{Config, Environment, File};
use classifier::ClassifierConfig;
use escalation::EscalationConfig;
use feature_extract::{EyeConfig, MouthConfig};
use feedback::FeedbackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Top-level configuration aggregating every pipeline stage. All sections
/// default to the documented constants, so an empty file (or no file) yields
/// the standard pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub eye: EyeConfig,
    #[serde(default)]
    pub mouth: MouthConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
    #[serde(default)]
    pub escalation: EscalationConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    /// Activity log location
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// Capacity of the pipeline event channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,
}

fn default_log_path() -> PathBuf {
    PathBuf::from("attentiveness_log.csv")
}

fn default_event_capacity() -> usize {
    256
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            eye: EyeConfig::default(),
            mouth: MouthConfig::default(),
            classifier: ClassifierConfig::default(),
            escalation: EscalationConfig::default(),
            feedback: FeedbackConfig::default(),
            log_path: default_log_path(),
            event_capacity: default_event_capacity(),
        }
    }
}

impl MonitorConfig {
    /// Load configuration, layering an optional TOML file and `MONITOR_*`
    /// environment overrides on top of the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, MonitorError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            info!("loading configuration from {}", path.display());
            builder = builder.add_source(File::from(path).required(false));
        }
        let settings = builder
            .add_source(Environment::with_prefix("MONITOR").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}
