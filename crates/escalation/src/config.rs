//! Escalation configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Inactivity and alert timing constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EscalationConfig {
    /// Continuous non-Active time before the emergency protocol fires
    pub inactivity_threshold: Duration,
    /// Period of the alternating visual alert signal
    pub flash_interval: Duration,
    /// Period between repeated voice alerts
    pub voice_interval: Duration,
    /// Bound on waiting for each background alert task during shutdown
    pub task_join_timeout: Duration,
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            inactivity_threshold: Duration::from_secs_f64(5.0),
            flash_interval: Duration::from_millis(500),
            voice_interval: Duration::from_secs(2),
            task_join_timeout: Duration::from_secs(1),
        }
    }
}
