//! Attentiveness status

use serde::{Deserialize, Serialize};
use std::fmt;

/// The single status that holds for a processed frame. Every frame yields
/// exactly one of these; there is no "unknown" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Person present and attentive
    Active,
    /// Eyes closed past the debounce threshold
    Drowsy,
    /// Mouth open past the debounce threshold
    Yawning,
    /// Face absent for a short while
    InactiveFaceMissing,
    /// Face absent for an extended period
    NotAwake,
    /// More than one face in frame
    MultiplePersonsDetected,
}

impl Status {
    pub fn is_active(self) -> bool {
        self == Status::Active
    }

    /// Human-readable label used in the activity log and notifications
    pub fn label(self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Drowsy => "Drowsy",
            Status::Yawning => "Yawning",
            Status::InactiveFaceMissing => "Inactive (Face Missing)",
            Status::NotAwake => "Not Awake",
            Status::MultiplePersonsDetected => "Multiple Persons Detected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
