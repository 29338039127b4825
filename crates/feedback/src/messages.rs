//! Per-status spoken message tables

use crate::Priority;
use classifier::Status;

/// Messages for a status, cycled round-robin to avoid repetition
pub fn messages_for(status: Status) -> &'static [&'static str] {
    match status {
        Status::Active => &[
            "Great! You're staying focused.",
            "Good attention level detected.",
            "Keep up the good work!",
            "Excellent focus maintained.",
        ],
        Status::Drowsy => &[
            "You appear drowsy. Please stay awake.",
            "Low eye activity detected. Please focus.",
            "Drowsiness alert! Please pay attention.",
            "Your eyes seem heavy. Please stay alert.",
        ],
        Status::Yawning => &[
            "I notice you're yawning. Try to stay alert.",
            "You seem tired. Take a deep breath.",
            "Yawning detected. Please stay focused.",
            "Feeling sleepy? Try to stay awake.",
        ],
        Status::InactiveFaceMissing => &[
            "I can't see your face. Please position yourself properly.",
            "Face not detected. Please come back to the camera.",
            "Please ensure you're visible to the camera.",
            "Please return to your position.",
        ],
        Status::NotAwake => &[
            "You've been away too long. Please return.",
            "Extended absence detected. Please come back.",
            "Long inactivity period. Please focus.",
            "Please wake up and return to your studies.",
        ],
        Status::MultiplePersonsDetected => &[
            "Multiple people detected. Please ensure only one person is monitoring.",
            "Too many faces in view. Please clear the area.",
            "Single user mode required.",
            "Only one person should be in view.",
        ],
    }
}

/// Statuses that warrant interrupting whatever is pending
pub fn priority_for(status: Status) -> Priority {
    match status {
        Status::Drowsy | Status::NotAwake => Priority::High,
        _ => Priority::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_messages() {
        let all = [
            Status::Active,
            Status::Drowsy,
            Status::Yawning,
            Status::InactiveFaceMissing,
            Status::NotAwake,
            Status::MultiplePersonsDetected,
        ];
        for status in all {
            assert!(!messages_for(status).is_empty());
        }
    }

    #[test]
    fn test_critical_statuses_are_high_priority() {
        assert_eq!(priority_for(Status::Drowsy), Priority::High);
        assert_eq!(priority_for(Status::NotAwake), Priority::High);
        assert_eq!(priority_for(Status::Active), Priority::Normal);
        assert_eq!(priority_for(Status::Yawning), Priority::Normal);
    }
}
