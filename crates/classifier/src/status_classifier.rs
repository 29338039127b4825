//! Single-face status classification with debounce

use crate::{DebounceConfig, Status};
use tracing::trace;

/// Classifies the single-face path from smoothed EAR/MAR values.
///
/// Consecutive-frame counters debounce single-frame noise. The drowsy and
/// yawn counters are mutually exclusive: whichever trigger condition holds on
/// a frame resets the other counter to zero that same frame.
pub struct StatusClassifier {
    config: DebounceConfig,
    drowsy_frames: u32,
    yawn_frames: u32,
}

impl StatusClassifier {
    pub fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            drowsy_frames: 0,
            yawn_frames: 0,
        }
    }

    /// Classify one frame. Total: always returns exactly one status.
    pub fn classify(&mut self, ear: f32, mar: f32) -> Status {
        if ear < self.config.drowsy_ear_threshold {
            self.drowsy_frames += 1;
            self.yawn_frames = 0;
        } else if mar > self.config.yawn_mar_threshold {
            self.yawn_frames += 1;
            self.drowsy_frames = 0;
        } else {
            self.drowsy_frames = 0;
            self.yawn_frames = 0;
        }

        trace!(
            drowsy = self.drowsy_frames,
            yawn = self.yawn_frames,
            "debounce counters"
        );

        // Drowsy outranks Yawning. With mutually exclusive counters both
        // thresholds cannot currently be met at once, but the priority must
        // hold if the counters are ever decoupled.
        if self.drowsy_frames >= self.config.drowsy_consecutive_frames {
            Status::Drowsy
        } else if self.yawn_frames >= self.config.yawn_consecutive_frames {
            Status::Yawning
        } else {
            Status::Active
        }
    }

    pub fn drowsy_frames(&self) -> u32 {
        self.drowsy_frames
    }

    pub fn yawn_frames(&self) -> u32 {
        self.yawn_frames
    }

    pub fn reset(&mut self) {
        self.drowsy_frames = 0;
        self.yawn_frames = 0;
    }
}

impl Default for StatusClassifier {
    fn default() -> Self {
        Self::new(DebounceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_drowsy_on_fifth_frame_not_before() {
        let mut classifier = StatusClassifier::default();
        for frame in 1..=4 {
            assert_eq!(
                classifier.classify(0.15, 0.0),
                Status::Active,
                "frame {frame} should still be Active"
            );
        }
        assert_eq!(classifier.classify(0.15, 0.0), Status::Drowsy);
    }

    #[test]
    fn test_drowsy_holds_while_condition_persists() {
        let mut classifier = StatusClassifier::default();
        let mut statuses = Vec::new();
        for _ in 0..10 {
            statuses.push(classifier.classify(0.15, 0.0));
        }
        assert!(statuses[..4].iter().all(|s| *s == Status::Active));
        assert!(statuses[4..].iter().all(|s| *s == Status::Drowsy));
    }

    #[test]
    fn test_yawning_on_third_frame() {
        let mut classifier = StatusClassifier::default();
        assert_eq!(classifier.classify(0.3, 0.8), Status::Active);
        assert_eq!(classifier.classify(0.3, 0.8), Status::Active);
        assert_eq!(classifier.classify(0.3, 0.8), Status::Yawning);
    }

    #[test]
    fn test_counters_mutually_exclusive() {
        let mut classifier = StatusClassifier::default();
        classifier.classify(0.3, 0.8);
        classifier.classify(0.3, 0.8);
        assert_eq!(classifier.yawn_frames(), 2);

        // A drowsy frame resets the yawn counter the same frame
        classifier.classify(0.15, 0.8);
        assert_eq!(classifier.drowsy_frames(), 1);
        assert_eq!(classifier.yawn_frames(), 0);

        // And a yawn frame resets the drowsy counter
        classifier.classify(0.3, 0.8);
        assert_eq!(classifier.drowsy_frames(), 0);
        assert_eq!(classifier.yawn_frames(), 1);
    }

    #[test]
    fn test_low_ear_takes_precedence_over_high_mar() {
        // EAR below threshold wins the branch even when MAR also qualifies
        let mut classifier = StatusClassifier::default();
        for _ in 0..5 {
            classifier.classify(0.15, 0.9);
        }
        assert_eq!(classifier.drowsy_frames(), 5);
        assert_eq!(classifier.yawn_frames(), 0);
        assert_eq!(classifier.classify(0.15, 0.9), Status::Drowsy);
    }

    #[test]
    fn test_neutral_frame_resets_both() {
        let mut classifier = StatusClassifier::default();
        classifier.classify(0.15, 0.0);
        classifier.classify(0.3, 0.8);
        classifier.classify(0.3, 0.3);
        assert_eq!(classifier.drowsy_frames(), 0);
        assert_eq!(classifier.yawn_frames(), 0);
    }

    #[test]
    fn test_reset() {
        let mut classifier = StatusClassifier::default();
        for _ in 0..4 {
            classifier.classify(0.15, 0.0);
        }
        classifier.reset();
        assert_eq!(classifier.classify(0.15, 0.0), Status::Active);
        assert_eq!(classifier.drowsy_frames(), 1);
    }

    proptest! {
        #[test]
        fn prop_classification_is_total(
            frames in prop::collection::vec((0.0f32..1.0, 0.0f32..2.0), 1..50)
        ) {
            let mut classifier = StatusClassifier::default();
            for (ear, mar) in frames {
                let status = classifier.classify(ear, mar);
                prop_assert!(matches!(
                    status,
                    Status::Active | Status::Drowsy | Status::Yawning
                ));
            }
        }

        #[test]
        fn prop_at_most_one_counter_nonzero(
            frames in prop::collection::vec((0.0f32..1.0, 0.0f32..2.0), 1..50)
        ) {
            let mut classifier = StatusClassifier::default();
            for (ear, mar) in frames {
                classifier.classify(ear, mar);
                prop_assert!(
                    classifier.drowsy_frames() == 0 || classifier.yawn_frames() == 0
                );
            }
        }
    }
}
