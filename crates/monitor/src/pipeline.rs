//! Per-frame control flow

use crate::{MonitorConfig, MonitorEvent};
use classifier::{PresenceTracker, Status, StatusClassifier};
use escalation::{EmergencyEscalator, FlashColor, InactivityTracker, TrackerEvent};
use face_landmarks::{FrameObservation, HeadPose};
use feature_extract::{EyeOpennessExtractor, FeatureSample, MouthOpennessExtractor};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Orchestrates one frame's journey through the pipeline.
///
/// All frame-path state lives here and is mutated on a single control path,
/// in a fixed order: multiplicity, presence, single-face classification,
/// inactivity tracking, event emission. Events are forwarded with `try_send`
/// so a slow subscriber can never stall frame processing.
pub struct MonitorPipeline {
    eye: EyeOpennessExtractor,
    mouth: MouthOpennessExtractor,
    presence: PresenceTracker,
    classifier: StatusClassifier,
    inactivity: InactivityTracker,
    escalator: EmergencyEscalator,
    events: mpsc::Sender<MonitorEvent>,
    last_status: Status,
    session_active: bool,
}

impl MonitorPipeline {
    pub fn new(
        config: &MonitorConfig,
        events: mpsc::Sender<MonitorEvent>,
        flash_tx: mpsc::Sender<FlashColor>,
        voice_tx: mpsc::Sender<String>,
    ) -> Self {
        Self {
            eye: EyeOpennessExtractor::new(config.eye.clone()),
            mouth: MouthOpennessExtractor::new(config.mouth.clone()),
            presence: PresenceTracker::new(config.classifier.presence.clone()),
            classifier: StatusClassifier::new(config.classifier.debounce.clone()),
            inactivity: InactivityTracker::new(config.escalation.inactivity_threshold),
            escalator: EmergencyEscalator::new(config.escalation.clone(), flash_tx, voice_tx),
            events,
            last_status: Status::Active,
            session_active: false,
        }
    }

    /// Classify one frame and fold it into the session state.
    ///
    /// Frames arriving outside a session are ignored and report the last
    /// known status.
    pub fn process_frame(&mut self, obs: &FrameObservation, pose: Option<&HeadPose>) -> Status {
        if !self.session_active {
            debug!("frame ignored, no session running");
            return self.last_status;
        }

        let status = match self.presence.observe(obs.face_count, obs.timestamp) {
            Some(status) => status,
            None => {
                let sample = FeatureSample {
                    ear: self.eye.extract(&obs.landmarks, pose),
                    mar: self.mouth.extract(&obs.landmarks),
                    timestamp: obs.timestamp,
                };
                self.classifier.classify(sample.ear, sample.mar)
            }
        };

        match self.inactivity.observe(status, obs.timestamp) {
            TrackerEvent::EmergencyDue { elapsed } => {
                self.escalator.trigger();
                self.send(MonitorEvent::EmergencyTriggered { inactive: elapsed });
            }
            TrackerEvent::ReturnedToActive { total } => {
                self.escalator.stop();
                self.send(MonitorEvent::ReturnedToActive {
                    total,
                    ear: self.eye.last_ear(),
                    mar: self.mouth.last_mar(),
                });
            }
            TrackerEvent::Idle | TrackerEvent::Inactive { .. } => {}
        }

        if status != self.last_status {
            self.send(MonitorEvent::StatusChanged {
                old: self.last_status,
                new: status,
                ear: self.eye.last_ear(),
                mar: self.mouth.last_mar(),
                at: obs.timestamp,
            });
            self.last_status = status;
        }

        status
    }

    /// Begin a detection session from a clean slate.
    pub fn start_session(&mut self) {
        info!("detection session started");
        self.reset_frame_state();
        self.session_active = true;
        self.send(MonitorEvent::SessionStarted);
    }

    /// End the detection session; frames are ignored until the next start.
    pub fn stop_session(&mut self) {
        if !self.session_active {
            return;
        }
        info!("detection session stopped");
        self.session_active = false;
        self.escalator.stop();
        self.reset_frame_state();
        self.send(MonitorEvent::SessionStopped);
    }

    fn reset_frame_state(&mut self) {
        self.eye.reset();
        self.mouth.reset();
        self.presence.reset();
        self.classifier.reset();
        self.inactivity.reset();
        self.last_status = Status::Active;
    }

    pub fn current_status(&self) -> Status {
        self.last_status
    }

    pub fn is_emergency_active(&self) -> bool {
        self.escalator.is_active()
    }

    /// Ordered shutdown: stop accepting frames, then wind down the alert
    /// tasks with a bounded wait. Consuming `self` closes the event channel,
    /// which lets the subscriber drain and flush.
    pub async fn shutdown(mut self) {
        self.stop_session();
        self.escalator.shutdown().await;
    }

    fn send(&self, event: MonitorEvent) {
        if let Err(e) = self.events.try_send(event) {
            // The frame path must never block on a subscriber
            warn!("monitor event dropped: {e}");
        }
    }
}
