//! Event fan-out to the log and feedback sinks

use crate::MonitorEvent;
use activity_log::{ActivityLogger, SessionAction};
use feedback::{FeedbackQueue, Priority};
use tokio::sync::mpsc;
use tracing::info;

/// Drains the pipeline event channel into the activity log and the voice
/// feedback queue. Runs as its own task so log and speech I/O never touch
/// the frame path; the task ends when every pipeline sender is dropped.
pub struct EventRouter {
    events: mpsc::Receiver<MonitorEvent>,
    logger: ActivityLogger,
    feedback: FeedbackQueue,
}

impl EventRouter {
    pub fn new(
        events: mpsc::Receiver<MonitorEvent>,
        logger: ActivityLogger,
        feedback: FeedbackQueue,
    ) -> Self {
        Self {
            events,
            logger,
            feedback,
        }
    }

    /// Drain events until the channel closes, then wind down the feedback
    /// consumer with its bounded wait.
    pub async fn run(mut self) -> ActivityLogger {
        while let Some(event) = self.events.recv().await {
            self.handle(event);
        }
        info!("event channel closed, router draining complete");
        self.feedback.shutdown().await;
        self.logger
    }

    fn handle(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::SessionStarted => {
                self.logger.log_session(SessionAction::Started);
                self.feedback.reset_timing();
            }
            MonitorEvent::SessionStopped => {
                self.logger.log_session(SessionAction::Stopped);
            }
            MonitorEvent::StatusChanged {
                old,
                new,
                ear,
                mar,
                at,
            } => {
                self.logger.log_status_change(old, new, ear, mar, at);
                self.feedback.notify_status(new, at);
            }
            MonitorEvent::EmergencyTriggered { inactive } => {
                self.logger.log_emergency(inactive);
                self.feedback.notify_message(
                    "Emergency alert! Please respond immediately!",
                    Priority::High,
                );
            }
            MonitorEvent::ReturnedToActive { total, ear, mar } => {
                self.logger.log_return_to_active(total, ear, mar);
            }
        }
    }
}
