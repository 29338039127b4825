//! Emergency wake-up protocol

use crate::{EscalationConfig, EscalationError};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Visual alert signal consumed by the display collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlashColor {
    Red,
    Blue,
    /// Restore the normal display; sent once when the protocol stops
    Normal,
}

/// Rotating voice alert messages
pub const WAKE_UP_MESSAGES: [&str; 4] = [
    "Wake up! You've been inactive for too long!",
    "Attention! Please focus on your studies!",
    "Alert! Student attentiveness required!",
    "Please return to your study position!",
];

/// Two-state (Idle/Active) emergency alert protocol.
///
/// While Active, a visual task alternates a flash signal every
/// `flash_interval` and a voice task re-issues a wake-up message every
/// `voice_interval`. Both tasks re-check the shared active flag each period
/// and self-terminate within one period of `stop()`. `trigger()` while Active
/// and `stop()` while Idle are no-ops; both are safe from any call site.
pub struct EmergencyEscalator {
    config: EscalationConfig,
    active: Arc<AtomicBool>,
    flash_tx: mpsc::Sender<FlashColor>,
    voice_tx: mpsc::Sender<String>,
    tasks: Vec<JoinHandle<()>>,
}

impl EmergencyEscalator {
    pub fn new(
        config: EscalationConfig,
        flash_tx: mpsc::Sender<FlashColor>,
        voice_tx: mpsc::Sender<String>,
    ) -> Self {
        Self {
            config,
            active: Arc::new(AtomicBool::new(false)),
            flash_tx,
            voice_tx,
            tasks: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Activate the protocol. No-op if already Active.
    pub fn trigger(&mut self) {
        if self.active.swap(true, Ordering::SeqCst) {
            debug!("emergency already active, trigger ignored");
            return;
        }
        info!("emergency wake-up protocol activated");

        self.tasks.retain(|handle| !handle.is_finished());
        self.tasks.push(tokio::spawn(flash_loop(
            Arc::clone(&self.active),
            self.flash_tx.clone(),
            self.config.flash_interval,
        )));
        self.tasks.push(tokio::spawn(voice_loop(
            Arc::clone(&self.active),
            self.voice_tx.clone(),
            self.config.voice_interval,
        )));
    }

    /// Deactivate the protocol. No-op if already Idle. The periodic tasks
    /// observe the cleared flag on their next wake-up.
    pub fn stop(&mut self) {
        if !self.active.swap(false, Ordering::SeqCst) {
            return;
        }
        info!("emergency protocol stopped");
    }

    /// Stop and wait for the alert tasks with a bounded timeout per task.
    /// Never blocks indefinitely; a task that overruns is aborted and logged.
    pub async fn shutdown(&mut self) {
        self.stop();
        for mut handle in self.tasks.drain(..) {
            match tokio::time::timeout(self.config.task_join_timeout, &mut handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("alert task ended abnormally: {e}"),
                Err(_) => {
                    warn!("alert task did not stop within the join timeout, aborting");
                    handle.abort();
                }
            }
        }
    }
}

async fn flash_loop(
    active: Arc<AtomicBool>,
    tx: mpsc::Sender<FlashColor>,
    interval: std::time::Duration,
) {
    let mut red = true;
    while active.load(Ordering::SeqCst) {
        let color = if red { FlashColor::Red } else { FlashColor::Blue };
        red = !red;
        if tx.send(color).await.is_err() {
            warn!(
                "{}",
                EscalationError::ChannelUnavailable { channel: "visual" }
            );
            return;
        }
        tokio::time::sleep(interval).await;
    }
    // Restore the display on the way out
    let _ = tx.send(FlashColor::Normal).await;
}

async fn voice_loop(
    active: Arc<AtomicBool>,
    tx: mpsc::Sender<String>,
    interval: std::time::Duration,
) {
    let mut index = 0usize;
    while active.load(Ordering::SeqCst) {
        let message = WAKE_UP_MESSAGES[index % WAKE_UP_MESSAGES.len()];
        index += 1;
        if tx.send(message.to_string()).await.is_err() {
            warn!("{}", EscalationError::ChannelUnavailable { channel: "voice" });
            return;
        }
        tokio::time::sleep(interval).await;
    }
}
