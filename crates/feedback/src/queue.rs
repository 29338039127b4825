//! Producer/consumer speech queue

use crate::{messages_for, priority_for, FeedbackError, Priority};
use classifier::Status;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Speech sink collaborator. Implementations own the actual synthesis; a
/// slow or blocking sink only ever delays the consumer task, never the
/// frame pipeline.
pub trait FeedbackSink: Send + Sync {
    fn speak(&self, message: &str, priority: Priority) -> Result<(), FeedbackError>;
}

/// Default sink that logs spoken messages
pub struct TracingSink;

impl FeedbackSink for TracingSink {
    fn speak(&self, message: &str, priority: Priority) -> Result<(), FeedbackError> {
        tracing::info!(?priority, "speaking: {message}");
        Ok(())
    }
}

/// Feedback timing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Minimum gap between identical repeated statuses at normal priority
    pub min_repeat_interval: Duration,
    /// Bound on waiting for the consumer task during shutdown
    pub shutdown_timeout: Duration,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            min_repeat_interval: Duration::from_secs_f64(3.0),
            shutdown_timeout: Duration::from_secs(1),
        }
    }
}

/// State shared between the producing pipeline and the consumer task
struct Shared {
    queue: Mutex<VecDeque<(String, Priority)>>,
    notify: Notify,
    speaking: AtomicBool,
    running: AtomicBool,
}

impl Shared {
    /// Queue admission policy:
    /// - High clears pending normal messages and always enters.
    /// - Normal is dropped (not queued) while anything is pending or a
    ///   message is in flight.
    fn enqueue(&self, message: String, priority: Priority) -> bool {
        let mut queue = match self.queue.lock() {
            Ok(queue) => queue,
            Err(poisoned) => poisoned.into_inner(),
        };
        match priority {
            Priority::High => {
                queue.retain(|(_, p)| *p == Priority::High);
                queue.push_back((message, priority));
            }
            Priority::Normal => {
                if !queue.is_empty() || self.speaking.load(Ordering::SeqCst) {
                    debug!("normal-priority message dropped while another is pending");
                    return false;
                }
                queue.push_back((message, priority));
            }
        }
        drop(queue);
        self.notify.notify_one();
        true
    }

    fn pop(&self) -> Option<(String, Priority)> {
        match self.queue.lock() {
            Ok(mut queue) => queue.pop_front(),
            Err(poisoned) => poisoned.into_inner().pop_front(),
        }
    }
}

/// Pipeline-facing feedback queue with a single draining consumer task.
pub struct FeedbackQueue {
    config: FeedbackConfig,
    shared: Arc<Shared>,
    consumer: Option<JoinHandle<()>>,
    last_status: Option<Status>,
    last_spoken_at: Option<Instant>,
    rotation: HashMap<Status, usize>,
}

impl FeedbackQueue {
    pub fn new(sink: Arc<dyn FeedbackSink>, config: FeedbackConfig) -> Self {
        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            notify: Notify::new(),
            speaking: AtomicBool::new(false),
            running: AtomicBool::new(true),
        });
        let consumer = tokio::spawn(consume(Arc::clone(&shared), sink));
        Self {
            config,
            shared,
            consumer: Some(consumer),
            last_status: None,
            last_spoken_at: None,
            rotation: HashMap::new(),
        }
    }

    /// Announce a status, rotating through its message table. Identical
    /// repeated statuses are suppressed within the repeat interval unless
    /// the status maps to high priority.
    pub fn notify_status(&mut self, status: Status, now: Instant) {
        let priority = priority_for(status);

        if priority == Priority::Normal
            && self.last_status == Some(status)
            && self
                .last_spoken_at
                .is_some_and(|at| now.duration_since(at) < self.config.min_repeat_interval)
        {
            return;
        }

        let table = messages_for(status);
        let index = self.rotation.entry(status).or_insert(0);
        let message = table[*index % table.len()];

        // A dropped message keeps its rotation slot for the next attempt
        if self.shared.enqueue(message.to_string(), priority) {
            *index += 1;
            self.last_status = Some(status);
            self.last_spoken_at = Some(now);
        }
    }

    /// Enqueue a free-form message
    pub fn notify_message(&mut self, message: &str, priority: Priority) {
        self.shared.enqueue(message.to_string(), priority);
    }

    /// Allow the next status announcement regardless of the repeat window
    pub fn reset_timing(&mut self) {
        self.last_status = None;
        self.last_spoken_at = None;
    }

    /// Stop the consumer with a bounded wait; pending messages are dropped.
    pub async fn shutdown(&mut self) {
        self.shared.running.store(false, Ordering::SeqCst);
        self.shared.notify.notify_one();
        if let Some(mut handle) = self.consumer.take() {
            if tokio::time::timeout(self.config.shutdown_timeout, &mut handle)
                .await
                .is_err()
            {
                warn!("feedback consumer did not stop within the timeout, aborting");
                handle.abort();
            }
        }
    }
}

async fn consume(shared: Arc<Shared>, sink: Arc<dyn FeedbackSink>) {
    while shared.running.load(Ordering::SeqCst) {
        let Some((message, priority)) = shared.pop() else {
            shared.notify.notified().await;
            continue;
        };
        shared.speaking.store(true, Ordering::SeqCst);
        if let Err(e) = sink.speak(&message, priority) {
            warn!("feedback dropped: {e}");
        }
        shared.speaking.store(false, Ordering::SeqCst);
    }
}
