//! Attentiveness Monitor - Main Entry Point

use activity_log::ActivityLogger;
use escalation::FlashColor;
use feedback::{FeedbackQueue, TracingSink};
use monitor::{
    init_logging, EventRouter, FrameSource, MonitorConfig, MonitorError, MonitorPipeline,
    ScriptedFrameSource,
};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    info!("=== Attentiveness Monitor v{} ===", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args().nth(1);
    let config = MonitorConfig::load(config_path.as_deref().map(Path::new))?;

    let logger = ActivityLogger::new(&config.log_path).map_err(MonitorError::from)?;
    let feedback = FeedbackQueue::new(Arc::new(TracingSink), config.feedback.clone());

    let (event_tx, event_rx) = mpsc::channel(config.event_capacity);
    let (flash_tx, mut flash_rx) = mpsc::channel::<FlashColor>(16);
    let (voice_tx, mut voice_rx) = mpsc::channel::<String>(16);

    // Display and speaker collaborators are not wired in; log their signals
    tokio::spawn(async move {
        while let Some(color) = flash_rx.recv().await {
            info!(?color, "display flash");
        }
    });
    tokio::spawn(async move {
        while let Some(message) = voice_rx.recv().await {
            warn!("voice alert: {message}");
        }
    });

    let router = tokio::spawn(EventRouter::new(event_rx, logger, feedback).run());
    let mut pipeline = MonitorPipeline::new(&config, event_tx, flash_tx, voice_tx);

    // No camera collaborator wired: run the scripted demo scenario
    let frame_interval = Duration::from_millis(33);
    let mut source = ScriptedFrameSource::demo(frame_interval);

    pipeline.start_session();
    while let Some(obs) = source.next_frame() {
        pipeline.process_frame(&obs, None);
        tokio::time::sleep(frame_interval).await;
    }
    pipeline.shutdown().await;

    let logger = router.await?;
    let stats = logger.stats().map_err(MonitorError::from)?;
    info!(
        total_events = stats.total_events,
        "session complete, log at {}",
        logger.path().display()
    );

    Ok(())
}
