//! CSV event logger

use crate::{LogError, LogStats};
use chrono::Local;
use classifier::Status;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{error, info};

/// One row of the activity log. The column names match the on-disk header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogRecord {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Time")]
    pub time: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Duration_Seconds")]
    pub duration_seconds: f64,
    #[serde(rename = "EAR_Value")]
    pub ear_value: String,
    #[serde(rename = "MAR_Value")]
    pub mar_value: String,
    /// Seconds of the inactive period that just ended, or "-" when the row
    /// does not close one
    #[serde(rename = "Inactive_Duration")]
    pub inactive_duration: String,
}

/// Detection session boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Started,
    Stopped,
}

impl SessionAction {
    fn label(self) -> &'static str {
        match self {
            SessionAction::Started => "started",
            SessionAction::Stopped => "stopped",
        }
    }
}

/// Append-only CSV sink for attentiveness events.
///
/// Tracks the running inactive period itself so every row that closes one
/// carries its total duration. All log methods swallow write failures after
/// reporting them; bookkeeping is updated regardless so a transient disk
/// error never desynchronizes the tracking.
pub struct ActivityLogger {
    path: PathBuf,
    inactive_since: Option<Instant>,
}

impl ActivityLogger {
    /// Open the log at `path`, writing the header if the file is new.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, LogError> {
        let path = path.into();
        if !path.exists() {
            Self::write_header(&path)?;
            info!("activity log created at {}", path.display());
        }
        Ok(Self {
            path,
            inactive_since: None,
        })
    }

    fn write_header(path: &Path) -> Result<(), LogError> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "Timestamp",
            "Date",
            "Time",
            "Status",
            "Description",
            "Duration_Seconds",
            "EAR_Value",
            "MAR_Value",
            "Inactive_Duration",
        ])?;
        writer.flush()?;
        Ok(())
    }

    fn append(&self, record: &LogRecord) -> Result<(), LogError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(record)?;
        writer.flush()?;
        Ok(())
    }

    fn emit(&self, record: LogRecord) {
        if let Err(e) = self.append(&record) {
            // Recoverable: report and carry on with in-memory state intact
            error!("activity log write failed: {e}");
        }
    }

    fn record(
        status: &str,
        description: String,
        duration_seconds: f64,
        ear: f32,
        mar: f32,
        inactive: Option<f64>,
    ) -> LogRecord {
        let now = Local::now();
        LogRecord {
            timestamp: now.format("%Y-%m-%d %H:%M:%S").to_string(),
            date: now.format("%Y-%m-%d").to_string(),
            time: now.format("%H:%M:%S").to_string(),
            status: status.to_string(),
            description,
            duration_seconds,
            ear_value: format!("{ear:.3}"),
            mar_value: format!("{mar:.3}"),
            inactive_duration: inactive.map_or_else(|| "-".to_string(), |d| format!("{d:.1}")),
        }
    }

    /// Append a free-form event row
    pub fn log_event(
        &self,
        status: &str,
        description: &str,
        duration_seconds: f64,
        ear: f32,
        mar: f32,
        inactive: Option<f64>,
    ) {
        self.emit(Self::record(
            status,
            description.to_string(),
            duration_seconds,
            ear,
            mar,
            inactive,
        ));
    }

    /// Append a status-change row, maintaining the inactive-period tracking.
    pub fn log_status_change(&mut self, old: Status, new: Status, ear: f32, mar: f32, now: Instant) {
        let mut inactive = None;

        match (old.is_active(), new.is_active()) {
            // Inactive period just ended
            (false, true) => {
                if let Some(since) = self.inactive_since.take() {
                    inactive = Some(now.duration_since(since).as_secs_f64());
                }
            }
            // Inactive period just began
            (true, false) => {
                self.inactive_since = Some(now);
            }
            // Staying inactive keeps the running period; staying active has none
            (false, false) | (true, true) => {}
        }

        let description = format!("Status changed from {old} to {new}");
        self.emit(Self::record(
            new.label(),
            description,
            0.0,
            ear,
            mar,
            inactive,
        ));
    }

    /// Append the return-to-active row carrying the closed period's total.
    pub fn log_return_to_active(&mut self, total: Duration, ear: f32, mar: f32) {
        let secs = total.as_secs_f64();
        let description =
            format!("User returned to active state after {secs:.1} seconds of inactivity");
        self.inactive_since = None;
        self.emit(Self::record(
            Status::Active.label(),
            description,
            0.0,
            ear,
            mar,
            Some(secs),
        ));
    }

    /// Append the emergency-trigger row.
    pub fn log_emergency(&self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        let description =
            format!("Emergency protocol triggered after {secs:.1} seconds of inactivity");
        self.emit(Self::record(
            "Emergency",
            description,
            secs,
            0.0,
            0.0,
            Some(secs),
        ));
    }

    /// Append a session boundary row; resets the inactive tracking.
    pub fn log_session(&mut self, action: SessionAction) {
        self.inactive_since = None;
        let description = format!("Detection session {}", action.label());
        self.emit(Self::record("System", description, 0.0, 0.0, 0.0, None));
    }

    pub fn reset_inactive_tracking(&mut self) {
        self.inactive_since = None;
    }

    /// The inactive period currently being tracked, if any
    pub fn current_inactive_duration(&self, now: Instant) -> Option<Duration> {
        self.inactive_since.map(|since| now.duration_since(since))
    }

    /// Read the whole log back and compute aggregate statistics.
    pub fn stats(&self) -> Result<LogStats, LogError> {
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut records = Vec::new();
        for row in reader.deserialize::<LogRecord>() {
            records.push(row?);
        }
        Ok(LogStats::from_records(&records))
    }

    /// Truncate the log back to just the header.
    pub fn clear(&mut self) -> Result<(), LogError> {
        self.inactive_since = None;
        Self::write_header(&self.path)?;
        info!("activity log cleared");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logger_in(dir: &tempfile::TempDir) -> ActivityLogger {
        ActivityLogger::new(dir.path().join("attentiveness_log.csv")).unwrap()
    }

    #[test]
    fn test_header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let _first = ActivityLogger::new(&path).unwrap();
        let _second = ActivityLogger::new(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("Timestamp").count(), 1);
    }

    #[test]
    fn test_status_change_rows_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = logger_in(&dir);
        let start = Instant::now();

        logger.log_status_change(Status::Active, Status::Drowsy, 0.15, 0.1, start);
        logger.log_status_change(
            Status::Drowsy,
            Status::Active,
            0.30,
            0.1,
            start + Duration::from_secs_f64(4.0),
        );

        let stats = logger.stats().unwrap();
        assert_eq!(stats.total_events, 2);
        assert_eq!(stats.status_counts.get("Drowsy"), Some(&1));
        assert_eq!(stats.status_counts.get("Active"), Some(&1));

        let inactive = stats.inactive.unwrap();
        assert_eq!(inactive.periods, 1);
        assert!((inactive.max_secs - 4.0).abs() < 0.2);
    }

    #[test]
    fn test_inactive_period_spans_multiple_inactive_statuses() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = logger_in(&dir);
        let start = Instant::now();

        logger.log_status_change(Status::Active, Status::Yawning, 0.3, 0.7, start);
        // Staying inactive must not restart the period
        logger.log_status_change(
            Status::Yawning,
            Status::Drowsy,
            0.1,
            0.2,
            start + Duration::from_secs(2),
        );
        logger.log_status_change(
            Status::Drowsy,
            Status::Active,
            0.3,
            0.1,
            start + Duration::from_secs(6),
        );

        let inactive = logger.stats().unwrap().inactive.unwrap();
        assert_eq!(inactive.periods, 1);
        assert!((inactive.min_secs - 6.0).abs() < 0.2);
    }

    #[test]
    fn test_emergency_and_session_rows() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = logger_in(&dir);

        logger.log_session(SessionAction::Started);
        logger.log_emergency(Duration::from_secs_f64(5.2));
        logger.log_session(SessionAction::Stopped);

        let stats = logger.stats().unwrap();
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.status_counts.get("System"), Some(&2));
        assert_eq!(stats.status_counts.get("Emergency"), Some(&1));
    }

    #[test]
    fn test_session_resets_inactive_tracking() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = logger_in(&dir);
        let start = Instant::now();

        logger.log_status_change(Status::Active, Status::Drowsy, 0.1, 0.1, start);
        assert!(logger.current_inactive_duration(start).is_some());

        logger.log_session(SessionAction::Stopped);
        assert!(logger.current_inactive_duration(start).is_none());
    }

    #[test]
    fn test_clear_truncates_to_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut logger = logger_in(&dir);

        logger.log_session(SessionAction::Started);
        logger.clear().unwrap();

        let stats = logger.stats().unwrap();
        assert_eq!(stats.total_events, 0);
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut logger = ActivityLogger::new(&path).unwrap();

        // Remove the file out from under the logger; append reopens per write
        std::fs::remove_file(&path).unwrap();
        logger.log_session(SessionAction::Started);
        // No panic, and bookkeeping still works afterwards
        logger.log_status_change(Status::Active, Status::Drowsy, 0.1, 0.1, Instant::now());
    }
}
