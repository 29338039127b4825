//! Aggregate statistics over the activity log

use crate::LogRecord;
use serde::Serialize;
use std::collections::HashMap;

/// Summary of completed inactive periods found in the log
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InactiveDurationStats {
    pub periods: usize,
    pub min_secs: f64,
    pub max_secs: f64,
    pub avg_secs: f64,
}

/// Aggregate view computed by reading the log back
#[derive(Debug, Clone, Serialize)]
pub struct LogStats {
    pub total_events: usize,
    pub status_counts: HashMap<String, usize>,
    pub inactive: Option<InactiveDurationStats>,
}

impl LogStats {
    pub fn from_records(records: &[LogRecord]) -> Self {
        let mut status_counts: HashMap<String, usize> = HashMap::new();
        let mut durations = Vec::new();

        for record in records {
            *status_counts.entry(record.status.clone()).or_insert(0) += 1;
            // "-" marks rows that do not close an inactive period
            if let Ok(secs) = record.inactive_duration.parse::<f64>() {
                durations.push(secs);
            }
        }

        let inactive = if durations.is_empty() {
            None
        } else {
            let min_secs = durations.iter().copied().fold(f64::INFINITY, f64::min);
            let max_secs = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let avg_secs = durations.iter().sum::<f64>() / durations.len() as f64;
            Some(InactiveDurationStats {
                periods: durations.len(),
                min_secs,
                max_secs,
                avg_secs,
            })
        };

        Self {
            total_events: records.len(),
            status_counts,
            inactive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(status: &str, inactive: &str) -> LogRecord {
        LogRecord {
            timestamp: "2026-08-24 12:00:00".into(),
            date: "2026-08-24".into(),
            time: "12:00:00".into(),
            status: status.into(),
            description: String::new(),
            duration_seconds: 0.0,
            ear_value: "0.300".into(),
            mar_value: "0.100".into(),
            inactive_duration: inactive.into(),
        }
    }

    #[test]
    fn test_empty_log_has_no_inactive_stats() {
        let stats = LogStats::from_records(&[]);
        assert_eq!(stats.total_events, 0);
        assert!(stats.inactive.is_none());
    }

    #[test]
    fn test_counts_by_status() {
        let records = vec![
            record("Active", "-"),
            record("Drowsy", "-"),
            record("Drowsy", "-"),
        ];
        let stats = LogStats::from_records(&records);
        assert_eq!(stats.total_events, 3);
        assert_eq!(stats.status_counts.get("Drowsy"), Some(&2));
        assert_eq!(stats.status_counts.get("Active"), Some(&1));
    }

    #[test]
    fn test_inactive_duration_aggregation() {
        let records = vec![
            record("Active", "2.0"),
            record("Active", "6.0"),
            record("Drowsy", "-"),
        ];
        let inactive = LogStats::from_records(&records).inactive.unwrap();
        assert_eq!(inactive.periods, 2);
        assert_eq!(inactive.min_secs, 2.0);
        assert_eq!(inactive.max_secs, 6.0);
        assert_eq!(inactive.avg_secs, 4.0);
    }
}
