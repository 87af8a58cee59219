//! KPI extraction from parsed events
//!
//! Each submodule derives one family of records from the event store:
//! RF measurements, call setup time, and handover attempts. The summaries
//! here only count and average; threshold evaluation belongs to the caller.

pub mod handover;
pub mod measurement;
pub mod setup_time;

use crate::types::{HandoverAttempt, Measurement};
use serde::{Deserialize, Serialize};

/// Aggregate outcome of a set of handover attempts
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HandoverSummary {
    pub attempts: usize,
    pub successes: usize,
    pub failures: usize,
    /// `successes / attempts`, 0.0 when there were no attempts
    pub success_rate: f64,
    pub mean_duration_ms: Option<f64>,
    pub max_duration_ms: Option<f64>,
}

impl HandoverSummary {
    pub fn from_attempts<'a, I>(attempts: I) -> Self
    where
        I: IntoIterator<Item = &'a HandoverAttempt>,
    {
        let mut summary = Self::default();
        let mut total_duration = 0.0;
        let mut timed = 0usize;

        for attempt in attempts {
            summary.attempts += 1;
            if attempt.success {
                summary.successes += 1;
            } else {
                summary.failures += 1;
            }
            if let Some(duration) = attempt.duration_ms {
                total_duration += duration;
                timed += 1;
                summary.max_duration_ms =
                    Some(summary.max_duration_ms.map_or(duration, |m| m.max(duration)));
            }
        }

        if summary.attempts > 0 {
            summary.success_rate = summary.successes as f64 / summary.attempts as f64;
        }
        if timed > 0 {
            summary.mean_duration_ms = Some(total_duration / timed as f64);
        }
        summary
    }
}

/// Min/max/mean of one measurement quantity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: i32,
    pub max: i32,
    pub mean: f64,
}

impl ValueRange {
    fn from_values(values: impl Iterator<Item = i32> + Clone) -> Option<Self> {
        let count = values.clone().count();
        if count == 0 {
            return None;
        }
        let sum: i64 = values.clone().map(i64::from).sum();
        Some(Self {
            min: values.clone().min()?,
            max: values.max()?,
            mean: sum as f64 / count as f64,
        })
    }
}

/// Spread of RF readings across a set of measurements
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeasurementSummary {
    pub count: usize,
    pub rsrp: ValueRange,
    pub rsrq: ValueRange,
    pub sinr: ValueRange,
}

impl MeasurementSummary {
    /// `None` for an empty slice
    pub fn from_measurements(measurements: &[Measurement]) -> Option<Self> {
        Some(Self {
            count: measurements.len(),
            rsrp: ValueRange::from_values(measurements.iter().map(|m| m.rsrp))?,
            rsrq: ValueRange::from_values(measurements.iter().map(|m| m.rsrq))?,
            sinr: ValueRange::from_values(measurements.iter().map(|m| m.sinr))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn attempt(success: bool, duration_ms: Option<f64>) -> HandoverAttempt {
        HandoverAttempt {
            timestamp: NaiveDate::from_ymd_opt(2026, 2, 3)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            source_cell: Some(1),
            target_cell: success.then_some(2),
            success,
            duration_ms,
        }
    }

    #[test]
    fn test_handover_summary() {
        let attempts = vec![
            attempt(true, Some(50.0)),
            attempt(true, Some(200.0)),
            attempt(false, None),
        ];
        let summary = HandoverSummary::from_attempts(&attempts);
        assert_eq!(summary.attempts, 3);
        assert_eq!(summary.successes, 2);
        assert_eq!(summary.failures, 1);
        assert!((summary.success_rate - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.mean_duration_ms, Some(125.0));
        assert_eq!(summary.max_duration_ms, Some(200.0));
    }

    #[test]
    fn test_empty_handover_summary() {
        let none: Vec<HandoverAttempt> = Vec::new();
        let summary = HandoverSummary::from_attempts(&none);
        assert_eq!(summary.attempts, 0);
        assert_eq!(summary.success_rate, 0.0);
        assert_eq!(summary.mean_duration_ms, None);
    }

    #[test]
    fn test_measurement_summary() {
        let ts = NaiveDate::from_ymd_opt(2026, 2, 3)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let measurements = [
            Measurement {
                timestamp: ts,
                rsrp: -85,
                rsrq: -10,
                sinr: 18,
            },
            Measurement {
                timestamp: ts,
                rsrp: -92,
                rsrq: -12,
                sinr: 15,
            },
        ];
        let summary = MeasurementSummary::from_measurements(&measurements).unwrap();
        assert_eq!(summary.count, 2);
        assert_eq!(summary.rsrp.min, -92);
        assert_eq!(summary.rsrp.max, -85);
        assert_eq!(summary.rsrp.mean, -88.5);
        assert_eq!(summary.sinr.min, 15);
        assert!(MeasurementSummary::from_measurements(&[]).is_none());
    }
}
