//! KPI threshold evaluation
//!
//! Compares decoded KPI records against named numeric limits. Without a
//! `[thresholds]` table every default limit is checked; with one, only the
//! limits it lists are.

use serde::{Deserialize, Serialize};
use std::fmt;
use trace_log_decoder::{HandoverAttempt, HandoverSummary, Measurement};

/// Acceptable KPI limits
///
/// A key missing from the `[thresholds]` table leaves that limit unset, so
/// its check is skipped.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct KpiThresholds {
    /// Minimum RSRP (dBm)
    pub rsrp_min: Option<i32>,
    /// Minimum RSRQ (dB)
    pub rsrq_min: Option<i32>,
    /// Minimum SINR (dB)
    pub sinr_min: Option<i32>,
    /// Minimum handover success rate (0.0 - 1.0)
    pub handover_success_rate_min: Option<f64>,
    /// Maximum successful handover duration (ms)
    pub handover_duration_max_ms: Option<f64>,
    /// Maximum call setup time (ms)
    pub call_setup_time_max_ms: Option<f64>,
}

impl Default for KpiThresholds {
    fn default() -> Self {
        Self {
            rsrp_min: Some(-110),
            rsrq_min: Some(-15),
            sinr_min: Some(0),
            handover_success_rate_min: Some(0.95),
            handover_duration_max_ms: Some(100.0),
            call_setup_time_max_ms: Some(2000.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Fail,
    /// Nothing in the trace to check the limit against
    NoData,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Pass => f.pad("PASS"),
            CheckStatus::Fail => f.pad("FAIL"),
            CheckStatus::NoData => f.pad("N/A"),
        }
    }
}

/// Result of checking one KPI against its limit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiCheck {
    pub kpi: String,
    /// Worst observed value
    pub observed: Option<f64>,
    pub limit: f64,
    pub status: CheckStatus,
}

impl KpiCheck {
    fn at_least(kpi: &str, observed: Option<f64>, limit: f64) -> Self {
        Self::new(kpi, observed, limit, |v| v >= limit)
    }

    fn at_most(kpi: &str, observed: Option<f64>, limit: f64) -> Self {
        Self::new(kpi, observed, limit, |v| v <= limit)
    }

    fn new(kpi: &str, observed: Option<f64>, limit: f64, ok: impl Fn(f64) -> bool) -> Self {
        let status = match observed {
            None => CheckStatus::NoData,
            Some(v) if ok(v) => CheckStatus::Pass,
            Some(_) => CheckStatus::Fail,
        };
        Self {
            kpi: kpi.to_string(),
            observed,
            limit,
            status,
        }
    }
}

/// The KPI records of one trace, borrowed for evaluation
pub struct KpiInputs<'a> {
    pub measurements: &'a [Measurement],
    pub call_setup_time_ms: Option<f64>,
    pub handovers: &'a [HandoverAttempt],
}

impl KpiThresholds {
    /// Check every configured limit, in a fixed order
    pub fn evaluate(&self, inputs: &KpiInputs<'_>) -> Vec<KpiCheck> {
        let mut checks = Vec::new();
        let worst = |f: fn(&Measurement) -> i32| inputs.measurements.iter().map(f).min().map(f64::from);

        if let Some(limit) = self.rsrp_min {
            checks.push(KpiCheck::at_least("rsrp_dbm", worst(|m| m.rsrp), limit.into()));
        }
        if let Some(limit) = self.rsrq_min {
            checks.push(KpiCheck::at_least("rsrq_db", worst(|m| m.rsrq), limit.into()));
        }
        if let Some(limit) = self.sinr_min {
            checks.push(KpiCheck::at_least("sinr_db", worst(|m| m.sinr), limit.into()));
        }
        if let Some(limit) = self.call_setup_time_max_ms {
            checks.push(KpiCheck::at_most("call_setup_time_ms", inputs.call_setup_time_ms, limit));
        }
        if let Some(limit) = self.handover_success_rate_min {
            let summary = HandoverSummary::from_attempts(inputs.handovers);
            let rate = (summary.attempts > 0).then_some(summary.success_rate);
            checks.push(KpiCheck::at_least("handover_success_rate", rate, limit));
        }
        if let Some(limit) = self.handover_duration_max_ms {
            let longest = HandoverSummary::from_attempts(inputs.handovers).max_duration_ms;
            checks.push(KpiCheck::at_most("handover_duration_ms", longest, limit));
        }

        checks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trace_log_decoder::TraceDecoder;

    const LOG: &str = "
2026-02-03 10:15:23.456  [RRC] RRC Connection Request
2026-02-03 10:15:23.502  [RRC] RRC Connection Setup Complete
2026-02-03 10:15:25.000  [5G_NR] Measurement Report: RSRP=-85dBm, RSRQ=-10dB, SINR=18dB
2026-02-03 10:15:35.000  [5G_NR] Measurement Report: RSRP=-112dBm, RSRQ=-12dB, SINR=15dB
2026-02-03 10:15:40.000  [RRC] RRC Reconfiguration (Handover Command) - Source Cell: 1
2026-02-03 10:15:40.150  [RRC] RRC Reconfiguration Complete - Target Cell: 2
";

    fn check<'a>(checks: &'a [KpiCheck], kpi: &str) -> &'a KpiCheck {
        checks.iter().find(|c| c.kpi == kpi).unwrap()
    }

    #[test]
    fn test_default_thresholds_against_trace() {
        let log = TraceDecoder::default().decode_str(LOG).unwrap();
        let measurements = log.measurements();
        let handovers = log.handovers();
        let inputs = KpiInputs {
            measurements: &measurements,
            call_setup_time_ms: log.call_setup_time_ms(),
            handovers: &handovers,
        };
        let checks = KpiThresholds::default().evaluate(&inputs);
        assert_eq!(checks.len(), 6);

        let rsrp = check(&checks, "rsrp_dbm");
        assert_eq!(rsrp.observed, Some(-112.0));
        assert_eq!(rsrp.status, CheckStatus::Fail);

        assert_eq!(check(&checks, "rsrq_db").status, CheckStatus::Pass);
        assert_eq!(check(&checks, "sinr_db").status, CheckStatus::Pass);
        assert_eq!(check(&checks, "call_setup_time_ms").observed, Some(46.0));
        assert_eq!(check(&checks, "call_setup_time_ms").status, CheckStatus::Pass);
        assert_eq!(check(&checks, "handover_success_rate").status, CheckStatus::Pass);
        assert_eq!(check(&checks, "handover_duration_ms").status, CheckStatus::Fail);
    }

    #[test]
    fn test_no_data_and_unset_limits() {
        let thresholds = KpiThresholds {
            rsrp_min: None,
            rsrq_min: None,
            sinr_min: None,
            ..KpiThresholds::default()
        };
        let inputs = KpiInputs {
            measurements: &[],
            call_setup_time_ms: None,
            handovers: &[],
        };
        let checks = thresholds.evaluate(&inputs);
        assert_eq!(checks.len(), 3);
        assert!(checks.iter().all(|c| c.status == CheckStatus::NoData));
    }

    #[test]
    fn test_omitted_limits_are_not_checked() {
        let thresholds: KpiThresholds = toml::from_str("call_setup_time_max_ms = 5000.0").unwrap();
        assert_eq!(thresholds.call_setup_time_max_ms, Some(5000.0));
        assert_eq!(thresholds.rsrp_min, None);
        assert_eq!(thresholds.handover_duration_max_ms, None);

        let log = TraceDecoder::default()
            .decode_str("2026-02-03 10:10:00.000  [RRC] RRC Reconfiguration (Handover Command) - Source Cell: 111")
            .unwrap();
        let handovers = log.handovers();
        assert!(!handovers[0].success);
        let inputs = KpiInputs {
            measurements: &[],
            call_setup_time_ms: Some(46.0),
            handovers: &handovers,
        };
        let checks = thresholds.evaluate(&inputs);
        assert_eq!(checks.len(), 1);
        assert_eq!(checks[0].kpi, "call_setup_time_ms");
        assert_eq!(checks[0].status, CheckStatus::Pass);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(CheckStatus::Pass.to_string(), "PASS");
        assert_eq!(CheckStatus::Fail.to_string(), "FAIL");
        assert_eq!(CheckStatus::NoData.to_string(), "N/A");
    }
}
