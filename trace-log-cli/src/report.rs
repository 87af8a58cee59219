//! Report generation
//!
//! Builds a per-trace KPI report and renders it as plain text or JSON.

use crate::thresholds::{CheckStatus, KpiCheck, KpiInputs, KpiThresholds};
use anyhow::Result;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use trace_log_decoder::{
    HandoverAttempt, HandoverSummary, Measurement, MeasurementSummary, TraceLog,
};

/// Event count for one layer tag
#[derive(Debug, Clone, Serialize)]
pub struct LayerCount {
    pub layer: String,
    pub events: usize,
}

/// KPI report for a single trace file
#[derive(Debug, Clone, Serialize)]
pub struct TraceReport {
    pub file: PathBuf,
    pub total_events: usize,
    pub layers: Vec<LayerCount>,
    pub measurements: Vec<Measurement>,
    pub measurement_summary: Option<MeasurementSummary>,
    pub call_setup_time_ms: Option<f64>,
    pub handovers: Vec<HandoverAttempt>,
    pub handover_summary: HandoverSummary,
    pub checks: Vec<KpiCheck>,
}

impl TraceReport {
    pub fn build(file: PathBuf, log: &TraceLog, thresholds: &KpiThresholds) -> Self {
        let store = log.store();
        let layers = store
            .layers()
            .into_iter()
            .map(|layer| LayerCount {
                layer: layer.to_string(),
                events: store.events_by_layer(layer).len(),
            })
            .collect();

        let measurements = log.measurements();
        let handovers = log.handovers();
        let call_setup_time_ms = log.call_setup_time_ms();
        let checks = thresholds.evaluate(&KpiInputs {
            measurements: &measurements,
            call_setup_time_ms,
            handovers: &handovers,
        });

        Self {
            file,
            total_events: store.len(),
            layers,
            measurement_summary: MeasurementSummary::from_measurements(&measurements),
            measurements,
            call_setup_time_ms,
            handover_summary: HandoverSummary::from_attempts(&handovers),
            handovers,
            checks,
        }
    }

    pub fn failed_checks(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Fail)
            .count()
    }
}

/// All trace reports plus the handover outcome across every trace
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub traces: Vec<TraceReport>,
    pub overall_handovers: HandoverSummary,
}

impl Report {
    pub fn new(traces: Vec<TraceReport>) -> Self {
        let overall_handovers =
            HandoverSummary::from_attempts(traces.iter().flat_map(|t| t.handovers.iter()));
        Self {
            traces,
            overall_handovers,
        }
    }

    pub fn failed_checks(&self) -> usize {
        self.traces.iter().map(TraceReport::failed_checks).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_txt(&self) -> String {
        let mut out = String::new();
        for trace in &self.traces {
            render_trace(&mut out, trace);
        }

        let overall = &self.overall_handovers;
        let _ = writeln!(out, "═══════════════════════════════════════════════");
        let _ = writeln!(out, "  Overall ({} traces)", self.traces.len());
        let _ = writeln!(out, "═══════════════════════════════════════════════");
        let _ = writeln!(
            out,
            "  Handovers: {} attempts, {} succeeded, {} failed ({:.1}%)",
            overall.attempts,
            overall.successes,
            overall.failures,
            overall.success_rate * 100.0
        );
        let _ = writeln!(out, "  Failed KPI checks: {}", self.failed_checks());
        out
    }
}

fn render_trace(out: &mut String, trace: &TraceReport) {
    let _ = writeln!(out, "═══════════════════════════════════════════════");
    let _ = writeln!(out, "  {}", trace.file.display());
    let _ = writeln!(out, "═══════════════════════════════════════════════");
    let _ = writeln!(out, "  Events: {}", trace.total_events);
    for layer in &trace.layers {
        let _ = writeln!(out, "    {:<12} {:>6}", layer.layer, layer.events);
    }

    let _ = writeln!(out, "\n  RF Measurements: {}", trace.measurements.len());
    if let Some(summary) = &trace.measurement_summary {
        let _ = writeln!(out, "    {:<6} {:>6} {:>6} {:>8}", "", "min", "max", "mean");
        for (name, range) in [("RSRP", summary.rsrp), ("RSRQ", summary.rsrq), ("SINR", summary.sinr)] {
            let _ = writeln!(
                out,
                "    {:<6} {:>6} {:>6} {:>8.1}",
                name, range.min, range.max, range.mean
            );
        }
    }

    match trace.call_setup_time_ms {
        Some(ms) => {
            let _ = writeln!(out, "\n  Call setup time: {:.1} ms", ms);
        }
        None => {
            let _ = writeln!(out, "\n  Call setup time: n/a");
        }
    }

    let summary = &trace.handover_summary;
    let _ = writeln!(
        out,
        "\n  Handovers: {} attempts, {} succeeded ({:.1}%)",
        summary.attempts,
        summary.successes,
        summary.success_rate * 100.0
    );
    for ho in &trace.handovers {
        let _ = writeln!(
            out,
            "    {}  {:>6} -> {:<6} {:<4} {}",
            ho.timestamp.format("%H:%M:%S%.3f"),
            cell(ho.source_cell),
            cell(ho.target_cell),
            if ho.success { "OK" } else { "FAIL" },
            ho.duration_ms
                .map(|d| format!("{:.1} ms", d))
                .unwrap_or_default()
        );
    }

    if !trace.checks.is_empty() {
        let _ = writeln!(out, "\n  KPI checks:");
        for check in &trace.checks {
            let observed = check
                .observed
                .map(|v| format!("{:.3}", v))
                .unwrap_or_else(|| "-".to_string());
            let _ = writeln!(
                out,
                "    [{:<4}] {:<24} observed {:>10}  limit {:.3}",
                check.status, check.kpi, observed, check.limit
            );
        }
    }
    let _ = writeln!(out);
}

fn cell(id: Option<u32>) -> String {
    id.map(|c| c.to_string()).unwrap_or_else(|| "?".to_string())
}
