//! RF measurement extraction
//!
//! Pulls RSRP/RSRQ/SINR readings out of measurement report messages such as
//! `Measurement Report: RSRP=-85dBm, RSRQ=-10dB, SINR=18dB`. A report that
//! lacks any of the three readings is dropped.

use crate::types::{Measurement, RawEvent};
use regex::Regex;
use std::sync::LazyLock;

const MEASUREMENT_REPORT: &str = "Measurement Report";

static RSRP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RSRP=(-?[0-9]+)dBm").expect("RSRP pattern is valid"));
static RSRQ_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"RSRQ=(-?[0-9]+)dB").expect("RSRQ pattern is valid"));
static SINR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SINR=(-?[0-9]+)dB").expect("SINR pattern is valid"));

/// True if the event is a measurement report on a layer containing `measurement_layer`
pub fn is_measurement_report(event: &RawEvent, measurement_layer: &str) -> bool {
    event.layer.contains(measurement_layer) && event.message.contains(MEASUREMENT_REPORT)
}

/// Extract all complete measurements, in event order
pub fn extract_measurements<'a, I>(events: I, measurement_layer: &str) -> Vec<Measurement>
where
    I: IntoIterator<Item = &'a RawEvent>,
{
    events
        .into_iter()
        .filter(|event| is_measurement_report(event, measurement_layer))
        .filter_map(|event| {
            let measurement = parse_measurement(event);
            if measurement.is_none() {
                log::debug!("Incomplete measurement report at {}: {}", event.timestamp, event.message);
            }
            measurement
        })
        .collect()
}

/// Parse the three readings from a single event's message
pub fn parse_measurement(event: &RawEvent) -> Option<Measurement> {
    Some(Measurement {
        timestamp: event.timestamp,
        rsrp: capture_int(&RSRP_PATTERN, &event.message)?,
        rsrq: capture_int(&RSRQ_PATTERN, &event.message)?,
        sinr: capture_int(&SINR_PATTERN, &event.message)?,
    })
}

fn capture_int(pattern: &Regex, message: &str) -> Option<i32> {
    pattern.captures(message)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::parse_line;

    fn event(line: &str) -> RawEvent {
        parse_line(line, 1).unwrap().unwrap()
    }

    #[test]
    fn test_full_report() {
        let e = event("2026-02-03 10:15:25.000  [5G_NR] Measurement Report: RSRP=-85dBm, RSRQ=-10dB, SINR=18dB");
        let measurements = extract_measurements([&e], "5G_NR");
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].rsrp, -85);
        assert_eq!(measurements[0].rsrq, -10);
        assert_eq!(measurements[0].sinr, 18);
        assert_eq!(measurements[0].timestamp, e.timestamp);
    }

    #[test]
    fn test_missing_field_drops_report() {
        let e = event("2026-02-03 10:15:25.000  [5G_NR] Measurement Report: RSRP=-85dBm, RSRQ=-10dB");
        assert!(extract_measurements([&e], "5G_NR").is_empty());
    }

    #[test]
    fn test_layer_is_substring_match() {
        let e = event("2026-02-03 10:15:25.000  [NR5G_NR_ML1] Measurement Report: RSRP=-90dBm, RSRQ=-11dB, SINR=-3dB");
        let measurements = extract_measurements([&e], "5G_NR");
        assert_eq!(measurements.len(), 1);
        assert_eq!(measurements[0].sinr, -3);
    }

    #[test]
    fn test_non_report_messages_ignored() {
        let plain = event("2026-02-03 10:00:01.000  [5G_NR] Measurement: RSRP=-88dBm Cell=456");
        let wrong_layer = event("2026-02-03 10:00:01.000  [RRC] Measurement Report: RSRP=-88dBm, RSRQ=-9dB, SINR=10dB");
        assert!(extract_measurements([&plain, &wrong_layer], "5G_NR").is_empty());
    }

    #[test]
    fn test_non_ascii_digits_dropped() {
        let e = event("2026-02-03 10:15:25.000  [5G_NR] Measurement Report: RSRP=-٨٥dBm, RSRQ=-10dB, SINR=18dB");
        assert!(parse_measurement(&e).is_none());
    }

    #[test]
    fn test_out_of_range_value_dropped() {
        let e = event("2026-02-03 10:15:25.000  [5G_NR] Measurement Report: RSRP=-99999999999dBm, RSRQ=-10dB, SINR=18dB");
        assert!(parse_measurement(&e).is_none());
    }
}
