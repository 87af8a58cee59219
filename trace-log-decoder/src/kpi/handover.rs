//! Handover detection
//!
//! Scans RRC events for handover triggers and resolves each one with a
//! bounded lookahead over the events that follow it:
//!
//! 1. A trigger is any message matching [`is_handover_trigger`]
//! 2. The next `lookahead` events are inspected in order
//! 3. The first [`is_handover_complete`] event marks success and supplies the
//!    duration and target cell
//! 4. The first [`is_handover_failure`] event marks failure and ends the scan
//! 5. Running out of events or horizon marks failure as well
//!
//! Scanning resumes at the event right after each trigger, not after its
//! resolution, so a completion message that also reads as a trigger starts
//! an attempt of its own.

use crate::types::{millis_between, HandoverAttempt, RawEvent};
use regex::Regex;
use std::sync::LazyLock;

static SOURCE_CELL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Source Cell: ([0-9]+)").expect("source cell pattern is valid"));
static TARGET_CELL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Target Cell: ([0-9]+)").expect("target cell pattern is valid"));

/// Whether a message starts a handover
///
/// Vendors phrase this differently: "Handover Command", "(Handover)", or a
/// reconfiguration that mentions handover anywhere.
pub fn is_handover_trigger(message: &str) -> bool {
    message.contains("Handover Command")
        || message.contains("Handover)")
        || (message.contains("Reconfiguration") && message.contains("Handover"))
}

/// Whether a message completes a pending handover
pub fn is_handover_complete(message: &str) -> bool {
    message.contains("Reconfiguration Complete")
}

/// Whether a message aborts a pending handover
pub fn is_handover_failure(message: &str) -> bool {
    message.contains("Re-establishment")
}

pub fn source_cell(message: &str) -> Option<u32> {
    capture_cell(&SOURCE_CELL_PATTERN, message)
}

pub fn target_cell(message: &str) -> Option<u32> {
    capture_cell(&TARGET_CELL_PATTERN, message)
}

fn capture_cell(pattern: &Regex, message: &str) -> Option<u32> {
    pattern.captures(message)?.get(1)?.as_str().parse().ok()
}

/// Detect every handover attempt in `rrc_events`, in trigger order
pub fn detect_handovers(rrc_events: &[&RawEvent], lookahead: usize) -> Vec<HandoverAttempt> {
    rrc_events
        .iter()
        .enumerate()
        .filter(|(_, event)| is_handover_trigger(&event.message))
        .map(|(index, _)| resolve_attempt(rrc_events, index, lookahead))
        .collect()
}

/// Resolve the trigger at `index` against at most `lookahead` following events
fn resolve_attempt(rrc_events: &[&RawEvent], index: usize, lookahead: usize) -> HandoverAttempt {
    let trigger = rrc_events[index];
    let source = source_cell(&trigger.message);
    let end = index.saturating_add(lookahead).saturating_add(1).min(rrc_events.len());

    for next in &rrc_events[index + 1..end] {
        if is_handover_complete(&next.message) {
            let attempt = HandoverAttempt {
                timestamp: trigger.timestamp,
                source_cell: source,
                target_cell: target_cell(&next.message),
                success: true,
                duration_ms: Some(millis_between(trigger.timestamp, next.timestamp)),
            };
            log::debug!(
                "Handover at {} succeeded: {:?} -> {:?} in {:?} ms",
                trigger.timestamp,
                attempt.source_cell,
                attempt.target_cell,
                attempt.duration_ms
            );
            return attempt;
        }
        if is_handover_failure(&next.message) {
            log::debug!("Handover at {} failed: {}", trigger.timestamp, next.message);
            return HandoverAttempt::failed(trigger.timestamp, source);
        }
    }

    log::debug!(
        "Handover at {} unresolved within {} events",
        trigger.timestamp,
        lookahead
    );
    HandoverAttempt::failed(trigger.timestamp, source)
}
