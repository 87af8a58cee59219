//! Call setup time
//!
//! Measures the time between an RRC connection request and the matching
//! setup completion.

use crate::config::SetupPairing;
use crate::types::{millis_between, RawEvent, SetupAttempt, Timestamp};

const CONNECTION_REQUEST: &str = "Connection Request";
const SETUP_COMPLETE: &str = "Setup Complete";

pub fn is_connection_request(message: &str) -> bool {
    message.contains(CONNECTION_REQUEST)
}

pub fn is_setup_complete(message: &str) -> bool {
    message.contains(SETUP_COMPLETE)
}

/// Setup time in milliseconds over a single layer's events
///
/// Returns `None` when no request or no completion was seen.
pub fn call_setup_time_ms(rrc_events: &[&RawEvent], pairing: SetupPairing) -> Option<f64> {
    match pairing {
        SetupPairing::LastOccurrence => last_occurrence(rrc_events),
        SetupPairing::NearestFollowing => nearest_following(rrc_events),
    }
}

/// Last request and last completion win; the result may be negative
fn last_occurrence(rrc_events: &[&RawEvent]) -> Option<f64> {
    let mut request_time: Option<Timestamp> = None;
    let mut complete_time: Option<Timestamp> = None;

    for event in rrc_events {
        if is_connection_request(&event.message) {
            request_time = Some(event.timestamp);
        } else if is_setup_complete(&event.message) {
            complete_time = Some(event.timestamp);
        }
    }

    Some(millis_between(request_time?, complete_time?))
}

fn nearest_following(rrc_events: &[&RawEvent]) -> Option<f64> {
    setup_attempts(rrc_events)
        .last()
        .and_then(|attempt| attempt.setup_time_ms)
}

/// Every connection request paired with the first completion after it
///
/// A request followed by another request before any completion is left
/// unpaired.
pub fn setup_attempts(rrc_events: &[&RawEvent]) -> Vec<SetupAttempt> {
    let mut attempts: Vec<SetupAttempt> = Vec::new();
    let mut pending: Option<Timestamp> = None;

    for event in rrc_events {
        if is_connection_request(&event.message) {
            if let Some(request_time) = pending.replace(event.timestamp) {
                attempts.push(unpaired(request_time));
            }
        } else if is_setup_complete(&event.message) {
            if let Some(request_time) = pending.take() {
                attempts.push(SetupAttempt {
                    request_time,
                    complete_time: Some(event.timestamp),
                    setup_time_ms: Some(millis_between(request_time, event.timestamp)),
                });
            }
        }
    }

    if let Some(request_time) = pending {
        attempts.push(unpaired(request_time));
    }

    attempts
}

fn unpaired(request_time: Timestamp) -> SetupAttempt {
    SetupAttempt {
        request_time,
        complete_time: None,
        setup_time_ms: None,
    }
}
