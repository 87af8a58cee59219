//! Core types for the trace log decoder library
//!
//! This module defines the records the decoder emits when processing a text
//! trace. Every record is created once and never mutated afterwards; the
//! decoder holds no state between parses.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type used throughout the decoder
///
/// Exported traces carry wall-clock time without a zone, so timestamps are
/// kept naive and only ever compared against each other.
pub type Timestamp = NaiveDateTime;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Errors that can occur during decoding
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Invalid timestamp on line {line}: {text:?}")]
    TimestampParse {
        line: usize,
        text: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Invalid decoder configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A single trace line split into its three parts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Absolute timestamp, millisecond precision
    pub timestamp: Timestamp,
    /// Protocol layer tag without brackets (e.g. "RRC", "NAS", "5G_NR")
    pub layer: String,
    /// Remainder of the line after the layer tag
    pub message: String,
}

impl fmt::Display for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
            self.layer,
            self.message
        )
    }
}

/// RF measurement readings from one measurement report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: Timestamp,
    /// Reference signal received power (dBm)
    pub rsrp: i32,
    /// Reference signal received quality (dB)
    pub rsrq: i32,
    /// Signal to interference plus noise ratio (dB)
    pub sinr: i32,
}

/// Outcome of one detected handover trigger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoverAttempt {
    /// Timestamp of the trigger event
    pub timestamp: Timestamp,
    pub source_cell: Option<u32>,
    /// Only set when the handover completed
    pub target_cell: Option<u32>,
    pub success: bool,
    /// Trigger to completion, only set when the handover completed
    pub duration_ms: Option<f64>,
}

impl HandoverAttempt {
    /// A failed attempt with no resolution metadata
    pub fn failed(timestamp: Timestamp, source_cell: Option<u32>) -> Self {
        Self {
            timestamp,
            source_cell,
            target_cell: None,
            success: false,
            duration_ms: None,
        }
    }
}

/// One connection request paired with the completion that followed it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetupAttempt {
    pub request_time: Timestamp,
    pub complete_time: Option<Timestamp>,
    pub setup_time_ms: Option<f64>,
}

/// Elapsed milliseconds from `start` to `end` (negative if `end` is earlier)
pub fn millis_between(start: Timestamp, end: Timestamp) -> f64 {
    let delta = end - start;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1000.0,
        None => delta.num_milliseconds() as f64,
    }
}
