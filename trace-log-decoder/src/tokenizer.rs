//! Line tokenizer
//!
//! Splits exported trace text into [`RawEvent`]s. Each line must look like
//!
//! ```text
//! 2026-02-03 10:15:23.456  [RRC] RRC Connection Request
//! ```
//!
//! Lines that do not have this shape are skipped without error, since
//! exported traces routinely interleave banners, hex dumps and blank lines.

use crate::types::{DecoderError, RawEvent, Result, Timestamp};
use chrono::NaiveDateTime;
use regex::Regex;
use std::sync::LazyLock;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3})\s+\[(\w+)\]\s+(.+)")
        .expect("line pattern is valid")
});

/// Tokenize a whole trace into events, preserving line order
pub fn tokenize(text: &str) -> Result<Vec<RawEvent>> {
    let mut events = Vec::new();

    for (index, line) in text.lines().enumerate() {
        if let Some(event) = parse_line(line, index + 1)? {
            events.push(event);
        }
    }

    Ok(events)
}

/// Parse a single line
///
/// # Returns
/// * `Ok(Some(event))` if the line matches the record pattern
/// * `Ok(None)` for blank or non-matching lines
/// * `Err(TimestampParse)` if the line matches but its date-time is invalid
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<RawEvent>> {
    if line.trim().is_empty() {
        return Ok(None);
    }

    let Some(caps) = LINE_PATTERN.captures(line) else {
        log::trace!("Skipping line {}: {:?}", line_number, line);
        return Ok(None);
    };

    let timestamp = parse_timestamp(&caps[1], line_number)?;

    Ok(Some(RawEvent {
        timestamp,
        layer: caps[2].to_string(),
        message: caps[3].to_string(),
    }))
}

fn parse_timestamp(text: &str, line_number: usize) -> Result<Timestamp> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|source| {
        DecoderError::TimestampParse {
            line: line_number,
            text: text.to_string(),
            source,
        }
    })
}
