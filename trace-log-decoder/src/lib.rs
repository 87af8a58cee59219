//! Protocol Trace Log Decoder Library
//!
//! A stateless library for turning exported modem protocol traces (timestamped,
//! layer-tagged text lines) into structured events and KPI records.
//!
//! # Architecture
//!
//! Decoding is a single forward pass:
//! - The tokenizer splits text into [`RawEvent`]s and skips noise lines
//! - The [`EventStore`] keeps them in order and filters by layer
//! - The KPI extractors derive RF measurements, call setup time and
//!   handover attempts from the stored events
//!
//! The library does NOT:
//! - Read binary trace formats
//! - Evaluate KPI thresholds
//! - Correlate events across traces
//! - Generate reports
//!
//! Threshold checks and reporting are in the application layer (trace-log-cli).
//!
//! # Example Usage
//!
//! ```
//! use trace_log_decoder::{DecoderConfig, TraceDecoder};
//!
//! let trace = "\
//! 2026-02-03 10:00:00.000  [RRC] RRC Reconfiguration (Handover Command) - Source Cell: 123
//! 2026-02-03 10:00:00.050  [RRC] RRC Reconfiguration Complete - Target Cell: 456
//! ";
//!
//! let decoder = TraceDecoder::new(DecoderConfig::new());
//! let log = decoder.decode_str(trace).unwrap();
//!
//! for handover in log.handovers() {
//!     println!(
//!         "{:?} -> {:?}: success={} ({:?} ms)",
//!         handover.source_cell, handover.target_cell, handover.success, handover.duration_ms
//!     );
//! }
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod kpi;
pub mod store;
pub mod tokenizer;
pub mod types;

// Re-export main types for convenience
pub use config::{DecoderConfig, SetupPairing, DEFAULT_HANDOVER_LOOKAHEAD};
pub use decoder::{TraceDecoder, TraceLog};
pub use kpi::{HandoverSummary, MeasurementSummary, ValueRange};
pub use store::EventStore;
pub use types::{
    DecoderError, HandoverAttempt, Measurement, RawEvent, Result, SetupAttempt, Timestamp,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
