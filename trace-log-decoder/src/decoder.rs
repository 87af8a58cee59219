//! Main decoder API
//!
//! This module provides the primary interface for the decoder library.
//! [`TraceDecoder`] turns trace text into a [`TraceLog`], which owns the parsed
//! events and derives KPI records from them on demand.

use crate::config::DecoderConfig;
use crate::kpi::{handover, measurement, setup_time, HandoverSummary};
use crate::store::EventStore;
use crate::tokenizer;
use crate::types::{HandoverAttempt, Measurement, RawEvent, Result, SetupAttempt};
use std::fs;
use std::path::Path;

/// The main decoder struct - entry point for all decoding operations
#[derive(Debug, Clone, Default)]
pub struct TraceDecoder {
    config: DecoderConfig,
}

impl TraceDecoder {
    /// Create a decoder with the given configuration
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode trace text that is already in memory
    ///
    /// # Arguments
    /// * `text` - Exported trace, one record per line
    ///
    /// # Returns
    /// * `Result<TraceLog>` - Err if the configuration is invalid or a
    ///   record line carries an impossible date-time
    ///
    /// # Example
    /// ```
    /// use trace_log_decoder::{DecoderConfig, TraceDecoder};
    ///
    /// let decoder = TraceDecoder::new(DecoderConfig::new());
    /// let log = decoder
    ///     .decode_str("2026-02-03 10:15:23.456  [RRC] RRC Connection Request")
    ///     .unwrap();
    /// assert_eq!(log.events().len(), 1);
    /// ```
    pub fn decode_str(&self, text: &str) -> Result<TraceLog> {
        self.config.validate()?;

        let events = tokenizer::tokenize(text)?;
        log::info!("Decoded {} events", events.len());

        Ok(TraceLog {
            store: EventStore::from_events(events),
            config: self.config.clone(),
        })
    }

    /// Read a text trace from disk and decode it
    ///
    /// # Example
    /// ```no_run
    /// use trace_log_decoder::TraceDecoder;
    /// use std::path::Path;
    ///
    /// let decoder = TraceDecoder::default();
    /// let log = decoder.decode_file(Path::new("trace.txt")).unwrap();
    /// println!("{} handovers", log.handovers().len());
    /// ```
    pub fn decode_file(&self, path: &Path) -> Result<TraceLog> {
        log::info!("Decoding trace file: {:?}", path);
        let text = fs::read_to_string(path)?;
        self.decode_str(&text)
    }
}

/// A decoded trace: the event store plus KPI derivations over it
#[derive(Debug, Clone)]
pub struct TraceLog {
    store: EventStore,
    config: DecoderConfig,
}

impl TraceLog {
    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn events(&self) -> &[RawEvent] {
        self.store.events()
    }

    pub fn events_by_layer(&self, layer: &str) -> Vec<&RawEvent> {
        self.store.events_by_layer(layer)
    }

    /// Complete RSRP/RSRQ/SINR readings, in event order
    pub fn measurements(&self) -> Vec<Measurement> {
        measurement::extract_measurements(self.store.iter(), &self.config.measurement_layer)
    }

    /// Connection setup time in milliseconds, per the configured pairing
    pub fn call_setup_time_ms(&self) -> Option<f64> {
        let rrc = self.rrc_events();
        setup_time::call_setup_time_ms(&rrc, self.config.setup_pairing)
    }

    /// Every connection request with its nearest following completion
    pub fn setup_attempts(&self) -> Vec<SetupAttempt> {
        setup_time::setup_attempts(&self.rrc_events())
    }

    /// Handover attempts, in trigger order
    pub fn handovers(&self) -> Vec<HandoverAttempt> {
        let attempts = handover::detect_handovers(&self.rrc_events(), self.config.handover_lookahead);
        log::debug!(
            "Detected {} handover attempts ({} successful)",
            attempts.len(),
            attempts.iter().filter(|a| a.success).count()
        );
        attempts
    }

    pub fn handover_summary(&self) -> HandoverSummary {
        HandoverSummary::from_attempts(&self.handovers())
    }

    fn rrc_events(&self) -> Vec<&RawEvent> {
        self.store.events_by_layer(&self.config.rrc_layer)
    }
}
