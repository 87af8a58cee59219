//! Decoder configuration types
//!
//! This module defines the small set of knobs the decoder library exposes.
//! KPI thresholds are not part of it: they are evaluated by the application
//! layer against the records the decoder produces.

use crate::types::{DecoderError, Result};
use serde::{Deserialize, Serialize};

/// Number of RRC events inspected after a handover trigger
pub const DEFAULT_HANDOVER_LOOKAHEAD: usize = 9;

/// Layer carrying connection setup and handover signalling
pub const DEFAULT_RRC_LAYER: &str = "RRC";

/// Layer substring identifying RF measurement reports
pub const DEFAULT_MEASUREMENT_LAYER: &str = "5G_NR";

/// How connection requests are paired with setup completions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetupPairing {
    /// Last request and last completion in the trace, regardless of order
    #[default]
    LastOccurrence,
    /// Last request and the first completion that follows it
    NearestFollowing,
}

/// Configuration for the decoder library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Exact layer tag for RRC events
    #[serde(default = "default_rrc_layer")]
    pub rrc_layer: String,

    /// Substring a layer tag must contain to carry measurement reports
    #[serde(default = "default_measurement_layer")]
    pub measurement_layer: String,

    /// Handover lookahead horizon in events (default: 9)
    #[serde(default = "default_handover_lookahead")]
    pub handover_lookahead: usize,

    /// Call setup pairing strategy
    #[serde(default)]
    pub setup_pairing: SetupPairing,
}

fn default_rrc_layer() -> String {
    DEFAULT_RRC_LAYER.to_string()
}

fn default_measurement_layer() -> String {
    DEFAULT_MEASUREMENT_LAYER.to_string()
}

fn default_handover_lookahead() -> usize {
    DEFAULT_HANDOVER_LOOKAHEAD
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            rrc_layer: default_rrc_layer(),
            measurement_layer: default_measurement_layer(),
            handover_lookahead: default_handover_lookahead(),
            setup_pairing: SetupPairing::default(),
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the RRC layer tag
    pub fn with_rrc_layer(mut self, layer: impl Into<String>) -> Self {
        self.rrc_layer = layer.into();
        self
    }

    /// Builder method: set the measurement layer substring
    pub fn with_measurement_layer(mut self, layer: impl Into<String>) -> Self {
        self.measurement_layer = layer.into();
        self
    }

    /// Builder method: set the handover lookahead horizon
    pub fn with_handover_lookahead(mut self, events: usize) -> Self {
        self.handover_lookahead = events;
        self
    }

    /// Builder method: set the call setup pairing strategy
    pub fn with_setup_pairing(mut self, pairing: SetupPairing) -> Self {
        self.setup_pairing = pairing;
        self
    }

    /// Check the configuration before decoding with it
    pub fn validate(&self) -> Result<()> {
        if self.handover_lookahead == 0 {
            return Err(DecoderError::InvalidConfig(
                "handover_lookahead must be at least 1".to_string(),
            ));
        }
        if self.rrc_layer.is_empty() {
            return Err(DecoderError::InvalidConfig(
                "rrc_layer must not be empty".to_string(),
            ));
        }
        if self.measurement_layer.is_empty() {
            return Err(DecoderError::InvalidConfig(
                "measurement_layer must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decoder_config_defaults() {
        let config = DecoderConfig::new();
        assert_eq!(config.rrc_layer, "RRC");
        assert_eq!(config.measurement_layer, "5G_NR");
        assert_eq!(config.handover_lookahead, 9);
        assert_eq!(config.setup_pairing, SetupPairing::LastOccurrence);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_decoder_config_builder() {
        let config = DecoderConfig::new()
            .with_rrc_layer("LTE_RRC")
            .with_measurement_layer("LTE")
            .with_handover_lookahead(4)
            .with_setup_pairing(SetupPairing::NearestFollowing);

        assert_eq!(config.rrc_layer, "LTE_RRC");
        assert_eq!(config.measurement_layer, "LTE");
        assert_eq!(config.handover_lookahead, 4);
        assert_eq!(config.setup_pairing, SetupPairing::NearestFollowing);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(DecoderConfig::new().with_handover_lookahead(0).validate().is_err());
        assert!(DecoderConfig::new().with_rrc_layer("").validate().is_err());
        assert!(DecoderConfig::new().with_measurement_layer("").validate().is_err());
    }
}
