//! Ordered event storage with layer filtering

use crate::types::RawEvent;

/// The parsed events of one trace, in source line order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventStore {
    events: Vec<RawEvent>,
}

impl EventStore {
    pub fn from_events(events: Vec<RawEvent>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawEvent> {
        self.events.iter()
    }

    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    /// Events whose layer equals `layer` exactly (case-sensitive)
    pub fn events_by_layer(&self, layer: &str) -> Vec<&RawEvent> {
        self.events.iter().filter(|e| e.layer == layer).collect()
    }

    /// Distinct layer tags in order of first appearance
    pub fn layers(&self) -> Vec<&str> {
        let mut layers: Vec<&str> = Vec::new();
        for event in &self.events {
            if !layers.contains(&event.layer.as_str()) {
                layers.push(&event.layer);
            }
        }
        layers
    }
}
