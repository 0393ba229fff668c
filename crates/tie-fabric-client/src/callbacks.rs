// crates/tie-fabric-client/src/callbacks.rs
// ============================================================================
// Module: Event Handlers
// Description: Handler traits and translating adapters for inbound events.
// Purpose: Hand user code canonical event shapes, never raw wire payloads.
// Dependencies: tie-fabric-bus, tie-fabric-core
// ============================================================================

//! ## Overview
//! One handler trait per event kind, each with a single hook receiving the
//! canonical event plus the original raw payload bytes. Fixed adapters
//! implement the bus [`EventSink`], run the wire translation, and then
//! invoke the user handler; translation and delivery are composed rather
//! than inherited.
//! Invariants:
//! - Handlers run on the transport's delivery thread and must be safe to
//!   invoke concurrently across distinct events.
//! - Payloads that fail translation are dropped with a telemetry
//!   diagnostic; the delivery thread never unwinds.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use tie_fabric_bus::fabric::EventSink;
use tie_fabric_core::events::DetectionEvent;
use tie_fabric_core::events::FirstInstanceEvent;
use tie_fabric_core::events::ReputationChangeEvent;
use tie_fabric_core::events::translate_detection;
use tie_fabric_core::events::translate_first_instance;
use tie_fabric_core::events::translate_reputation_change;

use crate::telemetry::DroppedEventMetric;
use crate::telemetry::Telemetry;

// ============================================================================
// SECTION: Handler Traits
// ============================================================================

/// Receives reputation-change events for files or certificates.
pub trait ReputationChangeHandler: Send + Sync {
    /// Invoked once per reputation-change event.
    fn on_reputation_change(&self, event: &ReputationChangeEvent, raw: &[u8]);
}

/// Receives file detection events.
pub trait DetectionHandler: Send + Sync {
    /// Invoked once per detection event.
    fn on_detection(&self, event: &DetectionEvent, raw: &[u8]);
}

/// Receives file first-instance events.
pub trait FirstInstanceHandler: Send + Sync {
    /// Invoked once per first-instance event.
    fn on_first_instance(&self, event: &FirstInstanceEvent, raw: &[u8]);
}

// ============================================================================
// SECTION: Translating Adapters
// ============================================================================

/// Adapter translating reputation-change payloads before handler dispatch.
pub(crate) struct ReputationChangeAdapter {
    /// User handler invoked with the canonical event.
    pub(crate) handler: Arc<dyn ReputationChangeHandler>,
    /// Telemetry hook for dropped payloads.
    pub(crate) telemetry: Arc<dyn Telemetry>,
}

impl EventSink for ReputationChangeAdapter {
    fn deliver(&self, topic: &str, payload: &[u8]) {
        match translate_reputation_change(payload) {
            Ok(event) => self.handler.on_reputation_change(&event, payload),
            Err(err) => self.telemetry.record_dropped_event(&DroppedEventMetric {
                topic: topic.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}

/// Adapter translating detection payloads before handler dispatch.
pub(crate) struct DetectionAdapter {
    /// User handler invoked with the canonical event.
    pub(crate) handler: Arc<dyn DetectionHandler>,
    /// Telemetry hook for dropped payloads.
    pub(crate) telemetry: Arc<dyn Telemetry>,
}

impl EventSink for DetectionAdapter {
    fn deliver(&self, topic: &str, payload: &[u8]) {
        match translate_detection(payload) {
            Ok(event) => self.handler.on_detection(&event, payload),
            Err(err) => self.telemetry.record_dropped_event(&DroppedEventMetric {
                topic: topic.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}

/// Adapter translating first-instance payloads before handler dispatch.
pub(crate) struct FirstInstanceAdapter {
    /// User handler invoked with the canonical event.
    pub(crate) handler: Arc<dyn FirstInstanceHandler>,
    /// Telemetry hook for dropped payloads.
    pub(crate) telemetry: Arc<dyn Telemetry>,
}

impl EventSink for FirstInstanceAdapter {
    fn deliver(&self, topic: &str, payload: &[u8]) {
        match translate_first_instance(payload) {
            Ok(event) => self.handler.on_first_instance(&event, payload),
            Err(err) => self.telemetry.record_dropped_event(&DroppedEventMetric {
                topic: topic.to_string(),
                reason: err.to_string(),
            }),
        }
    }
}
