// crates/tie-fabric-client/tests/event_callbacks.rs
// ============================================================================
// Module: Event Callback Tests
// Description: Handler registration and translated event delivery.
// ============================================================================
//! ## Overview
//! Ensures handler registration drives the fabric subscription registry,
//! handlers receive canonical event shapes plus the original raw payload,
//! and malformed payloads are dropped with a telemetry diagnostic.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;

use serde_json::json;
use tie_fabric_bus::fabric::Fabric;
use tie_fabric_bus::memory::MemoryFabric;
use tie_fabric_client::DetectionHandler;
use tie_fabric_client::FirstInstanceHandler;
use tie_fabric_client::ReputationChangeHandler;
use tie_fabric_client::ReputationClient;
use tie_fabric_client::telemetry::DroppedEventMetric;
use tie_fabric_client::telemetry::RequestMetric;
use tie_fabric_client::telemetry::Telemetry;
use tie_fabric_core::digest::HashAlgorithm;
use tie_fabric_core::events::DetectionEvent;
use tie_fabric_core::events::FirstInstanceEvent;
use tie_fabric_core::events::ReputationChangeEvent;
use tie_fabric_core::topics;

/// Handler recording reputation-change events and raw payloads.
#[derive(Default)]
struct RecordingRepChangeHandler {
    /// Received (event, raw payload) pairs.
    received: Mutex<Vec<(ReputationChangeEvent, Vec<u8>)>>,
}

impl ReputationChangeHandler for RecordingRepChangeHandler {
    fn on_reputation_change(&self, event: &ReputationChangeEvent, raw: &[u8]) {
        self.received.lock().unwrap().push((event.clone(), raw.to_vec()));
    }
}

/// Handler recording detection events.
#[derive(Default)]
struct RecordingDetectionHandler {
    /// Received events.
    received: Mutex<Vec<DetectionEvent>>,
}

impl DetectionHandler for RecordingDetectionHandler {
    fn on_detection(&self, event: &DetectionEvent, _raw: &[u8]) {
        self.received.lock().unwrap().push(event.clone());
    }
}

/// Handler recording first-instance events.
#[derive(Default)]
struct RecordingFirstInstanceHandler {
    /// Received events.
    received: Mutex<Vec<FirstInstanceEvent>>,
}

impl FirstInstanceHandler for RecordingFirstInstanceHandler {
    fn on_first_instance(&self, event: &FirstInstanceEvent, _raw: &[u8]) {
        self.received.lock().unwrap().push(event.clone());
    }
}

/// Telemetry recording dropped-event diagnostics.
#[derive(Default)]
struct RecordingTelemetry {
    /// Recorded dropped-event metrics.
    dropped: Mutex<Vec<DroppedEventMetric>>,
}

impl Telemetry for RecordingTelemetry {
    fn record_request(&self, _event: &RequestMetric) {}

    fn record_dropped_event(&self, event: &DroppedEventMetric) {
        self.dropped.lock().unwrap().push(event.clone());
    }
}

fn client_over(fabric: &Arc<MemoryFabric>) -> ReputationClient {
    let fabric: Arc<dyn Fabric> = Arc::clone(fabric) as Arc<dyn Fabric>;
    ReputationClient::new(fabric)
}

// ============================================================================
// SECTION: Registration
// ============================================================================

#[test]
fn registration_round_trip_drives_the_subscription_registry() {
    let fabric = Arc::new(MemoryFabric::new());
    let client = client_over(&fabric);

    let rep_change: Arc<dyn ReputationChangeHandler> =
        Arc::new(RecordingRepChangeHandler::default());
    let cert_change: Arc<dyn ReputationChangeHandler> =
        Arc::new(RecordingRepChangeHandler::default());
    let detection: Arc<dyn DetectionHandler> = Arc::new(RecordingDetectionHandler::default());
    let first_instance: Arc<dyn FirstInstanceHandler> =
        Arc::new(RecordingFirstInstanceHandler::default());

    client.add_file_reputation_change_handler(Arc::clone(&rep_change)).expect("add");
    client.add_certificate_reputation_change_handler(Arc::clone(&cert_change)).expect("add");
    client.add_file_detection_handler(Arc::clone(&detection)).expect("add");
    client.add_file_first_instance_handler(Arc::clone(&first_instance)).expect("add");

    let subscriptions = fabric.subscriptions();
    assert!(subscriptions.contains(&topics::FILE_REPUTATION_CHANGE_TOPIC.to_string()));
    assert!(subscriptions.contains(&topics::CERT_REPUTATION_CHANGE_TOPIC.to_string()));
    assert!(subscriptions.contains(&topics::FILE_DETECTION_TOPIC.to_string()));
    assert!(subscriptions.contains(&topics::FILE_FIRST_INSTANCE_TOPIC.to_string()));

    client.remove_file_reputation_change_handler(&rep_change).expect("remove");
    client.remove_certificate_reputation_change_handler(&cert_change).expect("remove");
    client.remove_file_detection_handler(&detection).expect("remove");
    client.remove_file_first_instance_handler(&first_instance).expect("remove");

    assert!(fabric.subscriptions().is_empty());
}

#[test]
fn removing_an_unregistered_handler_is_a_no_op() {
    let fabric = Arc::new(MemoryFabric::new());
    let client = client_over(&fabric);
    let handler: Arc<dyn DetectionHandler> = Arc::new(RecordingDetectionHandler::default());
    client.remove_file_detection_handler(&handler).expect("remove");
    assert!(fabric.subscriptions().is_empty());
}

// ============================================================================
// SECTION: Translated Delivery
// ============================================================================

#[test]
fn reputation_change_handler_receives_the_canonical_event() {
    let fabric = Arc::new(MemoryFabric::new());
    let client = client_over(&fabric);
    let handler = Arc::new(RecordingRepChangeHandler::default());
    let dyn_handler: Arc<dyn ReputationChangeHandler> = Arc::clone(&handler) as _;
    client.add_file_reputation_change_handler(dyn_handler).expect("add");

    let raw = serde_json::to_vec(&json!({
        "hashes": [
            {"type": "md5", "value": "bQvLG6j1WmwRB8LZ2gPa1w=="}
        ],
        "newReputations": {
            "reputations": [
                {"trustLevel": 85, "providerId": 3, "createDate": 1_409_783_001, "attributes": {}}
            ]
        },
        "relationships": {
            "certificate": {
                "hashes": [{"type": "sha1", "value": "rB/QkipKKm5XeazdYodHwoOUsLk="}]
            }
        },
        "updateTime": 1_409_851_328
    }))
    .expect("payload bytes");
    fabric.publish_event(topics::FILE_REPUTATION_CHANGE_TOPIC, &raw).expect("publish");

    let received = handler.received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    let (event, original) = received.first().expect("delivery");
    assert_eq!(original, &raw, "handler must also receive the original payload");
    let hashes = event.hashes.as_ref().expect("hashes");
    assert_eq!(hashes.get(&HashAlgorithm::Md5), Some("6d0bcb1ba8f55a6c1107c2d9da03dad7"));
    let new_reputations = event.new_reputations.as_ref().expect("newReputations");
    assert_eq!(new_reputations.get(&3).expect("enterprise").trust_level, 85);
    let certificate = event
        .relationships
        .as_ref()
        .expect("relationships")
        .certificate
        .as_ref()
        .expect("certificate");
    assert_eq!(
        certificate.hashes.as_ref().expect("hashes").get(&HashAlgorithm::Sha1),
        Some("ac1fd0922a4a2a6e5779acdd628747c28394b0b9")
    );
}

#[test]
fn detection_handler_receives_the_canonical_event() {
    let fabric = Arc::new(MemoryFabric::new());
    let client = client_over(&fabric);
    let handler = Arc::new(RecordingDetectionHandler::default());
    let dyn_handler: Arc<dyn DetectionHandler> = Arc::clone(&handler) as _;
    client.add_file_detection_handler(dyn_handler).expect("add");

    let raw = serde_json::to_vec(&json!({
        "hashes": [{"value": "CZnbhOFq32TBWnuAOUhLMw==", "type": "md5"}],
        "agentGuid": "{abc5d2c6-e959-11e3-baeb-005056c00009}",
        "remediationAction": 5,
        "localReputation": 1,
        "detectionTime": 1_402_617_156
    }))
    .expect("payload bytes");
    fabric.publish_event(topics::FILE_DETECTION_TOPIC, &raw).expect("publish");

    let received = handler.received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    let event = received.first().expect("delivery");
    assert_eq!(
        event.hashes.as_ref().expect("hashes").get(&HashAlgorithm::Md5),
        Some("0999db84e16adf64c15a7b8039484b33")
    );
    assert_eq!(event.remediation_action, Some(5));
}

#[test]
fn first_instance_handler_receives_the_canonical_event() {
    let fabric = Arc::new(MemoryFabric::new());
    let client = client_over(&fabric);
    let handler = Arc::new(RecordingFirstInstanceHandler::default());
    let dyn_handler: Arc<dyn FirstInstanceHandler> = Arc::clone(&handler) as _;
    client.add_file_first_instance_handler(dyn_handler).expect("add");

    let raw = serde_json::to_vec(&json!({
        "hashes": [{"type": "md5", "value": "FvdpvB03zBTjCTuYgc8WkQ=="}],
        "agentGuid": "testGuid",
        "name": "MORPH.EXE"
    }))
    .expect("payload bytes");
    fabric.publish_event(topics::FILE_FIRST_INSTANCE_TOPIC, &raw).expect("publish");

    let received = handler.received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    let event = received.first().expect("delivery");
    assert_eq!(
        event.hashes.as_ref().expect("hashes").get(&HashAlgorithm::Md5),
        Some("16f769bc1d37cc14e3093b9881cf1691")
    );
    assert_eq!(event.system_guid.as_deref(), Some("testGuid"));
    assert_eq!(event.name.as_deref(), Some("MORPH.EXE"));
}

#[test]
fn removed_handlers_no_longer_receive_events() {
    let fabric = Arc::new(MemoryFabric::new());
    let client = client_over(&fabric);
    let handler = Arc::new(RecordingDetectionHandler::default());
    let dyn_handler: Arc<dyn DetectionHandler> = Arc::clone(&handler) as _;
    client.add_file_detection_handler(Arc::clone(&dyn_handler)).expect("add");
    client.remove_file_detection_handler(&dyn_handler).expect("remove");

    let raw = serde_json::to_vec(&json!({"hashes": []})).expect("payload bytes");
    fabric.publish_event(topics::FILE_DETECTION_TOPIC, &raw).expect("publish");
    assert!(handler.received.lock().unwrap().is_empty());
}

// ============================================================================
// SECTION: Malformed Payloads
// ============================================================================

#[test]
fn malformed_event_is_dropped_with_a_diagnostic() {
    let fabric = Arc::new(MemoryFabric::new());
    let telemetry = Arc::new(RecordingTelemetry::default());
    let client = client_over(&fabric).with_telemetry(Arc::clone(&telemetry) as Arc<dyn Telemetry>);
    let handler = Arc::new(RecordingDetectionHandler::default());
    let dyn_handler: Arc<dyn DetectionHandler> = Arc::clone(&handler) as _;
    client.add_file_detection_handler(dyn_handler).expect("add");

    // Canonical-shaped hashes (a mapping) are a wire-shape violation.
    let raw = serde_json::to_vec(&json!({
        "hashes": {"md5": "0999db84e16adf64c15a7b8039484b33"}
    }))
    .expect("payload bytes");
    fabric.publish_event(topics::FILE_DETECTION_TOPIC, &raw).expect("publish");

    assert!(handler.received.lock().unwrap().is_empty(), "handler must not run");
    let dropped = telemetry.dropped.lock().unwrap().clone();
    assert_eq!(dropped.len(), 1);
    let diagnostic = dropped.first().expect("diagnostic");
    assert_eq!(diagnostic.topic, topics::FILE_DETECTION_TOPIC);
    assert!(!diagnostic.reason.is_empty());
}
