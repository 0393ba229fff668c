// crates/tie-fabric-client/src/client.rs
// ============================================================================
// Module: Reputation Client Facade
// Description: Public operation surface over the fabric transport.
// Purpose: Compose payload builders, the exchange, and normalization.
// Dependencies: tie-fabric-bus, tie-fabric-core, serde_json
// ============================================================================

//! ## Overview
//! [`ReputationClient`] is the public surface of the SDK. Query operations
//! build a payload, run one synchronous exchange, and normalize the
//! response into canonical shapes; set operations discard the response
//! payload and report success or failure only. Handler registration
//! forwards to the fabric's subscription registry keyed by the fixed
//! protocol topics, with translation applied transparently before user
//! handlers run.
//! Invariants:
//! - A failed operation surfaces an error immediately; no partial mapping
//!   is ever returned.
//! - Handlers are matched by identity on removal, so the same handler
//!   value used to register must be used to unregister.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tie_fabric_bus::config::ClientConfig;
use tie_fabric_bus::config::ConfigError;
use tie_fabric_bus::exchange::ExchangeError;
use tie_fabric_bus::exchange::SyncExchange;
use tie_fabric_bus::fabric::EventSink;
use tie_fabric_bus::fabric::Fabric;
use tie_fabric_bus::fabric::FabricError;
use tie_fabric_core::codec::CodecError;
use tie_fabric_core::digest::DigestMap;
use tie_fabric_core::normalize::normalize_agents;
use tie_fabric_core::normalize::normalize_reputations;
use tie_fabric_core::reputation::ReputationMapping;
use tie_fabric_core::reputation::SystemReference;
use tie_fabric_core::topics;
use tie_fabric_core::wire::AgentsEnvelope;
use tie_fabric_core::wire::ReputationsEnvelope;

use crate::callbacks::DetectionAdapter;
use crate::callbacks::DetectionHandler;
use crate::callbacks::FirstInstanceAdapter;
use crate::callbacks::FirstInstanceHandler;
use crate::callbacks::ReputationChangeAdapter;
use crate::callbacks::ReputationChangeHandler;
use crate::payload;
use crate::payload::PayloadError;
use crate::telemetry::NoopTelemetry;
use crate::telemetry::RequestMetric;
use crate::telemetry::RequestOutcome;
use crate::telemetry::Telemetry;

// ============================================================================
// SECTION: Client Errors
// ============================================================================

/// Errors raised by reputation client operations.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Every failure is scoped to the operation that raised it; nothing here
///   is fatal to the process.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request payload could not be built.
    #[error(transparent)]
    Payload(#[from] PayloadError),
    /// Request/response exchange failed.
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    /// A digest in the response could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Response payload did not match the expected envelope shape.
    #[error("response envelope invalid: {0}")]
    Response(String),
    /// Event body could not be serialized.
    #[error("event serialization failed: {0}")]
    Serialize(String),
    /// Fabric subscription or publish operation failed.
    #[error(transparent)]
    Fabric(#[from] FabricError),
}

// ============================================================================
// SECTION: Handler Registry
// ============================================================================

/// A live handler registration held by the client.
struct HandlerRegistration {
    /// Topic the adapter is subscribed on.
    topic: &'static str,
    /// Identity key of the user handler.
    handler_key: usize,
    /// Subscribed adapter sink.
    sink: Arc<dyn EventSink>,
}

/// Returns the identity key for a handler allocation.
fn handler_key<T: ?Sized>(handler: &Arc<T>) -> usize {
    Arc::as_ptr(handler) as *const () as usize
}

// ============================================================================
// SECTION: Reputation Client
// ============================================================================

/// High-level client for the threat-intelligence reputation service.
///
/// # Invariants
/// - Each operation runs on the calling thread; exchanges block until a
///   response or timeout.
/// - The client holds no per-request state; concurrent operations from
///   multiple threads are independent.
pub struct ReputationClient {
    /// Transport used for subscriptions and event publishing.
    fabric: Arc<dyn Fabric>,
    /// Synchronous request/response exchange.
    exchange: SyncExchange,
    /// Telemetry hook for exchanges and dropped events.
    telemetry: Arc<dyn Telemetry>,
    /// Live handler registrations, matched by identity on removal.
    registrations: Mutex<Vec<HandlerRegistration>>,
}

impl ReputationClient {
    /// Creates a client over the fabric with default configuration.
    #[must_use]
    pub fn new(fabric: Arc<dyn Fabric>) -> Self {
        Self::with_config(fabric, &ClientConfig::default())
    }

    /// Creates a client over the fabric with the provided configuration.
    #[must_use]
    pub fn with_config(fabric: Arc<dyn Fabric>, config: &ClientConfig) -> Self {
        Self {
            exchange: SyncExchange::new(Arc::clone(&fabric), config),
            fabric,
            telemetry: Arc::new(NoopTelemetry),
            registrations: Mutex::new(Vec::new()),
        }
    }

    /// Replaces the telemetry hook.
    #[must_use]
    pub fn with_telemetry(mut self, telemetry: Arc<dyn Telemetry>) -> Self {
        self.telemetry = telemetry;
        self
    }

    /// Returns the response timeout applied to subsequent requests.
    #[must_use]
    pub fn response_timeout(&self) -> Duration {
        self.exchange.response_timeout()
    }

    /// Sets the response timeout applied to subsequent requests.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TimeoutBelowFloor`] when the timeout is below
    /// the configured floor.
    pub fn set_response_timeout(&self, timeout: Duration) -> Result<(), ConfigError> {
        self.exchange.set_response_timeout(timeout)
    }

    // ------------------------------------------------------------------
    // File reputation operations
    // ------------------------------------------------------------------

    /// Retrieves the reputations for a file identified by its digests.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the digest map is empty or malformed,
    /// the exchange fails, or the response cannot be normalized.
    pub fn get_file_reputation(
        &self,
        hashes: &DigestMap,
    ) -> Result<ReputationMapping, ClientError> {
        let request = payload::get_file_reputation(hashes)?;
        let response = self.request(topics::GET_FILE_REPUTATION_TOPIC, &request)?;
        Self::reputations_from_response(response)
    }

    /// Sets the enterprise reputation of a file identified by its digests.
    ///
    /// The response payload is discarded; success means the service
    /// acknowledged the update.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the digest map is empty or malformed or
    /// the exchange fails.
    pub fn set_file_reputation(
        &self,
        trust_level: i64,
        hashes: &DigestMap,
        filename: &str,
        comment: &str,
    ) -> Result<(), ClientError> {
        let request = payload::set_file_reputation(trust_level, hashes, filename, comment)?;
        self.request(topics::SET_FILE_REPUTATION_TOPIC, &request)?;
        Ok(())
    }

    /// Retrieves the systems that first referenced a file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the digest map is empty or malformed,
    /// the exchange fails, or the response envelope is invalid.
    pub fn get_file_first_references(
        &self,
        hashes: &DigestMap,
        query_limit: i64,
    ) -> Result<Vec<SystemReference>, ClientError> {
        let request = payload::file_first_references(hashes, query_limit)?;
        let response = self.request(topics::FILE_FIRST_REFERENCES_TOPIC, &request)?;
        Self::agents_from_response(response)
    }

    /// Publishes an external reputation report for a file.
    ///
    /// External reports are fire-and-forget events, not request/response
    /// exchanges; unlike enterprise set operations, the trust level must be
    /// a standard-scale value and the file type must be known.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when validation fails or the event cannot be
    /// published.
    pub fn set_external_file_reputation(
        &self,
        trust_level: i64,
        hashes: &DigestMap,
        file_type: i64,
        filename: &str,
        comment: &str,
    ) -> Result<(), ClientError> {
        let report =
            payload::external_file_report(trust_level, hashes, file_type, filename, comment)?;
        let bytes =
            serde_json::to_vec(&report).map_err(|err| ClientError::Serialize(err.to_string()))?;
        let result = self.fabric.publish_event(topics::EXTERNAL_FILE_REPORT_TOPIC, &bytes);
        self.telemetry.record_request(&RequestMetric {
            topic: topics::EXTERNAL_FILE_REPORT_TOPIC.to_string(),
            outcome: if result.is_ok() {
                RequestOutcome::Ok
            } else {
                RequestOutcome::Transport
            },
            error_code: None,
        });
        Ok(result?)
    }

    // ------------------------------------------------------------------
    // Certificate reputation operations
    // ------------------------------------------------------------------

    /// Retrieves the reputations for a certificate identified by its SHA-1
    /// and optionally the SHA-1 of its public key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when a digest is malformed, the exchange
    /// fails, or the response cannot be normalized.
    pub fn get_certificate_reputation(
        &self,
        sha1: &str,
        public_key_sha1: Option<&str>,
    ) -> Result<ReputationMapping, ClientError> {
        let request = payload::get_certificate_reputation(sha1, public_key_sha1)?;
        let response = self.request(topics::GET_CERT_REPUTATION_TOPIC, &request)?;
        Self::reputations_from_response(response)
    }

    /// Sets the enterprise reputation of a certificate.
    ///
    /// The response payload is discarded; success means the service
    /// acknowledged the update.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when a digest is malformed or the exchange
    /// fails.
    pub fn set_certificate_reputation(
        &self,
        trust_level: i64,
        sha1: &str,
        public_key_sha1: Option<&str>,
        comment: &str,
    ) -> Result<(), ClientError> {
        let request =
            payload::set_certificate_reputation(trust_level, sha1, public_key_sha1, comment)?;
        self.request(topics::SET_CERT_REPUTATION_TOPIC, &request)?;
        Ok(())
    }

    /// Retrieves the systems that first referenced a certificate.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when a digest is malformed, the exchange
    /// fails, or the response envelope is invalid.
    pub fn get_certificate_first_references(
        &self,
        sha1: &str,
        public_key_sha1: Option<&str>,
        query_limit: i64,
    ) -> Result<Vec<SystemReference>, ClientError> {
        let request = payload::certificate_first_references(sha1, public_key_sha1, query_limit)?;
        let response = self.request(topics::CERT_FIRST_REFERENCES_TOPIC, &request)?;
        Self::agents_from_response(response)
    }

    // ------------------------------------------------------------------
    // Event handler registration
    // ------------------------------------------------------------------

    /// Registers a handler for file reputation-change events.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fabric`] when the subscription fails.
    pub fn add_file_reputation_change_handler(
        &self,
        handler: Arc<dyn ReputationChangeHandler>,
    ) -> Result<(), ClientError> {
        let key = handler_key(&handler);
        let sink: Arc<dyn EventSink> = Arc::new(ReputationChangeAdapter {
            handler,
            telemetry: Arc::clone(&self.telemetry),
        });
        self.add_registration(topics::FILE_REPUTATION_CHANGE_TOPIC, key, sink)
    }

    /// Unregisters a handler from file reputation-change events.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fabric`] when the unsubscription fails.
    pub fn remove_file_reputation_change_handler(
        &self,
        handler: &Arc<dyn ReputationChangeHandler>,
    ) -> Result<(), ClientError> {
        self.remove_registration(topics::FILE_REPUTATION_CHANGE_TOPIC, handler_key(handler))
    }

    /// Registers a handler for certificate reputation-change events.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fabric`] when the subscription fails.
    pub fn add_certificate_reputation_change_handler(
        &self,
        handler: Arc<dyn ReputationChangeHandler>,
    ) -> Result<(), ClientError> {
        let key = handler_key(&handler);
        let sink: Arc<dyn EventSink> = Arc::new(ReputationChangeAdapter {
            handler,
            telemetry: Arc::clone(&self.telemetry),
        });
        self.add_registration(topics::CERT_REPUTATION_CHANGE_TOPIC, key, sink)
    }

    /// Unregisters a handler from certificate reputation-change events.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fabric`] when the unsubscription fails.
    pub fn remove_certificate_reputation_change_handler(
        &self,
        handler: &Arc<dyn ReputationChangeHandler>,
    ) -> Result<(), ClientError> {
        self.remove_registration(topics::CERT_REPUTATION_CHANGE_TOPIC, handler_key(handler))
    }

    /// Registers a handler for file detection events.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fabric`] when the subscription fails.
    pub fn add_file_detection_handler(
        &self,
        handler: Arc<dyn DetectionHandler>,
    ) -> Result<(), ClientError> {
        let key = handler_key(&handler);
        let sink: Arc<dyn EventSink> = Arc::new(DetectionAdapter {
            handler,
            telemetry: Arc::clone(&self.telemetry),
        });
        self.add_registration(topics::FILE_DETECTION_TOPIC, key, sink)
    }

    /// Unregisters a handler from file detection events.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fabric`] when the unsubscription fails.
    pub fn remove_file_detection_handler(
        &self,
        handler: &Arc<dyn DetectionHandler>,
    ) -> Result<(), ClientError> {
        self.remove_registration(topics::FILE_DETECTION_TOPIC, handler_key(handler))
    }

    /// Registers a handler for file first-instance events.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fabric`] when the subscription fails.
    pub fn add_file_first_instance_handler(
        &self,
        handler: Arc<dyn FirstInstanceHandler>,
    ) -> Result<(), ClientError> {
        let key = handler_key(&handler);
        let sink: Arc<dyn EventSink> = Arc::new(FirstInstanceAdapter {
            handler,
            telemetry: Arc::clone(&self.telemetry),
        });
        self.add_registration(topics::FILE_FIRST_INSTANCE_TOPIC, key, sink)
    }

    /// Unregisters a handler from file first-instance events.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Fabric`] when the unsubscription fails.
    pub fn remove_file_first_instance_handler(
        &self,
        handler: &Arc<dyn FirstInstanceHandler>,
    ) -> Result<(), ClientError> {
        self.remove_registration(topics::FILE_FIRST_INSTANCE_TOPIC, handler_key(handler))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Runs one exchange and records its outcome.
    fn request<T: Serialize>(
        &self,
        topic: &'static str,
        request: &T,
    ) -> Result<Value, ClientError> {
        let result = self.exchange.send_request_await_response(topic, request);
        let (outcome, error_code) = match &result {
            Ok(_) => (RequestOutcome::Ok, None),
            Err(ExchangeError::Remote {
                code, ..
            }) => (RequestOutcome::RemoteError, Some(*code)),
            Err(ExchangeError::Timeout {
                ..
            }) => (RequestOutcome::Timeout, None),
            Err(_) => (RequestOutcome::Transport, None),
        };
        self.telemetry.record_request(&RequestMetric {
            topic: topic.to_string(),
            outcome,
            error_code,
        });
        result.map_err(ClientError::from)
    }

    /// Normalizes a reputations envelope out of a response payload.
    fn reputations_from_response(response: Value) -> Result<ReputationMapping, ClientError> {
        let envelope: ReputationsEnvelope = serde_json::from_value(response)
            .map_err(|err| ClientError::Response(err.to_string()))?;
        Ok(normalize_reputations(envelope.reputations.unwrap_or_default())?)
    }

    /// Extracts the system-reference list out of a response payload.
    fn agents_from_response(response: Value) -> Result<Vec<SystemReference>, ClientError> {
        let envelope: AgentsEnvelope = serde_json::from_value(response)
            .map_err(|err| ClientError::Response(err.to_string()))?;
        Ok(normalize_agents(envelope))
    }

    /// Subscribes the adapter and records the registration.
    fn add_registration(
        &self,
        topic: &'static str,
        key: usize,
        sink: Arc<dyn EventSink>,
    ) -> Result<(), ClientError> {
        self.fabric.subscribe(topic, Arc::clone(&sink))?;
        let mut registrations = self
            .registrations
            .lock()
            .map_err(|_| FabricError::Transport("handler registry poisoned".to_string()))?;
        registrations.push(HandlerRegistration {
            topic,
            handler_key: key,
            sink,
        });
        Ok(())
    }

    /// Removes the registration matching the handler identity, if any.
    fn remove_registration(&self, topic: &'static str, key: usize) -> Result<(), ClientError> {
        let sink = {
            let mut registrations = self
                .registrations
                .lock()
                .map_err(|_| FabricError::Transport("handler registry poisoned".to_string()))?;
            registrations
                .iter()
                .position(|registration| {
                    registration.topic == topic && registration.handler_key == key
                })
                .map(|index| registrations.remove(index).sink)
        };
        if let Some(sink) = sink {
            self.fabric.unsubscribe(topic, &sink)?;
        }
        Ok(())
    }
}
