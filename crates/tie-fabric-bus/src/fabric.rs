// crates/tie-fabric-bus/src/fabric.rs
// ============================================================================
// Module: Fabric Transport Boundary
// Description: Traits abstracting the message-bus transport.
// Purpose: Decouple the client from connection and delivery mechanics.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The message-bus transport is a black box behind the [`Fabric`] trait:
//! a synchronous request/response facility plus event publish/subscribe.
//! Connection establishment, broker discovery, reconnects, and thread-pool
//! sizing are transport concerns and never surface here.
//! Invariants:
//! - A request either yields a [`FabricResponse`] or fails with a
//!   [`FabricError`]; there is no partial outcome.
//! - Event sinks are delivered on whatever thread the transport uses and
//!   must be safe to invoke concurrently across distinct events.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

// ============================================================================
// SECTION: Fabric Errors
// ============================================================================

/// Errors reported by the fabric transport.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum FabricError {
    /// No correlated response arrived before the timeout elapsed.
    #[error("request timed out on {topic} after {timeout_millis} ms")]
    Timeout {
        /// Topic the request was sent on.
        topic: String,
        /// Timeout that elapsed, in milliseconds.
        timeout_millis: u64,
    },
    /// Transport-level delivery failure.
    #[error("fabric transport failure: {0}")]
    Transport(String),
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Outcome of a request/response exchange at the transport boundary.
///
/// # Invariants
/// - `Error` carries the remote service's error code and message verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FabricResponse {
    /// Normal response payload bytes.
    Payload(Vec<u8>),
    /// Error response from the remote service.
    Error {
        /// Remote error code.
        code: i64,
        /// Remote error message.
        message: String,
    },
}

// ============================================================================
// SECTION: Event Sinks
// ============================================================================

/// Receives raw event payloads from the transport.
///
/// Delivery happens on the transport's thread; implementations share no
/// state with other deliveries and must not unwind.
pub trait EventSink: Send + Sync {
    /// Delivers a raw event payload published on the topic.
    fn deliver(&self, topic: &str, payload: &[u8]);
}

// ============================================================================
// SECTION: Fabric Trait
// ============================================================================

/// Synchronous request/response and event publish/subscribe transport.
pub trait Fabric: Send + Sync {
    /// Sends a request and blocks until a response, error response, or
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns [`FabricError::Timeout`] when no correlated response arrives
    /// in time, or [`FabricError::Transport`] on delivery failure.
    fn send_request(
        &self,
        topic: &str,
        payload: &[u8],
        timeout: Duration,
    ) -> Result<FabricResponse, FabricError>;

    /// Publishes an event payload on the topic.
    ///
    /// # Errors
    ///
    /// Returns [`FabricError::Transport`] on delivery failure.
    fn publish_event(&self, topic: &str, payload: &[u8]) -> Result<(), FabricError>;

    /// Registers an event sink for the topic.
    ///
    /// # Errors
    ///
    /// Returns [`FabricError::Transport`] when the registration fails.
    fn subscribe(&self, topic: &str, sink: Arc<dyn EventSink>) -> Result<(), FabricError>;

    /// Removes a previously registered event sink from the topic.
    ///
    /// Sinks are matched by identity; unknown sinks are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`FabricError::Transport`] when the removal fails.
    fn unsubscribe(&self, topic: &str, sink: &Arc<dyn EventSink>) -> Result<(), FabricError>;
}
