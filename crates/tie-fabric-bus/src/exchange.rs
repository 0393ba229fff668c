// crates/tie-fabric-bus/src/exchange.rs
// ============================================================================
// Module: Synchronous Exchange
// Description: Blocking request/response exchange with error translation.
// Purpose: Serialize payloads, await responses, and surface typed failures.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`SyncExchange`] issues a request over the fabric and blocks the calling
//! thread until a correlated response or error response arrives or the
//! configured timeout elapses. Remote error responses are translated into
//! [`ExchangeError::Remote`]; the displayed text preserves the remote
//! message and code verbatim.
//! Invariants:
//! - The response timeout is snapshotted once per request (copy-on-read);
//!   a concurrent setter call never affects an in-flight request.
//! - A timed-out request is abandoned; late responses are the transport's
//!   concern and are never revisited here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::ClientConfig;
use crate::config::ConfigError;
use crate::config::duration_millis;
use crate::config::validate_response_timeout;
use crate::fabric::Fabric;
use crate::fabric::FabricError;
use crate::fabric::FabricResponse;

// ============================================================================
// SECTION: Exchange Errors
// ============================================================================

/// Errors raised by a synchronous request/response exchange.
///
/// # Invariants
/// - `Remote` displays as `Error: <message> (<code>)`, preserving the
///   remote service's text and code verbatim.
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Remote service answered with an error response.
    #[error("Error: {message} ({code})")]
    Remote {
        /// Remote error code.
        code: i64,
        /// Remote error message.
        message: String,
    },
    /// No correlated response arrived before the timeout elapsed.
    #[error("request timed out on {topic} after {timeout_millis} ms")]
    Timeout {
        /// Topic the request was sent on.
        topic: String,
        /// Timeout that elapsed, in milliseconds.
        timeout_millis: u64,
    },
    /// Request payload could not be serialized.
    #[error("request serialization failed: {0}")]
    Serialize(String),
    /// Response payload was not valid JSON.
    #[error("response payload invalid: {0}")]
    Payload(String),
    /// Transport-level failure below the exchange.
    #[error(transparent)]
    Fabric(FabricError),
}

// ============================================================================
// SECTION: Synchronous Exchange
// ============================================================================

/// Blocking request/response exchange over a fabric transport.
///
/// # Invariants
/// - The stored timeout is always at or above the configured floor.
pub struct SyncExchange {
    /// Transport the exchange sends requests through.
    fabric: Arc<dyn Fabric>,
    /// Response timeout in milliseconds, read atomically per request.
    timeout_millis: AtomicU64,
}

impl SyncExchange {
    /// Creates an exchange over the fabric with the configured timeout.
    #[must_use]
    pub fn new(fabric: Arc<dyn Fabric>, config: &ClientConfig) -> Self {
        Self {
            fabric,
            timeout_millis: AtomicU64::new(duration_millis(config.response_timeout())),
        }
    }

    /// Returns the current response timeout.
    #[must_use]
    pub fn response_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis.load(Ordering::Relaxed))
    }

    /// Sets the response timeout applied to subsequent requests.
    ///
    /// In-flight requests keep the timeout they snapshotted at send time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TimeoutBelowFloor`] when the timeout is below
    /// the configured floor.
    pub fn set_response_timeout(&self, timeout: Duration) -> Result<(), ConfigError> {
        validate_response_timeout(timeout)?;
        self.timeout_millis.store(duration_millis(timeout), Ordering::Relaxed);
        Ok(())
    }

    /// Sends a request and blocks until the response payload is decoded.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Remote`] for remote error responses,
    /// [`ExchangeError::Timeout`] when the exchange times out, and
    /// [`ExchangeError::Serialize`] / [`ExchangeError::Payload`] for
    /// encoding failures on either side.
    pub fn send_request_await_response<T: Serialize>(
        &self,
        topic: &str,
        payload: &T,
    ) -> Result<Value, ExchangeError> {
        let timeout = self.response_timeout();
        let bytes =
            serde_json::to_vec(payload).map_err(|err| ExchangeError::Serialize(err.to_string()))?;
        match self.fabric.send_request(topic, &bytes, timeout) {
            Ok(FabricResponse::Payload(body)) => serde_json::from_slice(&body)
                .map_err(|err| ExchangeError::Payload(err.to_string())),
            Ok(FabricResponse::Error {
                code,
                message,
            }) => Err(ExchangeError::Remote {
                code,
                message,
            }),
            Err(FabricError::Timeout {
                topic,
                timeout_millis,
            }) => Err(ExchangeError::Timeout {
                topic,
                timeout_millis,
            }),
            Err(err) => Err(ExchangeError::Fabric(err)),
        }
    }
}
