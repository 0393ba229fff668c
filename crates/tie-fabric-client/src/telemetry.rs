// crates/tie-fabric-client/src/telemetry.rs
// ============================================================================
// Module: Client Telemetry
// Description: Observability hooks for exchanges and event delivery.
// Purpose: Provide metric events without a hard backend dependency.
// Dependencies: none
// ============================================================================

//! ## Overview
//! This module exposes a thin metrics interface for request outcomes and
//! dropped inbound events. It is intentionally dependency-light so
//! downstream deployments can plug in their metrics or logging backend
//! without redesign.
//! Security posture: telemetry must never carry payload contents; only
//! topics, outcome labels, error codes, and error summaries are recorded.

// ============================================================================
// SECTION: Metric Labels
// ============================================================================

/// Outcome classification of a request/response exchange.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// Exchange completed with a normal response.
    Ok,
    /// Remote service answered with an error response.
    RemoteError,
    /// Exchange timed out.
    Timeout,
    /// Transport or encoding failure.
    Transport,
}

impl RequestOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::RemoteError => "remote_error",
            Self::Timeout => "timeout",
            Self::Transport => "transport",
        }
    }
}

// ============================================================================
// SECTION: Metric Events
// ============================================================================

/// Metric event describing one request/response exchange.
///
/// # Invariants
/// - `error_code` is `Some` only for remote error responses.
#[derive(Debug, Clone)]
pub struct RequestMetric {
    /// Topic the request was sent on.
    pub topic: String,
    /// Exchange outcome.
    pub outcome: RequestOutcome,
    /// Remote error code when the outcome is a remote error.
    pub error_code: Option<i64>,
}

/// Metric event describing an inbound event that failed translation.
///
/// # Invariants
/// - `reason` is an error summary and never contains payload contents.
#[derive(Debug, Clone)]
pub struct DroppedEventMetric {
    /// Topic the event arrived on.
    pub topic: String,
    /// Why the event was dropped.
    pub reason: String,
}

// ============================================================================
// SECTION: Telemetry Trait
// ============================================================================

/// Receives client metric events.
pub trait Telemetry: Send + Sync {
    /// Records the outcome of one request/response exchange.
    fn record_request(&self, event: &RequestMetric);

    /// Records an inbound event dropped during translation.
    fn record_dropped_event(&self, event: &DroppedEventMetric);
}

/// Telemetry implementation that discards all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetry;

impl Telemetry for NoopTelemetry {
    fn record_request(&self, _event: &RequestMetric) {}

    fn record_dropped_event(&self, _event: &DroppedEventMetric) {}
}
