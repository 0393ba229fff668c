// crates/tie-fabric-client/src/lib.rs
// ============================================================================
// Module: TIE Fabric Client Library
// Description: High-level reputation client over the fabric transport.
// Purpose: Expose the public operation surface and event handler traits.
// Dependencies: serde, serde_json, thiserror, tie-fabric-bus, tie-fabric-core
// ============================================================================

//! ## Overview
//! TIE Fabric Client lets callers query and update reputation records for
//! files and certificates and subscribe to reputation-change, detection,
//! and first-instance events without handling wire topics or payload
//! encoding. Queries return canonical provider-keyed mappings with hex
//! digests; event handlers receive canonical event shapes, never raw wire
//! payloads.
//! Invariants:
//! - All wire marshaling goes through the payload builders and the core
//!   normalization transforms.
//! - Failures propagate synchronously to the calling operation; none are
//!   swallowed.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod callbacks;
pub mod client;
pub mod payload;
pub mod telemetry;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use callbacks::DetectionHandler;
pub use callbacks::FirstInstanceHandler;
pub use callbacks::ReputationChangeHandler;
pub use client::ClientError;
pub use client::ReputationClient;
pub use payload::DEFAULT_QUERY_LIMIT;
pub use payload::PayloadError;
pub use telemetry::DroppedEventMetric;
pub use telemetry::NoopTelemetry;
pub use telemetry::RequestMetric;
pub use telemetry::RequestOutcome;
pub use telemetry::Telemetry;
