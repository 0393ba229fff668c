// crates/tie-fabric-core/src/lib.rs
// ============================================================================
// Module: TIE Fabric Core Library
// Description: Canonical data model and pure transforms for the TIE client.
// Purpose: Model reputation records, wire contracts, and normalization.
// Dependencies: base64, serde, serde_json, thiserror, time
// ============================================================================

//! ## Overview
//! TIE Fabric Core holds everything about the reputation protocol that is
//! independent of a transport: the hex/base64 wire codec, the digest and
//! reputation data model, the typed wire contracts, the response
//! normalization transforms, and the inbound event translation.
//! Invariants:
//! - Every transform is pure and total over well-formed input; malformed
//!   input fails closed with a typed error.
//! - Canonical shapes carry lowercase hex digests and provider-keyed
//!   reputation mappings; wire shapes carry base64 digest lists.
//! - Unknown keys and provider-specific attributes are preserved verbatim.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod attributes;
pub mod codec;
pub mod digest;
pub mod events;
pub mod filetypes;
pub mod normalize;
pub mod providers;
pub mod reputation;
pub mod topics;
pub mod trust;
pub mod wire;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use attributes::AttributeError;
pub use attributes::ReputationAggregate;
pub use codec::CodecError;
pub use codec::hex_to_wire;
pub use codec::wire_to_hex;
pub use digest::DigestMap;
pub use digest::HashAlgorithm;
pub use events::CertificateRelationship;
pub use events::DetectionEvent;
pub use events::EventRelationships;
pub use events::FirstInstanceEvent;
pub use events::ReputationChangeEvent;
pub use events::TranslateError;
pub use events::translate_detection;
pub use events::translate_first_instance;
pub use events::translate_reputation_change;
pub use normalize::digests_from_wire;
pub use normalize::normalize_agents;
pub use normalize::normalize_reputations;
pub use providers::CertProvider;
pub use providers::FileProvider;
pub use reputation::OverriddenFile;
pub use reputation::OverrideSummary;
pub use reputation::ReputationMapping;
pub use reputation::ReputationRecord;
pub use reputation::SystemReference;
