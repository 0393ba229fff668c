// crates/tie-fabric-core/src/wire.rs
// ============================================================================
// Module: Wire Contracts
// Description: Serde structures matching the service's JSON payload shapes.
// Purpose: Give every request and response payload an explicit typed form.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Typed wire contracts for the reputation service. Field names map
//! one-to-one onto the JSON keys the deployed service expects
//! (`trustLevel`, `providerId`, `queryLimit`, ...); digest values inside
//! hash entry lists are base64 wire strings, produced from hex by
//! [`hash_entries`].
//! Invariants:
//! - Response envelopes tolerate absent lists; absence means "no matches",
//!   never an error.
//! - Unknown keys on envelopes and records are preserved verbatim through
//!   flattened maps.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::codec::CodecError;
use crate::codec::hex_to_wire;
use crate::digest::DigestMap;
use crate::digest::HashAlgorithm;
use crate::reputation::SystemReference;

// ============================================================================
// SECTION: Hash Entries
// ============================================================================

/// A single digest entry as carried on the wire.
///
/// # Invariants
/// - `value` is a base64 wire string, not hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashEntry {
    /// Hash algorithm token.
    #[serde(rename = "type")]
    pub algorithm: HashAlgorithm,
    /// Base64-encoded digest bytes.
    pub value: String,
}

/// Builds the wire hash-entry list for a digest mapping.
///
/// # Errors
///
/// Returns [`CodecError::MalformedHash`] when any digest is not valid hex.
pub fn hash_entries(digests: &DigestMap) -> Result<Vec<HashEntry>, CodecError> {
    let mut entries = Vec::with_capacity(digests.len());
    for (algorithm, digest) in digests.iter() {
        entries.push(HashEntry {
            algorithm: algorithm.clone(),
            value: hex_to_wire(digest)?,
        });
    }
    Ok(entries)
}

// ============================================================================
// SECTION: Request Payloads
// ============================================================================

/// Payload for setting the enterprise reputation of a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetFileReputationRequest {
    /// New trust level for the file.
    #[serde(rename = "trustLevel")]
    pub trust_level: i64,
    /// Provider the reputation is written to.
    #[serde(rename = "providerId")]
    pub provider_id: i64,
    /// File name associated with the file; may be empty.
    pub filename: String,
    /// Comment associated with the update; may be empty.
    pub comment: String,
    /// Digests identifying the file.
    pub hashes: Vec<HashEntry>,
}

/// Payload for querying the reputations of a file.
///
/// # Invariants
/// - `scan_type` is always 3, marking the query as an on-demand scan
///   rather than an endpoint-driven one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFileReputationRequest {
    /// Digests identifying the file.
    pub hashes: Vec<HashEntry>,
    /// On-demand scan marker.
    #[serde(rename = "scanType")]
    pub scan_type: i64,
}

/// Payload for setting the enterprise reputation of a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCertReputationRequest {
    /// New trust level for the certificate.
    #[serde(rename = "trustLevel")]
    pub trust_level: i64,
    /// Provider the reputation is written to.
    #[serde(rename = "providerId")]
    pub provider_id: i64,
    /// Comment associated with the update; may be empty.
    pub comment: String,
    /// Digests identifying the certificate (always a single SHA-1 entry).
    pub hashes: Vec<HashEntry>,
    /// Base64 wire form of the certificate public-key SHA-1, when supplied.
    #[serde(rename = "publicKeySha1", default, skip_serializing_if = "Option::is_none")]
    pub public_key_sha1: Option<String>,
}

/// Payload for querying the reputations of a certificate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCertReputationRequest {
    /// Digests identifying the certificate (always a single SHA-1 entry).
    pub hashes: Vec<HashEntry>,
    /// Base64 wire form of the certificate public-key SHA-1, when supplied.
    #[serde(rename = "publicKeySha1", default, skip_serializing_if = "Option::is_none")]
    pub public_key_sha1: Option<String>,
}

/// Payload for querying the systems that first referenced a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirstReferencesRequest {
    /// Maximum number of system references to return.
    #[serde(rename = "queryLimit")]
    pub query_limit: i64,
    /// Digests identifying the subject.
    pub hashes: Vec<HashEntry>,
    /// Base64 wire form of the certificate public-key SHA-1, when supplied.
    #[serde(rename = "publicKeySha1", default, skip_serializing_if = "Option::is_none")]
    pub public_key_sha1: Option<String>,
}

// ============================================================================
// SECTION: Response Envelopes
// ============================================================================

/// Reputation record exactly as carried on the wire.
///
/// # Invariants
/// - Override digests remain in base64 wire form until normalization.
/// - Unknown keys are preserved in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReputation {
    /// Numeric provider identifier.
    #[serde(rename = "providerId")]
    pub provider_id: i64,
    /// Trust level assigned by the provider.
    #[serde(rename = "trustLevel")]
    pub trust_level: i64,
    /// Epoch seconds the reputation was created.
    #[serde(rename = "createDate", default)]
    pub create_date: i64,
    /// Provider-specific attributes, preserved verbatim.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// File-override summary attached to certificate records.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overridden: Option<RawOverrideSummary>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire form of a certificate record's file-override summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOverrideSummary {
    /// Files overridden by the certificate reputation.
    #[serde(default)]
    pub files: Vec<RawOverriddenFile>,
    /// Truncation flag (boolean carried as an integer).
    #[serde(default)]
    pub truncated: i64,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire form of a single overridden-file record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOverriddenFile {
    /// Digests identifying the overridden file, in wire form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<Vec<HashEntry>>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope wrapping a reputation list in responses and event sub-records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReputationsEnvelope {
    /// Reputation records; absent means no matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reputations: Option<Vec<RawReputation>>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Envelope wrapping the system-reference list of first-reference queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentsEnvelope {
    /// System references; absent means no matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agents: Option<Vec<SystemReference>>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// SECTION: External File Reports
// ============================================================================

/// Event body of an external file reputation report.
///
/// # Invariants
/// - Digests stay in hex form; external reports are not base64-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFileReport {
    /// File section of the report.
    pub file: ExternalFileSection,
    /// Provider attribution section.
    pub provider: ExternalProviderSection,
    /// Comment associated with the report; may be empty.
    pub comment: String,
}

/// File section of an external file reputation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFileSection {
    /// Numeric file-type identifier.
    #[serde(rename = "type")]
    pub file_type: i64,
    /// Digests identifying the file, keyed by algorithm, hex values.
    pub hashes: DigestMap,
    /// File attributes.
    pub attributes: ExternalFileAttributes,
    /// Reported reputation.
    pub reputation: ExternalReputationSection,
}

/// Attribute block of an external file reputation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalFileAttributes {
    /// File name associated with the file; may be empty.
    pub filename: String,
}

/// Reputation block of an external file reputation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalReputationSection {
    /// Reported trust level.
    pub score: i64,
}

/// Provider attribution block of an external file reputation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalProviderSection {
    /// Numeric provider identifier (always the external provider).
    pub id: i64,
}
