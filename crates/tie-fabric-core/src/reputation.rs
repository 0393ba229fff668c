// crates/tie-fabric-core/src/reputation.rs
// ============================================================================
// Module: Canonical Reputation Model
// Description: Client-facing reputation records and mappings.
// Purpose: Represent normalized reputation results with hex digests.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Canonical, normalized shapes handed to callers. Digest values are
//! lowercase hex; reputation lists have been folded into provider-keyed
//! mappings. All values are transient: constructed fresh per response or
//! event, never cached, owned exclusively by the caller.
//! Invariants:
//! - A [`ReputationMapping`] holds exactly one record per provider id.
//! - The open `attributes` and `extra` maps preserve provider-specific and
//!   unknown keys verbatim.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::digest::DigestMap;

// ============================================================================
// SECTION: Reputation Records
// ============================================================================

/// Mapping from numeric provider identifier to its reputation record.
pub type ReputationMapping = BTreeMap<i64, ReputationRecord>;

/// A single provider's reputation assessment, normalized.
///
/// # Invariants
/// - Nested override digests are lowercase hex, never wire base64.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationRecord {
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
    pub overridden: Option<OverrideSummary>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Normalized file-override summary of a certificate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverrideSummary {
    /// Files overridden by the certificate reputation.
    #[serde(default)]
    pub files: Vec<OverriddenFile>,
    /// Truncation flag (boolean carried as an integer).
    #[serde(default)]
    pub truncated: i64,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single overridden-file record with normalized digests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverriddenFile {
    /// Digests identifying the overridden file, hex values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<DigestMap>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// SECTION: System References
// ============================================================================

/// A system that referenced a file or certificate, with the first-seen time.
///
/// # Invariants
/// - No uniqueness is enforced; ordering and duplicates are
///   server-controlled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemReference {
    /// Opaque system identifier.
    #[serde(rename = "agentGuid")]
    pub system_guid: String,
    /// Epoch seconds of the first reference.
    #[serde(default)]
    pub date: i64,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
