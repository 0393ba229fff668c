// crates/tie-fabric-core/src/events.rs
// ============================================================================
// Module: Event Translation
// Description: Translates raw asynchronous event payloads to canonical shapes.
// Purpose: Hand user callbacks hex-digest, provider-keyed event structures.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Inbound events arrive with the same wire conventions as responses:
//! digest lists carry base64 values and reputation sets are wrapped in
//! `{"reputations": [...]}` envelopes. Translation applies the response
//! normalization transforms so callbacks only ever see canonical shapes.
//! Invariants:
//! - Each translate call builds a fresh structure from its own input and
//!   shares no state; concurrent delivery across events is safe.
//! - Translation expects raw wire shape. Feeding already-canonical input
//!   (for example a `hashes` mapping instead of a list) is a misuse and
//!   fails with [`TranslateError::Json`].
//! - Unknown keys are preserved verbatim on every translated structure.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

use crate::codec::CodecError;
use crate::codec::wire_to_hex;
use crate::digest::DigestMap;
use crate::normalize::digests_from_wire;
use crate::normalize::normalize_reputations;
use crate::reputation::ReputationMapping;
use crate::wire::HashEntry;
use crate::wire::ReputationsEnvelope;

// ============================================================================
// SECTION: Translation Errors
// ============================================================================

/// Errors raised while translating an inbound event payload.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// Payload was not valid JSON or did not match the wire shape.
    #[error("malformed event payload: {0}")]
    Json(String),
    /// A digest value inside the payload could not be decoded.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

// ============================================================================
// SECTION: Raw Event Shapes
// ============================================================================

/// Reputation-change event exactly as carried on the wire.
#[derive(Debug, Deserialize)]
struct RawReputationChange {
    /// Digest list identifying the subject.
    #[serde(default)]
    hashes: Option<Vec<HashEntry>>,
    /// New reputation set, wrapped in a reputations envelope.
    #[serde(rename = "newReputations", default)]
    new_reputations: Option<ReputationsEnvelope>,
    /// Previous reputation set, wrapped in a reputations envelope.
    #[serde(rename = "oldReputations", default)]
    old_reputations: Option<ReputationsEnvelope>,
    /// Epoch seconds the change occurred.
    #[serde(rename = "updateTime", default)]
    update_time: Option<i64>,
    /// Relationship records attached to file events.
    #[serde(default)]
    relationships: Option<RawRelationships>,
    /// Certificate public-key SHA-1 in wire form (certificate events).
    #[serde(rename = "publicKeySha1", default)]
    public_key_sha1: Option<String>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Wire form of the relationships block of a file event.
#[derive(Debug, Deserialize)]
struct RawRelationships {
    /// Certificate relationship record.
    #[serde(default)]
    certificate: Option<RawCertificateRelationship>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Wire form of a certificate relationship record.
#[derive(Debug, Deserialize)]
struct RawCertificateRelationship {
    /// Digest list identifying the certificate.
    #[serde(default)]
    hashes: Option<Vec<HashEntry>>,
    /// Certificate public-key SHA-1 in wire form.
    #[serde(rename = "publicKeySha1", default)]
    public_key_sha1: Option<String>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Detection event exactly as carried on the wire.
#[derive(Debug, Deserialize)]
struct RawDetection {
    /// Digest list identifying the detected file.
    #[serde(default)]
    hashes: Option<Vec<HashEntry>>,
    /// Identifier of the system the detection occurred on.
    #[serde(rename = "agentGuid", default)]
    system_guid: Option<String>,
    /// Epoch seconds the detection occurred.
    #[serde(rename = "detectionTime", default)]
    detection_time: Option<i64>,
    /// Locally computed reputation that triggered the detection.
    #[serde(rename = "localReputation", default)]
    local_reputation: Option<i64>,
    /// Name of the detected file.
    #[serde(default)]
    name: Option<String>,
    /// Remediation action taken in response.
    #[serde(rename = "remediationAction", default)]
    remediation_action: Option<i64>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// First-instance event exactly as carried on the wire.
#[derive(Debug, Deserialize)]
struct RawFirstInstance {
    /// Digest list identifying the file.
    #[serde(default)]
    hashes: Option<Vec<HashEntry>>,
    /// Identifier of the system the file was first seen on.
    #[serde(rename = "agentGuid", default)]
    system_guid: Option<String>,
    /// Name of the file.
    #[serde(default)]
    name: Option<String>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    extra: Map<String, Value>,
}

// ============================================================================
// SECTION: Canonical Event Shapes
// ============================================================================

/// Canonical reputation-change event handed to user callbacks.
///
/// # Invariants
/// - Digests are lowercase hex; reputation sets are provider-keyed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReputationChangeEvent {
    /// Digests identifying the subject.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<DigestMap>,
    /// New reputation set, keyed by provider id.
    #[serde(rename = "newReputations", default, skip_serializing_if = "Option::is_none")]
    pub new_reputations: Option<ReputationMapping>,
    /// Previous reputation set, keyed by provider id.
    #[serde(rename = "oldReputations", default, skip_serializing_if = "Option::is_none")]
    pub old_reputations: Option<ReputationMapping>,
    /// Epoch seconds the change occurred.
    #[serde(rename = "updateTime", default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,
    /// Relationship records attached to file events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationships: Option<EventRelationships>,
    /// Certificate public-key SHA-1 as hex (certificate events).
    #[serde(rename = "publicKeySha1", default, skip_serializing_if = "Option::is_none")]
    pub public_key_sha1: Option<String>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canonical relationships block of a file reputation-change event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRelationships {
    /// Certificate relationship record.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<CertificateRelationship>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canonical certificate relationship record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificateRelationship {
    /// Digests identifying the certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<DigestMap>,
    /// Certificate public-key SHA-1 as hex.
    #[serde(rename = "publicKeySha1", default, skip_serializing_if = "Option::is_none")]
    pub public_key_sha1: Option<String>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canonical detection event handed to user callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionEvent {
    /// Digests identifying the detected file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<DigestMap>,
    /// Identifier of the system the detection occurred on.
    #[serde(rename = "agentGuid", default, skip_serializing_if = "Option::is_none")]
    pub system_guid: Option<String>,
    /// Epoch seconds the detection occurred.
    #[serde(rename = "detectionTime", default, skip_serializing_if = "Option::is_none")]
    pub detection_time: Option<i64>,
    /// Locally computed reputation that triggered the detection.
    #[serde(rename = "localReputation", default, skip_serializing_if = "Option::is_none")]
    pub local_reputation: Option<i64>,
    /// Name of the detected file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Remediation action taken in response.
    #[serde(rename = "remediationAction", default, skip_serializing_if = "Option::is_none")]
    pub remediation_action: Option<i64>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Canonical first-instance event handed to user callbacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirstInstanceEvent {
    /// Digests identifying the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashes: Option<DigestMap>,
    /// Identifier of the system the file was first seen on.
    #[serde(rename = "agentGuid", default, skip_serializing_if = "Option::is_none")]
    pub system_guid: Option<String>,
    /// Name of the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Unrecognized keys carried through unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates a raw reputation-change event payload to canonical form.
///
/// Digest lists become [`DigestMap`]s, reputation envelopes become
/// provider-keyed mappings, and certificate public-key digests are decoded
/// to hex, both at top level and inside the certificate relationship.
///
/// # Errors
///
/// Returns [`TranslateError`] when the payload does not match the wire
/// shape or a digest value cannot be decoded.
pub fn translate_reputation_change(raw: &[u8]) -> Result<ReputationChangeEvent, TranslateError> {
    let event: RawReputationChange =
        serde_json::from_slice(raw).map_err(|err| TranslateError::Json(err.to_string()))?;
    let hashes = match event.hashes {
        Some(entries) => Some(digests_from_wire(&entries)?),
        None => None,
    };
    let relationships = match event.relationships {
        Some(relationships) => Some(translate_relationships(relationships)?),
        None => None,
    };
    let public_key_sha1 = match event.public_key_sha1 {
        Some(wire) => Some(wire_to_hex(&wire)?),
        None => None,
    };
    Ok(ReputationChangeEvent {
        hashes,
        new_reputations: translate_reputation_set(event.new_reputations)?,
        old_reputations: translate_reputation_set(event.old_reputations)?,
        update_time: event.update_time,
        relationships,
        public_key_sha1,
        extra: event.extra,
    })
}

/// Translates a raw detection event payload to canonical form.
///
/// # Errors
///
/// Returns [`TranslateError`] when the payload does not match the wire
/// shape or a digest value cannot be decoded.
pub fn translate_detection(raw: &[u8]) -> Result<DetectionEvent, TranslateError> {
    let event: RawDetection =
        serde_json::from_slice(raw).map_err(|err| TranslateError::Json(err.to_string()))?;
    let hashes = match event.hashes {
        Some(entries) => Some(digests_from_wire(&entries)?),
        None => None,
    };
    Ok(DetectionEvent {
        hashes,
        system_guid: event.system_guid,
        detection_time: event.detection_time,
        local_reputation: event.local_reputation,
        name: event.name,
        remediation_action: event.remediation_action,
        extra: event.extra,
    })
}

/// Translates a raw first-instance event payload to canonical form.
///
/// # Errors
///
/// Returns [`TranslateError`] when the payload does not match the wire
/// shape or a digest value cannot be decoded.
pub fn translate_first_instance(raw: &[u8]) -> Result<FirstInstanceEvent, TranslateError> {
    let event: RawFirstInstance =
        serde_json::from_slice(raw).map_err(|err| TranslateError::Json(err.to_string()))?;
    let hashes = match event.hashes {
        Some(entries) => Some(digests_from_wire(&entries)?),
        None => None,
    };
    Ok(FirstInstanceEvent {
        hashes,
        system_guid: event.system_guid,
        name: event.name,
        extra: event.extra,
    })
}

/// Normalizes an optional reputation envelope into a provider-keyed mapping.
///
/// An envelope without a reputation list normalizes to an empty mapping.
///
/// # Errors
///
/// Returns [`TranslateError::Codec`] when a nested digest cannot be decoded.
fn translate_reputation_set(
    envelope: Option<ReputationsEnvelope>,
) -> Result<Option<ReputationMapping>, TranslateError> {
    match envelope {
        Some(envelope) => {
            let raw = envelope.reputations.unwrap_or_default();
            Ok(Some(normalize_reputations(raw)?))
        }
        None => Ok(None),
    }
}

/// Translates the relationships block of a file event.
///
/// # Errors
///
/// Returns [`TranslateError`] when a certificate digest cannot be decoded.
fn translate_relationships(raw: RawRelationships) -> Result<EventRelationships, TranslateError> {
    let certificate = match raw.certificate {
        Some(certificate) => {
            let hashes = match certificate.hashes {
                Some(entries) => Some(digests_from_wire(&entries)?),
                None => None,
            };
            let public_key_sha1 = match certificate.public_key_sha1 {
                Some(wire) => Some(wire_to_hex(&wire)?),
                None => None,
            };
            Some(CertificateRelationship {
                hashes,
                public_key_sha1,
                extra: certificate.extra,
            })
        }
        None => None,
    };
    Ok(EventRelationships {
        certificate,
        extra: raw.extra,
    })
}
