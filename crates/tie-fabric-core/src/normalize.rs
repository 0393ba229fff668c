// crates/tie-fabric-core/src/normalize.rs
// ============================================================================
// Module: Response Normalization
// Description: Transforms wire response shapes into canonical mappings.
// Purpose: Fold reputation lists into provider-keyed maps with hex digests.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! The service returns reputation results as ordered lists with base64
//! digest values. Normalization folds each list into a mapping keyed by
//! provider id and decodes every nested digest list into a [`DigestMap`],
//! including the overridden-file records nested inside certificate
//! reputations.
//! Invariants:
//! - Iteration order decides duplicate handling: the last record for a
//!   provider id wins.
//! - An absent or empty list normalizes to an empty mapping, not an error.
//! - Every transform is pure; fresh structures are built on each call and
//!   caller data is never mutated.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::codec::CodecError;
use crate::codec::wire_to_hex;
use crate::digest::DigestMap;
use crate::reputation::OverriddenFile;
use crate::reputation::OverrideSummary;
use crate::reputation::ReputationMapping;
use crate::reputation::ReputationRecord;
use crate::reputation::SystemReference;
use crate::wire::AgentsEnvelope;
use crate::wire::HashEntry;
use crate::wire::RawOverrideSummary;
use crate::wire::RawReputation;

// ============================================================================
// SECTION: Digest Normalization
// ============================================================================

/// Folds a wire hash-entry list into a digest mapping with hex values.
///
/// Duplicate algorithm tokens overwrite earlier entries; the last wins.
///
/// # Errors
///
/// Returns [`CodecError::MalformedWireEncoding`] when any entry value is
/// not valid base64.
pub fn digests_from_wire(entries: &[HashEntry]) -> Result<DigestMap, CodecError> {
    let mut digests = DigestMap::new();
    for entry in entries {
        digests.insert(entry.algorithm.clone(), wire_to_hex(&entry.value)?);
    }
    Ok(digests)
}

// ============================================================================
// SECTION: Reputation Normalization
// ============================================================================

/// Folds a wire reputation list into a provider-keyed mapping.
///
/// Records are visited in list order; for duplicate provider ids the last
/// occurrence wins. Overridden-file digest lists nested inside certificate
/// records are decoded recursively.
///
/// # Errors
///
/// Returns [`CodecError`] when a nested digest value cannot be decoded.
pub fn normalize_reputations(raw: Vec<RawReputation>) -> Result<ReputationMapping, CodecError> {
    let mut mapping = ReputationMapping::new();
    for record in raw {
        let overridden = record.overridden.map(normalize_overridden).transpose()?;
        mapping.insert(record.provider_id, ReputationRecord {
            provider_id: record.provider_id,
            trust_level: record.trust_level,
            create_date: record.create_date,
            attributes: record.attributes,
            overridden,
            extra: record.extra,
        });
    }
    Ok(mapping)
}

/// Normalizes a certificate record's file-override summary.
///
/// # Errors
///
/// Returns [`CodecError`] when an overridden-file digest cannot be decoded.
fn normalize_overridden(raw: RawOverrideSummary) -> Result<OverrideSummary, CodecError> {
    let mut files = Vec::with_capacity(raw.files.len());
    for file in raw.files {
        let hashes = match file.hashes {
            Some(entries) => Some(digests_from_wire(&entries)?),
            None => None,
        };
        files.push(OverriddenFile {
            hashes,
            extra: file.extra,
        });
    }
    Ok(OverrideSummary {
        files,
        truncated: raw.truncated,
        extra: raw.extra,
    })
}

// ============================================================================
// SECTION: Agent Normalization
// ============================================================================

/// Extracts the system-reference list from a first-references response.
///
/// The list is returned verbatim; an absent list yields an empty sequence.
#[must_use]
pub fn normalize_agents(envelope: AgentsEnvelope) -> Vec<SystemReference> {
    envelope.agents.unwrap_or_default()
}
