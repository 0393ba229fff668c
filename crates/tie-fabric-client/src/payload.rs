// crates/tie-fabric-client/src/payload.rs
// ============================================================================
// Module: Payload Builders
// Description: Builds typed request payloads from caller arguments.
// Purpose: Apply the wire codec and provider defaults in one place.
// Dependencies: tie-fabric-core, thiserror
// ============================================================================

//! ## Overview
//! Pure builders producing the wire request structures from typed caller
//! arguments. Every digest passes through the hex-to-base64 codec; set
//! operations default to the enterprise provider.
//! Invariants:
//! - Identifying digest maps must be non-empty; builders reject empty maps
//!   before any bus traffic (the service would fail the request anyway;
//!   validating early is a deliberate client-side choice).
//! - Trust levels on enterprise set operations pass through without range
//!   validation, matching the service's permissiveness. Only external
//!   reports restrict values to the standard scale.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;
use tie_fabric_core::codec::CodecError;
use tie_fabric_core::codec::hex_to_wire;
use tie_fabric_core::digest::DigestMap;
use tie_fabric_core::digest::HashAlgorithm;
use tie_fabric_core::filetypes;
use tie_fabric_core::providers::CertProvider;
use tie_fabric_core::providers::FileProvider;
use tie_fabric_core::trust;
use tie_fabric_core::wire::ExternalFileAttributes;
use tie_fabric_core::wire::ExternalFileReport;
use tie_fabric_core::wire::ExternalFileSection;
use tie_fabric_core::wire::ExternalProviderSection;
use tie_fabric_core::wire::ExternalReputationSection;
use tie_fabric_core::wire::FirstReferencesRequest;
use tie_fabric_core::wire::GetCertReputationRequest;
use tie_fabric_core::wire::GetFileReputationRequest;
use tie_fabric_core::wire::HashEntry;
use tie_fabric_core::wire::SetCertReputationRequest;
use tie_fabric_core::wire::SetFileReputationRequest;
use tie_fabric_core::wire::hash_entries;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default maximum number of results for first-reference queries.
pub const DEFAULT_QUERY_LIMIT: i64 = 500;

/// Scan-type marker identifying reputation queries as on-demand scans.
const ON_DEMAND_SCAN_TYPE: i64 = 3;

// ============================================================================
// SECTION: Payload Errors
// ============================================================================

/// Errors raised while building request payloads.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Identifying digest map contained no entries.
    #[error("at least one digest is required")]
    EmptyHashSet,
    /// Trust level is not on the standard scale.
    #[error("trust level {trust_level} is not a standard level")]
    InvalidTrustLevel {
        /// The rejected trust level.
        trust_level: i64,
    },
    /// File type is not a known identifier.
    #[error("file type {file_type} is not a known type")]
    InvalidFileType {
        /// The rejected file type.
        file_type: i64,
    },
    /// A digest value could not be encoded for the wire.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

// ============================================================================
// SECTION: File Payloads
// ============================================================================

/// Builds the payload for setting the enterprise reputation of a file.
///
/// # Errors
///
/// Returns [`PayloadError`] when the digest map is empty or a digest is
/// not valid hex.
pub fn set_file_reputation(
    trust_level: i64,
    hashes: &DigestMap,
    filename: &str,
    comment: &str,
) -> Result<SetFileReputationRequest, PayloadError> {
    Ok(SetFileReputationRequest {
        trust_level,
        provider_id: FileProvider::Enterprise.id(),
        filename: filename.to_string(),
        comment: comment.to_string(),
        hashes: identifying_entries(hashes)?,
    })
}

/// Builds the payload for querying the reputations of a file.
///
/// # Errors
///
/// Returns [`PayloadError`] when the digest map is empty or a digest is
/// not valid hex.
pub fn get_file_reputation(hashes: &DigestMap) -> Result<GetFileReputationRequest, PayloadError> {
    Ok(GetFileReputationRequest {
        hashes: identifying_entries(hashes)?,
        scan_type: ON_DEMAND_SCAN_TYPE,
    })
}

/// Builds the payload for querying systems that referenced a file.
///
/// # Errors
///
/// Returns [`PayloadError`] when the digest map is empty or a digest is
/// not valid hex.
pub fn file_first_references(
    hashes: &DigestMap,
    query_limit: i64,
) -> Result<FirstReferencesRequest, PayloadError> {
    Ok(FirstReferencesRequest {
        query_limit,
        hashes: identifying_entries(hashes)?,
        public_key_sha1: None,
    })
}

// ============================================================================
// SECTION: Certificate Payloads
// ============================================================================

/// Builds the payload for setting the enterprise reputation of a
/// certificate.
///
/// # Errors
///
/// Returns [`PayloadError::Codec`] when a digest is not valid hex.
pub fn set_certificate_reputation(
    trust_level: i64,
    sha1: &str,
    public_key_sha1: Option<&str>,
    comment: &str,
) -> Result<SetCertReputationRequest, PayloadError> {
    Ok(SetCertReputationRequest {
        trust_level,
        provider_id: CertProvider::Enterprise.id(),
        comment: comment.to_string(),
        hashes: vec![certificate_entry(sha1)?],
        public_key_sha1: wire_public_key(public_key_sha1)?,
    })
}

/// Builds the payload for querying the reputations of a certificate.
///
/// # Errors
///
/// Returns [`PayloadError::Codec`] when a digest is not valid hex.
pub fn get_certificate_reputation(
    sha1: &str,
    public_key_sha1: Option<&str>,
) -> Result<GetCertReputationRequest, PayloadError> {
    Ok(GetCertReputationRequest {
        hashes: vec![certificate_entry(sha1)?],
        public_key_sha1: wire_public_key(public_key_sha1)?,
    })
}

/// Builds the payload for querying systems that referenced a certificate.
///
/// # Errors
///
/// Returns [`PayloadError::Codec`] when a digest is not valid hex.
pub fn certificate_first_references(
    sha1: &str,
    public_key_sha1: Option<&str>,
    query_limit: i64,
) -> Result<FirstReferencesRequest, PayloadError> {
    Ok(FirstReferencesRequest {
        query_limit,
        hashes: vec![certificate_entry(sha1)?],
        public_key_sha1: wire_public_key(public_key_sha1)?,
    })
}

// ============================================================================
// SECTION: External Reports
// ============================================================================

/// Builds the event body of an external file reputation report.
///
/// Unlike request payloads, external reports carry digests in hex form.
///
/// # Errors
///
/// Returns [`PayloadError`] when the trust level is zero or off the
/// standard scale, the file type is unknown, or the digest map is empty.
pub fn external_file_report(
    trust_level: i64,
    hashes: &DigestMap,
    file_type: i64,
    filename: &str,
    comment: &str,
) -> Result<ExternalFileReport, PayloadError> {
    if trust_level == trust::NOT_SET || !trust::is_standard_level(trust_level) {
        return Err(PayloadError::InvalidTrustLevel {
            trust_level,
        });
    }
    if !filetypes::is_known_file_type(file_type) {
        return Err(PayloadError::InvalidFileType {
            file_type,
        });
    }
    if hashes.is_empty() {
        return Err(PayloadError::EmptyHashSet);
    }
    Ok(ExternalFileReport {
        file: ExternalFileSection {
            file_type,
            hashes: hashes.clone(),
            attributes: ExternalFileAttributes {
                filename: filename.to_string(),
            },
            reputation: ExternalReputationSection {
                score: trust_level,
            },
        },
        provider: ExternalProviderSection {
            id: FileProvider::External.id(),
        },
        comment: comment.to_string(),
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Encodes an identifying digest map, rejecting empty maps.
///
/// # Errors
///
/// Returns [`PayloadError::EmptyHashSet`] for an empty map or
/// [`PayloadError::Codec`] for malformed digests.
fn identifying_entries(hashes: &DigestMap) -> Result<Vec<HashEntry>, PayloadError> {
    if hashes.is_empty() {
        return Err(PayloadError::EmptyHashSet);
    }
    Ok(hash_entries(hashes)?)
}

/// Encodes the single SHA-1 entry identifying a certificate.
///
/// # Errors
///
/// Returns [`PayloadError::Codec`] when the digest is not valid hex.
fn certificate_entry(sha1: &str) -> Result<HashEntry, PayloadError> {
    Ok(HashEntry {
        algorithm: HashAlgorithm::Sha1,
        value: hex_to_wire(sha1)?,
    })
}

/// Encodes an optional public-key SHA-1 for the wire.
///
/// # Errors
///
/// Returns [`PayloadError::Codec`] when the digest is not valid hex.
fn wire_public_key(public_key_sha1: Option<&str>) -> Result<Option<String>, PayloadError> {
    match public_key_sha1 {
        Some(hex) => Ok(Some(hex_to_wire(hex)?)),
        None => Ok(None),
    }
}
