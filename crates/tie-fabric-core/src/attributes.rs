// crates/tie-fabric-core/src/attributes.rs
// ============================================================================
// Module: Provider Attribute Keys
// Description: Attribute-key constants and decode helpers.
// Purpose: Name the opaque numeric attribute keys and decode packed values.
// Dependencies: thiserror, time
// ============================================================================

//! ## Overview
//! Reputation records carry provider-specific attributes as an open map
//! from opaque numeric-string keys to string values. This module names the
//! known keys per provider and decodes the packed value encodings: epoch
//! seconds carried as decimal strings and server versions packed into a
//! 64-bit integer.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;
use time::OffsetDateTime;
use time::macros::format_description;

// ============================================================================
// SECTION: Attribute Keys
// ============================================================================

/// Attributes shared by enterprise reputations for files and certificates.
pub mod enterprise {
    /// Version of the server that returned the reputation (packed encoding).
    pub const SERVER_VERSION: &str = "2139285";
}

/// Attributes of enterprise file reputations.
pub mod file_enterprise {
    /// Epoch seconds the file was first seen in the enterprise.
    pub const FIRST_CONTACT: &str = "2102165";
    /// Count of systems the file has been seen on.
    pub const PREVALENCE: &str = "2101652";
    /// Count of systems in the enterprise.
    pub const ENTERPRISE_SIZE: &str = "2111893";
    /// Minimum local reputation observed.
    pub const MIN_LOCAL_REP: &str = "2112148";
    /// Maximum local reputation observed.
    pub const MAX_LOCAL_REP: &str = "2112404";
    /// Average local reputation observed.
    pub const AVG_LOCAL_REP: &str = "2112660";
    /// Minimum local reputation of parent files.
    pub const PARENT_MIN_LOCAL_REP: &str = "2112916";
    /// Maximum local reputation of parent files.
    pub const PARENT_MAX_LOCAL_REP: &str = "2113172";
    /// Average local reputation of parent files.
    pub const PARENT_AVG_LOCAL_REP: &str = "2113428";
    /// Count of detections for the file.
    pub const DETECTION_COUNT: &str = "2113685";
    /// Epoch seconds of the last detection.
    pub const LAST_DETECTION_TIME: &str = "2113942";
    /// Whether the file is considered prevalent.
    pub const IS_PREVALENT: &str = "2123156";
    /// Count of distinct names the file has been seen under.
    pub const FILE_NAME_COUNT: &str = "2114965";
    /// Aggregate of child-file reputations (packed encoding).
    pub const CHILD_FILE_REPS: &str = "2138520";
    /// Aggregate of parent-file reputations (packed encoding).
    pub const PARENT_FILE_REPS: &str = "2138264";
}

/// Attributes of enterprise certificate reputations.
pub mod cert_enterprise {
    /// Epoch seconds the certificate was first seen in the enterprise.
    pub const FIRST_CONTACT: &str = "2109589";
    /// Count of systems the certificate has been seen on.
    pub const PREVALENCE: &str = "2109333";
    /// Whether the certificate has associated file overrides.
    pub const HAS_FILE_OVERRIDES: &str = "2122901";
    /// Whether the certificate is considered prevalent.
    pub const IS_PREVALENT: &str = "2125972";
}

/// Attributes shared by global threat-intelligence reputations.
pub mod gti {
    /// Raw response returned by the global feed.
    pub const ORIGINAL_RESPONSE: &str = "2120340";
}

/// Attributes of global threat-intelligence file reputations.
pub mod file_gti {
    /// Global prevalence of the file.
    pub const PREVALENCE: &str = "2102421";
    /// Epoch seconds the file was first seen globally.
    pub const FIRST_CONTACT: &str = "2101908";
}

/// Attributes of global threat-intelligence certificate reputations.
pub mod cert_gti {
    /// Global prevalence of the certificate.
    pub const PREVALENCE: &str = "2108821";
    /// Epoch seconds the certificate was first seen globally.
    pub const FIRST_CONTACT: &str = "2109077";
    /// Whether the certificate has been revoked.
    pub const REVOKED: &str = "2117524";
}

/// Attributes of sandbox-analysis reputations.
pub mod atd {
    /// Score reported by the cloud analysis engine.
    pub const GAM_SCORE: &str = "4194962";
    /// Score reported by the antivirus engine.
    pub const AV_ENGINE_SCORE: &str = "4195218";
    /// Score reported by sandbox detonation.
    pub const SANDBOX_SCORE: &str = "4195474";
    /// Overall sandbox verdict.
    pub const VERDICT: &str = "4195730";
    /// Observed behaviors (packed encoding).
    pub const BEHAVIORS: &str = "4197784";
}

// ============================================================================
// SECTION: Decode Errors
// ============================================================================

/// Errors raised while decoding attribute values.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AttributeError {
    /// Attribute value is not a decimal integer.
    #[error("attribute value is not numeric: {value}")]
    NotNumeric {
        /// The rejected attribute value.
        value: String,
    },
    /// Attribute value is outside the representable time range.
    #[error("attribute epoch out of range: {value}")]
    EpochOutOfRange {
        /// The rejected attribute value.
        value: String,
    },
    /// Decoded time value could not be formatted.
    #[error("attribute time formatting failed: {reason}")]
    Format {
        /// Why formatting failed.
        reason: String,
    },
    /// Aggregate attribute is not a valid packed value.
    #[error("attribute aggregate malformed: {reason}")]
    MalformedAggregate {
        /// Why the aggregate was rejected.
        reason: String,
    },
}

// ============================================================================
// SECTION: Aggregate Values
// ============================================================================

/// Decoded reputation aggregate carried by child/parent file attributes.
///
/// # Invariants
/// - Trust values are on the standard 0..100 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReputationAggregate {
    /// Count of files in the aggregate.
    pub count: u16,
    /// Maximum trust level found across the files.
    pub max_trust: u16,
    /// Minimum trust level found across the files.
    pub min_trust: u16,
    /// Trust level of the last file.
    pub last_trust: u16,
    /// Average trust level across the files.
    pub average_trust: f64,
}

// ============================================================================
// SECTION: Decode Helpers
// ============================================================================

/// Parses an epoch-seconds attribute value.
///
/// # Errors
///
/// Returns [`AttributeError::NotNumeric`] when the value is not a decimal
/// integer.
pub fn epoch_seconds(value: &str) -> Result<i64, AttributeError> {
    value.trim().parse::<i64>().map_err(|_| AttributeError::NotNumeric {
        value: value.to_string(),
    })
}

/// Converts an epoch-seconds attribute value to a UTC datetime.
///
/// # Errors
///
/// Returns [`AttributeError`] when the value is not numeric or outside the
/// representable time range.
pub fn to_datetime(value: &str) -> Result<OffsetDateTime, AttributeError> {
    let epoch = epoch_seconds(value)?;
    OffsetDateTime::from_unix_timestamp(epoch).map_err(|_| AttributeError::EpochOutOfRange {
        value: value.to_string(),
    })
}

/// Formats an epoch-seconds attribute value as `YYYY-MM-DD HH:MM:SS` (UTC).
///
/// # Errors
///
/// Returns [`AttributeError`] when the value cannot be decoded or formatted.
pub fn to_datetime_string(value: &str) -> Result<String, AttributeError> {
    let datetime = to_datetime(value)?;
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    datetime.format(&format).map_err(|err| AttributeError::Format {
        reason: err.to_string(),
    })
}

/// Decodes a packed server-version attribute into its component values.
///
/// The packed 64-bit layout is: major in bits 56..64, minor in bits
/// 48..56, patch in bits 32..48, build in bits 0..32.
///
/// # Errors
///
/// Returns [`AttributeError::NotNumeric`] when the value is not a decimal
/// integer.
pub fn version_tuple(value: &str) -> Result<(u64, u64, u64, u64), AttributeError> {
    let packed = value.trim().parse::<u64>().map_err(|_| AttributeError::NotNumeric {
        value: value.to_string(),
    })?;
    Ok((
        (packed >> 56) & 0xff,
        (packed >> 48) & 0xff,
        (packed >> 32) & 0xffff,
        packed & 0xffff_ffff,
    ))
}

/// Decodes a packed server-version attribute into a dotted version string.
///
/// # Errors
///
/// Returns [`AttributeError::NotNumeric`] when the value is not a decimal
/// integer.
pub fn version_string(value: &str) -> Result<String, AttributeError> {
    let (major, minor, patch, build) = version_tuple(value)?;
    Ok(format!("{major}.{minor}.{patch}.{build}"))
}

/// Decodes a packed aggregate attribute (child/parent file reputations).
///
/// The wire form is base64 over five little-endian 16-bit values: count,
/// maximum, minimum, last, and the average scaled by 100.
///
/// # Errors
///
/// Returns [`AttributeError::MalformedAggregate`] when the value is not
/// valid base64 or does not hold exactly five values.
pub fn aggregate_tuple(value: &str) -> Result<ReputationAggregate, AttributeError> {
    let bytes = STANDARD.decode(value).map_err(|err| AttributeError::MalformedAggregate {
        reason: err.to_string(),
    })?;
    if bytes.len() != 10 {
        return Err(AttributeError::MalformedAggregate {
            reason: format!("expected 10 bytes, got {}", bytes.len()),
        });
    }
    let mut values = [0u16; 5];
    for (slot, pair) in values.iter_mut().zip(bytes.chunks_exact(2)) {
        *slot = u16::from_le_bytes([pair[0], pair[1]]);
    }
    let average = if values[4] > 0 {
        f64::from(values[4]) / 100.0
    } else {
        0.0
    };
    Ok(ReputationAggregate {
        count: values[0],
        max_trust: values[1],
        min_trust: values[2],
        last_trust: values[3],
        average_trust: average,
    })
}
