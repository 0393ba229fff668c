// crates/tie-fabric-core/src/trust.rs
// ============================================================================
// Module: Trust Level Scale
// Description: Named checkpoints on the reputation trust-level scale.
// Purpose: Provide the standard trust values used in payloads and results.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Trust levels are integers on a fixed scale from 0 (not set) to 100
//! (known trusted installer). The scale is open: ordinary set operations
//! pass caller-supplied levels through without range validation, matching
//! the service's permissiveness. Only external reputation reports restrict
//! values to the named checkpoints.

// ============================================================================
// SECTION: Standard Trust Levels
// ============================================================================

/// Trust level has not been established.
pub const NOT_SET: i64 = 0;
/// Subject is a known malicious item.
pub const KNOWN_MALICIOUS: i64 = 1;
/// Subject is most likely malicious.
pub const MOST_LIKELY_MALICIOUS: i64 = 15;
/// Subject might be malicious.
pub const MIGHT_BE_MALICIOUS: i64 = 30;
/// Reputation is unknown.
pub const UNKNOWN: i64 = 50;
/// Subject might be trusted.
pub const MIGHT_BE_TRUSTED: i64 = 70;
/// Subject is most likely trusted.
pub const MOST_LIKELY_TRUSTED: i64 = 85;
/// Subject is a known trusted item.
pub const KNOWN_TRUSTED: i64 = 99;
/// Subject is a known trusted installer.
pub const KNOWN_TRUSTED_INSTALLER: i64 = 100;

/// The named checkpoints of the standard trust-level scale.
pub const STANDARD_LEVELS: [i64; 9] = [
    NOT_SET,
    KNOWN_MALICIOUS,
    MOST_LIKELY_MALICIOUS,
    MIGHT_BE_MALICIOUS,
    UNKNOWN,
    MIGHT_BE_TRUSTED,
    MOST_LIKELY_TRUSTED,
    KNOWN_TRUSTED,
    KNOWN_TRUSTED_INSTALLER,
];

/// Returns true when the level is one of the named checkpoints.
#[must_use]
pub fn is_standard_level(level: i64) -> bool {
    STANDARD_LEVELS.contains(&level)
}

// ============================================================================
// SECTION: Sandbox Verdict Scale
// ============================================================================

/// Trust verdicts reported by the sandbox analysis provider.
///
/// The sandbox provider scores on its own scale, carried inside the
/// provider-specific attribute map rather than the standard trust field.
pub mod atd {
    /// Verdict has not been established.
    pub const NOT_SET: i64 = -2;
    /// Subject is known trusted.
    pub const KNOWN_TRUSTED: i64 = -1;
    /// Subject is most likely trusted.
    pub const MOST_LIKELY_TRUSTED: i64 = 0;
    /// Subject might be trusted.
    pub const MIGHT_BE_TRUSTED: i64 = 1;
    /// Verdict is unknown.
    pub const UNKNOWN: i64 = 2;
    /// Subject might be malicious.
    pub const MIGHT_BE_MALICIOUS: i64 = 3;
    /// Subject is most likely malicious.
    pub const MOST_LIKELY_MALICIOUS: i64 = 4;
    /// Subject is known malicious.
    pub const KNOWN_MALICIOUS: i64 = 5;
}
