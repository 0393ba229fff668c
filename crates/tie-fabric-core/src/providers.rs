// crates/tie-fabric-core/src/providers.rs
// ============================================================================
// Module: Reputation Provider Identifiers
// Description: Canonical numeric identifiers for reputation providers.
// Purpose: Centralize provider ids used in payloads and response mappings.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Reputation assessments are attributed to numbered providers. The numeric
//! spaces for files and certificates are disjoint and fixed by the service
//! protocol; response mappings are keyed by the raw numeric id so records
//! from providers unknown to this client are preserved.
//! Invariants:
//! - Identifiers remain stable for payload construction and interop.

// ============================================================================
// SECTION: File Providers
// ============================================================================

/// Providers of file reputation assessments.
///
/// # Invariants
/// - Numeric identifiers are fixed by the service protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FileProvider {
    /// Global Threat Intelligence feed.
    Gti,
    /// Local enterprise reputation history.
    Enterprise,
    /// Advanced Threat Defense sandbox analysis.
    Atd,
    /// Web gateway analysis.
    Mwg,
    /// External reputation reports submitted over the fabric.
    External,
}

impl FileProvider {
    /// Returns the numeric provider identifier.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Gti => 1,
            Self::Enterprise => 3,
            Self::Atd => 5,
            Self::Mwg => 7,
            Self::External => 15,
        }
    }

    /// Returns the provider for a numeric identifier when known.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            1 => Some(Self::Gti),
            3 => Some(Self::Enterprise),
            5 => Some(Self::Atd),
            7 => Some(Self::Mwg),
            15 => Some(Self::External),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Certificate Providers
// ============================================================================

/// Providers of certificate reputation assessments.
///
/// # Invariants
/// - Numeric identifiers are fixed by the service protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CertProvider {
    /// Global Threat Intelligence feed.
    Gti,
    /// Local enterprise reputation history.
    Enterprise,
}

impl CertProvider {
    /// Returns the numeric provider identifier.
    #[must_use]
    pub const fn id(self) -> i64 {
        match self {
            Self::Gti => 2,
            Self::Enterprise => 4,
        }
    }

    /// Returns the provider for a numeric identifier when known.
    #[must_use]
    pub const fn from_id(id: i64) -> Option<Self> {
        match id {
            2 => Some(Self::Gti),
            4 => Some(Self::Enterprise),
            _ => None,
        }
    }
}
