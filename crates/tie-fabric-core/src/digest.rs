// crates/tie-fabric-core/src/digest.rs
// ============================================================================
// Module: Digest Identifiers
// Description: Hash algorithm tokens and the canonical digest mapping.
// Purpose: Identify files and certificates by typed digest sets.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Files and certificates are identified on the fabric by one or more
//! digests, each tagged with a hash algorithm token. The canonical
//! client-facing form is a [`DigestMap`]: an ordered mapping from
//! [`HashAlgorithm`] to a hex digest string.
//! Invariants:
//! - Wire tokens for the known algorithms are `"md5"`, `"sha1"`, `"sha256"`.
//! - Unknown tokens round-trip verbatim through [`HashAlgorithm::Other`];
//!   the service is free to add entries the client does not recognize.
//! - Duplicate algorithm entries overwrite; the last occurrence wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

// ============================================================================
// SECTION: Hash Algorithms
// ============================================================================

/// Hash algorithm tag carried next to each digest value.
///
/// # Invariants
/// - Known algorithms serialize to their fixed wire tokens.
/// - Unrecognized tokens are preserved verbatim in [`HashAlgorithm::Other`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HashAlgorithm {
    /// MD5 digest (wire token `"md5"`).
    Md5,
    /// SHA-1 digest (wire token `"sha1"`).
    Sha1,
    /// SHA-256 digest (wire token `"sha256"`).
    Sha256,
    /// Algorithm token this client does not recognize.
    Other(String),
}

impl HashAlgorithm {
    /// Returns the wire token for the algorithm.
    #[must_use]
    pub fn as_token(&self) -> &str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Other(token) => token,
        }
    }

    /// Parses a wire token into an algorithm tag.
    #[must_use]
    pub fn from_token(token: impl Into<String>) -> Self {
        let token = token.into();
        match token.as_str() {
            "md5" => Self::Md5,
            "sha1" => Self::Sha1,
            "sha256" => Self::Sha256,
            _ => Self::Other(token),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_token())
    }
}

impl Serialize for HashAlgorithm {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_token())
    }
}

impl<'de> Deserialize<'de> for HashAlgorithm {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Ok(Self::from_token(token))
    }
}

// ============================================================================
// SECTION: Digest Mapping
// ============================================================================

/// Ordered mapping from hash algorithm to hex digest string.
///
/// # Invariants
/// - At most one digest per algorithm; inserts overwrite.
/// - Digest strings produced by normalization are lowercase hex; values
///   supplied by callers are carried verbatim and validated by the codec
///   at encoding time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigestMap {
    /// Digest entries keyed by algorithm.
    entries: BTreeMap<HashAlgorithm, String>,
}

impl DigestMap {
    /// Creates an empty digest mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Inserts a digest, returning the previous value for the algorithm.
    pub fn insert(
        &mut self,
        algorithm: HashAlgorithm,
        digest: impl Into<String>,
    ) -> Option<String> {
        self.entries.insert(algorithm, digest.into())
    }

    /// Returns the digest for the algorithm when present.
    #[must_use]
    pub fn get(&self, algorithm: &HashAlgorithm) -> Option<&str> {
        self.entries.get(algorithm).map(String::as_str)
    }

    /// Returns the number of digest entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when no digests are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates digest entries in algorithm order.
    pub fn iter(&self) -> impl Iterator<Item = (&HashAlgorithm, &str)> {
        self.entries.iter().map(|(algorithm, digest)| (algorithm, digest.as_str()))
    }
}

impl FromIterator<(HashAlgorithm, String)> for DigestMap {
    fn from_iter<I: IntoIterator<Item = (HashAlgorithm, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DigestMap {
    type Item = (&'a HashAlgorithm, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, HashAlgorithm, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
