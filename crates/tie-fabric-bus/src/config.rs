// crates/tie-fabric-bus/src/config.rs
// ============================================================================
// Module: Client Configuration
// Description: Per-client settings with fail-closed file loading.
// Purpose: Validate the response-timeout setting at configuration time.
// Dependencies: serde, toml, thiserror
// ============================================================================

//! ## Overview
//! Client configuration currently carries one setting: the response
//! timeout applied to synchronous exchanges. The timeout has a hard floor;
//! values below it are rejected when the configuration is built or loaded,
//! never at request time. File loading is fail-closed: oversized,
//! non-UTF-8, or unparsable files are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Minimum allowed response timeout.
pub const MIN_RESPONSE_TIMEOUT: Duration = Duration::from_secs(30);

/// Response timeout applied when none is configured.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(3600);

/// Maximum accepted configuration file size in bytes.
const MAX_CONFIG_BYTES: usize = 1_048_576;

// ============================================================================
// SECTION: Configuration Errors
// ============================================================================

/// Errors raised while building or loading client configuration.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("config read failed: {0}")]
    Io(String),
    /// Configuration file exceeds the size limit.
    #[error("config file exceeds size limit ({actual} > {limit})")]
    TooLarge {
        /// Actual file size in bytes.
        actual: usize,
        /// Maximum accepted size in bytes.
        limit: usize,
    },
    /// Configuration file is not valid UTF-8.
    #[error("config file must be utf-8")]
    NotUtf8,
    /// Configuration file could not be parsed.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// Requested response timeout is below the minimum floor.
    #[error("response timeout below minimum floor ({requested_millis} ms < {floor_millis} ms)")]
    TimeoutBelowFloor {
        /// Requested timeout in milliseconds.
        requested_millis: u64,
        /// Minimum floor in milliseconds.
        floor_millis: u64,
    },
}

// ============================================================================
// SECTION: Client Configuration
// ============================================================================

/// Per-client configuration for synchronous exchanges.
///
/// # Invariants
/// - `response_timeout` is always at or above [`MIN_RESPONSE_TIMEOUT`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Timeout applied to each request/response exchange.
    response_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            response_timeout: DEFAULT_RESPONSE_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Creates a configuration with the default response timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the configured response timeout.
    #[must_use]
    pub const fn response_timeout(&self) -> Duration {
        self.response_timeout
    }

    /// Sets the response timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TimeoutBelowFloor`] when the timeout is below
    /// [`MIN_RESPONSE_TIMEOUT`].
    pub fn set_response_timeout(&mut self, timeout: Duration) -> Result<(), ConfigError> {
        validate_response_timeout(timeout)?;
        self.response_timeout = timeout;
        Ok(())
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read, exceeds the
    /// size limit, is not UTF-8, fails to parse, or carries a timeout below
    /// the floor.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_BYTES {
            return Err(ConfigError::TooLarge {
                actual: bytes.len(),
                limit: MAX_CONFIG_BYTES,
            });
        }
        let text = String::from_utf8(bytes).map_err(|_| ConfigError::NotUtf8)?;
        let raw: RawConfig =
            toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        let mut config = Self::new();
        if let Some(secs) = raw.client.response_timeout_secs {
            config.set_response_timeout(Duration::from_secs(secs))?;
        }
        Ok(config)
    }
}

/// Validates a response timeout against the minimum floor.
///
/// # Errors
///
/// Returns [`ConfigError::TimeoutBelowFloor`] when the timeout is below
/// [`MIN_RESPONSE_TIMEOUT`].
pub fn validate_response_timeout(timeout: Duration) -> Result<(), ConfigError> {
    if timeout < MIN_RESPONSE_TIMEOUT {
        return Err(ConfigError::TimeoutBelowFloor {
            requested_millis: duration_millis(timeout),
            floor_millis: duration_millis(MIN_RESPONSE_TIMEOUT),
        });
    }
    Ok(())
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
#[must_use]
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// SECTION: File Shape
// ============================================================================

/// Top-level TOML configuration shape.
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    /// Client settings section.
    #[serde(default)]
    client: RawClientSection,
}

/// `[client]` section of the configuration file.
#[derive(Debug, Default, Deserialize)]
struct RawClientSection {
    /// Response timeout in seconds.
    response_timeout_secs: Option<u64>,
}
