// crates/tie-fabric-bus/tests/config_load.rs
// ============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards and the timeout floor.
// ============================================================================
//! ## Overview
//! Ensures client configuration input handling is strict and fail-closed,
//! and that the response-timeout floor is enforced at configuration time.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    clippy::missing_docs_in_private_items,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use tie_fabric_bus::config::ClientConfig;
use tie_fabric_bus::config::ConfigError;
use tie_fabric_bus::config::DEFAULT_RESPONSE_TIMEOUT;
use tie_fabric_bus::config::MIN_RESPONSE_TIMEOUT;

fn write_config(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents).expect("write config");
    file
}

// ============================================================================
// SECTION: Timeout Floor
// ============================================================================

#[test]
fn default_timeout_is_one_hour() {
    let config = ClientConfig::new();
    assert_eq!(config.response_timeout(), DEFAULT_RESPONSE_TIMEOUT);
    assert_eq!(config.response_timeout(), Duration::from_secs(3600));
}

#[test]
fn timeout_below_floor_is_rejected() {
    let mut config = ClientConfig::new();
    let err = config.set_response_timeout(Duration::from_secs(29)).unwrap_err();
    assert!(matches!(err, ConfigError::TimeoutBelowFloor { .. }), "got {err}");
    assert_eq!(config.response_timeout(), DEFAULT_RESPONSE_TIMEOUT, "rejected set must not apply");
}

#[test]
fn timeout_at_floor_is_accepted() {
    let mut config = ClientConfig::new();
    config.set_response_timeout(MIN_RESPONSE_TIMEOUT).expect("floor value");
    assert_eq!(config.response_timeout(), MIN_RESPONSE_TIMEOUT);
}

#[test]
fn timeout_above_floor_is_accepted() {
    let mut config = ClientConfig::new();
    config.set_response_timeout(Duration::from_secs(120)).expect("set timeout");
    assert_eq!(config.response_timeout(), Duration::from_secs(120));
}

// ============================================================================
// SECTION: File Loading
// ============================================================================

#[test]
fn load_reads_timeout_from_file() {
    let file = write_config(b"[client]\nresponse_timeout_secs = 90\n");
    let config = ClientConfig::load(file.path()).expect("load config");
    assert_eq!(config.response_timeout(), Duration::from_secs(90));
}

#[test]
fn load_without_timeout_uses_default() {
    let file = write_config(b"[client]\n");
    let config = ClientConfig::load(file.path()).expect("load config");
    assert_eq!(config.response_timeout(), DEFAULT_RESPONSE_TIMEOUT);
}

#[test]
fn load_empty_file_uses_default() {
    let file = write_config(b"");
    let config = ClientConfig::load(file.path()).expect("load config");
    assert_eq!(config.response_timeout(), DEFAULT_RESPONSE_TIMEOUT);
}

#[test]
fn load_rejects_timeout_below_floor() {
    let file = write_config(b"[client]\nresponse_timeout_secs = 5\n");
    let err = ClientConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::TimeoutBelowFloor { .. }), "got {err}");
}

#[test]
fn load_rejects_missing_file() {
    let err = ClientConfig::load(std::path::Path::new("/nonexistent/tie.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)), "got {err}");
}

#[test]
fn load_rejects_unparsable_file() {
    let file = write_config(b"not = [valid\n");
    let err = ClientConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "got {err}");
}

#[test]
fn load_rejects_non_utf8_file() {
    let file = write_config(&[0xFF, 0xFE, 0xFF]);
    let err = ClientConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NotUtf8), "got {err}");
}

#[test]
fn load_rejects_oversized_file() {
    let payload = vec![b'#'; 1_048_577];
    let file = write_config(&payload);
    let err = ClientConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::TooLarge { .. }), "got {err}");
}
