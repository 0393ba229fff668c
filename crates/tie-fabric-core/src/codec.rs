// crates/tie-fabric-core/src/codec.rs
// ============================================================================
// Module: Hash Wire Codec
// Description: Bidirectional hex-string and base64 wire-encoding conversion.
// Purpose: Carry raw digest bytes inside JSON payloads without loss.
// Dependencies: base64, thiserror
// ============================================================================

//! ## Overview
//! The TIE service carries digest bytes inside JSON payloads as standard
//! base64 (no line wrapping), while the client-facing API uses hex strings.
//! This module provides the total conversion between the two forms.
//! Invariants:
//! - `wire_to_hex(hex_to_wire(h))` equals `h` lowercased for every valid
//!   hex string `h`.
//! - Hex output is always lowercase.
//! - Conversion never partially succeeds; malformed input fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

// ============================================================================
// SECTION: Codec Errors
// ============================================================================

/// Errors raised by the hash wire codec.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - Codec failures indicate caller input errors and are never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Hex digest string has odd length or non-hex characters.
    #[error("malformed hex digest: {reason}")]
    MalformedHash {
        /// Why the hex string was rejected.
        reason: String,
    },
    /// Wire string is not valid standard base64.
    #[error("malformed wire encoding: {reason}")]
    MalformedWireEncoding {
        /// Why the wire string was rejected.
        reason: String,
    },
}

// ============================================================================
// SECTION: Conversions
// ============================================================================

/// Converts a hex digest string to its base64 wire form.
///
/// # Errors
///
/// Returns [`CodecError::MalformedHash`] when the input has odd length or
/// contains non-hex characters.
pub fn hex_to_wire(hex: &str) -> Result<String, CodecError> {
    let bytes = hex_to_bytes(hex)?;
    Ok(STANDARD.encode(bytes))
}

/// Converts a base64 wire string back to a lowercase hex digest string.
///
/// # Errors
///
/// Returns [`CodecError::MalformedWireEncoding`] when the input is not
/// valid standard base64.
pub fn wire_to_hex(wire: &str) -> Result<String, CodecError> {
    let bytes = STANDARD.decode(wire).map_err(|err| CodecError::MalformedWireEncoding {
        reason: err.to_string(),
    })?;
    Ok(bytes_to_hex(&bytes))
}

/// Decodes a hex string into raw bytes.
///
/// # Errors
///
/// Returns [`CodecError::MalformedHash`] on odd length or non-hex input.
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>, CodecError> {
    if hex.len() % 2 != 0 {
        return Err(CodecError::MalformedHash {
            reason: format!("odd length {}", hex.len()),
        });
    }
    let digits = hex.as_bytes();
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks_exact(2) {
        let high = hex_digit(pair[0])?;
        let low = hex_digit(pair[1])?;
        bytes.push((high << 4) | low);
    }
    Ok(bytes)
}

/// Renders raw bytes as a lowercase hex string.
#[must_use]
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    /// Lowercase hex digit alphabet indexed by nibble value.
    const ALPHABET: &[u8; 16] = b"0123456789abcdef";
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        hex.push(char::from(ALPHABET[usize::from(byte >> 4)]));
        hex.push(char::from(ALPHABET[usize::from(byte & 0x0f)]));
    }
    hex
}

/// Returns the nibble value of a single hex digit.
///
/// # Errors
///
/// Returns [`CodecError::MalformedHash`] when the byte is not a hex digit.
fn hex_digit(digit: u8) -> Result<u8, CodecError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        other => Err(CodecError::MalformedHash {
            reason: format!("invalid hex digit {:?}", char::from(other)),
        }),
    }
}
