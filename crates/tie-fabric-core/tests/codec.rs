// crates/tie-fabric-core/tests/codec.rs
// ============================================================================
// Module: Hash Codec Tests
// Description: Verifies hex/base64 wire conversion behavior.
// ============================================================================
//! ## Overview
//! Ensures the wire codec round-trips digests exactly, normalizes hex case,
//! and rejects malformed hex and base64 input.

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

use proptest::prelude::any;
use proptest::prop_assert_eq;
use proptest::proptest;
use tie_fabric_core::codec::CodecError;
use tie_fabric_core::codec::bytes_to_hex;
use tie_fabric_core::codec::hex_to_bytes;
use tie_fabric_core::codec::hex_to_wire;
use tie_fabric_core::codec::wire_to_hex;

// ============================================================================
// SECTION: Golden Vectors
// ============================================================================

#[test]
fn golden_md5_hex_to_wire() {
    let wire = hex_to_wire("f2c7bb8acc97f92e987a2d4087d021b1").expect("encode");
    assert_eq!(wire, "8se7isyX+S6Yei1Ah9AhsQ==");
}

#[test]
fn golden_md5_wire_to_hex() {
    let hex = wire_to_hex("8se7isyX+S6Yei1Ah9AhsQ==").expect("decode");
    assert_eq!(hex, "f2c7bb8acc97f92e987a2d4087d021b1");
}

#[test]
fn golden_sha1_round_trip() {
    let wire = hex_to_wire("7eb0139d2175739b3ccb0d1110067820be6abd29").expect("encode");
    assert_eq!(wire, "frATnSF1c5s8yw0REAZ4IL5qvSk=");
    assert_eq!(wire_to_hex(&wire).expect("decode"), "7eb0139d2175739b3ccb0d1110067820be6abd29");
}

#[test]
fn golden_sha256_round_trip() {
    let hex = "142e1d688ef0568370c37187fd9f2351d7ddeda574f8bfa9b0fa4ef42db85aa2";
    let wire = hex_to_wire(hex).expect("encode");
    assert_eq!(wire, "FC4daI7wVoNww3GH/Z8jUdfd7aV0+L+psPpO9C24WqI=");
    assert_eq!(wire_to_hex(&wire).expect("decode"), hex);
}

// ============================================================================
// SECTION: Case Normalization
// ============================================================================

#[test]
fn uppercase_hex_normalizes_to_lowercase() {
    let wire = hex_to_wire("1C26E2037C8E205B452CAB3565D696512207D66D").expect("encode");
    assert_eq!(wire, "HCbiA3yOIFtFLKs1ZdaWUSIH1m0=");
    assert_eq!(wire_to_hex(&wire).expect("decode"), "1c26e2037c8e205b452cab3565d696512207d66d");
}

#[test]
fn mixed_case_hex_is_accepted() {
    let wire = hex_to_wire("aAbBcCdD").expect("encode");
    assert_eq!(wire_to_hex(&wire).expect("decode"), "aabbccdd");
}

// ============================================================================
// SECTION: Malformed Input
// ============================================================================

#[test]
fn odd_length_hex_is_rejected() {
    let err = hex_to_wire("abc").unwrap_err();
    assert!(matches!(err, CodecError::MalformedHash { .. }), "got {err}");
}

#[test]
fn non_hex_characters_are_rejected() {
    let err = hex_to_wire("zz00").unwrap_err();
    assert!(matches!(err, CodecError::MalformedHash { .. }), "got {err}");
}

#[test]
fn empty_hex_encodes_to_empty_wire() {
    assert_eq!(hex_to_wire("").expect("encode"), "");
    assert_eq!(wire_to_hex("").expect("decode"), "");
}

#[test]
fn invalid_base64_is_rejected() {
    let err = wire_to_hex("not base64!").unwrap_err();
    assert!(matches!(err, CodecError::MalformedWireEncoding { .. }), "got {err}");
}

#[test]
fn base64_with_bad_padding_is_rejected() {
    let err = wire_to_hex("AAA").unwrap_err();
    assert!(matches!(err, CodecError::MalformedWireEncoding { .. }), "got {err}");
}

// ============================================================================
// SECTION: Round-Trip Law
// ============================================================================

#[test]
fn hex_digit_boundaries_round_trip() {
    for hex in ["00", "0f", "f0", "ff", "09af"] {
        let wire = hex_to_wire(hex).expect("encode");
        assert_eq!(wire_to_hex(&wire).expect("decode"), hex, "round trip for {hex}");
    }
}

proptest! {
    #[test]
    fn round_trip_preserves_arbitrary_digests(
        bytes in proptest::collection::vec(any::<u8>(), 0 .. 64)
    ) {
        let hex = bytes_to_hex(&bytes);
        let wire = hex_to_wire(&hex).expect("encode");
        prop_assert_eq!(wire_to_hex(&wire).expect("decode"), hex);
    }

    #[test]
    fn round_trip_lowercases_uppercase_input(
        bytes in proptest::collection::vec(any::<u8>(), 1 .. 32)
    ) {
        let hex = bytes_to_hex(&bytes);
        let upper = hex.to_ascii_uppercase();
        let wire = hex_to_wire(&upper).expect("encode");
        prop_assert_eq!(wire_to_hex(&wire).expect("decode"), hex);
    }

    #[test]
    fn decode_matches_byte_values(bytes in proptest::collection::vec(any::<u8>(), 0 .. 32)) {
        let hex = bytes_to_hex(&bytes);
        prop_assert_eq!(hex_to_bytes(&hex).expect("decode"), bytes);
    }
}
