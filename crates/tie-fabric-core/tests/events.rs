// crates/tie-fabric-core/tests/events.rs
// ============================================================================
// Module: Event Translation Tests
// Description: Verifies raw event payloads translate to canonical shapes.
// ============================================================================
//! ## Overview
//! Ensures reputation-change, detection, and first-instance payloads
//! translate exactly: digest lists become hex mappings, reputation
//! envelopes become provider-keyed mappings, certificate relationship and
//! public-key digests decode, and shape violations fail closed.

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

use serde_json::json;
use tie_fabric_core::digest::HashAlgorithm;
use tie_fabric_core::events::TranslateError;
use tie_fabric_core::events::translate_detection;
use tie_fabric_core::events::translate_first_instance;
use tie_fabric_core::events::translate_reputation_change;

fn payload_bytes(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).expect("payload bytes")
}

// ============================================================================
// SECTION: Reputation Change Events
// ============================================================================

#[test]
fn file_reputation_change_translates_fully() {
    let raw = payload_bytes(json!({
        "hashes": [
            {"type": "md5", "value": "bQvLG6j1WmwRB8LZ2gPa1w=="},
            {"type": "sha1", "value": "OxbrjQd0H6+3meBW5YuBoInTcqM="},
            {"type": "sha256", "value": "yXfKH1ESH+5YzaiIJ6YXOtTx1y2AJihOTE9EMCqWfkA="}
        ],
        "newReputations": {
            "reputations": [
                {
                    "trustLevel": 85,
                    "providerId": 3,
                    "createDate": 1_409_783_001,
                    "attributes": {"2098277": "256"}
                },
                {
                    "trustLevel": 99,
                    "providerId": 1,
                    "createDate": 1_409_783_001,
                    "attributes": {"2120340": "2139160704"}
                }
            ],
            "props": {"serverTime": 1_409_851_328}
        },
        "oldReputations": {
            "reputations": [
                {
                    "trustLevel": 0,
                    "providerId": 3,
                    "createDate": 1_409_783_001,
                    "attributes": {"2098277": "256"}
                }
            ],
            "props": {"serverTime": 1_409_851_328}
        },
        "relationships": {
            "certificate": {
                "hashes": [
                    {"type": "sha1", "value": "rB/QkipKKm5XeazdYodHwoOUsLk="}
                ]
            }
        },
        "updateTime": 1_409_851_328
    }));

    let event = translate_reputation_change(&raw).expect("translate");

    let hashes = event.hashes.as_ref().expect("hashes");
    assert_eq!(hashes.get(&HashAlgorithm::Md5), Some("6d0bcb1ba8f55a6c1107c2d9da03dad7"));
    assert_eq!(hashes.get(&HashAlgorithm::Sha1), Some("3b16eb8d07741fafb799e056e58b81a089d372a3"));
    assert_eq!(
        hashes.get(&HashAlgorithm::Sha256),
        Some("c977ca1f51121fee58cda88827a6173ad4f1d72d8026284e4c4f44302a967e40")
    );

    let new_reputations = event.new_reputations.as_ref().expect("newReputations");
    assert_eq!(new_reputations.len(), 2);
    assert_eq!(new_reputations.get(&1).expect("gti").trust_level, 99);
    assert_eq!(new_reputations.get(&3).expect("enterprise").trust_level, 85);

    let old_reputations = event.old_reputations.as_ref().expect("oldReputations");
    assert_eq!(old_reputations.get(&3).expect("enterprise").trust_level, 0);

    let certificate = event
        .relationships
        .as_ref()
        .expect("relationships")
        .certificate
        .as_ref()
        .expect("certificate");
    let cert_hashes = certificate.hashes.as_ref().expect("certificate hashes");
    assert_eq!(
        cert_hashes.get(&HashAlgorithm::Sha1),
        Some("ac1fd0922a4a2a6e5779acdd628747c28394b0b9")
    );

    assert_eq!(event.update_time, Some(1_409_851_328));
}

#[test]
fn certificate_reputation_change_decodes_public_key() {
    let raw = payload_bytes(json!({
        "hashes": [
            {"type": "sha1", "value": "bq4m24wTGCp5R5gpkbQyFzLMPeI="}
        ],
        "publicKeySha1": "O4ei1vOXcBYDZLeaFS/Mc7riet8=",
        "newReputations": {"reputations": []},
        "updateTime": 1_409_851_328
    }));
    let event = translate_reputation_change(&raw).expect("translate");
    assert_eq!(
        event.public_key_sha1.as_deref(),
        Some("3b87a2d6f39770160364b79a152fcc73bae27adf")
    );
    let new_reputations = event.new_reputations.as_ref().expect("newReputations");
    assert!(new_reputations.is_empty());
}

#[test]
fn relationship_public_key_is_decoded() {
    let raw = payload_bytes(json!({
        "relationships": {
            "certificate": {
                "publicKeySha1": "tMOy1ZbRRhwbtBe5Lc10gXq7gp0="
            }
        }
    }));
    let event = translate_reputation_change(&raw).expect("translate");
    let certificate = event
        .relationships
        .as_ref()
        .expect("relationships")
        .certificate
        .as_ref()
        .expect("certificate");
    assert_eq!(
        certificate.public_key_sha1.as_deref(),
        Some("b4c3b2d596d1461c1bb417b92dcd74817abb829d")
    );
    assert!(certificate.hashes.is_none());
}

#[test]
fn absent_sections_stay_absent() {
    let raw = payload_bytes(json!({"updateTime": 7}));
    let event = translate_reputation_change(&raw).expect("translate");
    assert!(event.hashes.is_none());
    assert!(event.new_reputations.is_none());
    assert!(event.old_reputations.is_none());
    assert!(event.relationships.is_none());
    assert!(event.public_key_sha1.is_none());
    assert_eq!(event.update_time, Some(7));
}

#[test]
fn envelope_without_reputation_list_becomes_empty_mapping() {
    let raw = payload_bytes(json!({"newReputations": {"props": {"serverTime": 1}}}));
    let event = translate_reputation_change(&raw).expect("translate");
    assert!(event.new_reputations.as_ref().expect("newReputations").is_empty());
}

#[test]
fn unknown_top_level_keys_are_preserved() {
    let raw = payload_bytes(json!({"updateTime": 1, "tenantId": "abc"}));
    let event = translate_reputation_change(&raw).expect("translate");
    assert_eq!(event.extra.get("tenantId"), Some(&json!("abc")));
}

// ============================================================================
// SECTION: Shape Violations
// ============================================================================

#[test]
fn mapping_shaped_hashes_are_rejected() {
    // Already-canonical input is a misuse; translation expects wire shape.
    let raw = payload_bytes(json!({
        "hashes": {"md5": "6d0bcb1ba8f55a6c1107c2d9da03dad7"}
    }));
    let err = translate_reputation_change(&raw).unwrap_err();
    assert!(matches!(err, TranslateError::Json(_)), "got {err}");
}

#[test]
fn invalid_json_is_rejected() {
    let err = translate_detection(b"not json").unwrap_err();
    assert!(matches!(err, TranslateError::Json(_)), "got {err}");
}

#[test]
fn malformed_digest_value_is_rejected() {
    let raw = payload_bytes(json!({
        "hashes": [{"type": "md5", "value": "***"}]
    }));
    let err = translate_first_instance(&raw).unwrap_err();
    assert!(matches!(err, TranslateError::Codec(_)), "got {err}");
}

// ============================================================================
// SECTION: Detection Events
// ============================================================================

#[test]
fn detection_event_translates_hashes_and_passes_fields_through() {
    let raw = payload_bytes(json!({
        "hashes": [
            {"value": "CZnbhOFq32TBWnuAOUhLMw==", "type": "md5"},
            {"value": "7vZcAfgW1DgH2WrHY5A3h14Fbks=", "type": "sha1"},
            {"type": "sha256", "value": "yXfKH1ESH+5YzaiIJ6YXOtTx1y2AJihOTE9EMCqWfkA="}
        ],
        "agentGuid": "{abc5d2c6-e959-11e3-baeb-005056c00009}",
        "remediationAction": 5,
        "localReputation": 1,
        "detectionTime": 1_402_617_156
    }));
    let event = translate_detection(&raw).expect("translate");
    let hashes = event.hashes.as_ref().expect("hashes");
    assert_eq!(hashes.get(&HashAlgorithm::Md5), Some("0999db84e16adf64c15a7b8039484b33"));
    assert_eq!(hashes.get(&HashAlgorithm::Sha1), Some("eef65c01f816d43807d96ac7639037875e056e4b"));
    assert_eq!(
        hashes.get(&HashAlgorithm::Sha256),
        Some("c977ca1f51121fee58cda88827a6173ad4f1d72d8026284e4c4f44302a967e40")
    );
    assert_eq!(event.system_guid.as_deref(), Some("{abc5d2c6-e959-11e3-baeb-005056c00009}"));
    assert_eq!(event.remediation_action, Some(5));
    assert_eq!(event.local_reputation, Some(1));
    assert_eq!(event.detection_time, Some(1_402_617_156));
    assert!(event.name.is_none());
}

// ============================================================================
// SECTION: First Instance Events
// ============================================================================

#[test]
fn first_instance_event_translates_hashes() {
    let raw = payload_bytes(json!({
        "hashes": [
            {"type": "sha1", "value": "0wzjHGXydh+ijtstLjkl1CkZgqU="},
            {"type": "md5", "value": "FvdpvB03zBTjCTuYgc8WkQ=="},
            {"type": "sha256", "value": "yXfKH1ESH+5YzaiIJ6YXOtTx1y2AJihOTE9EMCqWfkA="}
        ],
        "agentGuid": "testGuid"
    }));
    let event = translate_first_instance(&raw).expect("translate");
    let hashes = event.hashes.as_ref().expect("hashes");
    assert_eq!(hashes.get(&HashAlgorithm::Md5), Some("16f769bc1d37cc14e3093b9881cf1691"));
    assert_eq!(hashes.get(&HashAlgorithm::Sha1), Some("d30ce31c65f2761fa28edb2d2e3925d4291982a5"));
    assert_eq!(event.system_guid.as_deref(), Some("testGuid"));
    assert!(event.name.is_none());
}
