// crates/tie-fabric-core/src/topics.rs
// ============================================================================
// Module: Fabric Topics
// Description: Fixed topic strings for reputation requests and events.
// Purpose: Centralize the interop-critical topic names.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Topic strings consumed and produced by the reputation service. These are
//! fixed by the deployed service and must match exactly for interop; they
//! are never derived or parameterized.

// ============================================================================
// SECTION: Request Topics
// ============================================================================

/// Request topic for querying file reputations.
pub const GET_FILE_REPUTATION_TOPIC: &str = "/mcafee/service/tie/file/reputation";
/// Request topic for setting the enterprise reputation of a file.
pub const SET_FILE_REPUTATION_TOPIC: &str = "/mcafee/service/tie/file/reputation/set";
/// Request topic for querying certificate reputations.
pub const GET_CERT_REPUTATION_TOPIC: &str = "/mcafee/service/tie/cert/reputation";
/// Request topic for setting the enterprise reputation of a certificate.
pub const SET_CERT_REPUTATION_TOPIC: &str = "/mcafee/service/tie/cert/reputation/set";
/// Request topic for querying systems that referenced a file.
pub const FILE_FIRST_REFERENCES_TOPIC: &str = "/mcafee/service/tie/file/agents";
/// Request topic for querying systems that referenced a certificate.
pub const CERT_FIRST_REFERENCES_TOPIC: &str = "/mcafee/service/tie/cert/agents";

// ============================================================================
// SECTION: Event Topics
// ============================================================================

/// Event topic broadcasting file reputation changes.
pub const FILE_REPUTATION_CHANGE_TOPIC: &str = "/mcafee/event/tie/file/repchange/broadcast";
/// Event topic broadcasting certificate reputation changes.
pub const CERT_REPUTATION_CHANGE_TOPIC: &str = "/mcafee/event/tie/cert/repchange/broadcast";
/// Event topic for file detections.
pub const FILE_DETECTION_TOPIC: &str = "/mcafee/event/tie/file/detection";
/// Event topic for first instances of files in the enterprise.
pub const FILE_FIRST_INSTANCE_TOPIC: &str = "/mcafee/event/tie/file/firstinstance";
/// Event topic external reputation reports are published to.
pub const EXTERNAL_FILE_REPORT_TOPIC: &str = "/mcafee/event/external/file/report";
