// crates/tie-fabric-bus/src/lib.rs
// ============================================================================
// Module: TIE Fabric Bus Library
// Description: Transport boundary and synchronous exchange for the client.
// Purpose: Abstract the bus and translate exchange outcomes to typed errors.
// Dependencies: serde, serde_json, thiserror, toml
// ============================================================================

//! ## Overview
//! TIE Fabric Bus defines the transport boundary the client speaks through:
//! the [`Fabric`] trait, the blocking [`SyncExchange`] with timeout
//! handling and remote-error translation, validated [`ClientConfig`]
//! settings, and the in-process [`MemoryFabric`] reference implementation.
//! Invariants:
//! - Remote errors surface as `Error: <message> (<code>)`.
//! - The response timeout floor is enforced at configuration time only.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod exchange;
pub mod fabric;
pub mod memory;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ClientConfig;
pub use config::ConfigError;
pub use config::DEFAULT_RESPONSE_TIMEOUT;
pub use config::MIN_RESPONSE_TIMEOUT;
pub use exchange::ExchangeError;
pub use exchange::SyncExchange;
pub use fabric::EventSink;
pub use fabric::Fabric;
pub use fabric::FabricError;
pub use fabric::FabricResponse;
pub use memory::MemoryFabric;
pub use memory::RequestHandler;
