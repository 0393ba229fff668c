// crates/tie-fabric-bus/src/memory.rs
// ============================================================================
// Module: In-Memory Fabric
// Description: Reference fabric implementation with registered handlers.
// Purpose: Back tests and embedded deployments without a live bus.
// Dependencies: std
// ============================================================================

//! ## Overview
//! [`MemoryFabric`] implements the [`Fabric`] boundary entirely in process:
//! requests are answered by registered per-topic handlers and events are
//! delivered synchronously to registered sinks. Requests on topics with no
//! handler are answered with the service's unknown-topic error response
//! rather than a transport failure, matching the remote service's
//! behavior.
//! Invariants:
//! - Handlers and sinks are invoked outside the registry locks.
//! - Sinks are matched by identity on unsubscribe.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use crate::fabric::EventSink;
use crate::fabric::Fabric;
use crate::fabric::FabricError;
use crate::fabric::FabricResponse;

// ============================================================================
// SECTION: Handler Types
// ============================================================================

/// Request handler registered for a topic.
pub type RequestHandler = dyn Fn(&[u8]) -> FabricResponse + Send + Sync;

// ============================================================================
// SECTION: In-Memory Fabric
// ============================================================================

/// In-process fabric with per-topic request handlers and event sinks.
#[derive(Default)]
pub struct MemoryFabric {
    /// Request handlers keyed by topic.
    handlers: Mutex<BTreeMap<String, Arc<RequestHandler>>>,
    /// Event sinks keyed by topic.
    subscribers: Mutex<BTreeMap<String, Vec<Arc<dyn EventSink>>>>,
    /// Timeout supplied with the most recent request.
    last_request_timeout: Mutex<Option<Duration>>,
}

impl MemoryFabric {
    /// Creates an empty in-memory fabric.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a request handler for the topic, replacing any previous
    /// handler.
    ///
    /// # Errors
    ///
    /// Returns [`FabricError::Transport`] when the handler registry is
    /// poisoned.
    pub fn register_request_handler(
        &self,
        topic: impl Into<String>,
        handler: impl Fn(&[u8]) -> FabricResponse + Send + Sync + 'static,
    ) -> Result<(), FabricError> {
        let mut handlers = self
            .handlers
            .lock()
            .map_err(|_| FabricError::Transport("handler registry poisoned".to_string()))?;
        handlers.insert(topic.into(), Arc::new(handler));
        Ok(())
    }

    /// Returns the topics that currently have at least one sink registered.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<String> {
        match self.subscribers.lock() {
            Ok(subscribers) => subscribers
                .iter()
                .filter(|(_, sinks)| !sinks.is_empty())
                .map(|(topic, _)| topic.clone())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Returns the timeout supplied with the most recent request.
    #[must_use]
    pub fn last_request_timeout(&self) -> Option<Duration> {
        match self.last_request_timeout.lock() {
            Ok(last) => *last,
            Err(_) => None,
        }
    }
}

impl Fabric for MemoryFabric {
    fn send_request(
        &self,
        topic: &str,
        payload: &[u8],
        timeout: Duration,
    ) -> Result<FabricResponse, FabricError> {
        {
            let mut last = self
                .last_request_timeout
                .lock()
                .map_err(|_| FabricError::Transport("timeout record poisoned".to_string()))?;
            *last = Some(timeout);
        }
        let handler = {
            let handlers = self
                .handlers
                .lock()
                .map_err(|_| FabricError::Transport("handler registry poisoned".to_string()))?;
            handlers.get(topic).map(Arc::clone)
        };
        match handler {
            Some(handler) => Ok(handler(payload)),
            None => Ok(FabricResponse::Error {
                code: 0,
                message: format!("Unknown topic: {topic}"),
            }),
        }
    }

    fn publish_event(&self, topic: &str, payload: &[u8]) -> Result<(), FabricError> {
        let sinks = {
            let subscribers = self
                .subscribers
                .lock()
                .map_err(|_| FabricError::Transport("subscriber registry poisoned".to_string()))?;
            subscribers.get(topic).cloned().unwrap_or_default()
        };
        for sink in sinks {
            sink.deliver(topic, payload);
        }
        Ok(())
    }

    fn subscribe(&self, topic: &str, sink: Arc<dyn EventSink>) -> Result<(), FabricError> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|_| FabricError::Transport("subscriber registry poisoned".to_string()))?;
        subscribers.entry(topic.to_string()).or_default().push(sink);
        Ok(())
    }

    fn unsubscribe(&self, topic: &str, sink: &Arc<dyn EventSink>) -> Result<(), FabricError> {
        let mut subscribers = self
            .subscribers
            .lock()
            .map_err(|_| FabricError::Transport("subscriber registry poisoned".to_string()))?;
        if let Some(sinks) = subscribers.get_mut(topic) {
            sinks.retain(|registered| !Arc::ptr_eq(registered, sink));
            if sinks.is_empty() {
                subscribers.remove(topic);
            }
        }
        Ok(())
    }
}
