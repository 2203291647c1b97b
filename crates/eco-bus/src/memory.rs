//! Synchronous in-process bus.

use std::collections::HashMap;
use std::sync::Mutex;

use eco_core::Value;

use crate::error::{BusError, BusResult};
use crate::{Handler, MessageBus};

/// In-process bus delivering messages inline on `publish`.
///
/// Handlers for one channel run in registration order, strictly in arrival
/// order of messages. The registry lock is released before delivery, so a
/// handler may itself publish (the open-loop measurement echo does exactly
/// that) without deadlocking.
#[derive(Default)]
pub struct MemoryBus {
    handlers: Mutex<HashMap<String, Vec<Handler>>>,
}

impl MemoryBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers registered on a channel. Test support.
    pub fn subscriber_count(&self, channel: &str) -> usize {
        self.handlers
            .lock()
            .expect("bus registry poisoned")
            .get(channel)
            .map_or(0, Vec::len)
    }
}

impl MessageBus for MemoryBus {
    fn publish(&self, channel: &str, value: &Value) -> BusResult<()> {
        let targets: Vec<Handler> = {
            let handlers = self.handlers.lock().expect("bus registry poisoned");
            handlers.get(channel).cloned().unwrap_or_default()
        };
        tracing::debug!(channel, subscribers = targets.len(), "delivering message");
        for handler in &targets {
            handler(value)?;
        }
        Ok(())
    }

    fn subscribe(&self, channel: &str, handler: Handler) -> BusResult<()> {
        let mut handlers = self.handlers.lock().map_err(|_| {
            BusError::transport("bus registry poisoned")
        })?;
        handlers.entry(channel.to_string()).or_default().push(handler);
        Ok(())
    }
}
