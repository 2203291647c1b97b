//! eco-bus: publish/subscribe transport seam.
//!
//! Processes exchange set-points, measurements, and commands as typed
//! payloads on named channels. The rest of the platform depends only on
//! the [`MessageBus`] trait, never on a concrete transport; [`MemoryBus`]
//! is the in-process implementation used by tests and single-process
//! deployments.
//!
//! Delivery contract:
//! - one invocation per registered handler per inbound message
//! - strict arrival order per channel
//! - no ordering guarantee across different channels

pub mod channel;
pub mod error;
pub mod memory;

pub use channel::{commanded_channel, desired_channel, filtered_channel, measured_channel};
pub use error::{BusError, BusResult};
pub use memory::MemoryBus;

use std::sync::Arc;

use eco_core::Value;

/// Handler invoked once per inbound message on a subscribed channel.
///
/// An `Err` is the handler declaring the message fatal to it (e.g. a failed
/// store write); the transport propagates it to the publisher rather than
/// swallowing it.
pub type Handler = Arc<dyn Fn(&Value) -> BusResult<()> + Send + Sync>;

/// Publish/subscribe transport over named channels.
pub trait MessageBus: Send + Sync {
    /// Deliver `value` to every handler registered on `channel`.
    fn publish(&self, channel: &str, value: &Value) -> BusResult<()>;

    /// Register `handler` for inbound messages on `channel`.
    fn subscribe(&self, channel: &str, handler: Handler) -> BusResult<()>;
}
