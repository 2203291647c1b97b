//! Error types for bus operations.

use thiserror::Error;

pub type BusResult<T> = Result<T, BusError>;

#[derive(Debug, Error)]
pub enum BusError {
    /// The underlying transport failed to move the message.
    #[error("Transport failure: {what}")]
    Transport { what: String },

    /// A subscribed handler failed while processing a delivered message.
    #[error("Handler failure on {channel}: {what}")]
    Handler { channel: String, what: String },
}

impl BusError {
    pub fn transport(what: impl Into<String>) -> Self {
        Self::Transport { what: what.into() }
    }

    pub fn handler(channel: impl Into<String>, source: impl std::fmt::Display) -> Self {
        Self::Handler {
            channel: channel.into(),
            what: source.to_string(),
        }
    }
}
