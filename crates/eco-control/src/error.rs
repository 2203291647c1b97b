//! Error types for controller construction and wiring.

use thiserror::Error;

/// Result type for controller operations.
pub type ControlResult<T> = Result<T, ControlError>;

/// Errors that can occur while building or wiring a controller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ControlError {
    /// No enclosing environment identity was configured. Commands and
    /// measurements must be attributable to exactly one physical
    /// environment instance; there is no safe default.
    #[error("No environment configured; designate an environment for this controller")]
    MissingEnvironment,

    /// A required option was absent from the configuration source.
    #[error("Missing required option: {name}")]
    MissingOption { name: &'static str },

    /// Invalid parameter passed to a controller constructor.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// The bus rejected a subscription or publish during wiring.
    #[error("Bus failure: {what}")]
    Bus { what: String },
}

impl From<eco_bus::BusError> for ControlError {
    fn from(err: eco_bus::BusError) -> Self {
        Self::Bus {
            what: err.to_string(),
        }
    }
}
