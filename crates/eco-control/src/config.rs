//! Runtime binding configuration.

use eco_core::{ConfigSource, Variable};

use crate::error::{ControlError, ControlResult};

/// Identity under which a controller runtime subscribes and publishes.
///
/// Resolved once at construction from a [`ConfigSource`] collaborator.
/// A missing or empty `environment` aborts startup: running without that
/// identity would leave commands and measurements unattributable, so it is
/// rejected outright rather than silently defaulted.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub environment: String,
    pub variable: Variable,
}

impl ControllerConfig {
    pub fn new(environment: impl Into<String>, variable: Variable) -> ControlResult<Self> {
        let environment = environment.into();
        if environment.is_empty() {
            return Err(ControlError::MissingEnvironment);
        }
        Ok(Self {
            environment,
            variable,
        })
    }

    /// Resolve the binding from a configuration source.
    pub fn resolve(source: &dyn ConfigSource) -> ControlResult<Self> {
        let environment = source
            .get("environment")
            .and_then(|v| v.as_text().map(str::to_owned))
            .ok_or(ControlError::MissingEnvironment)?;
        let variable = source
            .get("variable")
            .and_then(|v| v.as_text().map(Variable::new))
            .ok_or(ControlError::MissingOption { name: "variable" })?;
        Self::new(environment, variable)
    }
}
