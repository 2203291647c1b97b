//! Named-option configuration resolution.
//!
//! The concrete source of configuration (param store, file, environment
//! variables) is an external collaborator. This core only requires
//! "resolve a named option to a value or absence", which is the whole
//! surface of [`ConfigSource`].

use std::collections::HashMap;

/// A configuration value as resolved by a collaborator.
///
/// Param stores frequently hand back numbers as text; [`as_number`] accepts
/// parseable text so callers do not have to care which form arrived.
///
/// [`as_number`]: ConfigValue::as_number
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Text(String),
    Number(f64),
}

impl ConfigValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(t) => Some(t),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(t) => t.parse().ok(),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Resolve a named option to a value or absence.
pub trait ConfigSource {
    fn get(&self, name: &str) -> Option<ConfigValue>;
}

/// In-memory configuration map for tests and embedding processes.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    entries: HashMap<String, ConfigValue>,
}

impl MapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.entries.insert(name.into(), value.into());
        self
    }
}

impl ConfigSource for MapConfig {
    fn get(&self, name: &str) -> Option<ConfigValue> {
        self.entries.get(name).cloned()
    }
}

/// Resolve an optional numeric option, recovering with `default` when it is
/// absent or non-numeric. The fallback is surfaced as a warning, never an
/// error.
pub fn number_or_default(source: &dyn ConfigSource, name: &str, default: f64) -> f64 {
    match source.get(name).and_then(|v| v.as_number()) {
        Some(value) => value,
        None => {
            tracing::warn!(option = name, default, "option not configured, using default");
            default
        }
    }
}
