//! Variable names and the sensor variable catalog.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Name of a physical quantity (e.g. `air_temperature`) scoped to one
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variable(String);

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Variable {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Catalog of the variables the platform records from sensors.
///
/// Both subscription strategies consult this set: the static strategy
/// subscribes one measured channel per catalog variable, the dynamic
/// strategy validates discovered module outputs against it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariableCatalog {
    variables: Vec<Variable>,
}

impl VariableCatalog {
    pub fn new(variables: impl IntoIterator<Item = Variable>) -> Self {
        Self {
            variables: variables.into_iter().collect(),
        }
    }

    /// The standard set of ambient-condition sensor variables.
    pub fn sensor_defaults() -> Self {
        Self::new(
            [
                "air_temperature",
                "air_humidity",
                "air_carbon_dioxide",
                "water_temperature",
                "water_potential_hydrogen",
                "water_electrical_conductivity",
                "light_illuminance",
            ]
            .into_iter()
            .map(Variable::new),
        )
    }

    pub fn contains(&self, variable: &Variable) -> bool {
        self.variables.contains(variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_contains_known_variables() {
        let catalog = VariableCatalog::sensor_defaults();
        assert!(catalog.contains(&Variable::new("air_temperature")));
        assert!(!catalog.contains(&Variable::new("soil_moisture")));
    }

    #[test]
    fn variable_display_is_bare_name() {
        let v = Variable::new("water_temperature");
        assert_eq!(v.to_string(), "water_temperature");
    }
}
