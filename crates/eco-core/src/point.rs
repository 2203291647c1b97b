//! Set-points, measurements, commands, and the persisted data point.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::ids::generate_doc_id;
use crate::value::Value;
use crate::variable::Variable;

/// Desired value for a variable. Exists only in controller memory and is
/// never persisted by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetPoint {
    pub variable: Variable,
    pub value: f64,
    /// Float seconds since the Unix epoch.
    pub timestamp: f64,
}

/// Most recent observed reading for a variable, as delivered by the bus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub variable: Variable,
    pub value: Value,
    /// Float seconds since the Unix epoch, stamped on receipt.
    pub timestamp: f64,
}

/// Controller output driving an actuator. Transient: published, and for
/// open-loop controllers echoed back as a measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    pub variable: Variable,
    pub value: f64,
}

/// Persisted record of one accepted reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalDataPoint {
    pub environment: String,
    pub variable: Variable,
    pub is_desired: bool,
    pub value: Value,
    pub timestamp: f64,
    pub id: String,
}

impl EnvironmentalDataPoint {
    /// Build a data point with a freshly generated id.
    pub fn new(
        environment: impl Into<String>,
        variable: Variable,
        is_desired: bool,
        value: Value,
        timestamp: f64,
    ) -> Self {
        Self {
            environment: environment.into(),
            variable,
            is_desired,
            value,
            timestamp,
            id: generate_doc_id(timestamp),
        }
    }

    /// Index key of the stream this point belongs to.
    pub fn key(&self) -> PointKey {
        PointKey {
            environment: self.environment.clone(),
            variable: self.variable.clone(),
            is_desired: self.is_desired,
        }
    }
}

/// Identifies one stream of points: (environment, variable, kind).
///
/// The recorder holds exactly one throttle entry per distinct key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointKey {
    pub environment: String,
    pub variable: Variable,
    pub is_desired: bool,
}

impl PointKey {
    pub fn new(environment: impl Into<String>, variable: Variable, is_desired: bool) -> Self {
        Self {
            environment: environment.into(),
            variable,
            is_desired,
        }
    }
}

impl fmt::Display for PointKey {
    /// Canonical form: `<environment>_<desired|measured>_<variable>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_desired { "desired" } else { "measured" };
        write!(f, "{}_{}_{}", self.environment, kind, self.variable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_key_canonical_form() {
        let key = PointKey::new("chamber_1", Variable::new("air_temperature"), false);
        assert_eq!(key.to_string(), "chamber_1_measured_air_temperature");

        let key = PointKey::new("chamber_1", Variable::new("air_temperature"), true);
        assert_eq!(key.to_string(), "chamber_1_desired_air_temperature");
    }

    #[test]
    fn data_point_key_matches_fields() {
        let point = EnvironmentalDataPoint::new(
            "chamber_1",
            Variable::new("air_humidity"),
            false,
            Value::scalar(55.0),
            100.0,
        );
        let key = point.key();
        assert_eq!(key.environment, "chamber_1");
        assert_eq!(key.variable, Variable::new("air_humidity"));
        assert!(!key.is_desired);
    }

    #[test]
    fn data_point_serializes_flat() {
        let point = EnvironmentalDataPoint {
            environment: "chamber_1".to_string(),
            variable: Variable::new("air_temperature"),
            is_desired: false,
            value: Value::scalar(21.0),
            timestamp: 1234.5,
            id: "1234.5-abc".to_string(),
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["environment"], "chamber_1");
        assert_eq!(json["variable"], "air_temperature");
        assert_eq!(json["is_desired"], false);
        assert_eq!(json["value"], 21.0);
        assert_eq!(json["timestamp"], 1234.5);
    }
}
