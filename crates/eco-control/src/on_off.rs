//! On/off hysteresis controller.

use serde::{Deserialize, Serialize};

use eco_core::ConfigSource;

use crate::controller::ClosedLoopController;
use crate::error::{ControlError, ControlResult};

/// Closed-loop bang-bang controller with a symmetric deadband.
///
/// Commands 1.0 when the measurement falls below `set_point - deadband/2`
/// and 0.0 when it rises above `set_point + deadband/2`. Inside the band
/// the previous command is repeated, so the actuator does not chatter; if
/// there is no previous command yet, the actuation cycle is skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnOffController {
    /// Full width of the hysteresis band, in the variable's units.
    pub deadband: f64,
    #[serde(default)]
    last_output: Option<f64>,
}

impl OnOffController {
    /// Create a new on/off controller.
    ///
    /// # Arguments
    ///
    /// * `deadband` - Full hysteresis band width (must be non-negative)
    pub fn new(deadband: f64) -> ControlResult<Self> {
        if !deadband.is_finite() || deadband < 0.0 {
            return Err(ControlError::InvalidArg {
                what: "deadband must be non-negative",
            });
        }
        Ok(Self {
            deadband,
            last_output: None,
        })
    }

    /// Build from a configuration source. The `deadband` option is
    /// optional; when absent the controller switches exactly at the
    /// set-point.
    pub fn from_config(source: &dyn ConfigSource) -> ControlResult<Self> {
        let deadband = source
            .get("deadband")
            .and_then(|v| v.as_number())
            .unwrap_or(0.0);
        Self::new(deadband)
    }
}

impl ClosedLoopController for OnOffController {
    fn update(&mut self, measurement: f64, set_point: Option<f64>) -> Option<f64> {
        let set_point = set_point?;
        let half_band = self.deadband / 2.0;

        let output = if measurement < set_point - half_band {
            1.0
        } else if measurement > set_point + half_band {
            0.0
        } else {
            self.last_output?
        };

        self.last_output = Some(output);
        Some(output)
    }
}
