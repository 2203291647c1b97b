//! PID controller.
//!
//! Sampled/digital semantics: the controller assumes measurements arrive at
//! the configured sample period and uses that period as the integration
//! step. Includes integral clamping and anti-windup (the integral freezes
//! while the output is saturated).

use serde::{Deserialize, Serialize};

use eco_core::ConfigSource;

use crate::controller::ClosedLoopController;
use crate::error::{ControlError, ControlResult};

/// Closed-loop PID controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PidController {
    /// Proportional gain.
    pub kp: f64,
    /// Integral gain.
    pub ki: f64,
    /// Derivative gain.
    pub kd: f64,
    /// Minimum command value.
    pub lower_limit: f64,
    /// Maximum command value.
    pub upper_limit: f64,
    /// Integral accumulator clamp. Bounds how much error history the
    /// controller can store.
    pub windup_limit: f64,
    /// Assumed time between measurements, seconds.
    pub sample_period: f64,
    #[serde(default)]
    integral: f64,
    #[serde(default)]
    prev_error: Option<f64>,
}

impl PidController {
    pub const DEFAULT_WINDUP_LIMIT: f64 = 1000.0;
    pub const DEFAULT_SAMPLE_PERIOD: f64 = 1.0;

    /// Create a new PID controller.
    ///
    /// # Arguments
    ///
    /// * `kp`, `ki`, `kd` - Gains
    /// * `lower_limit` - Minimum command
    /// * `upper_limit` - Maximum command
    pub fn new(kp: f64, ki: f64, kd: f64, lower_limit: f64, upper_limit: f64) -> ControlResult<Self> {
        if lower_limit >= upper_limit {
            return Err(ControlError::InvalidArg {
                what: "lower_limit must be less than upper_limit",
            });
        }
        Ok(Self {
            kp,
            ki,
            kd,
            lower_limit,
            upper_limit,
            windup_limit: Self::DEFAULT_WINDUP_LIMIT,
            sample_period: Self::DEFAULT_SAMPLE_PERIOD,
            integral: 0.0,
            prev_error: None,
        })
    }

    /// Set the integral clamp.
    pub fn with_windup_limit(mut self, limit: f64) -> Self {
        self.windup_limit = limit;
        self
    }

    /// Set the assumed sample period.
    pub fn with_sample_period(mut self, period: f64) -> Self {
        self.sample_period = period;
        self
    }

    /// Build from a configuration source.
    ///
    /// All options (`kp`, `ki`, `kd`, `lower_limit`, `upper_limit`,
    /// `windup_limit`, `sample_period`) are optional; absent ones fall back
    /// to a pure proportional controller with unit gain on [-1, 1].
    pub fn from_config(source: &dyn ConfigSource) -> ControlResult<Self> {
        let number = |name: &str, default: f64| {
            source.get(name).and_then(|v| v.as_number()).unwrap_or(default)
        };
        let controller = Self::new(
            number("kp", 1.0),
            number("ki", 0.0),
            number("kd", 0.0),
            number("lower_limit", -1.0),
            number("upper_limit", 1.0),
        )?;
        Ok(controller
            .with_windup_limit(number("windup_limit", Self::DEFAULT_WINDUP_LIMIT))
            .with_sample_period(number("sample_period", Self::DEFAULT_SAMPLE_PERIOD)))
    }
}

impl ClosedLoopController for PidController {
    fn update(&mut self, measurement: f64, set_point: Option<f64>) -> Option<f64> {
        let set_point = set_point?;
        let dt = self.sample_period;

        // Positive error means the measurement is below the set-point.
        let error = set_point - measurement;

        let integral = (self.integral + error * dt).clamp(-self.windup_limit, self.windup_limit);
        let derivative = self
            .prev_error
            .map_or(0.0, |prev| (error - prev) / dt);

        let raw = self.kp * error + self.ki * integral + self.kd * derivative;
        let output = raw.clamp(self.lower_limit, self.upper_limit);

        // Anti-windup: only accumulate while the output is unsaturated.
        if output == raw {
            self.integral = integral;
        }
        self.prev_error = Some(error);

        Some(output)
    }
}
