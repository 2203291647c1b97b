//! Channel naming conventions.
//!
//! Per variable `V`, a controller runtime speaks three logical channels:
//! `V/desired` (set-point in), `V/measured` (measurement in; echo-out
//! target for open-loop commands), `V/commanded` (command out).
//! Dynamically discovered sensor outputs publish on
//! `sensors/<module-id>/<output-name>/filtered` instead of `V/measured`.

use eco_core::Variable;

/// Set-point input channel for a variable.
pub fn desired_channel(variable: &Variable) -> String {
    format!("{}/desired", variable)
}

/// Measurement channel for a variable.
pub fn measured_channel(variable: &Variable) -> String {
    format!("{}/measured", variable)
}

/// Command output channel for a variable.
pub fn commanded_channel(variable: &Variable) -> String {
    format!("{}/commanded", variable)
}

/// Filtered output channel of a dynamically discovered module output.
pub fn filtered_channel(module_id: &str, output_name: &str) -> String {
    format!("sensors/{}/{}/filtered", module_id, output_name)
}
