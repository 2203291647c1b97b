//! Direct pass-through controller.

use serde::{Deserialize, Serialize};

use crate::controller::OpenLoopController;

/// Open-loop controller that forwards the set-point as the command.
///
/// Suits actuators that accept the desired value directly, e.g. a dimmable
/// light channel driven straight to the requested intensity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DirectController;

impl DirectController {
    pub fn new() -> Self {
        Self
    }
}

impl OpenLoopController for DirectController {
    fn update(&mut self, set_point: f64) -> Option<f64> {
        Some(set_point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forwards_set_point_unchanged() {
        let mut controller = DirectController::new();
        assert_eq!(controller.update(42.5), Some(42.5));
        assert_eq!(controller.update(-1.0), Some(-1.0));
    }
}
