//! Controller runtimes: bind one controller instance to its bus channels.
//!
//! The runtime owns no control logic beyond routing. Per variable `V` the
//! logical channels are `V/desired` (set-point in), `V/measured`
//! (measurement in; echo-out for open-loop), `V/commanded` (command out).
//!
//! Handler ordering follows the bus contract: strict arrival order per
//! channel, no guarantee across channels. Runtime state sits behind a
//! mutex so a transport delivering from multiple threads cannot interleave
//! one instance's transitions.

use std::sync::{Arc, Mutex};

use eco_bus::{MessageBus, commanded_channel, desired_channel, measured_channel};
use eco_core::{ConfigSource, Value};

use crate::config::ControllerConfig;
use crate::controller::{ClosedLoopController, OpenLoopController};
use crate::error::ControlResult;

/// Routes set-points through an open-loop controller.
///
/// Subscribes `V/desired` only. A `Some` command is published to
/// `V/commanded` and echoed to `V/measured`: there is no independent
/// sensor confirming the command took effect, so the commanded value *is*
/// the recorded measurement. A `None` publishes nothing.
#[derive(Debug)]
pub struct OpenLoopRuntime {
    config: ControllerConfig,
}

impl OpenLoopRuntime {
    /// Resolve the binding configuration and wire `controller` to `bus`.
    ///
    /// Fails fast when no environment identity is configured.
    pub fn start<C, B>(bus: &Arc<B>, controller: C, source: &dyn ConfigSource) -> ControlResult<Self>
    where
        C: OpenLoopController + 'static,
        B: MessageBus + 'static,
    {
        let config = ControllerConfig::resolve(source)?;
        tracing::debug!(
            environment = %config.environment,
            variable = %config.variable,
            "starting open-loop controller"
        );

        let controller = Mutex::new(controller);
        let variable = config.variable.clone();
        let commanded = commanded_channel(&config.variable);
        let measured = measured_channel(&config.variable);
        let out_bus = Arc::clone(bus);

        bus.subscribe(
            &desired_channel(&config.variable),
            Arc::new(move |value: &Value| {
                let Some(set_point) = value.as_scalar() else {
                    tracing::warn!(%variable, "ignoring non-scalar set-point");
                    return Ok(());
                };
                tracing::debug!(%variable, set_point, "new set-point");

                let command = controller
                    .lock()
                    .expect("controller mutex poisoned")
                    .update(set_point);
                if let Some(command) = command {
                    tracing::debug!(%variable, command, "new command");
                    let payload = Value::scalar(command);
                    out_bus.publish(&commanded, &payload)?;
                    // Echo the command as a measurement so it lands in the
                    // same historical trace as sensor data.
                    out_bus.publish(&measured, &payload)?;
                }
                Ok(())
            }),
        )?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

struct ClosedLoopState<C> {
    controller: C,
    /// Last-known set-point, per runtime instance. Starts unset; updated
    /// by set-point messages without triggering the controller.
    set_point: Option<f64>,
}

/// Routes measurements through a closed-loop controller.
///
/// Subscribes `V/desired` (stores the set-point only) and `V/measured`
/// (invokes `update`). A `Some` command is published to `V/commanded`
/// only: the true feedback signal is the external sensor already driving
/// the call, so no measurement echo is produced.
#[derive(Debug)]
pub struct ClosedLoopRuntime {
    config: ControllerConfig,
}

impl ClosedLoopRuntime {
    /// Resolve the binding configuration and wire `controller` to `bus`.
    ///
    /// Fails fast when no environment identity is configured.
    pub fn start<C, B>(bus: &Arc<B>, controller: C, source: &dyn ConfigSource) -> ControlResult<Self>
    where
        C: ClosedLoopController + 'static,
        B: MessageBus + 'static,
    {
        let config = ControllerConfig::resolve(source)?;
        tracing::debug!(
            environment = %config.environment,
            variable = %config.variable,
            "starting closed-loop controller"
        );

        let state = Arc::new(Mutex::new(ClosedLoopState {
            controller,
            set_point: None,
        }));

        let set_point_state = Arc::clone(&state);
        let set_point_variable = config.variable.clone();
        bus.subscribe(
            &desired_channel(&config.variable),
            Arc::new(move |value: &Value| {
                let Some(set_point) = value.as_scalar() else {
                    tracing::warn!(variable = %set_point_variable, "ignoring non-scalar set-point");
                    return Ok(());
                };
                tracing::debug!(variable = %set_point_variable, set_point, "new set-point");
                set_point_state
                    .lock()
                    .expect("controller mutex poisoned")
                    .set_point = Some(set_point);
                Ok(())
            }),
        )?;

        let variable = config.variable.clone();
        let commanded = commanded_channel(&config.variable);
        let out_bus = Arc::clone(bus);
        bus.subscribe(
            &measured_channel(&config.variable),
            Arc::new(move |value: &Value| {
                let Some(measurement) = value.as_scalar() else {
                    tracing::warn!(%variable, "ignoring non-scalar measurement");
                    return Ok(());
                };
                tracing::debug!(%variable, measurement, "new measurement");

                let command = {
                    let mut state = state.lock().expect("controller mutex poisoned");
                    let set_point = state.set_point;
                    state.controller.update(measurement, set_point)
                };
                if let Some(command) = command {
                    tracing::debug!(%variable, command, "new command");
                    out_bus.publish(&commanded, &Value::scalar(command))?;
                }
                Ok(())
            }),
        )?;

        Ok(Self { config })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}
