//! Controllers and controller runtimes for ecotron.
//!
//! A controller is a pure transformation from set-point/measurement state
//! to an optional actuator command. The two capability traits differ only
//! in dispatch, which is the runtime's job:
//!
//! - **Open-loop** ([`OpenLoopController`]): `update` runs once per inbound
//!   set-point, never on measurements. A command is published and also
//!   echoed as a measurement, because no independent sensor confirms the
//!   actuation.
//! - **Closed-loop** ([`ClosedLoopController`]): `update` runs once per
//!   inbound measurement with the last-known set-point as context;
//!   set-points alone never trigger it, and only the command is published.
//!
//! Concrete controllers: [`DirectController`] (pass-through),
//! [`OnOffController`] (hysteresis), [`PidController`] (PID with
//! anti-windup).

pub mod config;
pub mod controller;
pub mod direct;
pub mod error;
pub mod on_off;
pub mod pid;
pub mod runtime;

pub use config::ControllerConfig;
pub use controller::{ClosedLoopController, OpenLoopController};
pub use direct::DirectController;
pub use error::{ControlError, ControlResult};
pub use on_off::OnOffController;
pub use pid::PidController;
pub use runtime::{ClosedLoopRuntime, OpenLoopRuntime};
