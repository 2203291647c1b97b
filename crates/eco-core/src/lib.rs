//! eco-core: stable foundation for ecotron.
//!
//! Contains:
//! - variable (variable names + the sensor variable catalog)
//! - value (scalar / integer-sequence payloads)
//! - point (set-points, measurements, commands, persisted data points)
//! - ids (document id generation)
//! - clock (wall and scriptable time sources)
//! - config (named-option resolution against a deployment collaborator)
//! - error (shared error types)

pub mod clock;
pub mod config;
pub mod error;
pub mod ids;
pub mod point;
pub mod value;
pub mod variable;

// Re-exports: nice ergonomics for downstream crates
pub use clock::{Clock, ManualClock, WallClock};
pub use config::{ConfigSource, ConfigValue, MapConfig, number_or_default};
pub use error::{CoreError, CoreResult};
pub use ids::generate_doc_id;
pub use point::{Command, EnvironmentalDataPoint, Measurement, PointKey, SetPoint};
pub use value::Value;
pub use variable::{Variable, VariableCatalog};
