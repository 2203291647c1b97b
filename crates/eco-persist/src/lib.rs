//! eco-persist: measurement capture and durable storage.
//!
//! Listens for measurements of the ambient conditions of an environment
//! and writes them to a document store, throttling the stream so that
//! high-frequency sensors cannot flood the store and near-identical
//! readings are not written twice. There should be exactly one recorder
//! per environment in the system.

pub mod discovery;
pub mod error;
pub mod recorder;
pub mod store;
pub mod throttle;

pub use discovery::{FirmwareModule, ModuleOutput, ModuleType, Subscription, resolve_subscriptions};
pub use error::{PersistError, PersistResult};
pub use recorder::{MeasurementRecorder, RecorderOptions};
pub use store::{DocumentStore, JsonlStore, MemoryStore};
pub use throttle::{RELATIVE_CHANGE_THRESHOLD, ThrottleEntry, ThrottleIndex, should_update_point};
