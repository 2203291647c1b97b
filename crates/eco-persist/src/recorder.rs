//! Measurement capture from bus channels.

use std::sync::{Arc, Mutex};

use eco_bus::{BusError, MessageBus, measured_channel};
use eco_core::{
    Clock, ConfigSource, EnvironmentalDataPoint, PointKey, Value, Variable, VariableCatalog,
    number_or_default,
};

use crate::discovery::Subscription;
use crate::error::{PersistError, PersistResult};
use crate::store::DocumentStore;
use crate::throttle::{ThrottleIndex, should_update_point};

/// Throttle intervals for the recorder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecorderOptions {
    /// Never write the same stream faster than this, seconds.
    pub min_update_interval: f64,
    /// Always write at least once per this interval, seconds.
    pub max_update_interval: f64,
}

impl RecorderOptions {
    pub const DEFAULT_MIN_UPDATE_INTERVAL: f64 = 5.0;
    pub const DEFAULT_MAX_UPDATE_INTERVAL: f64 = 600.0;

    pub fn new(min_update_interval: f64, max_update_interval: f64) -> PersistResult<Self> {
        if !min_update_interval.is_finite() || min_update_interval < 0.0 {
            return Err(PersistError::InvalidInterval {
                what: "min_update_interval must be non-negative",
            });
        }
        if min_update_interval >= max_update_interval {
            return Err(PersistError::InvalidInterval {
                what: "min_update_interval must be less than max_update_interval",
            });
        }
        Ok(Self {
            min_update_interval,
            max_update_interval,
        })
    }

    /// Resolve intervals from a configuration source. A missing interval
    /// is recovered with its default and surfaced as a warning, never an
    /// error.
    pub fn resolve(source: &dyn ConfigSource) -> PersistResult<Self> {
        Self::new(
            number_or_default(
                source,
                "min_update_interval",
                Self::DEFAULT_MIN_UPDATE_INTERVAL,
            ),
            number_or_default(
                source,
                "max_update_interval",
                Self::DEFAULT_MAX_UPDATE_INTERVAL,
            ),
        )
    }
}

impl Default for RecorderOptions {
    fn default() -> Self {
        Self {
            min_update_interval: Self::DEFAULT_MIN_UPDATE_INTERVAL,
            max_update_interval: Self::DEFAULT_MAX_UPDATE_INTERVAL,
        }
    }
}

/// Per-environment throttling recorder.
///
/// Decides, for each inbound reading on a subscribed channel, whether to
/// persist it as an [`EnvironmentalDataPoint`] (see
/// [`should_update_point`] for the rules), stamps accepted points with the
/// receipt time, and maintains the per-key throttle index.
///
/// A single mutex serializes the index, so a transport delivering on many
/// channels from many threads still observes at most one in-flight
/// decision per key.
pub struct MeasurementRecorder<S, C> {
    environment: String,
    options: RecorderOptions,
    store: S,
    clock: C,
    index: Mutex<ThrottleIndex>,
}

impl<S, C> MeasurementRecorder<S, C>
where
    S: DocumentStore,
    C: Clock,
{
    pub fn new(environment: impl Into<String>, options: RecorderOptions, store: S, clock: C) -> Self {
        Self {
            environment: environment.into(),
            options,
            store,
            clock,
            index: Mutex::new(ThrottleIndex::new()),
        }
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    pub fn options(&self) -> RecorderOptions {
        self.options
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Decide-and-write for one inbound reading. Returns whether the
    /// reading was persisted.
    ///
    /// On acceptance the point is written to the store *before* the index
    /// is re-baselined, so a failed write leaves the comparison baseline
    /// untouched. On rejection nothing is mutated: the last *written*
    /// value and time remain the baseline.
    pub fn observe(&self, variable: &Variable, is_desired: bool, value: Value) -> PersistResult<bool> {
        let timestamp = self.clock.now();
        let key = PointKey::new(self.environment.clone(), variable.clone(), is_desired);

        let mut index = self.index.lock().expect("throttle index poisoned");
        if let Some(entry) = index.get(&key) {
            let delta_time = timestamp - entry.last_timestamp;
            if !should_update_point(
                &entry.last_value,
                &value,
                delta_time,
                self.options.min_update_interval,
                self.options.max_update_interval,
            ) {
                return Ok(false);
            }
        }

        let point = EnvironmentalDataPoint::new(
            self.environment.clone(),
            variable.clone(),
            is_desired,
            value.clone(),
            timestamp,
        );
        self.store.put(&point.id, &point)?;
        index.record(key, value, timestamp);
        Ok(true)
    }
}

impl<S, C> MeasurementRecorder<S, C>
where
    S: DocumentStore + 'static,
    C: Clock + 'static,
{
    /// Subscribe this recorder to every resolved subscription.
    pub fn attach<B: MessageBus>(
        self: &Arc<Self>,
        bus: &B,
        subscriptions: &[Subscription],
    ) -> PersistResult<()> {
        for subscription in subscriptions {
            let recorder = Arc::clone(self);
            let variable = subscription.variable.clone();
            let channel = subscription.channel.clone();
            bus.subscribe(
                &subscription.channel,
                Arc::new(move |value: &Value| {
                    recorder
                        .observe(&variable, false, value.clone())
                        .map(drop)
                        .map_err(|err| BusError::handler(channel.clone(), err))
                }),
            )?;
        }
        Ok(())
    }

    /// Static subscription strategy: one measured channel per catalog
    /// variable.
    pub fn attach_catalog<B: MessageBus>(
        self: &Arc<Self>,
        bus: &B,
        catalog: &VariableCatalog,
    ) -> PersistResult<()> {
        let subscriptions: Vec<Subscription> = catalog
            .iter()
            .map(|variable| Subscription {
                channel: measured_channel(variable),
                variable: variable.clone(),
            })
            .collect();
        self.attach(bus, &subscriptions)
    }
}
