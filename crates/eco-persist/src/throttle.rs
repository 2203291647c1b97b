//! Write throttling for measurement streams.
//!
//! The recorder keeps one [`ThrottleEntry`] per (environment, variable,
//! kind) stream and compares every inbound reading against the last value
//! it actually *wrote*, never against readings it rejected. Re-baselining
//! on rejected readings would let a slowly drifting signal escape the
//! change threshold one small step at a time.

use std::collections::HashMap;

use eco_core::{PointKey, Value};

/// Relative change a reading must exceed, between the two intervals, to be
/// worth writing.
pub const RELATIVE_CHANGE_THRESHOLD: f64 = 0.01;

/// Last written value and time for one point stream.
#[derive(Debug, Clone, PartialEq)]
pub struct ThrottleEntry {
    pub last_value: Value,
    pub last_timestamp: f64,
}

/// Decide whether a reading should be written.
///
/// Rules, in order:
/// 1. Less than `min_interval` since the last write: reject regardless of
///    value. This is the only admission control between a noisy
///    high-frequency sensor and the store.
/// 2. Between the intervals: accept only when the value moved more than
///    [`RELATIVE_CHANGE_THRESHOLD`] relative to the last written value.
/// 3. At or past `max_interval`: accept unconditionally, so a static
///    signal still produces a heartbeat write and staleness is detectable
///    downstream.
///
/// The first reading of a stream never reaches this decision; the recorder
/// accepts it before any entry exists.
pub fn should_update_point(
    last_value: &Value,
    value: &Value,
    delta_time: f64,
    min_interval: f64,
    max_interval: f64,
) -> bool {
    if delta_time < min_interval {
        return false;
    }
    if delta_time < max_interval {
        return exceeds_change_threshold(last_value, value);
    }
    true
}

fn exceeds_change_threshold(last: &Value, value: &Value) -> bool {
    match (last, value) {
        (Value::Scalar(last), Value::Scalar(value)) => {
            // A zero baseline has no defined relative change; record
            // rather than reject.
            if *last == 0.0 {
                return true;
            }
            ((value - last) / last).abs() > RELATIVE_CHANGE_THRESHOLD
        }
        // Sequence frames: any difference from the last written frame
        // counts as a change. A scalar following a sequence (or vice
        // versa) is trivially a change.
        (last, value) => last != value,
    }
}

/// Per-key index of the last written point of each stream.
///
/// Held only in memory; lost on restart, which means the first reading per
/// key after a cold start is always accepted. Exactly one entry exists per
/// distinct key, created lazily on first observation.
#[derive(Debug, Default)]
pub struct ThrottleIndex {
    entries: HashMap<PointKey, ThrottleEntry>,
}

impl ThrottleIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &PointKey) -> Option<&ThrottleEntry> {
        self.entries.get(key)
    }

    /// Replace the entry for `key` after a write was accepted.
    pub fn record(&mut self, key: PointKey, value: Value, timestamp: f64) {
        self.entries.insert(
            key,
            ThrottleEntry {
                last_value: value,
                last_timestamp: timestamp,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
