//! Throttle behavior of the recorder against a scripted clock.

use eco_core::{ManualClock, Value, Variable};
use eco_persist::{MeasurementRecorder, MemoryStore, RecorderOptions};

fn recorder() -> MeasurementRecorder<MemoryStore, ManualClock> {
    MeasurementRecorder::new(
        "chamber_1",
        RecorderOptions::new(5.0, 600.0).unwrap(),
        MemoryStore::new(),
        ManualClock::new(0.0),
    )
}

/// Set the recorder's clock to `t`, then observe a scalar reading.
fn observe_at(
    recorder: &MeasurementRecorder<MemoryStore, ManualClock>,
    variable: &Variable,
    t: f64,
    value: f64,
) -> bool {
    recorder.clock().set(t);
    recorder
        .observe(variable, false, Value::scalar(value))
        .unwrap()
}

#[test]
fn throttle_scenario_min_5_max_600() {
    let recorder = recorder();
    let variable = Variable::new("air_temperature");

    // Baseline: first observation is always accepted.
    assert!(observe_at(&recorder, &variable, 0.0, 20.0));

    // Faster than min_update_interval: rejected regardless of change.
    assert!(!observe_at(&recorder, &variable, 3.0, 25.0));

    // Between the intervals with 0.5% change: rejected as redundant.
    assert!(!observe_at(&recorder, &variable, 10.0, 20.1));

    // Same delta-time, 5% change: accepted; baseline becomes (21.0, 10).
    assert!(observe_at(&recorder, &variable, 10.0, 21.0));

    // 601 s later with zero change: the heartbeat fires anyway.
    assert!(observe_at(&recorder, &variable, 611.0, 21.0));

    let values: Vec<f64> = recorder
        .store()
        .points()
        .iter()
        .filter_map(|p| p.value.as_scalar())
        .collect();
    assert_eq!(values, vec![20.0, 21.0, 21.0]);
}

#[test]
fn rejected_readings_do_not_rebaseline() {
    let recorder = recorder();
    let variable = Variable::new("air_temperature");

    assert!(observe_at(&recorder, &variable, 0.0, 100.0));

    // Drift upward in 0.9% steps, each within a valid time window. Against
    // a sliding baseline every one would pass; against the last written
    // value the accumulated drift crosses 1% on the second step.
    assert!(!observe_at(&recorder, &variable, 10.0, 100.9));
    assert!(observe_at(&recorder, &variable, 20.0, 101.8));
}

#[test]
fn rejection_keeps_the_write_timer_running() {
    let recorder = recorder();
    let variable = Variable::new("air_temperature");

    assert!(observe_at(&recorder, &variable, 0.0, 20.0));

    // Rejected at t=599: under max_update_interval with no change.
    assert!(!observe_at(&recorder, &variable, 599.0, 20.0));

    // The rejection did not touch last_timestamp, so delta_time at t=601
    // is 601, not 2, and the heartbeat fires.
    assert!(observe_at(&recorder, &variable, 601.0, 20.0));
}

#[test]
fn streams_are_throttled_per_variable() {
    let recorder = recorder();
    let temperature = Variable::new("air_temperature");
    let humidity = Variable::new("air_humidity");

    assert!(observe_at(&recorder, &temperature, 0.0, 20.0));
    // A different variable is a different key: first observation accepted
    // even though the temperature stream just wrote.
    assert!(observe_at(&recorder, &humidity, 1.0, 55.0));
}

#[test]
fn sequence_frames_follow_the_same_rules() {
    let recorder = recorder();
    let variable = Variable::new("light_illuminance");
    let frame = |bytes: &[u8]| Value::from_bytes(bytes);

    recorder.clock().set(0.0);
    assert!(recorder.observe(&variable, false, frame(&[10, 20, 30])).unwrap());

    // Identical frame between the intervals: redundant.
    recorder.clock().set(10.0);
    assert!(!recorder.observe(&variable, false, frame(&[10, 20, 30])).unwrap());

    // One element changed: accepted.
    recorder.clock().set(20.0);
    assert!(recorder.observe(&variable, false, frame(&[10, 20, 31])).unwrap());

    // Identical frame, but past max_update_interval: heartbeat.
    recorder.clock().set(820.0);
    assert!(recorder.observe(&variable, false, frame(&[10, 20, 31])).unwrap());
}

#[test]
fn cold_start_accepts_the_first_reading_again() {
    let variable = Variable::new("air_temperature");

    let first = recorder();
    assert!(observe_at(&first, &variable, 0.0, 20.0));
    assert!(!observe_at(&first, &variable, 1.0, 20.0));

    // A fresh recorder has an empty index: the same reading one second
    // later is a first observation again.
    let second = recorder();
    assert!(observe_at(&second, &variable, 1.0, 20.0));
}
