//! End-to-end capture: bus, controller runtime, and recorder wired
//! together the way a deployment would wire them.

use std::collections::HashMap;
use std::sync::Arc;

use eco_bus::{MemoryBus, MessageBus};
use eco_control::{DirectController, OpenLoopRuntime};
use eco_core::{ManualClock, MapConfig, Value, Variable, VariableCatalog};
use eco_persist::{
    FirmwareModule, MeasurementRecorder, MemoryStore, ModuleOutput, ModuleType, RecorderOptions,
    resolve_subscriptions,
};

fn recorder() -> Arc<MeasurementRecorder<MemoryStore, ManualClock>> {
    Arc::new(MeasurementRecorder::new(
        "chamber_1",
        RecorderOptions::default(),
        MemoryStore::new(),
        ManualClock::new(0.0),
    ))
}

#[test]
fn sensor_readings_land_in_the_store() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let bus = Arc::new(MemoryBus::new());
    let recorder = recorder();
    recorder
        .attach_catalog(bus.as_ref(), &VariableCatalog::sensor_defaults())
        .unwrap();

    bus.publish("air_temperature/measured", &Value::scalar(21.3))
        .unwrap();

    let points = recorder.store().points();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].variable, Variable::new("air_temperature"));
    assert_eq!(points[0].value, Value::scalar(21.3));
    assert!(!points[0].is_desired);
}

#[test]
fn open_loop_echo_is_persisted_as_a_measurement() {
    let bus = Arc::new(MemoryBus::new());
    let recorder = recorder();
    recorder
        .attach_catalog(bus.as_ref(), &VariableCatalog::sensor_defaults())
        .unwrap();

    let config = MapConfig::new()
        .with("environment", "chamber_1")
        .with("variable", "air_temperature");
    OpenLoopRuntime::start(&bus, DirectController::new(), &config).unwrap();

    // One set-point: the controller publishes a command and echoes it to
    // the measured channel, where the recorder picks it up.
    bus.publish("air_temperature/desired", &Value::scalar(24.0))
        .unwrap();

    let points = recorder.store().points();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].value, Value::scalar(24.0));
    // The echo is recorded as a measured point: no independent sensor
    // confirms the command, so the command is the record.
    assert!(!points[0].is_desired);
}

#[test]
fn discovered_subscriptions_feed_the_same_recorder() {
    let bus = Arc::new(MemoryBus::new());
    let recorder = recorder();

    let modules = vec![FirmwareModule {
        id: "dht22_1".to_string(),
        module_type: "dht22".to_string(),
    }];
    let module_types = HashMap::from([(
        "dht22".to_string(),
        ModuleType {
            outputs: vec![ModuleOutput {
                name: "temperature".to_string(),
                variable: Variable::new("air_temperature"),
            }],
        },
    )]);

    let subscriptions = resolve_subscriptions(
        &modules,
        &module_types,
        &VariableCatalog::sensor_defaults(),
    );
    recorder.attach(bus.as_ref(), &subscriptions).unwrap();

    bus.publish(
        "sensors/dht22_1/temperature/filtered",
        &Value::scalar(19.8),
    )
    .unwrap();

    let points = recorder.store().points();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].variable, Variable::new("air_temperature"));
}

#[test]
fn recorder_throttles_bus_traffic_per_key() {
    let bus = Arc::new(MemoryBus::new());
    let recorder = recorder();
    recorder
        .attach_catalog(bus.as_ref(), &VariableCatalog::sensor_defaults())
        .unwrap();

    // A burst well under min_update_interval: only the first write lands.
    for value in [20.0, 30.0, 40.0, 50.0] {
        bus.publish("air_temperature/measured", &Value::scalar(value))
            .unwrap();
        recorder.clock().advance(0.5);
    }

    assert_eq!(recorder.store().len(), 1);
}
