//! End-to-end delivery scenarios against a scripted engine.

use std::sync::Arc;
use std::time::Duration;

use weir_bridge::Bridge;
use weir_core::{Payload, Value};
use weir_net::{SimulationInstance, RECEIVE_DATA};
use weir_test_utils::ScriptedEngine;

#[test]
fn concurrent_producers_deliver_serially_and_both_complete() {
    let engine = ScriptedEngine::new()
        .with_net("weathernet")
        .with_busy_operation("weathernet", RECEIVE_DATA, 2, Duration::from_millis(5));
    let log = engine.log();
    let bridge = Arc::new(Bridge::start(engine));
    let instance = Arc::new(SimulationInstance::start(bridge, "weathernet").unwrap());

    let temperature = Payload::from_entries([(
        "current_weather_temperature".to_string(),
        59.0,
    )]);
    let windspeed = Payload::from_entries([(
        "current_weather_windspeed".to_string(),
        10.0,
    )]);

    let producers: Vec<_> = [temperature.clone(), windspeed.clone()]
        .into_iter()
        .map(|payload| {
            let instance = Arc::clone(&instance);
            std::thread::spawn(move || {
                // The producer unblocks only once its own payload has
                // been consumed; the ack proves which delivery this was.
                let ack = instance.receive_data("beja", payload.clone()).unwrap();
                assert_eq!(ack.response().get(1), Some(&Value::Readings(payload)));
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    let consumptions = log.consumptions();
    assert_eq!(consumptions.len(), 2, "each delivery consumed exactly once");
    assert!(
        !log.has_overlapping_consumptions(),
        "engine-side tasks must run strictly one after another"
    );

    // Both payloads arrived, in whichever order the producers reached
    // the bridge.
    let mut delivered: Vec<Value> = consumptions
        .iter()
        .filter_map(|c| c.tuple.get(1).cloned())
        .collect();
    delivered.sort_by_key(|v| format!("{v}"));
    let mut expected = vec![Value::Readings(temperature), Value::Readings(windspeed)];
    expected.sort_by_key(|v| format!("{v}"));
    assert_eq!(delivered, expected);
}

#[test]
fn delivered_tuple_preserves_payload_entry_order() {
    let engine = ScriptedEngine::new()
        .with_net("weathernet")
        .with_operation("weathernet", RECEIVE_DATA, 2);
    let log = engine.log();
    let bridge = Arc::new(Bridge::start(engine));
    let instance = SimulationInstance::start(bridge, "weathernet").unwrap();

    let payload = Payload::from_entries([
        ("current_weather_time".to_string(), 1000.0),
        ("current_weather_temperature".to_string(), 17.5),
        ("current_weather_windspeed".to_string(), 4.0),
    ]);
    instance.receive_data("lisbon", payload.clone()).unwrap();

    let consumptions = log.consumptions();
    assert_eq!(consumptions.len(), 1);
    let tuple = &consumptions[0].tuple;
    assert_eq!(tuple.arity(), 2);
    assert_eq!(tuple.get(0), Some(&Value::from("lisbon")));
    match tuple.get(1) {
        Some(Value::Readings(delivered)) => {
            let keys: Vec<&str> = delivered.iter().map(|(k, _)| k).collect();
            assert_eq!(
                keys,
                [
                    "current_weather_time",
                    "current_weather_temperature",
                    "current_weather_windspeed"
                ],
                "entries must cross the boundary in payload order"
            );
        }
        other => panic!("payload slot held {other:?}"),
    }
}

#[test]
fn unavailable_payload_is_delivered_as_explicit_marker() {
    let engine = ScriptedEngine::new()
        .with_net("weathernet")
        .with_operation("weathernet", RECEIVE_DATA, 2);
    let log = engine.log();
    let bridge = Arc::new(Bridge::start(engine));
    let instance = SimulationInstance::start(bridge, "weathernet").unwrap();

    instance.receive_data("beja", Payload::Unavailable).unwrap();

    let consumptions = log.consumptions();
    assert_eq!(
        consumptions[0].tuple.get(1),
        Some(&Value::Readings(Payload::Unavailable)),
        "failures must arrive as the explicit marker, never be dropped"
    );
}

#[test]
fn instance_survives_bridge_wide_traffic() {
    let engine = ScriptedEngine::new()
        .with_net("weathernet")
        .with_operation("weathernet", RECEIVE_DATA, 2);
    let log = engine.log();
    let bridge = Arc::new(Bridge::start(engine));
    let instance = Arc::new(SimulationInstance::start(bridge, "weathernet").unwrap());

    let producers: Vec<_> = (0..6)
        .map(|i| {
            let instance = Arc::clone(&instance);
            std::thread::spawn(move || {
                for round in 0..5 {
                    let payload = Payload::from_entries([(
                        format!("reading_{i}"),
                        round as f64,
                    )]);
                    instance
                        .receive_data(&format!("site-{i}"), payload)
                        .unwrap();
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().unwrap();
    }

    assert_eq!(log.consumptions().len(), 30);
    assert!(!log.has_overlapping_consumptions());
    assert_eq!(instance.deliveries_in_flight(), 0);
}
