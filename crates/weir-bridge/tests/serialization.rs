//! Stress tests for the bridge's core guarantee: engine-affecting
//! work is strictly serialized no matter how many producer threads
//! hammer the bridge at once.

use std::sync::Arc;
use std::time::Duration;

use weir_bridge::{Bridge, BridgeConfig};
use weir_core::{NetName, OperationName, TokenEngine, Tuple, Value};
use weir_test_utils::ScriptedEngine;

const PRODUCERS: usize = 8;
const DELIVERIES_PER_PRODUCER: usize = 4;

#[test]
fn concurrent_rendezvous_never_overlap() {
    let engine = ScriptedEngine::new()
        .with_net("weathernet")
        .with_busy_operation("weathernet", "receive_data", 2, Duration::from_millis(3));
    let log = engine.log();
    let bridge = Arc::new(Bridge::start(engine));
    let instance = bridge
        .execute_and_wait(|engine| engine.spawn_instance(&NetName::from("weathernet")))
        .unwrap();

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|p| {
            let bridge = Arc::clone(&bridge);
            std::thread::spawn(move || {
                for d in 0..DELIVERIES_PER_PRODUCER {
                    let mut tuple = Tuple::new(2);
                    tuple.bind(0, Value::from(format!("site-{p}"))).unwrap();
                    tuple.bind(1, Value::from(d as f64)).unwrap();
                    bridge
                        .rendezvous(instance, OperationName::from("receive_data"), tuple)
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let consumptions = log.consumptions();
    assert_eq!(consumptions.len(), PRODUCERS * DELIVERIES_PER_PRODUCER);
    assert!(
        !log.has_overlapping_consumptions(),
        "engine consumed two rendezvous at the same time"
    );
}

#[test]
fn tasks_run_in_submission_order() {
    let bridge = Bridge::start(ScriptedEngine::new().with_net("weathernet"));

    // Step the engine a different number of times per task and read
    // the counter back: any reordering or interleaving would break
    // the arithmetic.
    let mut expected = 0;
    for burst in 1..=5 {
        let observed = bridge
            .execute_and_wait(move |engine| {
                for _ in 0..burst {
                    engine.step();
                }
                Ok(engine.current_step())
            })
            .unwrap();
        expected += burst;
        assert_eq!(observed.0, expected);
    }
}

#[test]
fn parked_rendezvous_complete_in_arrival_order() {
    let engine = ScriptedEngine::new()
        .with_net("weathernet")
        .with_delayed_operation("weathernet", "receive_data", 1, 50);
    let log = engine.log();
    let bridge = Arc::new(Bridge::start_with(
        engine,
        BridgeConfig {
            park_retry: Duration::from_millis(1),
            ..BridgeConfig::default()
        },
    ));
    let instance = bridge
        .execute_and_wait(|engine| engine.spawn_instance(&NetName::from("weathernet")))
        .unwrap();

    // Producers arrive staggered, well inside the enablement delay, so
    // all of them park before the operation enables.
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let bridge = Arc::clone(&bridge);
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(5 * i as u64));
                let mut tuple = Tuple::new(1);
                tuple.bind(0, Value::from(i as f64)).unwrap();
                bridge
                    .rendezvous(instance, OperationName::from("receive_data"), tuple)
                    .unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let order: Vec<Option<f64>> = log
        .consumptions()
        .iter()
        .map(|c| match c.tuple.get(0) {
            Some(Value::Number(n)) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(
        order,
        vec![Some(0.0), Some(1.0), Some(2.0), Some(3.0)],
        "parked rendezvous were not consumed in arrival order"
    );
}
