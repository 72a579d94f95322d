//! Fetch live weather for a couple of sites and hand each payload to a
//! simulation instance through the bridge.
//!
//! ```bash
//! cargo run -p weir-feed --example weather_feed
//! ```

use std::sync::Arc;

use weir_bridge::Bridge;
use weir_feed::{DataProducer, OpenMeteo, Site};
use weir_net::{SimulationInstance, RECEIVE_DATA};
use weir_test_utils::ScriptedEngine;

fn main() {
    let engine = ScriptedEngine::new()
        .with_net("weathernet")
        .with_operation("weathernet", RECEIVE_DATA, 2);
    let log = engine.log();
    let bridge = Arc::new(Bridge::start(engine));

    let instance = Arc::new(
        SimulationInstance::start(Arc::clone(&bridge), "weathernet")
            .expect("weathernet instance"),
    );
    println!(
        "instance {} ready (early tokens: {})",
        instance.id(),
        instance.early_tokens()
    );

    let producer = DataProducer::new(Arc::clone(&instance), Arc::new(OpenMeteo::new()));
    let deliveries: Vec<_> = [
        Site::new("lisbon", 38.71, -9.14),
        Site::new("beja", 38.01, -7.86),
    ]
    .into_iter()
    .map(|site| producer.deliver(site))
    .collect();

    for delivery in deliveries {
        match delivery.join().expect("feed thread") {
            Ok(report) if report.unavailable => {
                println!("{}: source unavailable, delivered empty result", report.site);
            }
            Ok(report) => println!("{}: delivered {} readings", report.site, report.entries),
            Err(err) => println!("delivery failed: {err}"),
        }
    }

    for consumption in log.consumptions() {
        println!(
            "engine consumed {} on instance {}: {}",
            consumption.operation, consumption.instance, consumption.tuple
        );
    }
}
