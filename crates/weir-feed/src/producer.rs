//! Producer threads that fetch and then block on delivery.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use weir_core::TokenEngine;
use weir_net::{DeliveryError, SimulationInstance};

use crate::site::Site;
use crate::source::DataSource;

/// What one completed delivery looked like.
#[derive(Clone, Debug, PartialEq)]
pub struct DeliveryReport {
    /// Name of the site the payload was fetched for.
    pub site: String,
    /// Number of readings delivered.
    pub entries: usize,
    /// Whether the source reported the explicit empty-result marker.
    pub unavailable: bool,
}

/// An asynchronous producer: fetches a payload off-thread, then drives
/// the instance's entry point and blocks until the engine has consumed
/// the delivery.
///
/// One thread per delivery, like one in-flight request per caller; the
/// producer itself holds no mutable state and can be shared freely.
pub struct DataProducer<E: TokenEngine> {
    instance: Arc<SimulationInstance<E>>,
    source: Arc<dyn DataSource>,
}

impl<E: TokenEngine> DataProducer<E> {
    /// Couple a source to an instance.
    pub fn new(instance: Arc<SimulationInstance<E>>, source: Arc<dyn DataSource>) -> Self {
        Self { instance, source }
    }

    /// Fetch readings for `site` and deliver them, blocking the
    /// calling thread for the whole round trip.
    ///
    /// A failed fetch still delivers: the payload is then the explicit
    /// empty-result marker. A failed delivery loses that payload only;
    /// no retry happens here.
    pub fn deliver_blocking(&self, site: &Site) -> Result<DeliveryReport, DeliveryError> {
        let payload = self.source.fetch(site);
        let unavailable = payload.is_unavailable();
        let entries = payload.len();
        self.instance.receive_data(&site.name, payload)?;
        Ok(DeliveryReport {
            site: site.name.clone(),
            entries,
            unavailable,
        })
    }

    /// Run [`deliver_blocking`](DataProducer::deliver_blocking) on its
    /// own named thread and hand back the join handle.
    pub fn deliver(&self, site: Site) -> JoinHandle<Result<DeliveryReport, DeliveryError>> {
        let instance = Arc::clone(&self.instance);
        let source = Arc::clone(&self.source);
        thread::Builder::new()
            .name(format!("weir-feed-{}", site.name))
            .spawn(move || {
                let producer = DataProducer { instance, source };
                producer.deliver_blocking(&site)
            })
            .expect("failed to spawn feed thread")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weir_bridge::Bridge;
    use weir_core::{Payload, Value};
    use weir_net::RECEIVE_DATA;
    use weir_test_utils::ScriptedEngine;

    /// Source double that replays scripted payloads.
    struct FixedSource(Payload);

    impl DataSource for FixedSource {
        fn fetch(&self, _site: &Site) -> Payload {
            self.0.clone()
        }
    }

    fn ready_instance() -> (
        weir_test_utils::EngineLog,
        Arc<SimulationInstance<ScriptedEngine>>,
    ) {
        let engine = ScriptedEngine::new()
            .with_net("weathernet")
            .with_operation("weathernet", RECEIVE_DATA, 2);
        let log = engine.log();
        let bridge = Arc::new(Bridge::start(engine));
        let instance = Arc::new(SimulationInstance::start(bridge, "weathernet").unwrap());
        (log, instance)
    }

    #[test]
    fn deliver_blocking_reports_entries() {
        let (log, instance) = ready_instance();
        let payload = Payload::from_entries([
            ("current_weather_temperature".to_string(), 59.0),
            ("current_weather_windspeed".to_string(), 10.0),
        ]);
        let producer = DataProducer::new(instance, Arc::new(FixedSource(payload)));

        let report = producer
            .deliver_blocking(&Site::new("beja", 38.01, -7.86))
            .unwrap();
        assert_eq!(
            report,
            DeliveryReport {
                site: "beja".to_string(),
                entries: 2,
                unavailable: false,
            }
        );
        assert_eq!(log.consumptions().len(), 1);
    }

    #[test]
    fn failed_fetch_delivers_the_marker() {
        let (log, instance) = ready_instance();
        let producer = DataProducer::new(instance, Arc::new(FixedSource(Payload::Unavailable)));

        let report = producer
            .deliver_blocking(&Site::new("nowhere", 0.0, 0.0))
            .unwrap();
        assert!(report.unavailable);
        assert_eq!(report.entries, 0);
        assert_eq!(
            log.consumptions()[0].tuple.get(1),
            Some(&Value::Readings(Payload::Unavailable))
        );
    }

    #[test]
    fn deliver_runs_on_its_own_thread_and_joins_with_report() {
        let (log, instance) = ready_instance();
        let payload = Payload::from_entries([("reading".to_string(), 1.0)]);
        let producer = DataProducer::new(instance, Arc::new(FixedSource(payload)));

        let lisbon = producer.deliver(Site::new("lisbon", 38.71, -9.14));
        let beja = producer.deliver(Site::new("beja", 38.01, -7.86));

        let reports = [lisbon.join().unwrap(), beja.join().unwrap()];
        assert!(reports.iter().all(|r| r.is_ok()));
        assert_eq!(log.consumptions().len(), 2);
        assert!(!log.has_overlapping_consumptions());
    }
}
