//! Test utilities for Weir development.
//!
//! Provides [`ScriptedEngine`], a [`TokenEngine`] double whose nets and
//! operations are scripted up front, and [`EngineLog`], a shared handle
//! that survives the engine being moved into a worker thread so tests
//! can inspect what the engine consumed and when.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use weir_core::{
    EngineFault, InstanceId, NetName, OfferOutcome, OperationName, StepId, TokenEngine, Tuple,
};

/// One consumed rendezvous, with the wall-clock interval the engine
/// spent consuming it. Interval disjointness across records is how
/// tests verify that engine tasks never overlap.
#[derive(Clone, Debug)]
pub struct Consumption {
    pub instance: InstanceId,
    pub operation: String,
    pub tuple: Tuple,
    pub started: Instant,
    pub finished: Instant,
}

/// One instance-initialization handshake as the engine saw it.
#[derive(Clone, Debug)]
pub struct Handshake {
    pub instance: InstanceId,
    pub net: String,
    pub early_tokens: bool,
    pub confirmed_at: Option<StepId>,
}

#[derive(Default)]
struct Log {
    consumptions: Vec<Consumption>,
    handshakes: Vec<Handshake>,
}

/// Shared view into a [`ScriptedEngine`]'s records.
///
/// Clone the handle out with [`ScriptedEngine::log`] before the engine
/// moves into a worker thread.
#[derive(Clone, Default)]
pub struct EngineLog(Arc<Mutex<Log>>);

impl EngineLog {
    /// Everything consumed so far, in consumption order.
    pub fn consumptions(&self) -> Vec<Consumption> {
        self.0.lock().unwrap().consumptions.clone()
    }

    /// Every handshake so far, in spawn order.
    pub fn handshakes(&self) -> Vec<Handshake> {
        self.0.lock().unwrap().handshakes.clone()
    }

    /// Whether any two consumption intervals overlap in time.
    pub fn has_overlapping_consumptions(&self) -> bool {
        let mut intervals: Vec<(Instant, Instant)> = self
            .consumptions()
            .iter()
            .map(|c| (c.started, c.finished))
            .collect();
        intervals.sort();
        intervals.windows(2).any(|w| w[1].0 < w[0].1)
    }
}

#[derive(Clone)]
struct OpScript {
    arity: usize,
    /// Operation is enabled once the engine has stepped this often.
    enabled_after: u64,
    /// Hold time while consuming, to make interval overlap detectable.
    consume_for: Duration,
    fail_with: Option<String>,
}

#[derive(Clone, Default)]
struct NetScript {
    ops: HashMap<String, OpScript>,
}

/// A [`TokenEngine`] whose behavior is scripted per net and operation.
///
/// Build it with the `with_*` methods, clone the [`EngineLog`] handle
/// out, then hand the engine to a bridge. Operations echo the consumed
/// tuple back as their response.
#[derive(Default)]
pub struct ScriptedEngine {
    nets: HashMap<String, NetScript>,
    instances: HashMap<InstanceId, String>,
    step: u64,
    log: EngineLog,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a net template with no operations.
    pub fn with_net(mut self, net: &str) -> Self {
        self.nets.entry(net.to_string()).or_default();
        self
    }

    /// Register an operation that is enabled from the start.
    pub fn with_operation(self, net: &str, op: &str, arity: usize) -> Self {
        self.script(net, op, arity, 0, Duration::ZERO, None)
    }

    /// Register an operation that only enables after the engine has
    /// stepped `enabled_after` times.
    pub fn with_delayed_operation(
        self,
        net: &str,
        op: &str,
        arity: usize,
        enabled_after: u64,
    ) -> Self {
        self.script(net, op, arity, enabled_after, Duration::ZERO, None)
    }

    /// Register an operation that holds the engine for `consume_for`
    /// while consuming, so tests can check intervals for overlap.
    pub fn with_busy_operation(
        self,
        net: &str,
        op: &str,
        arity: usize,
        consume_for: Duration,
    ) -> Self {
        self.script(net, op, arity, 0, consume_for, None)
    }

    /// Register an operation whose consumption always fails.
    pub fn with_failing_operation(self, net: &str, op: &str, arity: usize, reason: &str) -> Self {
        self.script(net, op, arity, 0, Duration::ZERO, Some(reason.to_string()))
    }

    /// Shared handle to the consumption and handshake records.
    pub fn log(&self) -> EngineLog {
        self.log.clone()
    }

    fn script(
        mut self,
        net: &str,
        op: &str,
        arity: usize,
        enabled_after: u64,
        consume_for: Duration,
        fail_with: Option<String>,
    ) -> Self {
        self.nets.entry(net.to_string()).or_default().ops.insert(
            op.to_string(),
            OpScript {
                arity,
                enabled_after,
                consume_for,
                fail_with,
            },
        );
        self
    }

    fn handshake_mut<R>(
        &mut self,
        instance: InstanceId,
        op: &str,
        f: impl FnOnce(&mut Handshake) -> R,
    ) -> Result<R, EngineFault> {
        if !self.instances.contains_key(&instance) {
            return Err(EngineFault::OperationFailed {
                operation: op.to_string(),
                reason: format!("unknown instance {instance}"),
            });
        }
        let mut log = self.log.0.lock().unwrap();
        let record = log
            .handshakes
            .iter_mut()
            .find(|h| h.instance == instance)
            .expect("handshake recorded at spawn");
        Ok(f(record))
    }
}

impl TokenEngine for ScriptedEngine {
    fn spawn_instance(&mut self, net: &NetName) -> Result<InstanceId, EngineFault> {
        if !self.nets.contains_key(net.as_str()) {
            return Err(EngineFault::NetNotFound {
                net: net.as_str().to_string(),
            });
        }
        let instance = InstanceId::next();
        self.instances.insert(instance, net.as_str().to_string());
        self.log.0.lock().unwrap().handshakes.push(Handshake {
            instance,
            net: net.as_str().to_string(),
            early_tokens: false,
            confirmed_at: None,
        });
        Ok(instance)
    }

    fn set_early_tokens(
        &mut self,
        instance: InstanceId,
        enabled: bool,
    ) -> Result<(), EngineFault> {
        self.handshake_mut(instance, "set_early_tokens", |h| h.early_tokens = enabled)
    }

    fn current_step(&self) -> StepId {
        StepId(self.step)
    }

    fn confirm_startup(&mut self, instance: InstanceId, step: StepId) -> Result<(), EngineFault> {
        self.handshake_mut(instance, "confirm_startup", |h| h.confirmed_at = Some(step))
    }

    fn offer(
        &mut self,
        instance: InstanceId,
        operation: &OperationName,
        tuple: Tuple,
    ) -> OfferOutcome {
        let Some(net) = self.instances.get(&instance) else {
            return OfferOutcome::Fault(EngineFault::OperationFailed {
                operation: operation.as_str().to_string(),
                reason: format!("unknown instance {instance}"),
            });
        };
        let Some(script) = self
            .nets
            .get(net)
            .and_then(|n| n.ops.get(operation.as_str()))
            .cloned()
        else {
            return OfferOutcome::Fault(EngineFault::UnknownOperation {
                operation: operation.as_str().to_string(),
            });
        };

        if script.arity != tuple.arity() {
            return OfferOutcome::Fault(EngineFault::ArityMismatch {
                operation: operation.as_str().to_string(),
                expected: script.arity,
                actual: tuple.arity(),
            });
        }
        if self.step < script.enabled_after {
            return OfferOutcome::Parked(tuple);
        }
        if let Some(reason) = script.fail_with {
            return OfferOutcome::Fault(EngineFault::OperationFailed {
                operation: operation.as_str().to_string(),
                reason,
            });
        }

        let started = Instant::now();
        if script.consume_for > Duration::ZERO {
            std::thread::sleep(script.consume_for);
        }
        let finished = Instant::now();
        self.log.0.lock().unwrap().consumptions.push(Consumption {
            instance,
            operation: operation.as_str().to_string(),
            tuple: tuple.clone(),
            started,
            finished,
        });
        OfferOutcome::Consumed(tuple)
    }

    fn step(&mut self) -> bool {
        self.step += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weir_core::Value;

    #[test]
    fn spawn_unknown_net_faults() {
        let mut engine = ScriptedEngine::new().with_net("weathernet");
        let err = engine
            .spawn_instance(&NetName::from("other"))
            .unwrap_err();
        assert!(matches!(err, EngineFault::NetNotFound { .. }));
    }

    #[test]
    fn offer_checks_name_then_arity_then_enablement() {
        let mut engine = ScriptedEngine::new()
            .with_net("n")
            .with_delayed_operation("n", "op", 1, 3);
        let instance = engine.spawn_instance(&NetName::from("n")).unwrap();

        let unknown = engine.offer(instance, &OperationName::from("nope"), Tuple::new(1));
        assert!(matches!(
            unknown,
            OfferOutcome::Fault(EngineFault::UnknownOperation { .. })
        ));

        let wrong_arity = engine.offer(instance, &OperationName::from("op"), Tuple::new(2));
        assert!(matches!(
            wrong_arity,
            OfferOutcome::Fault(EngineFault::ArityMismatch {
                expected: 1,
                actual: 2,
                ..
            })
        ));

        let mut tuple = Tuple::new(1);
        tuple.bind(0, Value::from(1.0)).unwrap();
        let parked = engine.offer(instance, &OperationName::from("op"), tuple.clone());
        assert!(matches!(parked, OfferOutcome::Parked(_)));

        for _ in 0..3 {
            engine.step();
        }
        let consumed = engine.offer(instance, &OperationName::from("op"), tuple);
        assert!(matches!(consumed, OfferOutcome::Consumed(_)));
        assert_eq!(engine.log().consumptions().len(), 1);
    }

    #[test]
    fn handshake_records_early_tokens_and_confirmation() {
        let mut engine = ScriptedEngine::new().with_net("n");
        let instance = engine.spawn_instance(&NetName::from("n")).unwrap();
        engine.set_early_tokens(instance, true).unwrap();
        engine.confirm_startup(instance, StepId(0)).unwrap();

        let handshakes = engine.log().handshakes();
        assert_eq!(handshakes.len(), 1);
        assert!(handshakes[0].early_tokens);
        assert_eq!(handshakes[0].confirmed_at, Some(StepId(0)));
    }

    #[test]
    fn overlap_detection_sees_disjoint_intervals() {
        let mut engine = ScriptedEngine::new()
            .with_net("n")
            .with_busy_operation("n", "op", 0, Duration::from_millis(1));
        let log = engine.log();
        let instance = engine.spawn_instance(&NetName::from("n")).unwrap();
        for _ in 0..3 {
            engine.offer(instance, &OperationName::from("op"), Tuple::new(0));
        }
        assert!(!log.has_overlapping_consumptions());
    }
}
