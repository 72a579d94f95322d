//! One running net instance and its delivery entry point.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use weir_bridge::Bridge;
use weir_core::{InstanceId, NetName, OperationName, Payload, StepId, TokenEngine, Tuple, Value};

use crate::error::{DeliveryError, InitError, SyncError};
use crate::sync::Ack;

/// Operation name that [`SimulationInstance::receive_data`] offers
/// payloads to.
pub const RECEIVE_DATA: &str = "receive_data";

/// One running instance of a named net on the engine.
///
/// Construction performs the blocking initialization handshake: locate
/// the net template, enable early-token delivery, and confirm startup
/// at the engine's current step. Any failure surfaces synchronously
/// from [`start`](SimulationInstance::start) — a value of this type is
/// always ready to accept deliveries, which is how the lifecycle guard
/// ("no delivery before the handshake completes") is enforced without
/// runtime state.
///
/// The bridge handle is injected explicitly and shared; the instance
/// never touches the engine except through it.
pub struct SimulationInstance<E: TokenEngine> {
    bridge: Arc<Bridge<E>>,
    net: NetName,
    instance: InstanceId,
    init_step: StepId,
    early_tokens: bool,
    in_flight: AtomicUsize,
}

impl<E: TokenEngine> std::fmt::Debug for SimulationInstance<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulationInstance")
            .field("net", &self.net)
            .field("instance", &self.instance)
            .field("init_step", &self.init_step)
            .field("early_tokens", &self.early_tokens)
            .field("in_flight", &self.in_flight)
            .finish_non_exhaustive()
    }
}

impl<E: TokenEngine> SimulationInstance<E> {
    /// Run the initialization handshake and return a ready instance.
    ///
    /// Blocks on the worker through a [`PendingReply`] until the
    /// handshake task finishes. `NetNotFound` is reported as its own
    /// [`InitError`] variant; every other engine fault is an opaque
    /// handshake failure.
    ///
    /// [`PendingReply`]: weir_bridge::PendingReply
    pub fn start(bridge: Arc<Bridge<E>>, net: impl Into<NetName>) -> Result<Self, InitError> {
        let net = net.into();
        let handshake_net = net.clone();
        let pending = bridge
            .submit(move |engine| {
                let instance = engine.spawn_instance(&handshake_net)?;
                engine.set_early_tokens(instance, true)?;
                let step = engine.current_step();
                engine.confirm_startup(instance, step)?;
                Ok((instance, step))
            })
            .map_err(InitError::from_bridge)?;
        let (instance, init_step) = pending.wait().map_err(InitError::from_bridge)?;

        Ok(Self {
            bridge,
            net,
            instance,
            init_step,
            early_tokens: true,
            in_flight: AtomicUsize::new(0),
        })
    }

    /// Hand a payload to the engine and block until it is consumed.
    ///
    /// One delivery is one binder → synchronize → bridge round trip:
    /// a fresh two-slot correlation tuple is bound with the site name
    /// and the payload, then offered to [`RECEIVE_DATA`]. Binding is
    /// all-or-nothing — a conflict aborts the delivery before anything
    /// reaches the engine.
    ///
    /// A failed delivery loses that payload only; the instance stays
    /// ready.
    pub fn receive_data(&self, site: &str, payload: Payload) -> Result<Ack, DeliveryError> {
        let mut tuple = Tuple::new(2);
        tuple.bind(0, Value::from(site))?;
        tuple.bind(1, Value::from(payload))?;
        Ok(self.synchronize(OperationName::from(RECEIVE_DATA), tuple)?)
    }

    /// Match a fully bound tuple against `operation` and block until
    /// the engine's step logic consumes it.
    ///
    /// There is no timeout: if no matching operation is enabled the
    /// call blocks until one becomes enabled. The returned [`Ack`] is
    /// a completion signal callers may ignore.
    pub fn synchronize(&self, operation: OperationName, tuple: Tuple) -> Result<Ack, SyncError> {
        if let Some(index) = tuple.first_unbound() {
            return Err(SyncError::UnboundSlot { index });
        }
        self.in_flight.fetch_add(1, Ordering::AcqRel);
        let result = self.bridge.rendezvous(self.instance, operation, tuple);
        self.in_flight.fetch_sub(1, Ordering::AcqRel);
        result.map(Ack::new).map_err(SyncError::Bridge)
    }

    /// The net this instance was spawned from.
    pub fn net(&self) -> &NetName {
        &self.net
    }

    /// The engine-assigned instance identifier.
    pub fn id(&self) -> InstanceId {
        self.instance
    }

    /// The engine step at which startup was confirmed.
    pub fn init_step(&self) -> StepId {
        self.init_step
    }

    /// Whether early-token delivery was enabled at initialization.
    pub fn early_tokens(&self) -> bool {
        self.early_tokens
    }

    /// Deliveries currently blocked between binder and acknowledgment.
    pub fn deliveries_in_flight(&self) -> usize {
        self.in_flight.load(Ordering::Acquire)
    }
}
