//! User-facing [`Bridge`] handle and shutdown state machine.
//!
//! # Architecture
//!
//! ```text
//! Producer Thread(s)             Engine Worker (1)
//!     |                              |
//!     |--execute_and_wait(f)-------->| rx.recv()
//!     |   [ingress: bounded(64)]     | f(&mut engine)
//!     |<--result via bounded(1)------|
//!     |                              |
//!     |--rendezvous(op, tuple)------>| offer(op, tuple)
//!     |   blocks on reply            |   consumed → reply
//!     |                              |   not enabled → park
//!     |                              | step() · retry parked (FIFO)
//!     |<--response tuple-------------|
//! ```
//!
//! Exactly one engine-affecting task executes at any instant; ordering
//! across concurrent callers follows the order their submissions reach
//! the ingress channel, not the real-world order in which the data they
//! carry became available.

use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender};

use weir_core::{EngineFault, InstanceId, OperationName, TokenEngine, Tuple};

use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::worker::{EngineTask, Ingress, PendingRequest, WorkerState, WorkerStats};

// ── PendingReply ─────────────────────────────────────────────────

/// A future-like handle for a submitted task.
///
/// Returned by [`Bridge::submit`]; the caller blocks on
/// [`wait`](PendingReply::wait) when it is ready to. Dropping the
/// handle abandons the wait without retracting the task.
pub struct PendingReply<T> {
    rx: Receiver<Result<T, EngineFault>>,
}

impl<T> PendingReply<T> {
    /// Block until the task finishes on the worker.
    ///
    /// Faults raised inside the task are rethrown here as
    /// [`BridgeError::Fault`]; a wait torn down by worker shutdown
    /// surfaces as [`BridgeError::Interrupted`].
    pub fn wait(self) -> Result<T, BridgeError> {
        match self.rx.recv() {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(fault)) => Err(BridgeError::Fault(fault)),
            Err(_) => Err(BridgeError::Interrupted),
        }
    }
}

// ── ShutdownReport ───────────────────────────────────────────────

/// Report from [`Bridge::shutdown`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ShutdownReport {
    /// Whether the worker thread was joined cleanly. `false` when the
    /// bridge was already shut down or the worker panicked.
    pub worker_joined: bool,
    /// Tasks the worker ran over its lifetime.
    pub tasks_run: u64,
    /// Rendezvous offers the engine consumed.
    pub offers_consumed: u64,
    /// Rendezvous still parked at teardown; their callers observed
    /// [`BridgeError::Interrupted`].
    pub rendezvous_abandoned: usize,
}

// ── Bridge ───────────────────────────────────────────────────────

/// Handle to the single serialized engine worker.
///
/// Owns the worker thread for as long as the handle lives. Share it as
/// `Arc<Bridge<E>>` and inject it into every component that needs
/// engine access.
///
/// [`shutdown`](Bridge::shutdown) takes `&self` deliberately: the
/// owner must be able to tear the bridge down while producers are
/// still blocked inside it, which is what converts their waits into
/// [`BridgeError::Interrupted`]. Dropping the last handle shuts the
/// worker down too; everything already submitted is still processed,
/// but parked rendezvous are abandoned.
pub struct Bridge<E: TokenEngine> {
    /// `None` once shut down. A Mutex rather than `&mut` methods so
    /// teardown works through a shared handle; never held across a
    /// blocking send.
    ingress: Mutex<Option<Sender<Ingress<E>>>>,
    worker: Mutex<Option<JoinHandle<(E, WorkerStats)>>>,
    /// Recovered from the worker on shutdown.
    recovered: Mutex<Option<E>>,
}

impl<E: TokenEngine> Bridge<E> {
    /// Start the worker with the default [`BridgeConfig`].
    ///
    /// The engine value is moved into the worker thread; from here on
    /// it is mutated only by tasks the worker runs.
    pub fn start(engine: E) -> Self {
        Self::start_with(engine, BridgeConfig::default())
    }

    /// Start the worker with an explicit configuration.
    ///
    /// # Panics
    ///
    /// Panics if `config.ingress_capacity` is zero or the worker
    /// thread cannot be spawned.
    pub fn start_with(engine: E, config: BridgeConfig) -> Self {
        assert!(
            config.ingress_capacity > 0,
            "ingress_capacity must be at least 1"
        );
        let (tx, rx) = bounded(config.ingress_capacity);
        let park_retry = config.park_retry;
        let worker = thread::Builder::new()
            .name("weir-engine".into())
            .spawn(move || WorkerState::new(engine, rx, park_retry).run())
            .expect("failed to spawn engine worker");
        Self {
            ingress: Mutex::new(Some(tx)),
            worker: Mutex::new(Some(worker)),
            recovered: Mutex::new(None),
        }
    }

    /// Submit `task` to the worker and block until it finishes.
    ///
    /// Guarantees mutual exclusion: no two tasks execute concurrently
    /// on the worker. A fault raised inside the task is captured there
    /// and rethrown here as [`BridgeError::Fault`].
    pub fn execute_and_wait<T, F>(&self, task: F) -> Result<T, BridgeError>
    where
        T: Send + 'static,
        F: FnOnce(&mut E) -> Result<T, EngineFault> + Send + 'static,
    {
        self.submit(task)?.wait()
    }

    /// Submit `task` and return a [`PendingReply`] to block on later.
    ///
    /// Semantically [`execute_and_wait`](Bridge::execute_and_wait)
    /// with the wait split out; the instance-initialization handshake
    /// blocks on the returned handle.
    pub fn submit<T, F>(&self, task: F) -> Result<PendingReply<T>, BridgeError>
    where
        T: Send + 'static,
        F: FnOnce(&mut E) -> Result<T, EngineFault> + Send + 'static,
    {
        let (reply_tx, reply_rx) = bounded(1);
        let boxed: EngineTask<E> = Box::new(move |engine| {
            // Best-effort reply — the caller may have dropped the handle.
            let _ = reply_tx.send(task(engine));
        });
        self.send(Ingress::Task(boxed))?;
        Ok(PendingReply { rx: reply_rx })
    }

    /// Offer `tuple` to `operation` on `instance` and block until the
    /// engine consumes it, returning the response tuple.
    ///
    /// There is no timeout: if no matching operation is enabled, the
    /// call blocks until one becomes enabled or the bridge tears down
    /// (in which case it fails with [`BridgeError::Interrupted`]).
    pub fn rendezvous(
        &self,
        instance: InstanceId,
        operation: OperationName,
        tuple: Tuple,
    ) -> Result<Tuple, BridgeError> {
        let (reply_tx, reply_rx) = bounded(1);
        self.send(Ingress::Offer(PendingRequest {
            instance,
            operation,
            tuple,
            reply: reply_tx,
        }))?;
        match reply_rx.recv() {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(fault)) => Err(BridgeError::Fault(fault)),
            Err(_) => Err(BridgeError::Interrupted),
        }
    }

    /// Whether the handle still has a live worker behind it.
    pub fn is_running(&self) -> bool {
        let ingress_live = self.ingress.lock().unwrap().is_some();
        let worker_live = self
            .worker
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished());
        ingress_live && worker_live
    }

    /// Shut the worker down and join it.
    ///
    /// Drops the ingress sender; the worker drains everything already
    /// submitted, abandons parked rendezvous (their blocked callers
    /// observe [`BridgeError::Interrupted`]), and exits. The engine
    /// value is recovered and kept for
    /// [`recover_engine`](Bridge::recover_engine).
    ///
    /// Idempotent; a second call returns a default report.
    pub fn shutdown(&self) -> ShutdownReport {
        // Dropping the sender is the shutdown signal.
        self.ingress.lock().unwrap().take();

        let handle = self.worker.lock().unwrap().take();
        let mut report = ShutdownReport::default();
        if let Some(handle) = handle {
            if let Ok((engine, stats)) = handle.join() {
                *self.recovered.lock().unwrap() = Some(engine);
                report.worker_joined = true;
                report.tasks_run = stats.tasks_run;
                report.offers_consumed = stats.offers_consumed;
                report.rendezvous_abandoned = stats.rendezvous_abandoned;
            }
        }
        report
    }

    /// Take back the engine value after [`shutdown`](Bridge::shutdown).
    ///
    /// Returns `None` before shutdown or if the worker panicked.
    pub fn recover_engine(&self) -> Option<E> {
        self.recovered.lock().unwrap().take()
    }

    fn send(&self, msg: Ingress<E>) -> Result<(), BridgeError> {
        // Clone the sender out so the lock is not held across the
        // (potentially blocking) send.
        let sender = self
            .ingress
            .lock()
            .unwrap()
            .clone()
            .ok_or(BridgeError::NotReady)?;
        // A send error means the worker is gone (receiver dropped).
        sender.send(msg).map_err(|_| BridgeError::NotReady)
    }
}

impl<E: TokenEngine> Drop for Bridge<E> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
