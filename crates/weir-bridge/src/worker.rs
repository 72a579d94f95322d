//! The engine worker loop: ingress draining, parked rendezvous, and
//! engine stepping.
//!
//! The worker owns the [`TokenEngine`] exclusively (moved in via
//! `thread::spawn`). No locks anywhere — work arrives via a bounded
//! crossbeam channel and replies go back via per-call bounded(1)
//! channels. Mutual exclusion of engine-affecting tasks is a
//! consequence of the loop being the only code that ever touches the
//! engine value.

use std::collections::VecDeque;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender};

use weir_core::{EngineFault, InstanceId, OfferOutcome, OperationName, TokenEngine, Tuple};

/// A one-shot engine task. The closure captures its own reply channel,
/// so the worker just runs it.
pub(crate) type EngineTask<E> = Box<dyn FnOnce(&mut E) + Send>;

/// Work submitted to the worker.
pub(crate) enum Ingress<E> {
    /// Run a task to completion on the worker.
    Task(EngineTask<E>),
    /// Offer a correlation tuple, parking until an operation consumes it.
    Offer(PendingRequest),
}

/// An in-flight rendezvous: the offered tuple and its completion
/// signal. Created per delivery; destroyed when the engine consumes
/// the tuple, the offer faults, or the worker tears down (dropping the
/// reply sender, which the blocked caller observes as `Interrupted`).
pub(crate) struct PendingRequest {
    pub instance: InstanceId,
    pub operation: OperationName,
    pub tuple: Tuple,
    pub reply: Sender<Result<Tuple, EngineFault>>,
}

/// Counters the worker hands back on exit.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct WorkerStats {
    pub tasks_run: u64,
    pub offers_consumed: u64,
    pub rendezvous_abandoned: usize,
}

/// State held by the worker thread's main loop.
pub(crate) struct WorkerState<E: TokenEngine> {
    engine: E,
    rx: Receiver<Ingress<E>>,
    parked: VecDeque<PendingRequest>,
    park_retry: Duration,
    stats: WorkerStats,
}

impl<E: TokenEngine> WorkerState<E> {
    pub fn new(engine: E, rx: Receiver<Ingress<E>>, park_retry: Duration) -> Self {
        Self {
            engine,
            rx,
            parked: VecDeque::new(),
            park_retry,
            stats: WorkerStats::default(),
        }
    }

    /// Main worker loop. Runs until the ingress channel disconnects
    /// and drains; everything already submitted is still processed.
    ///
    /// Consumes self and returns the engine so the bridge can recover
    /// it after shutdown, plus the exit counters.
    pub fn run(mut self) -> (E, WorkerStats) {
        loop {
            // With nothing parked there is no engine activity to
            // drive, so block until work arrives. With parked
            // requests, wake periodically to step the engine.
            let first = if self.parked.is_empty() {
                match self.rx.recv() {
                    Ok(msg) => Some(msg),
                    Err(_) => break,
                }
            } else {
                match self.rx.recv_timeout(self.park_retry) {
                    Ok(msg) => Some(msg),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            };

            if let Some(msg) = first {
                self.handle(msg);
            }
            while let Ok(msg) = self.rx.try_recv() {
                self.handle(msg);
            }

            self.advance_parked();
        }

        // Teardown: parked requests are abandoned. Dropping their
        // reply senders unblocks the waiting callers with
        // `Interrupted`.
        self.stats.rendezvous_abandoned = self.parked.len();
        self.parked.clear();
        (self.engine, self.stats)
    }

    fn handle(&mut self, msg: Ingress<E>) {
        match msg {
            Ingress::Task(task) => {
                task(&mut self.engine);
                self.stats.tasks_run += 1;
            }
            Ingress::Offer(request) => {
                // Preserve arrival order: while anything is parked,
                // new offers queue behind it and are tried by
                // `advance_parked` in FIFO order.
                if self.parked.is_empty() {
                    self.try_offer(request);
                } else {
                    self.parked.push_back(request);
                }
            }
        }
    }

    /// Step the engine and re-offer parked requests in arrival order.
    ///
    /// A request parked on one operation never blocks consumption of a
    /// request behind it that targets a different, enabled operation.
    fn advance_parked(&mut self) {
        if self.parked.is_empty() {
            return;
        }
        self.engine.step();
        for request in std::mem::take(&mut self.parked) {
            self.try_offer(request);
        }
    }

    fn try_offer(&mut self, request: PendingRequest) {
        let PendingRequest {
            instance,
            operation,
            tuple,
            reply,
        } = request;
        match self.engine.offer(instance, &operation, tuple) {
            OfferOutcome::Consumed(response) => {
                self.stats.offers_consumed += 1;
                // Best-effort reply — the caller may have abandoned
                // the wait.
                let _ = reply.send(Ok(response));
            }
            OfferOutcome::Parked(tuple) => {
                self.parked.push_back(PendingRequest {
                    instance,
                    operation,
                    tuple,
                    reply,
                });
            }
            OfferOutcome::Fault(fault) => {
                let _ = reply.send(Err(fault));
            }
        }
    }
}
