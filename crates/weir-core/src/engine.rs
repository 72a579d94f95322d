//! The boundary trait to the token engine collaborator.

use crate::error::EngineFault;
use crate::id::{InstanceId, NetName, OperationName, StepId};
use crate::tuple::Tuple;

/// Outcome of offering a correlation tuple to an operation.
#[derive(Debug)]
pub enum OfferOutcome {
    /// The operation was enabled and consumed the tuple; the response
    /// tuple is the completion record.
    Consumed(Tuple),
    /// No matching operation is currently enabled. The tuple is handed
    /// back untouched so the request can be parked and re-offered.
    Parked(Tuple),
    /// The offer faulted (unknown operation, arity mismatch, or the
    /// operation's step logic failed). The tuple is lost with the call.
    Fault(EngineFault),
}

/// The token engine, as seen from the synchronization core.
///
/// Everything behind this trait is an external collaborator: net
/// structure, transition firing, and step logic are opaque. Instances
/// are addressed by [`InstanceId`], operations by [`OperationName`],
/// and parameters and results cross the boundary as fixed-arity
/// [`Tuple`]s of opaque values.
///
/// # Ownership
///
/// The engine value is moved into the single worker thread at bridge
/// startup and mutated only from tasks that worker runs, which is what
/// makes every method `&mut self` safe without further locking.
pub trait TokenEngine: Send + 'static {
    /// Locate the net template named `net` and spawn one instance.
    ///
    /// Fails with [`EngineFault::NetNotFound`] when no template is
    /// registered under that name.
    fn spawn_instance(&mut self, net: &NetName) -> Result<InstanceId, EngineFault>;

    /// Switch early-token delivery for `instance`.
    ///
    /// With early tokens enabled, deliveries may be offered before the
    /// instance's own net activity has started.
    fn set_early_tokens(&mut self, instance: InstanceId, enabled: bool)
        -> Result<(), EngineFault>;

    /// Identifier of the engine's current step.
    fn current_step(&self) -> StepId;

    /// Confirm startup of a freshly spawned instance at `step`.
    fn confirm_startup(&mut self, instance: InstanceId, step: StepId) -> Result<(), EngineFault>;

    /// Offer a fully bound tuple to the operation named `operation` on
    /// `instance`.
    ///
    /// Consumption is atomic from the caller's point of view: either
    /// the tuple is consumed and a response produced, or it is handed
    /// back untouched, or the whole offer faults.
    fn offer(
        &mut self,
        instance: InstanceId,
        operation: &OperationName,
        tuple: Tuple,
    ) -> OfferOutcome;

    /// Advance internal net activity by one step.
    ///
    /// May enable operations that parked offers are waiting on.
    /// Returns whether anything progressed.
    fn step(&mut self) -> bool;
}
