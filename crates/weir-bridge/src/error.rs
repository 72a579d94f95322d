//! Bridge-side error type.

use std::error::Error;
use std::fmt;

use weir_core::EngineFault;

/// Errors surfaced by the blocking bridge primitives.
#[derive(Clone, Debug, PartialEq)]
pub enum BridgeError {
    /// The handle has no live worker behind it: the bridge was shut
    /// down, or the worker thread has exited.
    NotReady,
    /// The blocking wait was torn down before the engine answered.
    ///
    /// The in-flight task is not retracted: it may still run to
    /// completion on the worker after the caller has seen this error.
    Interrupted,
    /// A fault raised inside the worker, captured there and rethrown
    /// to the blocked caller.
    Fault(EngineFault),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => write!(f, "engine worker is not running"),
            Self::Interrupted => write!(f, "wait interrupted before the engine answered"),
            Self::Fault(fault) => write!(f, "engine fault: {fault}"),
        }
    }
}

impl Error for BridgeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }
}
