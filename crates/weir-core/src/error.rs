//! Fault taxonomy shared across the workspace.
//!
//! Binding conflicts are detected on the producer side before anything
//! reaches the engine; engine faults are raised inside tasks running on
//! the serialized worker and rethrown to the blocked caller.

use std::error::Error;
use std::fmt;

use crate::value::Value;

/// Errors from binding values into correlation tuple slots.
///
/// A delivery is all-or-nothing: the first failed bind aborts the
/// whole correlation attempt and no partial tuple becomes visible to
/// the engine.
#[derive(Clone, Debug, PartialEq)]
pub enum BindError {
    /// The slot is already bound to a different value.
    Conflict {
        /// Index of the conflicting slot.
        index: usize,
        /// The value already bound.
        bound: Value,
        /// The value the caller tried to bind.
        offered: Value,
    },
    /// The slot index is outside the tuple's fixed arity.
    OutOfRange {
        /// The offending index.
        index: usize,
        /// The tuple's arity.
        arity: usize,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conflict {
                index,
                bound,
                offered,
            } => write!(
                f,
                "slot {index} already bound to {bound}, refusing {offered}"
            ),
            Self::OutOfRange { index, arity } => {
                write!(f, "slot {index} out of range for arity {arity}")
            }
        }
    }
}

impl Error for BindError {}

/// Faults raised by tasks running on the engine worker.
///
/// Captured on the worker and rethrown to whichever caller is blocked
/// on the task. `NetNotFound` is kept as its own variant because
/// instance construction distinguishes it from every other handshake
/// failure.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineFault {
    /// No net template is registered under the requested name.
    NetNotFound {
        /// The name that failed to resolve.
        net: String,
    },
    /// The instance has no operation with the requested name.
    UnknownOperation {
        /// The name that failed to match.
        operation: String,
    },
    /// The tuple's arity differs from the operation's argument count.
    ArityMismatch {
        /// The operation that was offered the tuple.
        operation: String,
        /// Argument count the operation declares.
        expected: usize,
        /// Arity of the offered tuple.
        actual: usize,
    },
    /// A binding required by the init handshake cannot be satisfied.
    BindingImpossible {
        /// Engine-reported description.
        reason: String,
    },
    /// The operation's step logic failed while consuming the tuple.
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// Engine-reported description.
        reason: String,
    },
}

impl fmt::Display for EngineFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetNotFound { net } => write!(f, "net '{net}' not found"),
            Self::UnknownOperation { operation } => {
                write!(f, "no operation named '{operation}'")
            }
            Self::ArityMismatch {
                operation,
                expected,
                actual,
            } => write!(
                f,
                "operation '{operation}' takes {expected} arguments, tuple has {actual}"
            ),
            Self::BindingImpossible { reason } => {
                write!(f, "initial binding impossible: {reason}")
            }
            Self::OperationFailed { operation, reason } => {
                write!(f, "operation '{operation}' failed: {reason}")
            }
        }
    }
}

impl Error for EngineFault {}
