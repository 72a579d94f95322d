//! Errors for instance construction and delivery.

use std::error::Error;
use std::fmt;

use weir_bridge::BridgeError;
use weir_core::{BindError, EngineFault};

/// Errors from the instance-initialization handshake.
///
/// All of these are fatal to construction: no partially initialized
/// instance is ever returned.
#[derive(Clone, Debug, PartialEq)]
pub enum InitError {
    /// No net template is registered under the requested name.
    NetNotFound {
        /// The name that failed to resolve.
        net: String,
    },
    /// The handshake faulted on the engine for another reason
    /// (initial binding impossible, startup confirmation refused).
    Handshake(EngineFault),
    /// The bridge could not run the handshake at all.
    Bridge(BridgeError),
}

impl InitError {
    /// Classify a bridge failure, keeping `NetNotFound` distinct from
    /// every other handshake fault.
    pub(crate) fn from_bridge(err: BridgeError) -> Self {
        match err {
            BridgeError::Fault(EngineFault::NetNotFound { net }) => Self::NetNotFound { net },
            BridgeError::Fault(fault) => Self::Handshake(fault),
            other => Self::Bridge(other),
        }
    }
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetNotFound { net } => write!(f, "net '{net}' not found"),
            Self::Handshake(fault) => write!(f, "initialization handshake failed: {fault}"),
            Self::Bridge(err) => write!(f, "initialization could not run: {err}"),
        }
    }
}

impl Error for InitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NetNotFound { .. } => None,
            Self::Handshake(fault) => Some(fault),
            Self::Bridge(err) => Some(err),
        }
    }
}

/// Errors from one synchronization attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum SyncError {
    /// The correlation tuple still has an unbound slot; nothing was
    /// offered to the engine.
    UnboundSlot {
        /// Index of the first unbound slot.
        index: usize,
    },
    /// The bridge round trip failed.
    Bridge(BridgeError),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundSlot { index } => {
                write!(f, "tuple slot {index} unbound, nothing offered")
            }
            Self::Bridge(err) => write!(f, "synchronization failed: {err}"),
        }
    }
}

impl Error for SyncError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnboundSlot { .. } => None,
            Self::Bridge(err) => Some(err),
        }
    }
}

/// Errors from one `receive_data` delivery.
///
/// Fatal to that delivery only: the payload is lost and the instance
/// stays ready. There is no retry, buffering, or replay here — whether
/// to try again is the producer's decision.
#[derive(Clone, Debug, PartialEq)]
pub enum DeliveryError {
    /// Binding a value into the correlation tuple failed; the attempt
    /// was abandoned before anything reached the engine.
    Binding(BindError),
    /// The synchronization round trip failed.
    Sync(SyncError),
}

impl fmt::Display for DeliveryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binding(err) => write!(f, "delivery binding failed: {err}"),
            Self::Sync(err) => write!(f, "delivery failed: {err}"),
        }
    }
}

impl Error for DeliveryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Binding(err) => Some(err),
            Self::Sync(err) => Some(err),
        }
    }
}

impl From<BindError> for DeliveryError {
    fn from(err: BindError) -> Self {
        Self::Binding(err)
    }
}

impl From<SyncError> for DeliveryError {
    fn from(err: SyncError) -> Self {
        Self::Sync(err)
    }
}
