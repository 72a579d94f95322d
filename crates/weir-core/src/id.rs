//! Strongly-typed identifiers for nets, operations, instances, and steps.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Name of a net template known to the engine.
///
/// Nets are registered with the engine collaborator under string names;
/// the core never interprets the name beyond passing it across the
/// boundary.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetName(String);

impl NetName {
    /// Wrap a net name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NetName {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for NetName {
    fn from(v: String) -> Self {
        Self(v)
    }
}

/// Name of an operation (synchronous channel) on a net instance.
///
/// Operations are matched by name and arity when a correlation tuple
/// is offered to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OperationName(String);

impl OperationName {
    /// Wrap an operation name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for OperationName {
    fn from(v: &str) -> Self {
        Self(v.to_string())
    }
}

impl From<String> for OperationName {
    fn from(v: String) -> Self {
        Self(v)
    }
}

/// Counter for unique [`InstanceId`] allocation.
static INSTANCE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier of one running net instance.
///
/// Allocated from a monotonic atomic counter via [`InstanceId::next`].
/// Two instances always have different IDs, even when spawned from the
/// same net template, so an ID never aliases a torn-down instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Allocate a fresh, unique instance ID.
    ///
    /// Each call returns an ID never returned before within this
    /// process. Thread-safe.
    pub fn next() -> Self {
        Self(INSTANCE_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonically increasing step counter of the engine.
///
/// The engine advances its step each time internal net activity runs;
/// the init handshake records the step at which an instance confirmed
/// startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_ids_are_unique() {
        let a = InstanceId::next();
        let b = InstanceId::next();
        assert_ne!(a, b);
    }

    #[test]
    fn names_round_trip() {
        let net = NetName::from("weathernet");
        assert_eq!(net.as_str(), "weathernet");
        assert_eq!(net.to_string(), "weathernet");

        let op = OperationName::from("receive_data");
        assert_eq!(op.as_str(), "receive_data");
    }
}
