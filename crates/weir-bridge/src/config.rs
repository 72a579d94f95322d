//! Bridge configuration.

use std::time::Duration;

/// Configuration for [`Bridge::start_with`](crate::Bridge::start_with).
#[derive(Clone, Debug)]
pub struct BridgeConfig {
    /// Capacity of the bounded ingress channel between callers and the
    /// worker. Senders block when it is full, which is the bridge's
    /// only back-pressure mechanism. Default: 64.
    pub ingress_capacity: usize,
    /// How long the worker waits for new ingress before advancing the
    /// engine and re-offering parked requests. Only relevant while
    /// requests are parked; an idle worker with nothing parked blocks
    /// indefinitely. Default: 1ms.
    pub park_retry: Duration,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            ingress_capacity: 64,
            park_retry: Duration::from_millis(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_sane() {
        let config = BridgeConfig::default();
        assert!(config.ingress_capacity > 0);
        assert!(config.park_retry > Duration::ZERO);
    }
}
