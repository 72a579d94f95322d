//! Weir: a blocking rendezvous bridge between asynchronous producers
//! and a token-based simulation engine.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the Weir sub-crates. For most users, adding `weir` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use weir::{Bridge, Payload, SimulationInstance, RECEIVE_DATA};
//! use weir_test_utils::ScriptedEngine;
//!
//! // An engine double with one net and one always-enabled operation.
//! let engine = ScriptedEngine::new()
//!     .with_net("weathernet")
//!     .with_operation("weathernet", RECEIVE_DATA, 2);
//!
//! // The engine moves into the single serialized worker.
//! let bridge = Arc::new(Bridge::start(engine));
//!
//! // The constructor blocks on the initialization handshake.
//! let instance = SimulationInstance::start(Arc::clone(&bridge), "weathernet").unwrap();
//!
//! // A producer delivers a payload and blocks until the engine
//! // consumes it. The acknowledgment is fine to ignore.
//! let payload = Payload::from_entries([
//!     ("current_weather_temperature".to_string(), 59.0),
//! ]);
//! instance.receive_data("beja", payload).unwrap();
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not
//! re-exported at the top level:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `weir-core` | Values, payloads, tuples, ids, the engine trait, faults |
//! | [`bridge`] | `weir-bridge` | The serialized worker and its blocking handshake API |
//! | [`net`] | `weir-net` | Instance lifecycle, synchronization point, `receive_data` |
//! | [`feed`] | `weir-feed` | Data sources and producer threads |
//! | [`topology`] | `weir-topology` | Neighbor-list graph topologies |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub use weir_bridge::{Bridge, BridgeConfig, BridgeError, PendingReply, ShutdownReport};
pub use weir_core::{
    BindError, EngineFault, InstanceId, NetName, OfferOutcome, OperationName, Payload, Slot,
    StepId, TokenEngine, Tuple, Value,
};
pub use weir_feed::{DataProducer, DataSource, DeliveryReport, OpenMeteo, Site};
pub use weir_net::{Ack, DeliveryError, InitError, SimulationInstance, SyncError, RECEIVE_DATA};

/// Re-export of `weir-core`.
pub mod core {
    pub use weir_core::*;
}

/// Re-export of `weir-bridge`.
pub mod bridge {
    pub use weir_bridge::*;
}

/// Re-export of `weir-net`.
pub mod net {
    pub use weir_net::*;
}

/// Re-export of `weir-feed`.
pub mod feed {
    pub use weir_feed::*;
}

/// Re-export of `weir-topology`.
pub mod topology {
    pub use weir_topology::*;
}
