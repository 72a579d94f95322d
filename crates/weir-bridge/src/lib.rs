//! Serialized engine worker and blocking rendezvous bridge.
//!
//! The engine collaborator is single-threaded by contract: exactly one
//! engine-affecting task may execute at any instant across the whole
//! process. This crate enforces that by moving the engine value into
//! one dedicated worker thread and funneling every interaction through
//! a channel, with blocking reply handshakes for the callers.
//!
//! [`Bridge`] is the caller-side handle. It is constructed explicitly
//! and injected wherever engine access is needed — there is no
//! process-wide "current worker" accessor, so tests substitute an
//! engine implementation instead of patching global state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod bridge;
mod config;
mod error;
mod worker;

pub use bridge::{Bridge, PendingReply, ShutdownReport};
pub use config::BridgeConfig;
pub use error::BridgeError;
