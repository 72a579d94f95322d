//! Simulation instance lifecycle and the synchronization point.
//!
//! A [`SimulationInstance`] is one running net on the engine. Its
//! constructor performs the blocking initialization handshake on the
//! bridge; `receive_data` is the entry point asynchronous producers
//! call to hand a payload to the engine, blocking until the engine has
//! consumed it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod error;
mod instance;
mod sync;

pub use error::{DeliveryError, InitError, SyncError};
pub use instance::{SimulationInstance, RECEIVE_DATA};
pub use sync::Ack;
