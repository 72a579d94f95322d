//! Asynchronous data producers feeding simulation instances.
//!
//! Everything here sits outside the synchronization core: a
//! [`DataSource`] turns a [`Site`] into a [`Payload`] (or the explicit
//! empty-result marker — never an error), and a [`DataProducer`] runs
//! the fetch on its own thread before blocking on the instance's
//! `receive_data` entry point until the engine has consumed the
//! delivery.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod producer;
mod site;
mod source;

pub use producer::{DataProducer, DeliveryReport};
pub use site::Site;
pub use source::{DataSource, OpenMeteo};

pub use weir_core::Payload;
