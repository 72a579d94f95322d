//! Neighbor-list graph topologies.
//!
//! Pure, stateless neighbor calculators over `u32` node ids, used by
//! net demos that route tokens between agents. Nothing here touches
//! the synchronization core.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod ring;
pub mod star;
pub mod topology;
pub mod union;

pub use error::TopologyError;
pub use ring::Ring;
pub use star::Star;
pub use topology::Topology;
pub use union::Union;
