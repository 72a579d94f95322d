//! Directed ring.

use smallvec::{smallvec, SmallVec};

use crate::error::TopologyError;
use crate::topology::Topology;

/// A directed ring: each node's only neighbor is its successor,
/// wrapping at the end.
///
/// # Examples
///
/// ```
/// use weir_topology::{Ring, Topology};
///
/// let ring = Ring::new(4).unwrap();
/// assert_eq!(ring.neighbours(0).as_slice(), [1]);
/// assert_eq!(ring.neighbours(3).as_slice(), [0]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Ring {
    len: u32,
}

impl Ring {
    /// Create a ring of `len` nodes.
    ///
    /// Returns `Err(TopologyError::Empty)` if `len == 0`.
    pub fn new(len: u32) -> Result<Self, TopologyError> {
        if len == 0 {
            return Err(TopologyError::Empty);
        }
        Ok(Self { len })
    }
}

impl Topology for Ring {
    fn nodes(&self) -> Vec<u32> {
        (0..self.len).collect()
    }

    fn neighbours(&self, node: u32) -> SmallVec<[u32; 4]> {
        if node >= self.len {
            return SmallVec::new();
        }
        smallvec![(node + 1) % self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty() {
        assert_eq!(Ring::new(0).unwrap_err(), TopologyError::Empty);
    }

    #[test]
    fn successor_wraps() {
        let ring = Ring::new(3).unwrap();
        assert_eq!(ring.nodes(), [0, 1, 2]);
        assert_eq!(ring.neighbours(0).as_slice(), [1]);
        assert_eq!(ring.neighbours(1).as_slice(), [2]);
        assert_eq!(ring.neighbours(2).as_slice(), [0]);
    }

    #[test]
    fn single_node_points_at_itself() {
        let ring = Ring::new(1).unwrap();
        assert_eq!(ring.neighbours(0).as_slice(), [0]);
    }

    #[test]
    fn unknown_node_has_no_neighbours() {
        let ring = Ring::new(3).unwrap();
        assert!(ring.neighbours(3).is_empty());
    }
}
