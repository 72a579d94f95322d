//! Union of two topologies.

use smallvec::SmallVec;

use crate::topology::Topology;

/// The set union of two topologies: a node exists if it exists in
/// either operand, and its neighbors are the union of its neighbors in
/// both.
///
/// # Examples
///
/// ```
/// use weir_topology::{Ring, Star, Topology, Union};
///
/// // A ring of three with a star hub bolted on top.
/// let union = Union::new(Box::new(Ring::new(3).unwrap()), Box::new(Star::new(2)));
/// assert_eq!(union.nodes(), [0, 1, 2]);
/// assert_eq!(union.neighbours(1).as_slice(), [0, 2]);
/// ```
pub struct Union {
    first: Box<dyn Topology>,
    second: Box<dyn Topology>,
    nodes: Vec<u32>,
}

impl Union {
    /// Combine two topologies. The node set is computed eagerly.
    pub fn new(first: Box<dyn Topology>, second: Box<dyn Topology>) -> Self {
        let nodes = merge(&first.nodes(), &second.nodes());
        Self {
            first,
            second,
            nodes,
        }
    }
}

impl Topology for Union {
    fn nodes(&self) -> Vec<u32> {
        self.nodes.clone()
    }

    fn neighbours(&self, node: u32) -> SmallVec<[u32; 4]> {
        let mut merged: SmallVec<[u32; 4]> = self.first.neighbours(node);
        for n in self.second.neighbours(node) {
            if let Err(pos) = merged.binary_search(&n) {
                merged.insert(pos, n);
            }
        }
        merged
    }
}

/// Merge two ascending id lists into one ascending, duplicate-free list.
fn merge(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        let next = match (a.get(i), b.get(j)) {
            (Some(&x), Some(&y)) if x < y => {
                i += 1;
                x
            }
            (Some(&x), Some(&y)) if x > y => {
                j += 1;
                y
            }
            (Some(&x), Some(_)) => {
                i += 1;
                j += 1;
                x
            }
            (Some(&x), None) => {
                i += 1;
                x
            }
            (None, Some(&y)) => {
                j += 1;
                y
            }
            (None, None) => unreachable!(),
        };
        merged.push(next);
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::Ring;
    use crate::star::Star;

    #[test]
    fn nodes_are_the_set_union() {
        let union = Union::new(Box::new(Ring::new(2).unwrap()), Box::new(Star::new(3)));
        assert_eq!(union.nodes(), [0, 1, 2, 3]);
    }

    #[test]
    fn neighbours_merge_without_duplicates() {
        // Ring(3): 1 → 2. Star(2): 1 → 0. Union: 1 → {0, 2}.
        let union = Union::new(Box::new(Ring::new(3).unwrap()), Box::new(Star::new(2)));
        assert_eq!(union.neighbours(1).as_slice(), [0, 2]);

        // Both operands give 2 → 0 (ring wraps, leaf points at hub):
        // the union must not double it.
        assert_eq!(union.neighbours(2).as_slice(), [0]);
    }

    #[test]
    fn unknown_node_stays_unknown() {
        let union = Union::new(Box::new(Ring::new(2).unwrap()), Box::new(Star::new(1)));
        assert!(union.neighbours(9).is_empty());
    }

    #[test]
    fn merge_handles_disjoint_and_overlapping() {
        assert_eq!(merge(&[0, 2], &[1, 3]), [0, 1, 2, 3]);
        assert_eq!(merge(&[0, 1], &[1, 2]), [0, 1, 2]);
        assert_eq!(merge(&[], &[5]), [5]);
    }
}
