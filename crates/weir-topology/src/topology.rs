//! The topology trait.

use smallvec::SmallVec;

/// A directed neighbor relation over `u32` node ids.
///
/// Implementations are pure and stateless: the same node always has
/// the same neighbors. Nodes outside [`nodes`](Topology::nodes) have
/// no neighbors.
pub trait Topology {
    /// The node ids of this topology, ascending.
    fn nodes(&self) -> Vec<u32>;

    /// The neighbors of `node`, ascending. Empty for unknown nodes.
    fn neighbours(&self, node: u32) -> SmallVec<[u32; 4]>;

    /// Number of nodes.
    fn len(&self) -> usize {
        self.nodes().len()
    }

    /// Whether the topology has no nodes. Construction rejects empty
    /// topologies, so this is `false` for every provided type.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
