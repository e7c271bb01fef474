//! Bulk node allocator.
//!
//! Nodes are appended to a single growing `Vec` and referenced by `u32`
//! index ([`NodeHandle`]). This is deliberately *not* the raw-pointer arena
//! the original C tree builder used — reallocating a `Vec<Node>` moves
//! every element, which would dangle any raw pointer taken before the
//! move. Indices stay valid across growth, so this is the "preferred"
//! stable-handle scheme the tree builder calls for.
//!
//! Individual nodes are never freed; the whole pool is dropped at once
//! with the tree.

use super::node::{Node, NodeHandle};

/// This is 2^18. The GeoLite2 Country database has around 250,000 nodes.
/// The GeoLite2 City database has 2.73 million. This default provides
/// reasonable performance for most builds.
pub const DEFAULT_NODES_PER_ALLOC: usize = 262_144;

pub(crate) struct NodePool<K> {
    nodes: Vec<Node<K>>,
    nodes_per_alloc: usize,
}

impl<K> NodePool<K> {
    pub(crate) fn new(nodes_per_alloc: usize) -> Self {
        let nodes_per_alloc = if nodes_per_alloc > 0 {
            nodes_per_alloc
        } else {
            DEFAULT_NODES_PER_ALLOC
        };
        let mut pool = Self {
            nodes: Vec::new(),
            nodes_per_alloc,
        };
        pool.nodes.reserve(pool.nodes_per_alloc);
        pool
    }

    pub(crate) fn alloc(&mut self) -> NodeHandle {
        if self.nodes.len() == self.nodes.capacity() {
            self.nodes.reserve(self.nodes_per_alloc);
        }
        let handle = NodeHandle(self.nodes.len() as u32);
        self.nodes.push(Node::new_empty());
        handle
    }

    pub(crate) fn get(&self, handle: NodeHandle) -> &Node<K> {
        &self.nodes[handle.index()]
    }

    pub(crate) fn get_mut(&mut self, handle: NodeHandle) -> &mut Node<K> {
        &mut self.nodes[handle.index()]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }
}
