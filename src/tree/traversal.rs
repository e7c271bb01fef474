//! DAG-safe traversal.
//!
//! Aliasing (see `alias_ipv4_subtree`) makes the node graph a DAG rather
//! than a tree: a node can be reached through more than one parent.
//! Walking it naively would visit (and, worse, re-number or re-encode)
//! shared subtrees multiple times, so every walk here carries a visited
//! set keyed by node identity.
//!
//! Node handles are dense `u32` indices, so the visited set is a flat
//! `Vec<bool>` rather than the pointer-keyed hash table the original tree
//! walker used — same semantics, no hashing.

use super::node::{NodeHandle, Record};
use super::pool::NodePool;

/// Depth-first, pre-order, left-before-right, each node visited exactly
/// once. `callback` runs before descending into a node's children.
pub(crate) fn walk<K>(
    pool: &NodePool<K>,
    root: NodeHandle,
    visited: &mut [bool],
    callback: &mut impl FnMut(NodeHandle),
) {
    if visited[root.index()] {
        return;
    }
    visited[root.index()] = true;
    callback(root);

    let node = pool.get(root);
    if let Record::Node(child) = node.left {
        walk(pool, child, visited, callback);
    }
    if let Record::Node(child) = node.right {
        walk(pool, child, visited, callback);
    }
}

pub(crate) fn new_visited_set<K>(pool: &NodePool<K>) -> Vec<bool> {
    vec![false; pool.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::node::Node;

    #[test]
    fn shared_subtree_is_visited_once() {
        let mut pool: NodePool<u32> = NodePool::new(8);
        let root = pool.alloc();
        let shared = pool.alloc();
        pool.get_mut(root).left = Record::Node(shared);
        pool.get_mut(root).right = Record::Node(shared);

        let mut visited = new_visited_set(&pool);
        let mut order = Vec::new();
        walk(&pool, root, &mut visited, &mut |h| order.push(h));

        assert_eq!(order, vec![root, shared]);
    }

    #[test]
    fn preorder_visits_left_before_right() {
        let mut pool: NodePool<u32> = NodePool::new(8);
        let root = pool.alloc();
        let left = pool.alloc();
        let right = pool.alloc();
        pool.get_mut(root).left = Record::Node(left);
        pool.get_mut(root).right = Record::Node(right);

        let mut visited = new_visited_set(&pool);
        let mut order = Vec::new();
        walk(&pool, root, &mut visited, &mut |h| order.push(h));

        assert_eq!(order, vec![root, left, right]);
    }

    #[test]
    fn data_and_empty_records_are_leaves_for_traversal() {
        let mut pool: NodePool<&'static str> = NodePool::new(8);
        let root = pool.alloc();
        pool.get_mut(root).left = Record::Data("a");
        let mut visited = new_visited_set(&pool);
        let mut count = 0;
        walk(&pool, root, &mut visited, &mut |_| count += 1);
        assert_eq!(count, 1);
        let _ = Node::<&'static str>::new_empty();
    }
}
