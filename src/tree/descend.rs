//! Bit-by-bit descent: the core walk shared by lookups, inserts, and
//! deletes.
//!
//! A descent stops one bit short of the network's full mask length and
//! reports the node and side (left/right) that hold the record for that
//! prefix, exactly as the C tree walker did: the caller decides what to
//! do with that record slot (read it, overwrite it, or recurse for a
//! sibling merge).
//!
//! Two entry points share the bit-walking math but differ in what they
//! do when the walk meets something other than a `Node` record before
//! reaching the target depth: [`probe`] stops (read-only callers:
//! `contains`, `lookup_host`, locating a network to delete), while
//! [`materialize`] builds the path, splitting a `Data` leaf into two
//! matching children when one is in the way (the only descent `insert`
//! uses).

use super::node::{NodeHandle, Record};
use super::pool::NodePool;
use crate::network::Network;

/// Where a descent stopped.
pub(crate) struct DescendResult {
    pub(crate) node: NodeHandle,
    pub(crate) right: bool,
    /// Bit index within the network's address space at which the walk
    /// stopped. Under [`materialize`] this always equals the network's
    /// target depth; under [`probe`] it may be shallower, which is what
    /// lets a caller report *how far* a lookup got (see
    /// `alias_ipv4_subtree`).
    pub(crate) bit: i16,
}

fn last_bit(network: &Network) -> i16 {
    network.max_depth0 as i16 - (network.mask_length as i16 - 1)
}

/// Read-only walk toward `network`'s target depth. Stops as soon as a
/// record other than `Node` is found, without touching the tree.
pub(crate) fn probe<K>(pool: &NodePool<K>, root: NodeHandle, network: &Network) -> DescendResult {
    let max_depth0 = network.max_depth0 as i16;
    let last_bit = last_bit(network);

    let mut node = root;
    let mut current_bit = max_depth0;

    while current_bit > last_bit {
        let right = network.bit(current_bit as u8);
        match pool.get(node).record(right) {
            Record::Node(handle) => {
                node = *handle;
                current_bit -= 1;
            }
            Record::Empty | Record::Data(_) => {
                return DescendResult { node, right, bit: current_bit };
            }
        }
    }

    DescendResult {
        node,
        right: network.bit(current_bit as u8),
        bit: current_bit,
    }
}

/// Walk toward `network`'s target depth, creating nodes as needed.
///
/// `on_split` is called once for every `Data` leaf the walk has to split
/// to keep descending: the leaf's single record becomes two records
/// holding a clone of the same key, which is one net new live reference
/// to that key.
pub(crate) fn materialize<K: Clone>(
    pool: &mut NodePool<K>,
    root: NodeHandle,
    network: &Network,
    on_split: &mut impl FnMut(&K),
) -> DescendResult {
    let max_depth0 = network.max_depth0 as i16;
    let last_bit = last_bit(network);

    let mut node = root;
    let mut current_bit = max_depth0;

    while current_bit > last_bit {
        let right = network.bit(current_bit as u8);

        let next = match pool.get(node).record(right) {
            Record::Node(handle) => *handle,
            Record::Empty => pool.alloc(),
            Record::Data(key) => {
                let key = key.clone();
                on_split(&key);
                let handle = pool.alloc();
                let split = pool.get_mut(handle);
                split.left = Record::Data(key.clone());
                split.right = Record::Data(key);
                handle
            }
        };

        *pool.get_mut(node).record_mut(right) = Record::Node(next);
        node = next;
        current_bit -= 1;
    }

    DescendResult {
        node,
        right: network.bit(current_bit as u8),
        bit: current_bit,
    }
}
