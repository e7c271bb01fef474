//! The IP-indexed tree: the public surface of this crate.
//!
//! ## Architecture
//!
//! - **node**: the arena's element type and record variants
//! - **pool**: bulk node allocation with stable handles
//! - **descend**: bit-by-bit walk shared by every prefix operation
//! - **traversal**: DAG-safe visit-once walk, used by finalize and encode
//! - **encode**: packed on-disk record encoding

mod descend;
mod encode;
mod node;
mod pool;
mod traversal;

pub use encode::{DataSectionWriter, SequentialDataWriter};

use std::collections::HashMap;
use std::hash::Hash;
use std::io::Write;

use crate::error::{Result, TreeError};
use crate::mmdb::types::{IpVersion, RecordSize};
use crate::network::{self, Network};
use descend::{materialize, probe};
use node::{NodeHandle, Record};
use pool::NodePool;
use traversal::{new_visited_set, walk};

/// An in-memory binary-radix trie keyed on IP prefixes, finalizable into
/// a MaxMind-DB-compatible search-tree byte stream.
///
/// `K` is the opaque payload key (cheaply clonable, compared by
/// byte-equality — a `Box<[u8]>` or similar); `V` is the payload value.
/// Both are `Clone` because the sibling-merge step of `insert` may need
/// to re-insert the same (key, value) pair one mask bit up the tree.
pub struct Tree<K, V>
where
    K: Eq + Hash,
{
    ip_version: IpVersion,
    record_size: RecordSize,
    pool: NodePool<K>,
    root: NodeHandle,
    key_values: HashMap<K, (V, u32)>,
    node_count: u32,
    finalized: bool,
}

impl<K, V> Tree<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Build an empty tree. `record_size_bits` must be 24, 28, or 32.
    /// `nodes_per_alloc` of 0 falls back to the pool's default chunk
    /// size.
    pub fn new(ip_version: IpVersion, record_size_bits: u16, nodes_per_alloc: usize) -> Result<Self> {
        let record_size = RecordSize::from_bits(record_size_bits)?;
        let mut pool = NodePool::new(nodes_per_alloc);
        let root = pool.alloc();
        Ok(Self {
            ip_version,
            record_size,
            pool,
            root,
            key_values: HashMap::new(),
            node_count: 0,
            finalized: false,
        })
    }

    pub fn ip_version(&self) -> IpVersion {
        self.ip_version
    }

    pub fn record_size(&self) -> RecordSize {
        self.record_size
    }

    /// Number of nodes assigned a number at the last `finalize()` call;
    /// meaningless before the first finalize.
    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    fn reject_mismatched_family(&self, network: &Network) -> Result<()> {
        if self.ip_version == IpVersion::V4 && network.family == IpVersion::V6 {
            return Err(TreeError::InvalidFamily(
                "cannot insert an IPv6 network into an IPv4 tree".to_string(),
            ));
        }
        Ok(())
    }

    /// Associate `address/mask_length` with `key`/`value`. Byte-equal
    /// keys inserted into sibling prefixes collapse into a single
    /// parent-level record.
    pub fn insert(&mut self, address: &str, mask_length: u8, key: K, value: V) -> Result<()> {
        let network = network::resolve(self.ip_version, address, mask_length)?;
        self.reject_mismatched_family(&network)?;
        self.insert_network(&network, key, value)
    }

    fn insert_network(&mut self, network: &Network, key: K, value: V) -> Result<()> {
        self.register_key(key.clone(), value.clone());

        let key_values = &mut self.key_values;
        let mut on_split = |split_key: &K| {
            if let Some(entry) = key_values.get_mut(split_key) {
                entry.1 += 1;
            }
        };
        let result = materialize(&mut self.pool, self.root, network, &mut on_split);

        let sibling = self.pool.get(result.node).record(!result.right).clone();
        if network.mask_length > 0 {
            if let Record::Data(sibling_key) = &sibling {
                if *sibling_key == key {
                    self.insert_network(&network.parent(), key.clone(), value.clone())?;
                }
            }
        }

        *self.pool.get_mut(result.node).record_mut(result.right) = Record::Data(key);
        self.finalized = false;
        Ok(())
    }

    fn register_key(&mut self, key: K, value: V) {
        self.key_values
            .entry(key)
            .and_modify(|(_, count)| *count += 1)
            .or_insert((value, 1));
    }

    /// Remove whatever record is stored at exactly `address/mask_length`
    /// (a no-op if nothing is stored there). Never performs a
    /// sibling-merge check.
    pub fn delete(&mut self, address: &str, mask_length: u8) -> Result<()> {
        let network = network::resolve(self.ip_version, address, mask_length)?;
        self.delete_network(&network);
        Ok(())
    }

    fn delete_network(&mut self, network: &Network) {
        let probed = probe(&self.pool, self.root, network);
        if self.pool.get(probed.node).record(probed.right).is_empty() {
            return;
        }
        let result = materialize(&mut self.pool, self.root, network, &mut |_| {});
        *self.pool.get_mut(result.node).record_mut(result.right) = Record::Empty;
        self.finalized = false;
    }

    /// Whether a record exists at exactly `address/mask_length`.
    pub fn contains(&self, address: &str, mask_length: u8) -> Result<bool> {
        let network = network::resolve(self.ip_version, address, mask_length)?;
        let result = probe(&self.pool, self.root, &network);
        Ok(!self.pool.get(result.node).record(result.right).is_empty())
    }

    /// Longest-prefix-match lookup of a single host address.
    pub fn lookup_host(&self, address: &str) -> Result<Option<&V>> {
        // The natural mask comes from the literal's own family, not the
        // tree's: a bare v4 literal looked up against a v6 tree still
        // means "the 32 bits of that address", which `resolve` then maps
        // and widens by 96 on its own.
        let natural_mask = if address.contains(':') { 128 } else { 32 };
        let network = network::resolve(self.ip_version, address, natural_mask)?;

        let result = probe(&self.pool, self.root, &network);
        match self.pool.get(result.node).record(result.right) {
            Record::Node(_) => Err(TreeError::StructuralError(format!(
                "host lookup for {} landed on a node record at bit {}",
                address, result.bit
            ))),
            Record::Empty => Ok(None),
            Record::Data(key) => Ok(self.key_values.get(key).map(|(value, _)| value)),
        }
    }

    /// Link the IPv4 subtree of a v6 tree in under `::ffff:0:0/96` and
    /// `2002::/16` as well, so v4 addresses, v4-mapped addresses, and
    /// 6to4 addresses all resolve to the same records. A no-op for v4
    /// trees, and a no-op if the tree has no IPv4 data yet.
    pub fn alias_ipv4_subtree(&mut self) -> Result<()> {
        if self.ip_version == IpVersion::V4 {
            return Ok(());
        }

        // The resolver's canonical v4-in-v6 form is the mapped
        // `::ffff:a.b.c.d` address (see `network::resolve`), so the v4
        // subtree those inserts actually built lives under
        // `::ffff:0:0/96`, not the deprecated all-zero `::a.b.c.d` form.
        let v4_root_network = network::resolve(IpVersion::V6, "::ffff:0:0", 96)?;
        let v4_root_probe = probe(&self.pool, self.root, &v4_root_network);
        if v4_root_probe.bit != 32 {
            return Ok(());
        }
        let v4_root = match self.pool.get(v4_root_probe.node).record(v4_root_probe.right) {
            Record::Node(handle) => *handle,
            _ => return Ok(()),
        };

        for (alias_address, alias_mask) in [("::ffff:0:0", 95u8), ("2002::", 16u8)] {
            let alias_network = network::resolve(IpVersion::V6, alias_address, alias_mask)?;
            let result = materialize(&mut self.pool, self.root, &alias_network, &mut |_| {});
            *self.pool.get_mut(result.node).record_mut(result.right) = Record::Node(v4_root);
        }

        self.finalized = false;
        Ok(())
    }

    /// Delete the well-known private/documentation/link-local prefixes.
    pub fn delete_reserved_networks(&mut self) -> Result<()> {
        for prefix in crate::reserved::IPV4_RESERVED {
            let network = network::resolve(self.ip_version, prefix.address, prefix.mask_length)?;
            self.delete_network(&network);
        }
        if self.ip_version == IpVersion::V6 {
            for prefix in crate::reserved::IPV6_RESERVED {
                let network = network::resolve(self.ip_version, prefix.address, prefix.mask_length)?;
                self.delete_network(&network);
            }
        }
        Ok(())
    }

    /// Assign dense pre-order node numbers. Idempotent while no mutation
    /// has happened since the last call.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }
        let mut order = Vec::new();
        let mut visited = new_visited_set(&self.pool);
        walk(&self.pool, self.root, &mut visited, &mut |h| order.push(h));

        for (number, handle) in order.iter().enumerate() {
            self.pool.get_mut(*handle).number = number as u32;
        }
        self.node_count = order.len() as u32;
        self.finalized = true;
    }

    /// Emit the packed search-tree section: `node_count * bytes_per_node`
    /// bytes, nodes in finalize's pre-order, no header or separator.
    pub fn write_search_tree(
        &self,
        sink: &mut impl Write,
        writer: &mut impl DataSectionWriter<V>,
    ) -> Result<()> {
        if !self.finalized {
            return Err(TreeError::StructuralError(
                "write_search_tree called before finalize".to_string(),
            ));
        }

        let mut order = Vec::with_capacity(self.node_count as usize);
        let mut visited = new_visited_set(&self.pool);
        walk(&self.pool, self.root, &mut visited, &mut |h| order.push(h));

        let mut memo = HashMap::new();
        for handle in order {
            let node = self.pool.get(handle);
            let left = encode::record_value(&node.left, &self.pool, self.node_count, &self.key_values, writer, &mut memo)?;
            let right = encode::record_value(&node.right, &self.pool, self.node_count, &self.key_values, writer, &mut memo)?;
            encode::write_node(sink, self.record_size, left, right)?;
        }
        Ok(())
    }
}

impl<K, V> Drop for Tree<K, V>
where
    K: Eq + Hash,
{
    /// Decrement each live `Data` record's reference exactly once,
    /// mirroring the explicit `free_tree` → refcount-decrement walk this
    /// structure is modeled on, before the payload table itself is
    /// dropped.
    fn drop(&mut self) {
        let mut visited = new_visited_set(&self.pool);
        let pool = &self.pool;
        let key_values = &mut self.key_values;
        walk(pool, self.root, &mut visited, &mut |handle| {
            let node = pool.get(handle);
            if let Record::Data(key) = &node.left {
                if let Some(entry) = key_values.get_mut(key) {
                    entry.1 = entry.1.saturating_sub(1);
                }
            }
            if let Record::Data(key) = &node.right {
                if let Some(entry) = key_values.get_mut(key) {
                    entry.1 = entry.1.saturating_sub(1);
                }
            }
        });
    }
}

