//! iptree - an in-memory binary-radix trie for IP prefixes, finalizable
//! into the on-disk search-tree section of a MaxMind-DB-compatible
//! database.
//!
//! The trie is keyed on IPv4 or IPv6 address prefixes and its leaves hold
//! a payload key/value pair; encoding the wider file (data section,
//! metadata) is the caller's job. This crate is the structural core
//! underneath that: bit-level navigation of a variable-depth trie, pooled
//! node allocation with stable handles, IPv4-in-IPv6 aliasing that turns
//! the tree into a DAG, automatic merging of sibling records sharing a
//! key, and the three packed on-disk record widths (24/28/32 bits).
//!
//! # Quick start
//!
//! ```
//! use iptree::{IpVersion, Tree, SequentialDataWriter};
//!
//! let mut tree: Tree<u32, &str> = Tree::new(IpVersion::V4, 24, 0)?;
//! tree.insert("1.1.1.0", 24, 0, "cloudflare")?;
//! assert!(tree.contains("1.1.1.0", 24)?);
//! assert_eq!(tree.lookup_host("1.1.1.1")?, Some(&"cloudflare"));
//!
//! tree.finalize();
//! let mut bytes = Vec::new();
//! tree.write_search_tree(&mut bytes, &mut SequentialDataWriter::new())?;
//! assert_eq!(bytes.len(), tree.node_count() as usize * tree.record_size().node_bytes());
//! # Ok::<(), iptree::TreeError>(())
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Tree<K, V>                                  │
//! ├─────────────────────────────────────────────┤
//! │  network:         address string -> Network  │
//! │  reserved:        well-known prefix tables    │
//! │  tree::pool:      node arena, stable handles  │
//! │  tree::descend:   bit-walk (probe/materialize)│
//! │  tree::traversal: DAG-safe visit-once walk    │
//! │  tree::encode:    packed record output        │
//! └─────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Error types for tree operations.
pub mod error;
/// MMDB-specific constants and type definitions shared across the crate.
mod mmdb;
/// Address-string-to-`Network` resolution.
mod network;
/// Well-known reserved/private prefixes.
mod reserved;
/// The tree itself: node pool, descent, traversal, and encoding.
pub mod tree;

pub use crate::error::{Result, TreeError};
pub use crate::mmdb::{IpVersion, RecordSize};
pub use crate::network::{resolve, Network};
pub use crate::tree::{DataSectionWriter, SequentialDataWriter, Tree};

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
