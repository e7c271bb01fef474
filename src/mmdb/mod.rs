//! MaxMind DB (MMDB) on-disk constants and type definitions
//!
//! This module holds the pieces of the MMDB search-tree format that are
//! shared vocabulary between the tree builder and its callers: the record
//! width a tree is built with, and which IP family it indexes.
//!
//! ## Architecture
//!
//! - **types**: MMDB-specific types and constants

pub mod types;

pub use types::{IpVersion, RecordSize};
