//! Packed search-tree record encoding.
//!
//! Mirrors the bit-twiddling of the teacher's `write_24bit_node` /
//! `write_28bit_node` / `write_32bit_node`, driven by the DAG-aware
//! record-value formula (§4.G): a record's on-disk value is either a
//! child node number, zero for empty, or `node_count + 16 + offset` for
//! a pointer into the data section.

use std::collections::HashMap;
use std::hash::Hash;
use std::io::{self, Write};

use super::node::Record;
use super::pool::NodePool;
use crate::mmdb::types::{DATA_SECTION_SEPARATOR_SIZE, RecordSize};

/// External collaborator that places a payload value into the data
/// section and reports where it landed.
///
/// `store_data` is expected to be called at most once per distinct
/// payload key during a single `write_search_tree` call; the encoder
/// enforces that by memoizing positions internally, so implementations
/// don't need their own deduplication for correctness (though most will
/// want one anyway, to avoid emitting the same value bytes twice).
pub trait DataSectionWriter<V> {
    fn store_data(&mut self, value: &V) -> io::Result<u32>;
}

/// A `HashMap`-backed writer that hands out sequential offsets. Useful as
/// a minimal collaborator in tests, or anywhere the data section is just
/// "one slot per distinct value" rather than a real encoded blob.
#[derive(Debug, Default)]
pub struct SequentialDataWriter<V> {
    next_offset: u32,
    values: Vec<V>,
}

impl<V> SequentialDataWriter<V> {
    pub fn new() -> Self {
        Self {
            next_offset: 0,
            values: Vec::new(),
        }
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }
}

impl<V: Clone> DataSectionWriter<V> for SequentialDataWriter<V> {
    fn store_data(&mut self, value: &V) -> io::Result<u32> {
        let position = self.next_offset;
        self.values.push(value.clone());
        self.next_offset += 1;
        Ok(position)
    }
}

/// Resolve one `Record` to its on-disk value, memoizing data-section
/// lookups by key so the collaborator sees each key once.
pub(crate) fn record_value<K, V>(
    record: &Record<K>,
    pool: &NodePool<K>,
    node_count: u32,
    key_values: &HashMap<K, (V, u32)>,
    writer: &mut impl DataSectionWriter<V>,
    memo: &mut HashMap<K, u32>,
) -> crate::error::Result<u32>
where
    K: Eq + Hash + Clone,
{
    match record {
        Record::Empty => Ok(node_count),
        Record::Node(handle) => Ok(pool.get(*handle).number),
        Record::Data(key) => {
            if let Some(position) = memo.get(key) {
                return Ok(node_count + DATA_SECTION_SEPARATOR_SIZE + position);
            }
            let (value, _) = key_values.get(key).ok_or_else(|| {
                crate::error::TreeError::StructuralError(
                    "data record references a key missing from the payload table".to_string(),
                )
            })?;
            let position = writer.store_data(value)?;
            memo.insert(key.clone(), position);
            Ok(node_count + DATA_SECTION_SEPARATOR_SIZE + position)
        }
    }
}

/// Pack one node's left/right values into `out` per `record_size`, in the
/// exact byte layout the on-disk format requires.
pub(crate) fn write_node(out: &mut impl Write, record_size: RecordSize, left: u32, right: u32) -> io::Result<()> {
    match record_size {
        RecordSize::Bits24 => write_24bit_node(out, left, right),
        RecordSize::Bits28 => write_28bit_node(out, left, right),
        RecordSize::Bits32 => write_32bit_node(out, left, right),
    }
}

fn write_24bit_node(out: &mut impl Write, left: u32, right: u32) -> io::Result<()> {
    out.write_all(&[
        ((left >> 16) & 0xFF) as u8,
        ((left >> 8) & 0xFF) as u8,
        (left & 0xFF) as u8,
        ((right >> 16) & 0xFF) as u8,
        ((right >> 8) & 0xFF) as u8,
        (right & 0xFF) as u8,
    ])
}

fn write_28bit_node(out: &mut impl Write, left: u32, right: u32) -> io::Result<()> {
    let left_high = ((left >> 24) & 0x0F) as u8;
    let right_high = ((right >> 24) & 0x0F) as u8;
    out.write_all(&[
        ((left >> 16) & 0xFF) as u8,
        ((left >> 8) & 0xFF) as u8,
        (left & 0xFF) as u8,
        (left_high << 4) | right_high,
        ((right >> 16) & 0xFF) as u8,
        ((right >> 8) & 0xFF) as u8,
        (right & 0xFF) as u8,
    ])
}

fn write_32bit_node(out: &mut impl Write, left: u32, right: u32) -> io::Result<()> {
    out.write_all(&[
        ((left >> 24) & 0xFF) as u8,
        ((left >> 16) & 0xFF) as u8,
        ((left >> 8) & 0xFF) as u8,
        (left & 0xFF) as u8,
        ((right >> 24) & 0xFF) as u8,
        ((right >> 16) & 0xFF) as u8,
        ((right >> 8) & 0xFF) as u8,
        (right & 0xFF) as u8,
    ])
}
