//! MMDB-specific Type Definitions
//!
//! Shared vocabulary between the tree builder and its callers: which IP
//! family a tree indexes, and how wide its on-disk records are.

/// MMDB metadata marker: "\xAB\xCD\xEFMaxMind.com"
///
/// The tree builder never writes this itself (metadata emission is the
/// caller's job), but it is the boundary every search-tree section this
/// crate writes is meant to precede.
pub const METADATA_MARKER: &[u8] = b"\xAB\xCD\xEFMaxMind.com";

/// The byte gap between the end of the search tree and the start of the
/// data section in the on-disk format.
pub const DATA_SECTION_SEPARATOR_SIZE: u32 = 16;

/// IP version a tree indexes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IpVersion {
    /// IPv4 only
    V4,
    /// IPv6 (may include IPv4-mapped addresses via aliasing)
    V6,
}

impl IpVersion {
    /// Number of address bits (32 or 128)
    pub fn max_depth(self) -> u8 {
        match self {
            IpVersion::V4 => 32,
            IpVersion::V6 => 128,
        }
    }

    /// Highest bit index, i.e. `max_depth() - 1`
    pub fn max_depth0(self) -> u8 {
        self.max_depth() - 1
    }
}

/// Record size in bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSize {
    /// 24-bit records (3 bytes per record, 6 bytes per node)
    Bits24,
    /// 28-bit records (3.5 bytes per record, 7 bytes per node)
    Bits28,
    /// 32-bit records (4 bytes per record, 8 bytes per node)
    Bits32,
}

impl RecordSize {
    /// Size of a node (two records) in bytes
    pub fn node_bytes(self) -> usize {
        match self {
            RecordSize::Bits24 => 6,
            RecordSize::Bits28 => 7,
            RecordSize::Bits32 => 8,
        }
    }

    /// Largest record value this width can hold without truncation
    pub fn max_value(self) -> u32 {
        match self {
            RecordSize::Bits24 => 0x00FF_FFFF,
            RecordSize::Bits28 => 0x0FFF_FFFF,
            RecordSize::Bits32 => u32::MAX,
        }
    }

    /// Create from a bit count, per the constructor's `record_size` argument
    pub fn from_bits(bits: u16) -> Result<Self, crate::error::TreeError> {
        match bits {
            24 => Ok(RecordSize::Bits24),
            28 => Ok(RecordSize::Bits28),
            32 => Ok(RecordSize::Bits32),
            _ => Err(crate::error::TreeError::InvalidArgument(format!(
                "record size must be 24, 28, or 32 bits, got {}",
                bits
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_depth_matches_family() {
        assert_eq!(IpVersion::V4.max_depth(), 32);
        assert_eq!(IpVersion::V4.max_depth0(), 31);
        assert_eq!(IpVersion::V6.max_depth(), 128);
        assert_eq!(IpVersion::V6.max_depth0(), 127);
    }

    #[test]
    fn node_bytes_per_record_size() {
        assert_eq!(RecordSize::Bits24.node_bytes(), 6);
        assert_eq!(RecordSize::Bits28.node_bytes(), 7);
        assert_eq!(RecordSize::Bits32.node_bytes(), 8);
    }

    #[test]
    fn from_bits_rejects_unknown_width() {
        assert!(RecordSize::from_bits(24).is_ok());
        assert!(RecordSize::from_bits(28).is_ok());
        assert!(RecordSize::from_bits(32).is_ok());
        assert!(RecordSize::from_bits(16).is_err());
    }
}
