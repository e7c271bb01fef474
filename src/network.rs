//! Address resolver adapter.
//!
//! Turns a human-readable address string and a mask length into a
//! canonical [`Network`]: a family, a big-endian byte vector, and a mask
//! length expressed as bit depth within that family's address space.
//!
//! String parsing itself is delegated to `std::net`'s `FromStr` impls,
//! exactly as the rest of this crate leans on `std::net::IpAddr` rather
//! than hand-rolling address parsing.

use crate::error::{Result, TreeError};
use crate::mmdb::types::IpVersion;
use std::net::IpAddr;

/// A CIDR prefix: family, address bytes (4 or 16, big-endian), and mask
/// length in bits within that family's address space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    pub family: IpVersion,
    pub mask_length: u8,
    pub(crate) max_depth0: u8,
    pub(crate) bytes: Vec<u8>,
}

impl Network {
    /// Extract the bit at `current_bit` (MSB-first, counting down from
    /// `max_depth0`), per the tree builder's bit-navigation convention.
    pub(crate) fn bit(&self, current_bit: u8) -> bool {
        let offset = self.max_depth0 - current_bit;
        let byte = self.bytes[(offset >> 3) as usize];
        let mask = 1u8 << (!offset & 7);
        byte & mask != 0
    }

    /// The same prefix one bit shorter, used by the sibling-merge step of
    /// `insert`.
    pub(crate) fn parent(&self) -> Network {
        Network {
            family: self.family,
            mask_length: self.mask_length - 1,
            max_depth0: self.max_depth0,
            bytes: self.bytes.clone(),
        }
    }

}

/// Parse `address` and fold it into the tree's address space.
///
/// When `tree_version` is v6 and `address` is a v4 literal, the result is
/// the v4-mapped v6 form (bytes 0-9 = 0, 10-11 = 0xFF, 12-15 = the v4
/// address) and `mask_length` is shifted by 96 bits so it keeps meaning
/// "depth within the 128-bit address space" — this is what lets
/// `descend` treat a v6 tree's embedded v4 subtree exactly like any other
/// subtree.
///
/// When `tree_version` is v4 but `address` is a v6 literal, this still
/// returns a network (with `family = V6`); rejecting that mismatch is the
/// caller's job (`Tree::insert`/`delete`), not this adapter's.
pub fn resolve(tree_version: IpVersion, address: &str, mask_length: u8) -> Result<Network> {
    let addr: IpAddr = address
        .parse()
        .map_err(|e: std::net::AddrParseError| TreeError::BadAddress(format!("{}: {}", address, e)))?;

    match addr {
        IpAddr::V4(v4) => match tree_version {
            IpVersion::V4 => Ok(Network {
                family: IpVersion::V4,
                mask_length,
                max_depth0: IpVersion::V4.max_depth0(),
                bytes: v4.octets().to_vec(),
            }),
            IpVersion::V6 => {
                let mut bytes = vec![0u8; 16];
                bytes[10] = 0xFF;
                bytes[11] = 0xFF;
                bytes[12..16].copy_from_slice(&v4.octets());
                let embedded_mask = mask_length
                    .checked_add(96)
                    .ok_or_else(|| TreeError::BadAddress(format!(
                        "mask length {} too large for an embedded IPv4 prefix",
                        mask_length
                    )))?;
                Ok(Network {
                    family: IpVersion::V6,
                    mask_length: embedded_mask,
                    max_depth0: IpVersion::V6.max_depth0(),
                    bytes,
                })
            }
        },
        IpAddr::V6(v6) => Ok(Network {
            family: IpVersion::V6,
            mask_length,
            max_depth0: IpVersion::V6.max_depth0(),
            bytes: v6.octets().to_vec(),
        }),
    }
}
