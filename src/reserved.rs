//! Well-known reserved/private prefixes, deletable in one call.
//!
//! The IPv4 table is shared between v4 and v6 trees: for a v6 tree, the
//! same strings are resolved through the v4-mapped address space, and
//! [`crate::network::resolve`] is the one place that folds the mask by
//! 96 bits to keep them meaningful there, so this table does not repeat
//! that arithmetic itself.

pub(crate) struct ReservedPrefix {
    pub(crate) address: &'static str,
    pub(crate) mask_length: u8,
}

pub(crate) const IPV4_RESERVED: &[ReservedPrefix] = &[
    ReservedPrefix { address: "0.0.0.0", mask_length: 8 },
    ReservedPrefix { address: "10.0.0.0", mask_length: 8 },
    ReservedPrefix { address: "100.64.0.0", mask_length: 10 },
    ReservedPrefix { address: "127.0.0.0", mask_length: 8 },
    ReservedPrefix { address: "169.254.0.0", mask_length: 16 },
    ReservedPrefix { address: "172.16.0.0", mask_length: 12 },
    ReservedPrefix { address: "192.0.0.0", mask_length: 29 },
    ReservedPrefix { address: "192.0.2.0", mask_length: 24 },
    ReservedPrefix { address: "192.88.99.0", mask_length: 24 },
    ReservedPrefix { address: "192.168.0.0", mask_length: 16 },
    ReservedPrefix { address: "198.18.0.0", mask_length: 15 },
    ReservedPrefix { address: "198.51.100.0", mask_length: 24 },
    ReservedPrefix { address: "224.0.0.0", mask_length: 4 },
    ReservedPrefix { address: "240.0.0.0", mask_length: 4 },
];

pub(crate) const IPV6_RESERVED: &[ReservedPrefix] = &[
    ReservedPrefix { address: "100::", mask_length: 64 },
    ReservedPrefix { address: "2001::", mask_length: 23 },
    ReservedPrefix { address: "2001:db8::", mask_length: 32 },
    ReservedPrefix { address: "fc00::", mask_length: 7 },
    ReservedPrefix { address: "fe80::", mask_length: 10 },
    ReservedPrefix { address: "ff00::", mask_length: 8 },
];
