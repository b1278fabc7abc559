//! CRC-32 checksum utilities.
//!
//! pkzip archives store the IEEE CRC-32 of each member's uncompressed data.

/// Compute the CRC-32 of a byte slice.
#[inline]
pub fn hash_bytes(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}
