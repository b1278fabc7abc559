//! Local file header.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::SignedRecord;

/// Header in front of each member's data.
///
/// Followed by the name and an extra field. Sizes and CRC here may be zero
/// when bit 3 of `flags` is set, so readers take those values from the
/// central directory instead.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct LocalFileHeader {
    pub version_needed: u16,
    pub flags: u16,
    pub compression_method: u16,
    pub dos_datetime: u32,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub name_len: u16,
    pub extra_len: u16,
}

impl SignedRecord for LocalFileHeader {
    const MAGIC: [u8; 4] = *b"PK\x03\x04";
}

impl LocalFileHeader {
    /// Bytes between the end of this header and the member data.
    pub fn trailing_len(&self) -> usize {
        usize::from(self.name_len) + usize::from(self.extra_len)
    }
}
