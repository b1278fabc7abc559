//! Central directory and end-of-archive records.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use super::SignedRecord;

/// Sentinel stored in a 16-bit field whose value lives in a ZIP64 record.
pub const ZIP64_U16: u16 = u16::MAX;
/// Sentinel stored in a 32-bit field whose value lives in a ZIP64 record.
pub const ZIP64_U32: u32 = u32::MAX;

/// One member's entry in the central directory.
///
/// Followed by `name_len` bytes of name, `extra_len` bytes of extra field
/// and `comment_len` bytes of member comment.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct CentralDirectoryHeader {
    pub version_made_by: u16,
    pub version_needed: u16,
    pub flags: u16,
    pub compression_method: u16,
    pub dos_datetime: u32,
    pub crc32: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub name_len: u16,
    pub extra_len: u16,
    pub comment_len: u16,
    pub disk_start: u16,
    pub internal_attributes: u16,
    pub external_attributes: u32,
    pub local_header_offset: u32,
}

impl SignedRecord for CentralDirectoryHeader {
    const MAGIC: [u8; 4] = *b"PK\x01\x02";
}

/// End of central directory record, the last record in an archive apart
/// from the archive comment that follows it.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct EocdRecord {
    pub this_disk: u16,
    pub cd_disk: u16,
    pub entries_this_disk: u16,
    pub entries_total: u16,
    pub cd_size: u32,
    pub cd_offset: u32,
    pub comment_len: u16,
}

impl SignedRecord for EocdRecord {
    const MAGIC: [u8; 4] = *b"PK\x05\x06";
}

impl EocdRecord {
    /// True when a count, size or offset is saturated and the real value
    /// must be taken from the ZIP64 record.
    pub fn is_zip64(&self) -> bool {
        self.entries_total == ZIP64_U16 || self.cd_size == ZIP64_U32 || self.cd_offset == ZIP64_U32
    }
}

/// Locates the ZIP64 end of central directory record. Stored directly in
/// front of the regular [`EocdRecord`].
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct Eocd64Locator {
    pub eocd64_disk: u32,
    pub eocd64_offset: u64,
    pub total_disks: u32,
}

impl SignedRecord for Eocd64Locator {
    const MAGIC: [u8; 4] = *b"PK\x06\x07";
}

/// ZIP64 end of central directory record, holding the 64-bit counterparts
/// of the [`EocdRecord`] fields.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct Eocd64Record {
    /// Size of the rest of the record, excluding signature and this field.
    pub remaining_size: u64,
    pub version_made_by: u16,
    pub version_needed: u16,
    pub this_disk: u32,
    pub cd_disk: u32,
    pub entries_this_disk: u64,
    pub entries_total: u64,
    pub cd_size: u64,
    pub cd_offset: u64,
}

impl SignedRecord for Eocd64Record {
    const MAGIC: [u8; 4] = *b"PK\x06\x06";
}

/// Extra field header IDs.
pub mod extra_field {
    /// ZIP64 extended information: 64-bit sizes and offset.
    pub const ZIP64: u16 = 0x0001;
}
