//! Hand-assembled archives for exercising the reader on edge cases that
//! regular writers never produce.

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;
use odfdump_common::crc;
use zerocopy::IntoBytes;

use crate::headers::{
    extra_field, CentralDirectoryHeader, Eocd64Locator, Eocd64Record, EocdRecord, LocalFileHeader,
    SignedRecord, ZIP64_U16, ZIP64_U32,
};

pub(crate) struct TestMember {
    name: Vec<u8>,
    payload_len: u64,
    data: Vec<u8>,
    method: u16,
    flags: u16,
    dos_datetime: u32,
    crc32: u32,
    comment: Vec<u8>,
    extra: Vec<u8>,
    zip64_sizes: bool,
}

impl TestMember {
    fn with_data(name: &[u8], payload: &[u8], data: Vec<u8>, method: u16) -> Self {
        Self {
            name: name.to_vec(),
            payload_len: payload.len() as u64,
            data,
            method,
            flags: 0,
            dos_datetime: 0,
            crc32: crc::hash_bytes(payload),
            comment: Vec::new(),
            extra: Vec::new(),
            zip64_sizes: false,
        }
    }

    pub(crate) fn stored(name: &str, payload: &[u8]) -> Self {
        Self::with_data(name.as_bytes(), payload, payload.to_vec(), 0)
    }

    pub(crate) fn stored_raw_name(name: &[u8], payload: &[u8], flags: u16) -> Self {
        Self::with_data(name, payload, payload.to_vec(), 0).flags(flags)
    }

    pub(crate) fn deflated(name: &str, payload: &[u8]) -> Self {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(payload).unwrap();
        Self::with_data(name.as_bytes(), payload, encoder.finish().unwrap(), 8)
    }

    pub(crate) fn zstd(name: &str, payload: &[u8]) -> Self {
        let data = zstd::encode_all(payload, 3).unwrap();
        Self::with_data(name.as_bytes(), payload, data, 93)
    }

    pub(crate) fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    pub(crate) fn extra(mut self, extra: &[u8]) -> Self {
        self.extra = extra.to_vec();
        self
    }

    pub(crate) fn datetime(mut self, dos_datetime: u32) -> Self {
        self.dos_datetime = dos_datetime;
        self
    }

    pub(crate) fn crc(mut self, crc32: u32) -> Self {
        self.crc32 = crc32;
        self
    }

    pub(crate) fn flags(mut self, flags: u16) -> Self {
        self.flags = flags;
        self
    }

    pub(crate) fn method(mut self, method: u16) -> Self {
        self.method = method;
        self
    }

    /// Store the sizes in a ZIP64 extra field instead of the fixed header.
    pub(crate) fn zip64_sizes(mut self) -> Self {
        self.zip64_sizes = true;
        self
    }
}

#[derive(Default)]
pub(crate) struct ArchiveBuilder {
    members: Vec<TestMember>,
    comment: Vec<u8>,
    zip64: bool,
}

impl ArchiveBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn member(mut self, member: TestMember) -> Self {
        self.members.push(member);
        self
    }

    pub(crate) fn comment(mut self, comment: &[u8]) -> Self {
        self.comment = comment.to_vec();
        self
    }

    /// Write a ZIP64 end of central directory record and locator.
    pub(crate) fn zip64(mut self) -> Self {
        self.zip64 = true;
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        let mut out = Vec::new();
        let mut offsets = Vec::with_capacity(self.members.len());

        for member in &self.members {
            offsets.push(out.len() as u64);

            let local = LocalFileHeader {
                version_needed: 20,
                flags: member.flags,
                compression_method: member.method,
                dos_datetime: member.dos_datetime,
                crc32: member.crc32,
                compressed_size: member.data.len() as u32,
                uncompressed_size: member.payload_len as u32,
                name_len: member.name.len() as u16,
                extra_len: 0,
            };
            out.extend_from_slice(&LocalFileHeader::MAGIC);
            out.extend_from_slice(local.as_bytes());
            out.extend_from_slice(&member.name);
            out.extend_from_slice(&member.data);
        }

        let cd_start = out.len();
        for (member, offset) in self.members.iter().zip(&offsets) {
            let mut extra = Vec::new();
            let (compressed_size, uncompressed_size) = if member.zip64_sizes {
                extra.extend_from_slice(&extra_field::ZIP64.to_le_bytes());
                extra.extend_from_slice(&16u16.to_le_bytes());
                extra.extend_from_slice(&member.payload_len.to_le_bytes());
                extra.extend_from_slice(&(member.data.len() as u64).to_le_bytes());
                (ZIP64_U32, ZIP64_U32)
            } else {
                (member.data.len() as u32, member.payload_len as u32)
            };
            extra.extend_from_slice(&member.extra);

            let header = CentralDirectoryHeader {
                version_made_by: 20,
                version_needed: 20,
                flags: member.flags,
                compression_method: member.method,
                dos_datetime: member.dos_datetime,
                crc32: member.crc32,
                compressed_size,
                uncompressed_size,
                name_len: member.name.len() as u16,
                extra_len: extra.len() as u16,
                comment_len: member.comment.len() as u16,
                disk_start: 0,
                internal_attributes: 0,
                external_attributes: 0,
                local_header_offset: *offset as u32,
            };
            out.extend_from_slice(&CentralDirectoryHeader::MAGIC);
            out.extend_from_slice(header.as_bytes());
            out.extend_from_slice(&member.name);
            out.extend_from_slice(&extra);
            out.extend_from_slice(&member.comment);
        }
        let cd_size = out.len() - cd_start;
        let count = self.members.len();

        let eocd = if self.zip64 {
            let eocd64_offset = out.len();
            let eocd64 = Eocd64Record {
                remaining_size: (Eocd64Record::SIZE - 12) as u64,
                version_made_by: 45,
                version_needed: 45,
                this_disk: 0,
                cd_disk: 0,
                entries_this_disk: count as u64,
                entries_total: count as u64,
                cd_size: cd_size as u64,
                cd_offset: cd_start as u64,
            };
            out.extend_from_slice(&Eocd64Record::MAGIC);
            out.extend_from_slice(eocd64.as_bytes());

            let locator = Eocd64Locator {
                eocd64_disk: 0,
                eocd64_offset: eocd64_offset as u64,
                total_disks: 1,
            };
            out.extend_from_slice(&Eocd64Locator::MAGIC);
            out.extend_from_slice(locator.as_bytes());

            EocdRecord {
                this_disk: 0,
                cd_disk: 0,
                entries_this_disk: ZIP64_U16,
                entries_total: ZIP64_U16,
                cd_size: ZIP64_U32,
                cd_offset: ZIP64_U32,
                comment_len: self.comment.len() as u16,
            }
        } else {
            EocdRecord {
                this_disk: 0,
                cd_disk: 0,
                entries_this_disk: count as u16,
                entries_total: count as u16,
                cd_size: cd_size as u32,
                cd_offset: cd_start as u32,
                comment_len: self.comment.len() as u16,
            }
        };
        out.extend_from_slice(&EocdRecord::MAGIC);
        out.extend_from_slice(eocd.as_bytes());
        out.extend_from_slice(&self.comment);

        out
    }
}
