//! Central directory entries.

use std::fmt;

use odfdump_common::{cp437, BinaryReader};

use crate::headers::{extra_field, flags, read_signed, CentralDirectoryHeader, ZIP64_U32};
use crate::Result;

/// One archive member as described by the central directory.
///
/// Only metadata lives here; [`ZipArchive::read`](crate::ZipArchive::read)
/// extracts the payload.
#[derive(Debug, Clone)]
pub struct ZipEntry {
    header: CentralDirectoryHeader,
    name: String,
    extra: Vec<u8>,
    comment: Vec<u8>,
    // Resolved through the ZIP64 extra field when the header saturates them.
    compressed_size: u64,
    uncompressed_size: u64,
    local_header_offset: u64,
}

impl ZipEntry {
    /// Parse one central directory record and the variable fields after it.
    pub(crate) fn parse(reader: &mut BinaryReader) -> Result<Self> {
        let header: CentralDirectoryHeader = read_signed(reader)?;

        let name = decode_name(reader.read_bytes(usize::from(header.name_len))?, header.flags);
        let extra = reader.read_bytes(usize::from(header.extra_len))?.to_vec();
        let comment = reader.read_bytes(usize::from(header.comment_len))?.to_vec();

        Self::from_parts(header, name, extra, comment)
    }

    fn from_parts(
        header: CentralDirectoryHeader,
        name: String,
        extra: Vec<u8>,
        comment: Vec<u8>,
    ) -> Result<Self> {
        let mut uncompressed_size = u64::from(header.uncompressed_size);
        let mut compressed_size = u64::from(header.compressed_size);
        let mut local_header_offset = u64::from(header.local_header_offset);

        if let Some(body) = find_extra_field(&extra, extra_field::ZIP64) {
            // Only saturated fields are present, always in this order.
            let mut zip64 = BinaryReader::new(body);
            if header.uncompressed_size == ZIP64_U32 {
                uncompressed_size = zip64.read_u64()?;
            }
            if header.compressed_size == ZIP64_U32 {
                compressed_size = zip64.read_u64()?;
            }
            if header.local_header_offset == ZIP64_U32 {
                local_header_offset = zip64.read_u64()?;
            }
        }

        Ok(Self {
            header,
            name,
            extra,
            comment,
            compressed_size,
            uncompressed_size,
            local_header_offset,
        })
    }

    /// Path of the member inside the archive.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw member comment; empty when none is stored.
    #[inline]
    pub fn comment(&self) -> &[u8] {
        &self.comment
    }

    /// Raw extra field; empty when none is stored.
    #[inline]
    pub fn extra(&self) -> &[u8] {
        &self.extra
    }

    #[inline]
    pub fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    #[inline]
    pub fn uncompressed_size(&self) -> u64 {
        self.uncompressed_size
    }

    #[inline]
    pub fn compression_method(&self) -> u16 {
        self.header.compression_method
    }

    #[inline]
    pub fn crc32(&self) -> u32 {
        self.header.crc32
    }

    /// Packed DOS time (low half) and date (high half).
    #[inline]
    pub fn dos_datetime(&self) -> u32 {
        self.header.dos_datetime
    }

    /// Modification time, or None when the stored word pair is zero or
    /// does not name a real date.
    pub fn last_modified(&self) -> Option<DosDateTime> {
        DosDateTime::from_dos(self.dos_datetime())
    }

    #[inline]
    pub fn is_encrypted(&self) -> bool {
        self.header.flags & flags::ENCRYPTED != 0
    }

    #[inline]
    pub(crate) fn local_header_offset(&self) -> u64 {
        self.local_header_offset
    }
}

/// Names are UTF-8 when the header says so or when they decode as UTF-8;
/// anything else is taken to be CP437.
fn decode_name(bytes: &[u8], header_flags: u16) -> String {
    if header_flags & flags::UTF8 != 0 {
        return String::from_utf8_lossy(bytes).into_owned();
    }
    std::str::from_utf8(bytes).map_or_else(|_| cp437::decode(bytes), str::to_owned)
}

/// Body of the first extra field record tagged `id`.
fn find_extra_field(extra: &[u8], id: u16) -> Option<&[u8]> {
    let mut reader = BinaryReader::new(extra);
    while reader.remaining() >= 4 {
        let tag = reader.read_u16().ok()?;
        let len = usize::from(reader.read_u16().ok()?);
        let body = reader.read_bytes(len).ok()?;
        if tag == id {
            return Some(body);
        }
    }
    None
}

/// A decoded DOS timestamp, with two-second resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DosDateTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl DosDateTime {
    /// Unpack a DOS date/time word pair.
    ///
    /// | bits  | field          |
    /// |-------|----------------|
    /// | 0-4   | seconds / 2    |
    /// | 5-10  | minutes        |
    /// | 11-15 | hours          |
    /// | 16-20 | day            |
    /// | 21-24 | month          |
    /// | 25-31 | years since 1980 |
    pub fn from_dos(packed: u32) -> Option<Self> {
        if packed == 0 {
            return None;
        }

        let bits = |shift: u32, width: u32| (packed >> shift) & ((1 << width) - 1);

        let dt = Self {
            year: 1980 + bits(25, 7) as u16,
            month: bits(21, 4) as u8,
            day: bits(16, 5) as u8,
            hour: bits(11, 5) as u8,
            minute: bits(5, 6) as u8,
            second: (bits(0, 5) * 2) as u8,
        };
        dt.is_valid().then_some(dt)
    }

    fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=days_in_month(self.year, self.month)).contains(&self.day)
            && self.hour < 24
            && self.minute < 60
            && self.second < 60
    }
}

/// `YYYY-MM-DDTHH:MM:SS`, no timezone.
impl fmt::Display for DosDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    let leap = year % 4 == 0 && (year % 100 != 0 || year % 400 == 0);
    match month {
        2 if leap => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
