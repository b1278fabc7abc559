//! ZIP archive reader.
//!
//! The archive is memory-mapped and its central directory parsed once on
//! open. Member data is located through the local file header and
//! decompressed on demand.

use std::fs::File;
use std::ops::Deref;
use std::path::Path;

use log::debug;
use memchr::memmem;
use memmap2::Mmap;
use odfdump_common::{crc, BinaryReader};

use crate::decompress;
use crate::entry::ZipEntry;
use crate::headers::{
    read_signed, CentralDirectoryHeader, CompressionMethod, Eocd64Locator, Eocd64Record,
    EocdRecord, LocalFileHeader, SignedRecord,
};
use crate::{Error, Result};

/// Backing bytes of an archive.
enum Storage {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for Storage {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Storage::Mapped(mmap) => mmap,
            Storage::Owned(bytes) => bytes,
        }
    }
}

/// A pkzip archive opened for reading.
pub struct ZipArchive {
    /// Archive bytes
    data: Storage,
    /// Archive file name
    name: String,
    /// Entries in central directory order
    entries: Vec<ZipEntry>,
}

impl ZipArchive {
    /// Open and memory-map an archive, parsing its central directory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;

        // Empty files cannot be mapped and cannot be archives either.
        if file.metadata()?.len() == 0 {
            return Err(Error::EocdNotFound);
        }

        // SAFETY: the mapping is read-only and the archive is not expected to
        // be modified while it is being dumped.
        let mmap = unsafe { Mmap::map(&file)? };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        Self::from_storage(Storage::Mapped(mmap), name)
    }

    /// Read an archive held in memory.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::from_storage(Storage::Owned(data), "<memory>".to_string())
    }

    fn from_storage(data: Storage, name: String) -> Result<Self> {
        let entries = Self::parse_central_directory(&data)?;

        debug!("{}: {} entries in central directory", name, entries.len());

        Ok(Self {
            data,
            name,
            entries,
        })
    }

    /// Get the archive name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Entries in central directory order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ZipEntry> {
        self.entries.iter()
    }

    /// Read entry contents, decompressing and verifying size and CRC-32.
    pub fn read(&self, entry: &ZipEntry) -> Result<Vec<u8>> {
        if entry.is_encrypted() {
            return Err(Error::Encrypted(entry.name().to_string()));
        }

        let method = CompressionMethod::try_from(entry.compression_method())
            .map_err(Error::UnsupportedCompression)?;

        let compressed = self.entry_data(entry)?;
        let data = decompress::extract(method, compressed, entry.uncompressed_size())?;

        if data.len() as u64 != entry.uncompressed_size() {
            return Err(Error::SizeMismatch {
                expected: entry.uncompressed_size(),
                actual: data.len() as u64,
            });
        }

        let actual = crc::hash_bytes(&data);
        if actual != entry.crc32() {
            return Err(Error::CrcMismatch {
                expected: entry.crc32(),
                actual,
            });
        }

        Ok(data)
    }


    // Internal methods

    /// Locate the (possibly compressed) member data behind its local header.
    fn entry_data(&self, entry: &ZipEntry) -> Result<&[u8]> {
        let data: &[u8] = &self.data;
        let offset = usize::try_from(entry.local_header_offset())
            .ok()
            .filter(|&offset| offset < data.len())
            .ok_or(Error::OutOfBounds("local header offset"))?;

        let mut reader = BinaryReader::new_at(data, offset);
        let local_header: LocalFileHeader = read_signed(&mut reader)?;
        reader.skip(local_header.trailing_len());

        let data_offset = reader.offset();
        let data_end = usize::try_from(entry.compressed_size())
            .ok()
            .and_then(|size| data_offset.checked_add(size))
            .filter(|&end| end <= data.len())
            .ok_or(Error::OutOfBounds("entry data"))?;

        Ok(&data[data_offset..data_end])
    }

    /// Parse every central directory record.
    fn parse_central_directory(data: &[u8]) -> Result<Vec<ZipEntry>> {
        let eocd_offset = Self::find_eocd(data)?;
        let mut reader = BinaryReader::new_at(data, eocd_offset);
        let eocd: EocdRecord = read_signed(&mut reader)?;

        // Get ZIP64 values if needed
        let (total_entries, central_dir_offset) = if eocd.is_zip64() {
            Self::read_zip64_eocd(data, eocd_offset)?
        } else {
            if eocd.this_disk != 0 || eocd.cd_disk != 0 {
                return Err(Error::MultiDisk);
            }
            (u64::from(eocd.entries_total), u64::from(eocd.cd_offset))
        };

        let cd_offset = usize::try_from(central_dir_offset)
            .ok()
            .filter(|&offset| offset <= eocd_offset)
            .ok_or(Error::OutOfBounds("central directory"))?;

        // Every record is at least 46 bytes, so this bounds the allocation.
        let max_entries = (eocd_offset - cd_offset) / CentralDirectoryHeader::SIZE;
        let mut entries = Vec::with_capacity((total_entries as usize).min(max_entries));

        let mut reader = BinaryReader::new_at(data, cd_offset);
        for _ in 0..total_entries {
            entries.push(ZipEntry::parse(&mut reader)?);
        }

        Ok(entries)
    }

    /// Find the EOCD record by scanning backwards from the end of the data.
    ///
    /// A candidate whose comment length reaches exactly to the end of the
    /// data wins; otherwise the last candidate found is used, which tolerates
    /// trailing garbage after the archive.
    fn find_eocd(data: &[u8]) -> Result<usize> {
        if data.len() < EocdRecord::SIZE {
            return Err(Error::EocdNotFound);
        }

        let search_start = data
            .len()
            .saturating_sub(EocdRecord::SIZE + u16::MAX as usize);
        let mut search_end = data.len();
        let mut fallback = None;

        while let Some(found) = memmem::rfind(&data[search_start..search_end], &EocdRecord::MAGIC) {
            let offset = search_start + found;
            let record_end = offset + EocdRecord::SIZE;

            if record_end <= data.len() {
                let comment_len = u16::from_le_bytes([data[record_end - 2], data[record_end - 1]]);
                if record_end + comment_len as usize == data.len() {
                    return Ok(offset);
                }
                fallback.get_or_insert(offset);
            }

            search_end = offset;
        }

        fallback.ok_or(Error::EocdNotFound)
    }

    fn read_zip64_eocd(data: &[u8], eocd_offset: usize) -> Result<(u64, u64)> {
        let locator_offset = eocd_offset
            .checked_sub(Eocd64Locator::SIZE)
            .ok_or(Error::Zip64EocdNotFound)?;

        let mut reader = BinaryReader::new_at(data, locator_offset);
        let locator: Eocd64Locator =
            read_signed(&mut reader).map_err(|_| Error::Zip64EocdNotFound)?;

        if locator.total_disks > 1 {
            return Err(Error::MultiDisk);
        }

        let eocd64_offset = usize::try_from(locator.eocd64_offset)
            .ok()
            .filter(|&offset| offset < locator_offset)
            .ok_or(Error::Zip64EocdNotFound)?;

        let mut reader = BinaryReader::new_at(data, eocd64_offset);
        let eocd64: Eocd64Record = read_signed(&mut reader)?;

        Ok((eocd64.entries_total, eocd64.cd_offset))
    }
}

impl std::fmt::Debug for ZipArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipArchive")
            .field("name", &self.name)
            .field("entries", &self.entries.len())
            .finish()
    }
}
