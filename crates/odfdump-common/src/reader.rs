//! Little-endian cursor over a byte slice.

use zerocopy::FromBytes;

use crate::{Error, Result};

/// Reads little-endian integers and fixed-layout records from a byte slice.
///
/// Slices handed out by [`read_bytes`](Self::read_bytes) borrow from the
/// underlying buffer, so a memory-mapped archive is never copied just to be
/// parsed.
///
/// # Example
///
/// ```
/// use odfdump_common::BinaryReader;
///
/// let data = [0x50, 0x4b, 0x03, 0x04, 0x14, 0x00];
/// let mut reader = BinaryReader::new(&data);
///
/// assert_eq!(reader.read_u32()?, 0x04034b50);
/// assert_eq!(reader.read_u16()?, 20);
/// assert!(reader.is_empty());
/// # Ok::<(), odfdump_common::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> BinaryReader<'a> {
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Start reading at `offset` instead of the beginning.
    #[inline]
    pub const fn new_at(data: &'a [u8], offset: usize) -> Self {
        Self { data, offset }
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the whole buffer, not of what is left.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.offset)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Skip `count` bytes. Skipping past the end leaves the reader empty.
    #[inline]
    pub fn skip(&mut self, count: usize) {
        self.offset = self.offset.saturating_add(count);
    }

    /// Borrow the next `count` bytes and move past them.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < count {
            return Err(Error::Truncated {
                offset: self.offset,
                needed: count,
                available,
            });
        }
        let bytes = &self.data[self.offset..self.offset + count];
        self.offset += count;
        Ok(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.read_bytes(N)?);
        Ok(array)
    }

    #[inline]
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_array().map(u16::from_le_bytes)
    }

    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    #[inline]
    pub fn read_u64(&mut self) -> Result<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    /// Copy out a `#[repr(C, packed)]` record.
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let offset = self.offset;
        let needed = std::mem::size_of::<T>();
        let bytes = self.read_bytes(needed)?;
        T::read_from_bytes(bytes).map_err(|_| Error::Truncated {
            offset,
            needed,
            available: bytes.len(),
        })
    }
}
