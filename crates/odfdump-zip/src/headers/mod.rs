//! Fixed-size pkzip records.
//!
//! Every record in an archive starts with a 4-byte signature. The structs
//! here describe what follows the signature, laid out exactly as stored
//! (little-endian, no padding), so they can be read and written with
//! zerocopy. Reading goes through [`read_signed`], which checks the
//! signature first.

mod directory;
mod local;

use odfdump_common::BinaryReader;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::{Error, Result};

pub use directory::{
    extra_field, CentralDirectoryHeader, Eocd64Locator, Eocd64Record, EocdRecord, ZIP64_U16, ZIP64_U32,
};
pub use local::LocalFileHeader;

/// A record body preceded by a known signature.
pub trait SignedRecord: FromBytes + IntoBytes + Immutable + KnownLayout + Sized {
    /// Signature bytes as they appear in the file.
    const MAGIC: [u8; 4];

    /// Signature read as a little-endian word.
    const SIGNATURE: u32 = u32::from_le_bytes(Self::MAGIC);

    /// Bytes taken by signature and body together.
    const SIZE: usize = 4 + std::mem::size_of::<Self>();
}

/// Read a signature and the record body that follows it.
pub(crate) fn read_signed<T: SignedRecord>(reader: &mut BinaryReader) -> Result<T> {
    let actual = reader.read_u32()?;
    if actual != T::SIGNATURE {
        return Err(Error::InvalidSignature {
            expected: T::SIGNATURE,
            actual,
        });
    }
    Ok(reader.read_struct()?)
}

/// Compression methods this reader can extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum CompressionMethod {
    /// No compression (stored).
    Store = 0,
    /// DEFLATE compression.
    Deflate = 8,
    /// Zstandard compression (APPNOTE method 93).
    Zstd = 93,
}

impl TryFrom<u16> for CompressionMethod {
    type Error = u16;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Store),
            8 => Ok(Self::Deflate),
            93 => Ok(Self::Zstd),
            other => Err(other),
        }
    }
}

/// General purpose bit flags.
pub mod flags {
    /// Bit 0: the member is encrypted.
    pub const ENCRYPTED: u16 = 1 << 0;
    /// Bit 11: name and comment are UTF-8.
    pub const UTF8: u16 = 1 << 11;
}
