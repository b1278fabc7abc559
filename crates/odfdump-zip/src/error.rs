//! Failures while reading a pkzip archive.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A header ran past the end of the archive.
    #[error(transparent)]
    Truncated(#[from] odfdump_common::Error),

    #[error("bad record signature {actual:#010x}, wanted {expected:#010x}")]
    InvalidSignature { expected: u32, actual: u32 },

    /// No end of central directory record in the archive tail. Usually means
    /// the file is not a zip archive at all.
    #[error("not a zip archive: no end of central directory record")]
    EocdNotFound,

    /// The EOCD defers to a ZIP64 record that is missing or damaged.
    #[error("missing ZIP64 end of central directory record")]
    Zip64EocdNotFound,

    #[error("archives spanning several disks are not supported")]
    MultiDisk,

    /// An offset or length points outside the archive.
    #[error("{0} points outside the archive")]
    OutOfBounds(&'static str),

    #[error("compression method {0} is not supported")]
    UnsupportedCompression(u16),

    #[error("{0} is encrypted")]
    Encrypted(String),

    #[error("corrupt compressed data: {0}")]
    Decompression(String),

    /// The payload length differs from the size in the central directory.
    #[error("payload is {actual} bytes, directory says {expected}")]
    SizeMismatch { expected: u64, actual: u64 },

    /// The payload checksum differs from the CRC-32 in the central directory.
    #[error("payload CRC-32 is {actual:#010x}, directory says {expected:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
