//! pkzip archive reader for odfdump.
//!
//! OpenDocument files (`.odt`, `.ods`, `.odp`, `.odb`, ...) are ordinary ZIP
//! archives. This crate reads them, along with any other ZIP archive, and
//! exposes each member's stored metadata and decompressed payload. It supports:
//!
//! - ZIP64 extended format (EOCD64 locator and extra field 0x0001)
//! - Stored (method 0), DEFLATE (method 8) and Zstandard (method 93) members
//! - Locating the end of central directory record behind an archive comment
//! - CRC-32 and size verification of every extracted payload
//!
//! Entries are kept in central directory order, which is the order the
//! archive was written in. No sorting is ever applied.
//!
//! # Example
//!
//! ```no_run
//! use odfdump_zip::ZipArchive;
//!
//! let archive = ZipArchive::open("report.odt")?;
//!
//! for entry in archive.iter() {
//!     println!("{}: {} bytes", entry.name(), entry.uncompressed_size());
//! }
//!
//! if let Some(entry) = archive.iter().find(|e| e.name() == "content.xml") {
//!     let data = archive.read(entry)?;
//! }
//! # Ok::<(), odfdump_zip::Error>(())
//! ```

mod archive;
mod decompress;
mod entry;
mod error;
pub mod headers;

#[cfg(test)]
pub(crate) mod testutil;

pub use archive::ZipArchive;
pub use entry::{DosDateTime, ZipEntry};
pub use error::{Error, Result};
pub use headers::CompressionMethod;
