//! odfdump - deterministic text dumps of OpenDocument files and zip archives.
//!
//! Every member of the archive is written as a block of lines prefixed with
//! the member name: its stored metadata, a SHA-1 of its payload, a filetype
//! guess and, for text members, the content itself. XML members are
//! re-indented first so that a line-based diff of two dumps shows which
//! element changed.
//!
//! # Pipeline
//!
//! - [`ArchiveWalker`] opens the archive and visits members in central
//!   directory order.
//! - [`MemberProcessor`] hashes, classifies and normalizes one member into a
//!   [`Record`].
//! - [`format`] renders records in the line protocol.
//!
//! # Crates
//!
//! - [`odfdump_common`] - Binary reading and checksums
//! - [`odfdump_zip`] - pkzip reading (ZIP64, Deflate, Zstandard)
//! - [`odfdump_xml`] - XML normalization backends
//!
//! # Example
//!
//! ```no_run
//! use odfdump::prelude::*;
//!
//! let config = DumpConfig::default().with_omit_timestamp(true);
//! let walker = ArchiveWalker::open("report.odt", &config)?;
//!
//! let mut out = std::io::stdout().lock();
//! let summary = walker.dump(&mut out)?;
//! assert!(summary.is_complete());
//! # Ok::<(), odfdump::Error>(())
//! ```

mod classify;
mod config;
mod error;
mod hash;
mod member;
mod processor;
mod record;
mod walker;

pub mod format;

// Re-export sub-crates
pub use odfdump_common as common;
pub use odfdump_xml as xml;
pub use odfdump_zip as pkzip;

pub use classify::{classify, Filetype, SCAN_LIMIT};
pub use config::{DumpConfig, ErrorPolicy};
pub use error::{Error, Result};
pub use hash::{digest, DIGEST_LEN};
pub use member::{Member, MemberAttributes};
pub use processor::{split_lines, MemberProcessor, MIN_XML_LEN};
pub use record::Record;
pub use walker::{ArchiveWalker, DumpSummary, Records};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::format::{format_record, write_record};
    pub use crate::{
        ArchiveWalker, DumpConfig, DumpSummary, ErrorPolicy, Filetype, Member, MemberProcessor,
        Record,
    };
    pub use odfdump_xml::XmlBackendKind;
}
