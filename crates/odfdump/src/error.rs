//! Error types for dumping archives.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while dumping an archive.
///
/// Archive-level failures are fatal. Member-level failures carry the member
/// name so a caller that keeps going can still report which one failed.
#[derive(Debug, Error)]
pub enum Error {
    /// The file is missing, unreadable or not a supported pkzip container.
    #[error("cannot open archive {}: {source}", path.display())]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: odfdump_zip::Error,
    },

    /// A member's payload could not be extracted.
    #[error("cannot read member '{name}': {source}")]
    MemberRead {
        name: String,
        #[source]
        source: odfdump_zip::Error,
    },

    /// An `.xml` member was rejected by the active XML backend.
    #[error("malformed XML in member '{name}': {source}")]
    MalformedInput {
        name: String,
        #[source]
        source: odfdump_xml::Error,
    },

    /// Writing the dump failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Name of the member this error belongs to, if any.
    pub fn member_name(&self) -> Option<&str> {
        match self {
            Self::MemberRead { name, .. } | Self::MalformedInput { name, .. } => Some(name),
            Self::ArchiveOpen { .. } | Self::Io(_) => None,
        }
    }

    /// True for failures confined to a single member.
    pub fn is_member_error(&self) -> bool {
        self.member_name().is_some()
    }
}

/// Result type for dumping.
pub type Result<T> = std::result::Result<T, Error>;
