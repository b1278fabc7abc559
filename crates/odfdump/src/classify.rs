//! Binary / text classification of member payloads.
//!
//! Works the way `git diff` decides whether a file is binary: a NUL byte in
//! the first [`SCAN_LIMIT`] bytes means binary. A payload that passes the
//! scan is then decoded as UTF-8 in full.
//!
//! The heuristic is knowingly unsound for encodings without NUL bytes in the
//! scanned prefix (UTF-16 text made only of non-Latin characters, for
//! instance). Such payloads fail the UTF-8 decode and end up as
//! [`Filetype::Unknown`] rather than [`Filetype::Binary`].

use std::fmt;

use odfdump_common::memchr::memchr;

/// How many leading bytes are scanned for NUL.
pub const SCAN_LIMIT: usize = 8000;

/// Detected nature of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filetype {
    /// A NUL byte appears within the scanned prefix.
    Binary,
    /// No NUL in the prefix and the whole payload is valid UTF-8.
    Utf8,
    /// No NUL in the prefix, but the payload is not valid UTF-8.
    Unknown,
}

impl Filetype {
    /// Name used in the `filetype` header line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Utf8 => "utf-8",
            Self::Unknown => "unknown",
        }
    }

    /// Whether content lines are emitted for this filetype.
    pub fn is_text(self) -> bool {
        self == Self::Utf8
    }
}

impl fmt::Display for Filetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a payload.
pub fn classify(bytes: &[u8]) -> Filetype {
    inspect(bytes).0
}

/// Classify a payload, also returning its text when it is [`Filetype::Utf8`].
pub(crate) fn inspect(bytes: &[u8]) -> (Filetype, Option<&str>) {
    let prefix = &bytes[..bytes.len().min(SCAN_LIMIT)];
    if memchr(0, prefix).is_some() {
        return (Filetype::Binary, None);
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => (Filetype::Utf8, Some(text)),
        Err(_) => (Filetype::Unknown, None),
    }
}
