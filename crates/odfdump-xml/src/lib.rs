//! XML pretty-printing for odfdump.
//!
//! OpenDocument writers put whole documents on a single line. Re-indenting
//! them puts every element on its own line, so a line-based diff of two
//! dumps points at the element that changed instead of at one huge line.
//!
//! Two interchangeable backends implement [`XmlBackend`]:
//!
//! - [`StreamingBackend`] (cargo feature `streaming`, on by default) re-emits
//!   parser events in one pass. It checks element nesting but passes text and
//!   entity references through untouched.
//! - [`TreeBackend`] builds a document tree first and rejects anything that is
//!   not a well-formed document with exactly one root element. It is always
//!   available.
//!
//! The two may format the same input with different whitespace.
//!
//! # Example
//!
//! ```
//! use odfdump_xml::XmlBackendKind;
//!
//! let backend = XmlBackendKind::detect().backend();
//! let lines = backend.normalize_lines("<a><b/><c/></a>")?;
//! assert!(lines.len() > 1);
//! # Ok::<(), odfdump_xml::Error>(())
//! ```

mod error;
#[cfg(feature = "streaming")]
mod streaming;
mod tree;

use std::fmt;

pub use error::{Error, Result};
#[cfg(feature = "streaming")]
pub use streaming::StreamingBackend;
pub use tree::TreeBackend;

/// Spaces per nesting level in normalized output.
pub const INDENT: usize = 2;

/// A formatter that turns XML text into indented, line-splittable text.
pub trait XmlBackend: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> XmlBackendKind;

    /// Re-serialize `xml` with one element per line.
    fn normalize(&self, xml: &str) -> Result<String>;

    /// Normalize and split into lines.
    fn normalize_lines(&self, xml: &str) -> Result<Vec<String>> {
        Ok(self.normalize(xml)?.lines().map(str::to_owned).collect())
    }
}

/// Identifies an XML backend implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XmlBackendKind {
    /// Single-pass lenient re-indenter.
    Streaming,
    /// Document-tree strict re-serializer.
    Tree,
}

impl XmlBackendKind {
    /// Pick the preferred backend among those compiled in.
    pub fn detect() -> Self {
        if Self::Streaming.is_available() {
            Self::Streaming
        } else {
            Self::Tree
        }
    }

    /// Whether this backend was compiled in.
    pub fn is_available(self) -> bool {
        match self {
            Self::Streaming => cfg!(feature = "streaming"),
            Self::Tree => true,
        }
    }

    /// Short lowercase name, as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::Streaming => "streaming",
            Self::Tree => "tree",
        }
    }

    /// Instantiate the backend. Falls back to the tree backend when this one
    /// is not compiled in.
    pub fn backend(self) -> Box<dyn XmlBackend> {
        match self {
            #[cfg(feature = "streaming")]
            Self::Streaming => Box::new(StreamingBackend::new()),
            #[cfg(not(feature = "streaming"))]
            Self::Streaming => {
                log::warn!("streaming XML backend not compiled in, using tree backend");
                Box::new(TreeBackend::new())
            }
            Self::Tree => Box::new(TreeBackend::new()),
        }
    }
}

impl fmt::Display for XmlBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// True when a raw text chunk is only whitespace.
pub(crate) fn is_blank(text: &[u8]) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

/// Whitespace that breaks the line, as a serializer's indentation would.
///
/// Only this kind of blank text is replaced by the writer's own indentation,
/// and only inside element-only content. A lone space between two inline
/// elements is content.
pub(crate) fn is_indentation(text: &[u8]) -> bool {
    is_blank(text) && text.iter().any(|&b| b == b'\n' || b == b'\r')
}
