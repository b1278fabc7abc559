//! Error types for XML normalization.

use thiserror::Error;

/// Errors raised when XML content cannot be normalized.
#[derive(Debug, Error)]
pub enum Error {
    /// The parser rejected the input.
    #[error("malformed XML near byte {position}: {message}")]
    Malformed { position: u64, message: String },

    /// The input ended inside one or more elements.
    #[error("{depth} element(s) not closed at end of input")]
    Unclosed { depth: usize },

    /// The input contains no element at all.
    #[error("no root element found")]
    NoRootElement,

    /// A second top-level element follows the root.
    #[error("more than one root element")]
    MultipleRoots,

    /// Character data appears before or after the root element.
    #[error("text outside the root element")]
    TextOutsideRoot,

    /// Serializing the normalized document failed.
    #[error("XML write error: {0}")]
    Write(String),
}

impl Error {
    pub(crate) fn malformed(position: u64, err: impl std::fmt::Display) -> Self {
        Self::Malformed {
            position,
            message: err.to_string(),
        }
    }

    pub(crate) fn write(err: impl std::fmt::Display) -> Self {
        Self::Write(err.to_string())
    }
}

/// Result type for XML normalization.
pub type Result<T> = std::result::Result<T, Error>;
