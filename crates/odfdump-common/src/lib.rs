//! Common utilities for odfdump.
//!
//! This crate provides the foundational pieces shared by the other odfdump crates:
//!
//! - [`BinaryReader`] - Zero-copy little-endian reading from byte slices
//! - [`crc`] - CRC-32 (IEEE) checksums as stored in pkzip headers
//! - [`cp437`] - Decoding of legacy (non-UTF-8) archive member names

mod error;
mod reader;

pub mod cp437;
pub mod crc;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// Re-export memchr for fast byte searching
pub use memchr;
