//! Content digests.

use sha1::{Digest, Sha1};

/// Length of a rendered digest in hex characters.
pub const DIGEST_LEN: usize = 40;

/// SHA-1 of `bytes` as 40 lowercase hex characters.
pub fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha1::digest(bytes))
}
