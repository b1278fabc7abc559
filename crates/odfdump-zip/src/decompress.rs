//! Payload extraction for the supported compression methods.

use std::io::Read;

use flate2::read::DeflateDecoder;

use crate::headers::CompressionMethod;
use crate::{Error, Result};

/// Upper bound on the buffer reserved up front for one payload.
const MAX_PREALLOC: usize = 64 * 1024 * 1024;

/// Expand `data` into the member's payload.
///
/// Decoders stop one byte past `declared_size`, so a header that understates
/// the payload surfaces as a size mismatch instead of an unbounded allocation.
pub(crate) fn extract(method: CompressionMethod, data: &[u8], declared_size: u64) -> Result<Vec<u8>> {
    let reserve = usize::try_from(declared_size)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOC);
    let limit = declared_size.saturating_add(1);

    match method {
        CompressionMethod::Store => Ok(data.to_vec()),
        CompressionMethod::Deflate => drain(DeflateDecoder::new(data), limit, reserve),
        CompressionMethod::Zstd => {
            let decoder = zstd::Decoder::new(data).map_err(codec_error)?;
            drain(decoder, limit, reserve)
        }
    }
}

fn drain<R: Read>(decoder: R, limit: u64, reserve: usize) -> Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(reserve);
    decoder
        .take(limit)
        .read_to_end(&mut payload)
        .map_err(codec_error)?;
    Ok(payload)
}

fn codec_error(err: std::io::Error) -> Error {
    Error::Decompression(err.to_string())
}
