//! # Identity Codec
//!
//! Blog entries are keyed internally by a monotonically increasing `u64`
//! sequence. Raw sequence numbers never leave the store: callers (URLs, forms,
//! file names) only ever see the encoded form.
//!
//! ## Format
//!
//! ```text
//! sequence ── xor KEY ── big-endian [u8; 8] ── base64 (URL-safe, no padding)
//! ```
//!
//! Every encoded id is exactly [`ENCODED_LEN`] characters from the URL-safe
//! base64 alphabet, so it can be used unescaped in a path segment or as a file
//! stem. The mapping is a bijection on `u64`, so decoding is lossless.
//!
//! ## Sequence Numbers
//!
//! Issued sequences start at 1. See [`next_sequence`] for how the next value is
//! derived from the ids already present in an index.

use crate::error::{BlogError, Result, StorageError};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

const KEY: u64 = 0x5bd1_e995_c2b2_ae35;

/// Length of every encoded id.
pub const ENCODED_LEN: usize = 11;

/// Encode an internal sequence number as an external id.
pub fn encode_id(sequence: u64) -> String {
    URL_SAFE_NO_PAD.encode((sequence ^ KEY).to_be_bytes())
}

/// Decode an external id back to its internal sequence number.
///
/// Fails with [`BlogError::InvalidId`] for anything [`encode_id`] could not
/// have produced.
pub fn decode_id(id: &str) -> Result<u64> {
    if id.len() != ENCODED_LEN {
        return Err(BlogError::InvalidId(id.to_string()));
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(id)
        .map_err(|_| BlogError::InvalidId(id.to_string()))?;
    let bytes: [u8; 8] = bytes
        .try_into()
        .map_err(|_| BlogError::InvalidId(id.to_string()))?;
    Ok(u64::from_be_bytes(bytes) ^ KEY)
}

/// Check that an id is well formed without keeping the decoded value.
pub fn is_valid_id(id: &str) -> bool {
    decode_id(id).is_ok()
}

/// The sequence to hand out next, given the ids already issued.
///
/// One past the highest decodable sequence; ids that fail to decode are
/// skipped and reported. Fails once `u64::MAX` has been issued, since every
/// later sequence would collide with an existing id.
pub fn next_sequence<'a>(ids: impl IntoIterator<Item = &'a str>) -> Result<u64> {
    let mut highest = 0;
    for id in ids {
        match decode_id(id) {
            Ok(sequence) => highest = highest.max(sequence),
            Err(_) => tracing::warn!(id, "ignoring undecodable id while assigning identity"),
        }
    }
    highest.checked_add(1).ok_or_else(|| {
        BlogError::CouldNotSave(StorageError::Backend(
            "identity space exhausted".to_string(),
        ))
    })
}
