//! Object file header
//!
//! Layout: `magic (4 bytes) | version (1 byte) | format tag (1 byte) | payload`

use thiserror::Error;

use super::ObjectFormat;
use crate::consts::{ENVELOPE_MAGIC, ENVELOPE_VERSION};

/// Bytes preceding the payload
pub const HEADER_LEN: usize = ENVELOPE_MAGIC.len() + 2;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EnvelopeError {
    #[error("file is shorter than the envelope header")]
    Truncated,
    #[error("not an object file (bad magic)")]
    BadMagic,
    #[error("unsupported envelope version {0}")]
    UnsupportedVersion(u8),
    #[error("unknown payload format tag {0}")]
    UnknownFormat(u8),
}

/// Prefix `payload` with the header for `format`
pub fn wrap(format: ObjectFormat, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&ENVELOPE_MAGIC);
    bytes.push(ENVELOPE_VERSION);
    bytes.push(format.tag());
    bytes.extend_from_slice(payload);
    bytes
}

/// Validate the header and return the payload with its format
pub fn unwrap(bytes: &[u8]) -> Result<(ObjectFormat, &[u8]), EnvelopeError> {
    if bytes.len() < HEADER_LEN {
        return Err(EnvelopeError::Truncated);
    }
    let (magic, rest) = bytes.split_at(ENVELOPE_MAGIC.len());
    if magic != ENVELOPE_MAGIC {
        return Err(EnvelopeError::BadMagic);
    }
    let version = rest[0];
    if version != ENVELOPE_VERSION {
        return Err(EnvelopeError::UnsupportedVersion(version));
    }
    let format = ObjectFormat::from_tag(rest[1]).ok_or(EnvelopeError::UnknownFormat(rest[1]))?;
    Ok((format, &rest[2..]))
}
