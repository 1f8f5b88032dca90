//! Object header framing

use crate::model::ObjectKind;
use crate::{Error, Result};

/// Prefix a payload with its `"<kind> <len>\0"` header
pub fn frame(kind: ObjectKind, payload: &[u8]) -> Vec<u8> {
    let header = format!("{} {}\0", kind, payload.len());
    let mut out = Vec::with_capacity(header.len() + payload.len());
    out.extend_from_slice(header.as_bytes());
    out.extend_from_slice(payload);
    out
}

/// Split framed bytes back into kind and payload
///
/// The payload borrows from `framed`; the declared length must match the
/// bytes that follow the header exactly.
pub fn parse(framed: &[u8]) -> Result<(ObjectKind, &[u8])> {
    let nul = framed
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::malformed("header is not NUL-terminated"))?;
    let (header, rest) = (&framed[..nul], &framed[nul + 1..]);

    let space = header
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::malformed("header has no length field"))?;
    let (kind, len) = (&header[..space], &header[space + 1..]);

    let kind = ObjectKind::from_bytes(kind).ok_or_else(|| {
        Error::malformed(format!(
            "unknown object kind '{}'",
            String::from_utf8_lossy(kind)
        ))
    })?;

    let declared = parse_length(len)?;
    if declared != rest.len() {
        return Err(Error::malformed(format!(
            "declared length {} but found {} payload bytes",
            declared,
            rest.len()
        )));
    }

    Ok((kind, rest))
}

fn parse_length(raw: &[u8]) -> Result<usize> {
    let invalid = || {
        Error::malformed(format!(
            "invalid length field '{}'",
            String::from_utf8_lossy(raw)
        ))
    };
    // Only plain ASCII digits; no sign, whitespace or leading zeros
    if raw.is_empty() || !raw.iter().all(u8::is_ascii_digit) || (raw.len() > 1 && raw[0] == b'0')
    {
        return Err(invalid());
    }
    std::str::from_utf8(raw)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or_else(invalid)
}
