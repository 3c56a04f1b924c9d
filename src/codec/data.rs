use crate::{Error, Result};

use super::util::{parse_hex, push_hex};
use super::Fourcc;

/// An empty payload prints as the empty string, anything else as prefixed
/// uppercase hex.
pub(super) fn to_text(data: &[u8]) -> String {
    if data.is_empty() {
        return String::new();
    }
    let mut out = String::with_capacity(2 + data.len() * 2);
    out.push_str("0x");
    push_hex(&mut out, data);
    out
}

pub(super) fn set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    if text.is_empty() {
        data.clear();
        return Ok(());
    }
    let bytes = text
        .strip_prefix("0x")
        .and_then(parse_hex)
        .ok_or_else(|| Error::invalid_string(ident, text))?;
    *data = bytes;
    Ok(())
}

pub(super) fn set_bytes(data: &mut Vec<u8>, bytes: &[u8]) {
    data.clear();
    data.extend_from_slice(bytes);
}
