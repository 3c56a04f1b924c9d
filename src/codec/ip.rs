use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Result};

use super::util::{ensure_len, parse_hex, push_hex};
use super::Fourcc;

/// Returns an error unless the payload holds one or more 4 byte addresses.
fn check_ip32_len(ident: Fourcc, data: &[u8]) -> Result<()> {
    if data.is_empty() || data.len() % 4 != 0 {
        return Err(Error::byte_count(ident, 4, data.len()));
    }
    Ok(())
}

fn hex_form(data: &[u8]) -> String {
    let mut out = String::with_capacity(2 + data.len() * 2);
    out.push_str("0x");
    push_hex(&mut out, data);
    out
}

pub(super) fn ip32_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    check_ip32_len(ident, data)?;
    if data.len() == 4 {
        Ok(format!("{}.{}.{}.{}", data[0], data[1], data[2], data[3]))
    } else {
        Ok(hex_form(data))
    }
}

/// A single address fits in the low half, an address range fills all 64
/// bits. Longer address lists have no uint reading.
pub(super) fn ip32_to_uint(ident: Fourcc, data: &[u8]) -> Result<u64> {
    check_ip32_len(ident, data)?;
    match data.len() {
        4 => Ok(u64::from(BigEndian::read_u32(data))),
        8 => Ok(BigEndian::read_u64(data)),
        _ => Err(Error::range(ident, hex_form(data))),
    }
}

pub(super) fn ip32_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    if let Some(quad) = parse_quad(text) {
        ensure_len(data, 4);
        data.copy_from_slice(&quad);
        return Ok(());
    }
    if let Some(digits) = text.strip_prefix("0x") {
        if !digits.is_empty() && digits.len() % 8 == 0 {
            if let Some(bytes) = parse_hex(digits) {
                *data = bytes;
                return Ok(());
            }
        }
    }
    Err(Error::invalid_string(ident, text))
}

pub(super) fn ip32_set_uint(data: &mut Vec<u8>, value: u64) {
    if value > u64::from(u32::MAX) {
        ensure_len(data, 8);
        BigEndian::write_u64(data, value);
    } else {
        ensure_len(data, 4);
        BigEndian::write_u32(data, value as u32);
    }
}

fn parse_quad(text: &str) -> Option<[u8; 4]> {
    let mut out = [0u8; 4];
    let mut parts = text.split('.');
    for slot in out.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

fn ipad_char(b: u8) -> bool {
    b.is_ascii_hexdigit() || b == b':' || b == b'.'
}

pub(super) fn ipad_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    let body = match data.split_last() {
        Some((&0, body)) => body,
        _ => return Err(Error::missing_terminator(ident)),
    };
    if body.contains(&0) {
        return Err(Error::embedded_null(ident));
    }
    let mut out = String::with_capacity(body.len());
    for &b in body {
        if !ipad_char(b) {
            return Err(Error::invalid_string(ident, format!("0x{:02X}", b)));
        }
        out.push(char::from(b));
    }
    Ok(out)
}

/// Strips optional surrounding double quotes, validates the address
/// character set, and appends the null terminator.
pub(super) fn ipad_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    let inner = if bytes.len() >= 2 && bytes[0] == b'"' && bytes[bytes.len() - 1] == b'"' {
        &text[1..text.len() - 1]
    } else {
        text
    };
    if inner.len() < 2 || (inner.len() == 2 && inner != "::") {
        return Err(Error::invalid_string(ident, text));
    }
    if !inner.bytes().all(ipad_char) {
        return Err(Error::invalid_string(ident, text));
    }
    let mut payload = Vec::with_capacity(inner.len() + 1);
    payload.extend_from_slice(inner.as_bytes());
    payload.push(0);
    *data = payload;
    Ok(())
}
