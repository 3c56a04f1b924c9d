use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Result};

use super::util::{check_len, ensure_len};
use super::Fourcc;

/// The largest value an unsigned integer of `width` bytes can hold.
fn uint_max(width: usize) -> u64 {
    match width {
        1 => u64::from(u8::MAX),
        2 => u64::from(u16::MAX),
        4 => u64::from(u32::MAX),
        _ => u64::MAX,
    }
}

/// The bounds of a two's-complement signed integer of `width` bytes.
fn int_bounds(width: usize) -> (i64, i64) {
    match width {
        1 => (i64::from(i8::MIN), i64::from(i8::MAX)),
        2 => (i64::from(i16::MIN), i64::from(i16::MAX)),
        4 => (i64::from(i32::MIN), i64::from(i32::MAX)),
        _ => (i64::MIN, i64::MAX),
    }
}

pub(super) fn to_uint(ident: Fourcc, data: &[u8], width: usize) -> Result<u64> {
    check_len(ident, data, width)?;
    Ok(match width {
        1 => u64::from(data[0]),
        2 => u64::from(BigEndian::read_u16(data)),
        4 => u64::from(BigEndian::read_u32(data)),
        _ => BigEndian::read_u64(data),
    })
}

pub(super) fn to_int(ident: Fourcc, data: &[u8], width: usize) -> Result<i64> {
    check_len(ident, data, width)?;
    Ok(match width {
        1 => i64::from(data[0] as i8),
        2 => i64::from(BigEndian::read_i16(data)),
        4 => i64::from(BigEndian::read_i32(data)),
        _ => BigEndian::read_i64(data),
    })
}

/// Decodes an unsigned payload as a signed value, rejecting values beyond
/// `i64::MAX`.
pub(super) fn uint_to_int(ident: Fourcc, data: &[u8], width: usize) -> Result<i64> {
    let value = to_uint(ident, data, width)?;
    if value > i64::MAX as u64 {
        return Err(Error::range(ident, value));
    }
    Ok(value as i64)
}

pub(super) fn uint_to_text(ident: Fourcc, data: &[u8], width: usize) -> Result<String> {
    Ok(to_uint(ident, data, width)?.to_string())
}

pub(super) fn int_to_text(ident: Fourcc, data: &[u8], width: usize) -> Result<String> {
    Ok(to_int(ident, data, width)?.to_string())
}

fn write_uint(data: &mut Vec<u8>, width: usize, value: u64) {
    ensure_len(data, width);
    match width {
        1 => data[0] = value as u8,
        2 => BigEndian::write_u16(data, value as u16),
        4 => BigEndian::write_u32(data, value as u32),
        _ => BigEndian::write_u64(data, value),
    }
}

pub(super) fn set_uint(ident: Fourcc, data: &mut Vec<u8>, width: usize, value: u64) -> Result<()> {
    if value > uint_max(width) {
        return Err(Error::range(ident, value));
    }
    write_uint(data, width, value);
    Ok(())
}

pub(super) fn set_int(ident: Fourcc, data: &mut Vec<u8>, width: usize, value: i64) -> Result<()> {
    let (min, max) = int_bounds(width);
    if value < min || value > max {
        return Err(Error::range(ident, value));
    }
    ensure_len(data, width);
    match width {
        1 => data[0] = value as u8,
        2 => BigEndian::write_i16(data, value as i16),
        4 => BigEndian::write_i32(data, value as i32),
        _ => BigEndian::write_i64(data, value),
    }
    Ok(())
}

/// Encodes a non-negative native signed value into an unsigned payload.
pub(super) fn set_uint_from_int(
    ident: Fourcc,
    data: &mut Vec<u8>,
    width: usize,
    value: i64,
) -> Result<()> {
    if value < 0 || value as u64 > uint_max(width) {
        return Err(Error::range(ident, value));
    }
    write_uint(data, width, value as u64);
    Ok(())
}

pub(super) fn uint_set_text(
    ident: Fourcc,
    data: &mut Vec<u8>,
    width: usize,
    text: &str,
) -> Result<()> {
    let value = match parse_uint_text(text) {
        Some(v) if v <= uint_max(width) => v,
        _ => return Err(Error::invalid_string(ident, text)),
    };
    write_uint(data, width, value);
    Ok(())
}

pub(super) fn int_set_text(
    ident: Fourcc,
    data: &mut Vec<u8>,
    width: usize,
    text: &str,
) -> Result<()> {
    let (min, max) = int_bounds(width);
    let value = match parse_int_text(text) {
        Some(v) if v >= min && v <= max => v,
        _ => return Err(Error::invalid_string(ident, text)),
    };
    set_int(ident, data, width, value)
}

/// Parses an unsigned integer literal in any base the standard numeric
/// grammar recognizes: decimal, `0x` hex, `0o` or leading-zero octal, and
/// `0b` binary.
pub(super) fn parse_uint_text(text: &str) -> Option<u64> {
    let bytes = text.as_bytes();
    let (radix, digits) = if bytes.len() > 2 && bytes[0] == b'0' && (bytes[1] | 0x20) == b'x' {
        (16, &text[2..])
    } else if bytes.len() > 2 && bytes[0] == b'0' && (bytes[1] | 0x20) == b'o' {
        (8, &text[2..])
    } else if bytes.len() > 2 && bytes[0] == b'0' && (bytes[1] | 0x20) == b'b' {
        (2, &text[2..])
    } else if bytes.len() > 1 && bytes[0] == b'0' {
        (8, &text[1..])
    } else {
        (10, text)
    };
    u64::from_str_radix(digits, radix).ok()
}

/// The signed companion of [`parse_uint_text`].
pub(super) fn parse_int_text(text: &str) -> Option<i64> {
    let (negative, body) = if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    };
    let magnitude = parse_uint_text(body)?;
    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            None
        } else {
            Some(magnitude.wrapping_neg() as i64)
        }
    } else if magnitude > i64::MAX as u64 {
        None
    } else {
        Some(magnitude as i64)
    }
}

pub(super) fn ui01_to_bool(ident: Fourcc, data: &[u8]) -> Result<bool> {
    match to_uint(ident, data, 4)? {
        0 => Ok(false),
        1 => Ok(true),
        v => Err(Error::range(ident, v)),
    }
}

pub(super) fn ui01_to_uint(ident: Fourcc, data: &[u8]) -> Result<u64> {
    Ok(u64::from(ui01_to_bool(ident, data)?))
}

pub(super) fn ui01_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    Ok(ui01_to_uint(ident, data)?.to_string())
}

pub(super) fn ui01_set_bool(data: &mut Vec<u8>, value: bool) {
    write_uint(data, 4, u64::from(value));
}

pub(super) fn ui01_set_uint(ident: Fourcc, data: &mut Vec<u8>, value: u64) -> Result<()> {
    if value > 1 {
        return Err(Error::range(ident, value));
    }
    write_uint(data, 4, value);
    Ok(())
}

pub(super) fn ui01_set_int(ident: Fourcc, data: &mut Vec<u8>, value: i64) -> Result<()> {
    if value < 0 || value > 1 {
        return Err(Error::range(ident, value));
    }
    write_uint(data, 4, value as u64);
    Ok(())
}

pub(super) fn ui01_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let value = match text {
        "false" | "0" | "+0" | "-0" => false,
        "true" | "1" | "+1" => true,
        _ => return Err(Error::invalid_string(ident, text)),
    };
    ui01_set_bool(data, value);
    Ok(())
}
