use std::fmt;

use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Result};

use super::util::{check_len, ensure_len};
use super::Fourcc;

/// A UUID record as stored in a 16 byte atom payload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Uuid {
    /// The low field of the timestamp.
    pub time_low: u32,
    /// The middle field of the timestamp.
    pub time_mid: u16,
    /// The high field of the timestamp multiplexed with the version number.
    pub time_hi_and_version: u16,
    /// The high field of the clock sequence multiplexed with the variant.
    pub clock_seq_hi: u8,
    /// The low field of the clock sequence.
    pub clock_seq_low: u8,
    /// The spatially unique node identifier.
    pub node: [u8; 6],
}

impl Uuid {
    /// Reads a UUID from its big-endian 16 byte form.
    pub fn from_be_bytes(bytes: [u8; 16]) -> Self {
        Self {
            time_low: BigEndian::read_u32(&bytes[0..4]),
            time_mid: BigEndian::read_u16(&bytes[4..6]),
            time_hi_and_version: BigEndian::read_u16(&bytes[6..8]),
            clock_seq_hi: bytes[8],
            clock_seq_low: bytes[9],
            node: [bytes[10], bytes[11], bytes[12], bytes[13], bytes[14], bytes[15]],
        }
    }

    /// Returns the big-endian 16 byte form.
    pub fn to_be_bytes(&self) -> [u8; 16] {
        let mut out = [0; 16];
        BigEndian::write_u32(&mut out[0..4], self.time_low);
        BigEndian::write_u16(&mut out[4..6], self.time_mid);
        BigEndian::write_u16(&mut out[6..8], self.time_hi_and_version);
        out[8] = self.clock_seq_hi;
        out[9] = self.clock_seq_low;
        out[10..].copy_from_slice(&self.node);
        out
    }
}

impl fmt::Display for Uuid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut node = 0u64;
        for &b in self.node.iter() {
            node = node << 8 | u64::from(b);
        }
        write!(
            f,
            "{:08X}-{:04X}-{:04X}-{:02X}{:02X}-{:012X}",
            self.time_low,
            self.time_mid,
            self.time_hi_and_version,
            self.clock_seq_hi,
            self.clock_seq_low,
            node
        )
    }
}

pub(super) fn to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    check_len(ident, data, 16)?;
    let mut bytes = [0; 16];
    bytes.copy_from_slice(data);
    Ok(Uuid::from_be_bytes(bytes).to_string())
}

pub(super) fn set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let uuid = parse_uuid(text).ok_or_else(|| Error::invalid_string(ident, text))?;
    ensure_len(data, 16);
    data.copy_from_slice(&uuid.to_be_bytes());
    Ok(())
}

/// Parses the canonical hyphenated form, with or without surrounding double
/// quotes. The five groups are bounded at 32, 16, 16, 16, and 48 bits by
/// their digit counts.
fn parse_uuid(text: &str) -> Option<Uuid> {
    let bytes = text.as_bytes();
    let inner = if bytes.len() == 38 && bytes[0] == b'"' && bytes[37] == b'"' {
        &text[1..37]
    } else {
        text
    };
    if inner.len() != 36 {
        return None;
    }
    let mut groups = inner.split('-');
    let time_low = hex_group(groups.next()?, 8)? as u32;
    let time_mid = hex_group(groups.next()?, 4)? as u16;
    let time_hi = hex_group(groups.next()?, 4)? as u16;
    let clock = hex_group(groups.next()?, 4)? as u16;
    let node = hex_group(groups.next()?, 12)?;
    if groups.next().is_some() {
        return None;
    }
    Some(Uuid {
        time_low,
        time_mid,
        time_hi_and_version: time_hi,
        clock_seq_hi: (clock >> 8) as u8,
        clock_seq_low: clock as u8,
        node: [
            (node >> 40) as u8,
            (node >> 32) as u8,
            (node >> 24) as u8,
            (node >> 16) as u8,
            (node >> 8) as u8,
            node as u8,
        ],
    })
}

fn hex_group(s: &str, len: usize) -> Option<u64> {
    if s.len() != len || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u64::from_str_radix(s, 16).ok()
}
