use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Result};

use super::util::{check_len, ensure_len};
use super::Fourcc;

fn uint_half_max(half: usize) -> u64 {
    if half == 2 {
        u64::from(u16::MAX)
    } else {
        u64::from(u32::MAX)
    }
}

fn int_half_bounds(half: usize) -> (i64, i64) {
    if half == 2 {
        (i64::from(i16::MIN), i64::from(i16::MAX))
    } else {
        (i64::from(i32::MIN), i64::from(i32::MAX))
    }
}

fn read_uint_half(data: &[u8], half: usize, index: usize) -> u64 {
    let at = index * half;
    if half == 2 {
        u64::from(BigEndian::read_u16(&data[at..]))
    } else {
        u64::from(BigEndian::read_u32(&data[at..]))
    }
}

fn read_int_half(data: &[u8], half: usize, index: usize) -> i64 {
    let at = index * half;
    if half == 2 {
        i64::from(BigEndian::read_i16(&data[at..]))
    } else {
        i64::from(BigEndian::read_i32(&data[at..]))
    }
}

pub(super) fn ur_to_seq(ident: Fourcc, data: &[u8], half: usize) -> Result<Vec<u64>> {
    check_len(ident, data, half * 2)?;
    Ok(vec![read_uint_half(data, half, 0), read_uint_half(data, half, 1)])
}

pub(super) fn sr_to_seq(ident: Fourcc, data: &[u8], half: usize) -> Result<Vec<i64>> {
    check_len(ident, data, half * 2)?;
    Ok(vec![read_int_half(data, half, 0), read_int_half(data, half, 1)])
}

pub(super) fn ur_to_text(ident: Fourcc, data: &[u8], half: usize) -> Result<String> {
    let seq = ur_to_seq(ident, data, half)?;
    Ok(format!("{}/{}", seq[0], seq[1]))
}

pub(super) fn sr_to_text(ident: Fourcc, data: &[u8], half: usize) -> Result<String> {
    let seq = sr_to_seq(ident, data, half)?;
    Ok(format!("{}/{}", seq[0], seq[1]))
}

fn set_ur(ident: Fourcc, data: &mut Vec<u8>, half: usize, num: u64, den: u64) -> Result<()> {
    if num > uint_half_max(half) {
        return Err(Error::range(ident, num));
    }
    if den > uint_half_max(half) {
        return Err(Error::range(ident, den));
    }
    if den == 0 {
        return Err(Error::zero_denominator(ident));
    }
    ensure_len(data, half * 2);
    if half == 2 {
        BigEndian::write_u16(&mut data[..2], num as u16);
        BigEndian::write_u16(&mut data[2..], den as u16);
    } else {
        BigEndian::write_u32(&mut data[..4], num as u32);
        BigEndian::write_u32(&mut data[4..], den as u32);
    }
    Ok(())
}

fn set_sr(ident: Fourcc, data: &mut Vec<u8>, half: usize, num: i64, den: i64) -> Result<()> {
    let (min, max) = int_half_bounds(half);
    if num < min || num > max {
        return Err(Error::range(ident, num));
    }
    if den < min || den > max {
        return Err(Error::range(ident, den));
    }
    if den == 0 {
        return Err(Error::zero_denominator(ident));
    }
    ensure_len(data, half * 2);
    if half == 2 {
        BigEndian::write_i16(&mut data[..2], num as i16);
        BigEndian::write_i16(&mut data[2..], den as i16);
    } else {
        BigEndian::write_i32(&mut data[..4], num as i32);
        BigEndian::write_i32(&mut data[4..], den as i32);
    }
    Ok(())
}

pub(super) fn ur_set_seq(
    ident: Fourcc,
    data: &mut Vec<u8>,
    half: usize,
    seq: &[u64],
) -> Result<()> {
    if seq.len() != 2 {
        return Err(Error::range(
            ident,
            format!("expected a [numerator, denominator] pair, got {} values", seq.len()),
        ));
    }
    set_ur(ident, data, half, seq[0], seq[1])
}

pub(super) fn sr_set_seq(
    ident: Fourcc,
    data: &mut Vec<u8>,
    half: usize,
    seq: &[i64],
) -> Result<()> {
    if seq.len() != 2 {
        return Err(Error::range(
            ident,
            format!("expected a [numerator, denominator] pair, got {} values", seq.len()),
        ));
    }
    set_sr(ident, data, half, seq[0], seq[1])
}

/// Scans `num/den`, rejecting anything left over after the denominator.
fn split_fraction(text: &str) -> Option<(&str, &str)> {
    let at = text.find('/')?;
    Some((&text[..at], &text[at + 1..]))
}

pub(super) fn ur_set_text(
    ident: Fourcc,
    data: &mut Vec<u8>,
    half: usize,
    text: &str,
) -> Result<()> {
    let parsed = split_fraction(text)
        .and_then(|(num_s, den_s)| Some((parse_decimal_uint(num_s)?, parse_decimal_uint(den_s)?)));
    match parsed {
        Some((num, den)) => set_ur(ident, data, half, num, den),
        None => Err(Error::invalid_string(ident, text)),
    }
}

pub(super) fn sr_set_text(
    ident: Fourcc,
    data: &mut Vec<u8>,
    half: usize,
    text: &str,
) -> Result<()> {
    let parsed = split_fraction(text)
        .and_then(|(num_s, den_s)| Some((parse_decimal_int(num_s)?, parse_decimal_int(den_s)?)));
    match parsed {
        Some((num, den)) => set_sr(ident, data, half, num, den),
        None => Err(Error::invalid_string(ident, text)),
    }
}

fn parse_decimal_uint(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_decimal_int(s: &str) -> Option<i64> {
    let body = match s.strip_prefix('-').or_else(|| s.strip_prefix('+')) {
        Some(rest) => rest,
        None => s,
    };
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
