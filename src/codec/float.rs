use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Result};

use super::util::{check_len, ensure_len};
use super::Fourcc;

pub(super) fn fp32_to_float(ident: Fourcc, data: &[u8]) -> Result<f64> {
    check_len(ident, data, 4)?;
    Ok(f64::from(f32::from_bits(BigEndian::read_u32(data))))
}

pub(super) fn fp64_to_float(ident: Fourcc, data: &[u8]) -> Result<f64> {
    check_len(ident, data, 8)?;
    Ok(f64::from_bits(BigEndian::read_u64(data)))
}

pub(super) fn fp32_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    Ok(format_exponential(fp32_to_float(ident, data)?, 8))
}

pub(super) fn fp64_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    Ok(format_exponential(fp64_to_float(ident, data)?, 17))
}

/// Formats in the C `%0.*E` shape: one digit before the point, an explicit
/// exponent sign, and at least two exponent digits.
fn format_exponential(value: f64, precision: usize) -> String {
    let s = format!("{:.*E}", precision, value);
    match s.split_once('E') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exponent),
            };
            format!("{}E{}{:0>2}", mantissa, sign, digits)
        }
        None => s,
    }
}

pub(super) fn fp32_set_float(ident: Fourcc, data: &mut Vec<u8>, value: f64) -> Result<()> {
    if !value.is_finite() || value.abs() > f64::from(f32::MAX) {
        return Err(Error::range(ident, value));
    }
    ensure_len(data, 4);
    BigEndian::write_u32(data, (value as f32).to_bits());
    Ok(())
}

pub(super) fn fp64_set_float(ident: Fourcc, data: &mut Vec<u8>, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::range(ident, value));
    }
    ensure_len(data, 8);
    BigEndian::write_u64(data, value.to_bits());
    Ok(())
}

pub(super) fn fp32_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let value: f32 = text.parse().map_err(|_| Error::invalid_string(ident, text))?;
    fp32_set_float(ident, data, f64::from(value))
}

pub(super) fn fp64_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let value: f64 = text.parse().map_err(|_| Error::invalid_string(ident, text))?;
    fp64_set_float(ident, data, value)
}
