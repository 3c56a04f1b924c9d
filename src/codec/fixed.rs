use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Result};

use super::util::{check_len, ensure_len, round};
use super::Fourcc;

/// One whole step of a 16.16 fixed point value.
const U16_SCALE: f64 = 65536.0;
/// One whole step of a 32.32 fixed point value.
const U32_SCALE: f64 = 4294967296.0;

pub(super) fn uf32_to_float(ident: Fourcc, data: &[u8]) -> Result<f64> {
    check_len(ident, data, 4)?;
    Ok(f64::from(BigEndian::read_u32(data)) / U16_SCALE)
}

pub(super) fn uf32_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    Ok(format!("{:.4}", uf32_to_float(ident, data)?))
}

pub(super) fn uf32_set_float(ident: Fourcc, data: &mut Vec<u8>, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 || value.trunc() > f64::from(u16::MAX) {
        return Err(Error::range(ident, value));
    }
    let raw = (value * U16_SCALE).round();
    if raw > f64::from(u32::MAX) {
        return Err(Error::range(ident, value));
    }
    ensure_len(data, 4);
    BigEndian::write_u32(data, raw as u32);
    Ok(())
}

pub(super) fn uf32_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let value: f64 = text.parse().map_err(|_| Error::invalid_string(ident, text))?;
    uf32_set_float(ident, data, value)
}

pub(super) fn sf32_to_float(ident: Fourcc, data: &[u8]) -> Result<f64> {
    check_len(ident, data, 4)?;
    Ok(f64::from(BigEndian::read_i32(data)) / U16_SCALE)
}

pub(super) fn sf32_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    Ok(format!("{:.4}", round(sf32_to_float(ident, data)?, 4)))
}

pub(super) fn sf32_set_float(ident: Fourcc, data: &mut Vec<u8>, value: f64) -> Result<()> {
    if !value.is_finite() || value < -32768.0 || value >= 32768.0 {
        return Err(Error::range(ident, value));
    }
    let raw = (value * U16_SCALE).round();
    if raw > f64::from(i32::MAX) {
        return Err(Error::range(ident, value));
    }
    ensure_len(data, 4);
    BigEndian::write_i32(data, raw as i32);
    Ok(())
}

pub(super) fn sf32_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let value: f64 = text.parse().map_err(|_| Error::invalid_string(ident, text))?;
    sf32_set_float(ident, data, value)
}

pub(super) fn uf64_to_float(ident: Fourcc, data: &[u8]) -> Result<f64> {
    check_len(ident, data, 8)?;
    Ok(BigEndian::read_u64(data) as f64 / U32_SCALE)
}

pub(super) fn uf64_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    check_len(ident, data, 8)?;
    Ok(format_uf64(BigEndian::read_u64(data)))
}

/// Formats a 32.32 payload the way the reference tool does: nine fractional
/// digits, rounded at six decimal places first. At the top of the fractional
/// range the second rounding carries into a ten digit field, which the
/// reference produces as well.
fn format_uf64(raw: u64) -> String {
    let whole = raw >> 32;
    let frac = raw & 0xFFFF_FFFF;
    let digits = round(frac as f64 / U32_SCALE * 1e9, 6);
    format!("{}.{:09.0}", whole, digits)
}

pub(super) fn uf64_set_float(ident: Fourcc, data: &mut Vec<u8>, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 || value >= U32_SCALE {
        return Err(Error::range(ident, value));
    }
    let raw = (value * U32_SCALE).round();
    ensure_len(data, 8);
    BigEndian::write_u64(data, raw as u64);
    Ok(())
}

pub(super) fn uf64_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let raw = parse_uf64(ident, text)?;
    ensure_len(data, 8);
    BigEndian::write_u64(data, raw);
    Ok(())
}

/// Parses `whole[.frac]` decimal digit runs into a 32.32 payload value.
///
/// The halves are scanned as integers rather than going through a float
/// parse, so payloads with more fractional precision than an `f64` still
/// survive a text round trip.
fn parse_uf64(ident: Fourcc, text: &str) -> Result<u64> {
    if text.starts_with('-') {
        return Err(Error::range(ident, text));
    }
    let (whole_s, frac_s) = match text.find('.') {
        Some(at) => (&text[..at], Some(&text[at + 1..])),
        None => (text, None),
    };
    let whole = parse_digits(whole_s).ok_or_else(|| Error::invalid_string(ident, text))?;
    if whole > u64::from(u32::MAX) {
        return Err(Error::range(ident, text));
    }
    let frac_raw = match frac_s {
        None => 0,
        Some(fs) => {
            let frac = parse_digits(fs).ok_or_else(|| Error::invalid_string(ident, text))?;
            (frac as f64 / 10f64.powi(fs.len() as i32) * U32_SCALE).round() as u64
        }
    };
    // A fractional run just below 1.0 can round up to a whole step.
    let whole = whole + (frac_raw >> 32);
    if whole > u64::from(u32::MAX) {
        return Err(Error::range(ident, text));
    }
    Ok(whole << 32 | (frac_raw & 0xFFFF_FFFF))
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub(super) fn sf64_to_float(ident: Fourcc, data: &[u8]) -> Result<f64> {
    check_len(ident, data, 8)?;
    Ok(BigEndian::read_i64(data) as f64 / U32_SCALE)
}

pub(super) fn sf64_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    check_len(ident, data, 8)?;
    let raw = BigEndian::read_i64(data);
    if raw < 0 {
        Ok(format!("-{}", format_uf64(raw.unsigned_abs())))
    } else {
        Ok(format_uf64(raw as u64))
    }
}

pub(super) fn sf64_set_float(ident: Fourcc, data: &mut Vec<u8>, value: f64) -> Result<()> {
    if !value.is_finite() || value < -2147483648.0 || value >= 2147483648.0 {
        return Err(Error::range(ident, value));
    }
    let raw = (value * U32_SCALE).round();
    ensure_len(data, 8);
    BigEndian::write_i64(data, raw as i64);
    Ok(())
}

/// Encodes the magnitude through the 32.32 unsigned path, then negates the
/// payload in two's-complement.
pub(super) fn sf64_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let (negative, magnitude_s) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let magnitude = parse_uf64(ident, magnitude_s)?;
    let raw = if negative {
        if magnitude > 1u64 << 63 {
            return Err(Error::range(ident, text));
        }
        magnitude.wrapping_neg() as i64
    } else {
        if magnitude > i64::MAX as u64 {
            return Err(Error::range(ident, text));
        }
        magnitude as i64
    };
    ensure_len(data, 8);
    BigEndian::write_i64(data, raw);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::ident;

    #[test]
    fn uf32_text() {
        assert_eq!(uf32_to_text(ident::UF32, &[0x00, 0x03, 0x80, 0x00]).unwrap(), "3.5000");
        assert_eq!(uf32_to_text(ident::UF32, &[0x00, 0x00, 0x00, 0x00]).unwrap(), "0.0000");
        assert_eq!(uf32_to_text(ident::UF32, &[0xFF, 0xFF, 0x00, 0x00]).unwrap(), "65535.0000");

        let mut data = Vec::new();
        uf32_set_text(ident::UF32, &mut data, "3.5000").unwrap();
        assert_eq!(data, vec![0x00, 0x03, 0x80, 0x00]);
        assert!(uf32_set_text(ident::UF32, &mut data, "65536.0").is_err());
        assert!(uf32_set_text(ident::UF32, &mut data, "-1.0").is_err());
    }

    #[test]
    fn sf32_text() {
        assert_eq!(sf32_to_text(ident::SF32, &[0xFF, 0xFF, 0x80, 0x00]).unwrap(), "-0.5000");
        assert_eq!(sf32_to_text(ident::SF32, &[0x80, 0x00, 0x00, 0x00]).unwrap(), "-32768.0000");

        let mut data = Vec::new();
        sf32_set_text(ident::SF32, &mut data, "-0.5").unwrap();
        assert_eq!(data, vec![0xFF, 0xFF, 0x80, 0x00]);
        sf32_set_text(ident::SF32, &mut data, "-32768").unwrap();
        assert_eq!(data, vec![0x80, 0x00, 0x00, 0x00]);
        assert!(sf32_set_text(ident::SF32, &mut data, "32768").is_err());
    }

    #[test]
    fn uf64_text() {
        assert_eq!(
            uf64_to_text(ident::UF64, &[0x00, 0x00, 0x00, 0x01, 0x80, 0x00, 0x00, 0x00]).unwrap(),
            "1.500000000"
        );
        assert_eq!(
            uf64_to_text(ident::UF64, &[0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]).unwrap(),
            "0.000000000"
        );

        let mut data = Vec::new();
        uf64_set_text(ident::UF64, &mut data, "1.500000000").unwrap();
        assert_eq!(data, vec![0x00, 0x00, 0x00, 0x01, 0x80, 0x00, 0x00, 0x00]);
        uf64_set_text(ident::UF64, &mut data, "4294967295.0").unwrap();
        assert_eq!(data[..4], [0xFF, 0xFF, 0xFF, 0xFF]);
        assert!(uf64_set_text(ident::UF64, &mut data, "4294967296.0").is_err());
        assert!(uf64_set_text(ident::UF64, &mut data, "-0.5").is_err());
        assert!(uf64_set_text(ident::UF64, &mut data, "1.0.0").is_err());
    }

    #[test]
    fn uf64_reference_top_of_range() {
        // The reference tool rounds the last fractional digit up into a ten
        // digit field here.
        assert_eq!(
            uf64_to_text(ident::UF64, &[0x00, 0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]).unwrap(),
            "0.1000000000"
        );
    }

    #[test]
    fn sf64_text() {
        assert_eq!(
            sf64_to_text(ident::SF64, &[0xFF, 0xFF, 0xFF, 0xFE, 0x80, 0x00, 0x00, 0x00]).unwrap(),
            "-1.500000000"
        );

        let mut data = Vec::new();
        sf64_set_text(ident::SF64, &mut data, "-1.500000000").unwrap();
        assert_eq!(data, vec![0xFF, 0xFF, 0xFF, 0xFE, 0x80, 0x00, 0x00, 0x00]);
        sf64_set_text(ident::SF64, &mut data, "0.500000000").unwrap();
        assert_eq!(data, vec![0x00, 0x00, 0x00, 0x00, 0x80, 0x00, 0x00, 0x00]);
    }
}
