use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Result};

use super::util::{check_len, ensure_len, parse_hex, push_hex};
use super::Fourcc;

/// Returns whether the byte is in the printable range [0x21, 0x7F).
fn printable(b: u8) -> bool {
    (0x21..=0x7E).contains(&b)
}

/// Returns whether all four bytes can be shown in the bare character form.
/// Quotes would collide with the delimiter and a leading `#` with the
/// container grammar's comment marker, so those fall back to hex.
fn plain(data: &[u8]) -> bool {
    data.iter().all(|&b| printable(b) && b != b'\'' && b != b'"') && data[0] != b'#'
}

fn hex_form(data: &[u8]) -> String {
    let mut out = String::with_capacity(10);
    out.push_str("0x");
    push_hex(&mut out, data);
    out
}

pub(super) fn to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    check_len(ident, data, 4)?;
    if plain(data) {
        Ok(data.iter().map(|&b| char::from(b)).collect())
    } else {
        Ok(hex_form(data))
    }
}

pub(super) fn to_text_delimited(ident: Fourcc, data: &[u8]) -> Result<String> {
    check_len(ident, data, 4)?;
    if plain(data) {
        let mut out = String::with_capacity(6);
        out.push('\'');
        data.iter().for_each(|&b| out.push(char::from(b)));
        out.push('\'');
        Ok(out)
    } else {
        Ok(hex_form(data))
    }
}

pub(super) fn to_uint(ident: Fourcc, data: &[u8]) -> Result<u64> {
    check_len(ident, data, 4)?;
    Ok(u64::from(BigEndian::read_u32(data)))
}

pub(super) fn set_uint(ident: Fourcc, data: &mut Vec<u8>, value: u64) -> Result<()> {
    if value > u64::from(u32::MAX) {
        return Err(Error::range(ident, value));
    }
    ensure_len(data, 4);
    BigEndian::write_u32(data, value as u32);
    Ok(())
}

/// Accepts the four shapes of a four character code: bare (`abcd`), single
/// quoted (`'abcd'`), bare hex (`61626364`), and prefixed hex
/// (`0x61626364`).
pub(super) fn set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let bytes = text.as_bytes();
    let code = match bytes.len() {
        4 => bare(bytes),
        6 if bytes[0] == b'\'' && bytes[5] == b'\'' => bare(&bytes[1..5]),
        8 => hex_code(text),
        10 => match text.strip_prefix("0x") {
            Some(digits) => hex_code(digits),
            None => None,
        },
        _ => None,
    };
    match code {
        Some(code) => {
            ensure_len(data, 4);
            data.copy_from_slice(&code);
            Ok(())
        }
        None => Err(Error::invalid_string(ident, text)),
    }
}

fn bare(bytes: &[u8]) -> Option<[u8; 4]> {
    if bytes.len() == 4 && bytes.iter().all(|&b| printable(b)) {
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    } else {
        None
    }
}

fn hex_code(digits: &str) -> Option<[u8; 4]> {
    let bytes = parse_hex(digits)?;
    if bytes.len() == 4 {
        Some([bytes[0], bytes[1], bytes[2], bytes[3]])
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::ident;

    #[test]
    fn plain_and_hex_forms() {
        assert_eq!(to_text(ident::FC32, b"abcd").unwrap(), "abcd");
        assert_eq!(to_text_delimited(ident::FC32, b"abcd").unwrap(), "'abcd'");
        // A leading comment marker forces the hex form.
        assert_eq!(to_text(ident::FC32, b"#abc").unwrap(), "0x23616263");
        assert_eq!(to_text_delimited(ident::FC32, b"#abc").unwrap(), "0x23616263");
        // So do spaces, quotes, and unprintable bytes.
        assert_eq!(to_text(ident::FC32, b"ab d").unwrap(), "0x61622064");
        assert_eq!(to_text(ident::FC32, b"a'cd").unwrap(), "0x61276364");
        assert_eq!(to_text(ident::FC32, &[0x00, 0x61, 0x62, 0x63]).unwrap(), "0x00616263");
    }

    #[test]
    fn accepted_input_shapes() {
        let mut data = Vec::new();
        set_text(ident::FC32, &mut data, "abcd").unwrap();
        assert_eq!(data, b"abcd");
        set_text(ident::FC32, &mut data, "'wxyz'").unwrap();
        assert_eq!(data, b"wxyz");
        set_text(ident::FC32, &mut data, "61626364").unwrap();
        assert_eq!(data, b"abcd");
        set_text(ident::FC32, &mut data, "0x23616263").unwrap();
        assert_eq!(data, b"#abc");

        assert!(set_text(ident::FC32, &mut data, "abc").is_err());
        assert!(set_text(ident::FC32, &mut data, "ab d").is_err());
        assert!(set_text(ident::FC32, &mut data, "'abcd").is_err());
        assert!(set_text(ident::FC32, &mut data, "6162636g").is_err());
        assert!(set_text(ident::FC32, &mut data, "0x616263").is_err());
    }
}
