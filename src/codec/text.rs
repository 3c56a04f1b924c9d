use std::str::Chars;

use byteorder::{BigEndian, ByteOrder};

use crate::{Error, Result};

use super::util::hex_val;
use super::Fourcc;

/// Returns whether the character may only appear escaped in atom text.
fn must_escape(c: char) -> bool {
    c < ' ' || c == '\u{7F}' || c == '"' || c == '\\'
}

fn push_hex_escape(out: &mut String, value: u32) {
    out.push_str(&format!("\\x{:02X}", value));
}

/// One unit produced by the escape grammar.
enum Escape {
    /// A character escape (`\n`, `\r`, `\\`, `\"`).
    Char(u8),
    /// A two digit hex escape (`\xHH`).
    Hex(u8),
}

/// Consumes one escape sequence after the introducing backslash.
fn parse_escape(ident: Fourcc, chars: &mut Chars<'_>) -> Result<Escape> {
    match chars.next() {
        None => Err(Error::invalid_escape(ident, "EOF during escape sequence")),
        Some('n') => Ok(Escape::Char(b'\n')),
        Some('r') => Ok(Escape::Char(b'\r')),
        Some('\\') => Ok(Escape::Char(b'\\')),
        Some('"') => Ok(Escape::Char(b'"')),
        Some('x') => {
            let hi = match chars.next() {
                Some(c) => c,
                None => return Err(Error::invalid_escape(ident, "EOF during hex escape")),
            };
            let lo = match chars.next() {
                Some(c) => c,
                None => return Err(Error::invalid_escape(ident, "EOF during hex escape")),
            };
            match (hex_char(hi), hex_char(lo)) {
                (Some(h), Some(l)) => Ok(Escape::Hex(h << 4 | l)),
                _ => Err(Error::invalid_escape(ident, format!("\\x{}{}", hi, lo))),
            }
        }
        Some(other) => Err(Error::invalid_escape(ident, format!("\\{}", other))),
    }
}

fn hex_char(c: char) -> Option<u8> {
    if c.is_ascii() {
        hex_val(c as u8)
    } else {
        None
    }
}

/// Attempts to decode a multi byte UTF-8 sequence starting at `at`.
fn utf8_at(bytes: &[u8], at: usize) -> Option<(char, usize)> {
    let len = match bytes[at] {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => return None,
    };
    let end = at + len;
    if end > bytes.len() {
        return None;
    }
    let s = std::str::from_utf8(&bytes[at..end]).ok()?;
    s.chars().next().map(|c| (c, len))
}

/// Decodes a null terminated 8 bit payload into escaped text. Bytes that do
/// not form a valid UTF-8 sequence come out as `\xHH`, so the result is
/// always valid UTF-8.
pub(super) fn cstr_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    let body = match data.split_last() {
        Some((&0, body)) => body,
        _ => return Err(Error::missing_terminator(ident)),
    };
    if body.contains(&0) {
        return Err(Error::embedded_null(ident));
    }
    let mut out = String::with_capacity(body.len());
    let mut at = 0;
    while at < body.len() {
        let b = body[at];
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\r' => out.push_str("\\r"),
            b'\n' => out.push_str("\\n"),
            0x01..=0x1F | 0x7F => push_hex_escape(&mut out, u32::from(b)),
            0x20..=0x7E => out.push(char::from(b)),
            _ => {
                if let Some((c, len)) = utf8_at(body, at) {
                    out.push(c);
                    at += len;
                    continue;
                }
                push_hex_escape(&mut out, u32::from(b));
            }
        }
        at += 1;
    }
    Ok(out)
}

/// Encodes escaped text into a null terminated 8 bit payload.
pub(super) fn cstr_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let mut payload = Vec::with_capacity(text.len() + 1);
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match parse_escape(ident, &mut chars)? {
                // A literal null would collide with the terminator, the
                // escape stays in the payload as text.
                Escape::Hex(0) => payload.extend_from_slice(b"\\x00"),
                Escape::Char(b) | Escape::Hex(b) => payload.push(b),
            }
        } else if must_escape(c) {
            return Err(Error::unescaped_char(ident, c));
        } else {
            let mut buf = [0; 4];
            payload.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }
    payload.push(0);
    *data = payload;
    Ok(())
}

pub(super) fn cstr_set_text_delimited(
    ident: Fourcc,
    data: &mut Vec<u8>,
    text: &str,
) -> Result<()> {
    cstr_set_text(ident, data, strip_quotes(ident, text)?)
}

/// Decodes a UTF-32 big-endian payload into escaped text.
pub(super) fn ustr_to_text(ident: Fourcc, data: &[u8]) -> Result<String> {
    if data.len() % 4 != 0 {
        return Err(Error::byte_count(ident, data.len() - data.len() % 4, data.len()));
    }
    let mut out = String::with_capacity(data.len() / 4);
    for chunk in data.chunks(4) {
        let cp = BigEndian::read_u32(chunk);
        match cp {
            0x5C => out.push_str("\\\\"),
            0x22 => out.push_str("\\\""),
            0x0D => out.push_str("\\r"),
            0x0A => out.push_str("\\n"),
            _ => match std::char::from_u32(cp) {
                Some(c) if c.is_control() => push_hex_escape(&mut out, cp),
                Some(c) => out.push(c),
                None => return Err(Error::range(ident, format!("0x{:08X}", cp))),
            },
        }
    }
    Ok(out)
}

/// Encodes escaped text into a UTF-32 big-endian payload, one 4 byte code
/// point per character and no terminator. Unlike CSTR a `\x00` becomes a
/// real zero code point.
pub(super) fn ustr_set_text(ident: Fourcc, data: &mut Vec<u8>, text: &str) -> Result<()> {
    let mut payload = Vec::with_capacity(text.len() * 4);
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        let cp = if c == '\\' {
            match parse_escape(ident, &mut chars)? {
                Escape::Char(b) | Escape::Hex(b) => u32::from(b),
            }
        } else if must_escape(c) {
            return Err(Error::unescaped_char(ident, c));
        } else {
            c as u32
        };
        let mut buf = [0; 4];
        BigEndian::write_u32(&mut buf, cp);
        payload.extend_from_slice(&buf);
    }
    *data = payload;
    Ok(())
}

pub(super) fn ustr_set_text_delimited(
    ident: Fourcc,
    data: &mut Vec<u8>,
    text: &str,
) -> Result<()> {
    ustr_set_text(ident, data, strip_quotes(ident, text)?)
}

/// The delimited encoders require surrounding double quotes.
fn strip_quotes<'a>(ident: Fourcc, text: &'a str) -> Result<&'a str> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[0] != b'"' || bytes[bytes.len() - 1] != b'"' {
        return Err(Error::invalid_string(ident, text));
    }
    Ok(&text[1..text.len() - 1])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::codec::ident;

    #[test]
    fn cstr_decode_escapes() {
        assert_eq!(cstr_to_text(ident::CSTR, b"Hello\n\0").unwrap(), "Hello\\n");
        assert_eq!(cstr_to_text(ident::CSTR, b"a\"b\\c\0").unwrap(), "a\\\"b\\\\c");
        assert_eq!(cstr_to_text(ident::CSTR, &[0x07, 0x7F, 0x00]).unwrap(), "\\x07\\x7F");
        assert_eq!(cstr_to_text(ident::CSTR, &[0x00]).unwrap(), "");
    }

    #[test]
    fn cstr_terminator_errors() {
        let err = cstr_to_text(ident::CSTR, b"Hello").unwrap_err();
        assert_eq!(err.description, "CSTR data lacks null byte terminator");
        let err = cstr_to_text(ident::CSTR, &[0x48, 0x00, 0x65, 0x00]).unwrap_err();
        assert_eq!(err.description, "CSTR data contains illegal embedded null byte");
        assert!(cstr_to_text(ident::CSTR, &[]).is_err());
    }

    #[test]
    fn cstr_invalid_utf8_becomes_hex() {
        // A stray continuation byte and a truncated 2 byte sequence.
        assert_eq!(cstr_to_text(ident::CSTR, &[0x80, 0x61, 0x00]).unwrap(), "\\x80a");
        assert_eq!(cstr_to_text(ident::CSTR, &[0xC3, 0x00]).unwrap(), "\\xC3");
        // A valid 2 byte sequence decodes.
        assert_eq!(cstr_to_text(ident::CSTR, &[0xC3, 0xA9, 0x00]).unwrap(), "é");
        let decoded = cstr_to_text(ident::CSTR, &[0xF0, 0x9F, 0x92, 0xBE, 0x00]).unwrap();
        assert_eq!(decoded, "💾");
    }

    #[test]
    fn cstr_encode_escapes() {
        let mut data = Vec::new();
        cstr_set_text(ident::CSTR, &mut data, "Hello\\n").unwrap();
        assert_eq!(data, b"Hello\n\0".to_vec());
        cstr_set_text(ident::CSTR, &mut data, "\\x41\\\\").unwrap();
        assert_eq!(data, b"A\\\0".to_vec());
        cstr_set_text(ident::CSTR, &mut data, "é").unwrap();
        assert_eq!(data, vec![0xC3, 0xA9, 0x00]);
    }

    #[test]
    fn cstr_null_escape_stays_text() {
        let mut data = Vec::new();
        cstr_set_text(ident::CSTR, &mut data, "a\\x00b").unwrap();
        assert_eq!(data, b"a\\x00b\0".to_vec());
    }

    #[test]
    fn cstr_encode_failures() {
        let mut data = Vec::new();
        let err = cstr_set_text(ident::CSTR, &mut data, "a\"b").unwrap_err();
        assert_eq!(err.description, "character 0x22 must be escaped in CSTR value");
        assert!(cstr_set_text(ident::CSTR, &mut data, "line\nbreak").is_err());
        let err = cstr_set_text(ident::CSTR, &mut data, "bad\\q").unwrap_err();
        assert_eq!(err.description, "invalid escape sequence in CSTR value: \\q");
        let err = cstr_set_text(ident::CSTR, &mut data, "trailing\\").unwrap_err();
        assert_eq!(err.description, "invalid escape sequence in CSTR value: EOF during escape sequence");
        let err = cstr_set_text(ident::CSTR, &mut data, "short\\x4").unwrap_err();
        assert_eq!(err.description, "invalid escape sequence in CSTR value: EOF during hex escape");
        assert!(cstr_set_text(ident::CSTR, &mut data, "bad\\xZZ").is_err());
    }

    #[test]
    fn cstr_delimited() {
        let mut data = Vec::new();
        cstr_set_text_delimited(ident::CSTR, &mut data, "\"hi\"").unwrap();
        assert_eq!(data, b"hi\0".to_vec());
        assert!(cstr_set_text_delimited(ident::CSTR, &mut data, "hi").is_err());
        assert!(cstr_set_text_delimited(ident::CSTR, &mut data, "\"").is_err());
    }

    #[test]
    fn ustr_code_points() {
        let data = [0x00, 0x00, 0x00, 0x61, 0x00, 0x01, 0xF4, 0xBE];
        assert_eq!(ustr_to_text(ident::USTR, &data).unwrap(), "a\u{1F4BE}");

        let mut out = Vec::new();
        ustr_set_text(ident::USTR, &mut out, "a\u{1F4BE}").unwrap();
        assert_eq!(out, data.to_vec());
    }

    #[test]
    fn ustr_escapes() {
        let data = [0x00, 0x00, 0x00, 0x0A, 0x00, 0x00, 0x00, 0x07];
        assert_eq!(ustr_to_text(ident::USTR, &data).unwrap(), "\\n\\x07");

        let mut out = Vec::new();
        ustr_set_text(ident::USTR, &mut out, "\\n\\x07").unwrap();
        assert_eq!(out, data.to_vec());

        // Unlike CSTR, an escaped null is a real code point.
        ustr_set_text(ident::USTR, &mut out, "\\x00").unwrap();
        assert_eq!(out, vec![0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn ustr_invalid_payload() {
        assert!(ustr_to_text(ident::USTR, &[0x00, 0x00, 0x61]).is_err());
        // A surrogate is not a valid code point.
        assert!(ustr_to_text(ident::USTR, &[0x00, 0x00, 0xD8, 0x00]).is_err());
    }
}
