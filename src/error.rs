use std::borrow::Cow;
use std::{error, fmt};

use crate::codec::{Fourcc, NativeKind};

/// Type alias for the result of codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Kinds of errors that may occur while converting atom data.
#[derive(Debug)]
pub enum ErrorKind {
    /// The type tag is not registered. Contains the tag.
    UnknownType(Fourcc),
    /// The type has no decoder for the requested native kind. Contains the
    /// type tag and the native kind.
    NoDecoder(Fourcc, NativeKind),
    /// The type has no encoder for the offered native kind. Contains the
    /// type tag and the native kind.
    NoEncoder(Fourcc, NativeKind),
    /// The payload length is not what the type expects. Contains the wanted
    /// and the actual length.
    ByteCount(usize, usize),
    /// A value exceeds the representable range of the type.
    Range,
    /// Text does not match the type's accepted form.
    InvalidString,
    /// A malformed escape sequence, or end of input in the middle of one.
    InvalidEscape,
    /// A character that must appear escaped was found raw. Contains the
    /// character.
    UnescapedChar(char),
    /// A fractional value with a denominator of zero.
    ZeroDenominator(Fourcc),
    /// A null terminated payload without its terminator.
    MissingTerminator(Fourcc),
    /// A null terminated payload with an interior null byte.
    EmbeddedNull(Fourcc),
}

/// Any error that may occur while converting atom data.
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// A human readable string describing the error.
    pub description: Cow<'static, str>,
}

impl Error {
    /// Creates a new error of `kind` with the `description`.
    pub fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Error {
        Error { kind, description: description.into() }
    }

    pub(crate) fn unknown_type(ident: Fourcc) -> Error {
        Error::new(ErrorKind::UnknownType(ident), format!("unknown ADE type '{ident}'"))
    }

    pub(crate) fn no_decoder(ident: Fourcc, native: NativeKind) -> Error {
        Error::new(
            ErrorKind::NoDecoder(ident, native),
            format!("no decoder exists to convert ADE type '{ident}' to native type '{native}'"),
        )
    }

    pub(crate) fn no_encoder(ident: Fourcc, native: NativeKind) -> Error {
        Error::new(
            ErrorKind::NoEncoder(ident, native),
            format!("no encoder exists to convert native type '{native}' to ADE type '{ident}'"),
        )
    }

    pub(crate) fn byte_count(ident: Fourcc, want: usize, got: usize) -> Error {
        Error::new(
            ErrorKind::ByteCount(want, got),
            format!("invalid byte count for ADE type {ident}: want {want}, got {got}"),
        )
    }

    pub(crate) fn range(ident: Fourcc, value: impl fmt::Display) -> Error {
        Error::new(ErrorKind::Range, format!("value out of range for ADE type {ident}: {value}"))
    }

    pub(crate) fn invalid_string(ident: Fourcc, value: impl fmt::Display) -> Error {
        Error::new(
            ErrorKind::InvalidString,
            format!("invalid string value for ADE type {ident}: \"{value}\""),
        )
    }

    pub(crate) fn invalid_escape(ident: Fourcc, sequence: impl fmt::Display) -> Error {
        Error::new(
            ErrorKind::InvalidEscape,
            format!("invalid escape sequence in {ident} value: {sequence}"),
        )
    }

    pub(crate) fn unescaped_char(ident: Fourcc, c: char) -> Error {
        Error::new(
            ErrorKind::UnescapedChar(c),
            format!("character 0x{:02X} must be escaped in {} value", c as u32, ident),
        )
    }

    pub(crate) fn zero_denominator(ident: Fourcc) -> Error {
        Error::new(
            ErrorKind::ZeroDenominator(ident),
            format!("fractional type {ident} forbids zero in denominator"),
        )
    }

    pub(crate) fn missing_terminator(ident: Fourcc) -> Error {
        Error::new(
            ErrorKind::MissingTerminator(ident),
            format!("{ident} data lacks null byte terminator"),
        )
    }

    pub(crate) fn embedded_null(ident: Fourcc) -> Error {
        Error::new(
            ErrorKind::EmbeddedNull(ident),
            format!("{ident} data contains illegal embedded null byte"),
        )
    }
}

impl error::Error for Error {}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{}", self.description)
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.description.is_empty() {
            write!(f, "{:?}", self.kind)
        } else {
            write!(f, "{}", self.description)
        }
    }
}
