//! The closed set of ADE type identifiers.

use std::array::TryFromSliceError;
use std::convert::TryInto;
use std::fmt::{self, Write};
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

/// (`UI01`) A boolean stored as a 4 byte unsigned integer, 0 or 1.
pub const UI01: Fourcc = Fourcc(*b"UI01");
/// (`UI08`) An 8 bit unsigned integer.
pub const UI08: Fourcc = Fourcc(*b"UI08");
/// (`UI16`) A 16 bit unsigned integer.
pub const UI16: Fourcc = Fourcc(*b"UI16");
/// (`UI32`) A 32 bit unsigned integer.
pub const UI32: Fourcc = Fourcc(*b"UI32");
/// (`UI64`) A 64 bit unsigned integer.
pub const UI64: Fourcc = Fourcc(*b"UI64");
/// (`SI08`) An 8 bit two's-complement signed integer.
pub const SI08: Fourcc = Fourcc(*b"SI08");
/// (`SI16`) A 16 bit two's-complement signed integer.
pub const SI16: Fourcc = Fourcc(*b"SI16");
/// (`SI32`) A 32 bit two's-complement signed integer.
pub const SI32: Fourcc = Fourcc(*b"SI32");
/// (`SI64`) A 64 bit two's-complement signed integer.
pub const SI64: Fourcc = Fourcc(*b"SI64");
/// (`FP32`) An IEEE 754 single precision floating point value.
pub const FP32: Fourcc = Fourcc(*b"FP32");
/// (`FP64`) An IEEE 754 double precision floating point value.
pub const FP64: Fourcc = Fourcc(*b"FP64");
/// (`UF32`) An unsigned 16.16 fixed point value.
pub const UF32: Fourcc = Fourcc(*b"UF32");
/// (`UF64`) An unsigned 32.32 fixed point value.
pub const UF64: Fourcc = Fourcc(*b"UF64");
/// (`SF32`) A signed 16.16 fixed point value.
pub const SF32: Fourcc = Fourcc(*b"SF32");
/// (`SF64`) A signed 32.32 fixed point value.
pub const SF64: Fourcc = Fourcc(*b"SF64");
/// (`UR32`) An unsigned fraction of two 16 bit halves, numerator first.
pub const UR32: Fourcc = Fourcc(*b"UR32");
/// (`UR64`) An unsigned fraction of two 32 bit halves, numerator first.
pub const UR64: Fourcc = Fourcc(*b"UR64");
/// (`SR32`) A signed fraction of two 16 bit halves, numerator first.
pub const SR32: Fourcc = Fourcc(*b"SR32");
/// (`SR64`) A signed fraction of two 32 bit halves, numerator first.
pub const SR64: Fourcc = Fourcc(*b"SR64");
/// (`FC32`) A four character code.
pub const FC32: Fourcc = Fourcc(*b"FC32");
/// (`IP32`) One or more IPv4 addresses, 4 bytes each.
pub const IP32: Fourcc = Fourcc(*b"IP32");
/// (`IPAD`) A null terminated textual IPv4 or IPv6 address.
pub const IPAD: Fourcc = Fourcc(*b"IPAD");
/// (`ENUM`) An enumeration constant, identical to [`SI32`].
pub const ENUM: Fourcc = Fourcc(*b"ENUM");
/// (`UUID`) A 16 byte universally unique identifier.
pub const UUID: Fourcc = Fourcc(*b"UUID");
/// (`CSTR`) A null terminated 8 bit string with escape rules.
pub const CSTR: Fourcc = Fourcc(*b"CSTR");
/// (`USTR`) A UTF-32 big-endian string, 4 bytes per code point.
pub const USTR: Fourcc = Fourcc(*b"USTR");
/// (`DATA`) Raw binary data.
pub const DATA: Fourcc = Fourcc(*b"DATA");
/// (`CNCT`) Alias of [`DATA`].
pub const CNCT: Fourcc = Fourcc(*b"CNCT");
/// (`cnct`) Lowercase alias of [`DATA`].
pub const CNCT_LOWER: Fourcc = Fourcc(*b"cnct");
/// (`NULL`) An empty payload.
pub const NULL: Fourcc = Fourcc(*b"NULL");
/// (`CONT`) A container of child atoms, no scalar payload of its own.
pub const CONT: Fourcc = Fourcc(*b"CONT");

/// A 4 byte ADE type identifier (four character code).
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fourcc(pub [u8; 4]);

impl Deref for Fourcc {
    type Target = [u8; 4];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Fourcc {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl FromStr for Fourcc {
    type Err = TryFromSliceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Fourcc(s.as_bytes().try_into()?))
    }
}

impl fmt::Debug for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Fourcc(")?;
        for c in self.0.iter().map(|b| char::from(*b)) {
            f.write_char(c)?;
        }
        f.write_str(")")?;
        Ok(())
    }
}

impl fmt::Display for Fourcc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.iter().map(|b| char::from(*b)) {
            f.write_char(c)?;
        }
        Ok(())
    }
}
