//! Per-type codecs for the data stored in an atom's payload.
//!
//! Every registered type tag maps to one codec kind. A [`Codec`] bundles
//! the tag with a mutable reference to the caller-owned payload buffer and
//! dispatches each conversion to the type's implementation. Conversions a
//! type does not support fail with a uniform no-codec error naming the tag
//! and the requested native kind.

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

use crate::{Error, Result};

pub use ident::Fourcc;
pub use uuid::Uuid;

/// A module for working with ADE type identifiers.
pub mod ident;

mod data;
mod fc32;
mod fixed;
mod float;
mod frac;
mod int;
mod ip;
mod text;
mod util;
mod uuid;

lazy_static! {
    /// Lazily initialized static reference to the registered type table.
    static ref CODECS: HashMap<Fourcc, AdeType> = codec_table();
}

fn codec_table() -> HashMap<Fourcc, AdeType> {
    let mut table = HashMap::new();
    table.insert(ident::UI01, AdeType::Ui01);
    table.insert(ident::UI08, AdeType::Ui08);
    table.insert(ident::UI16, AdeType::Ui16);
    table.insert(ident::UI32, AdeType::Ui32);
    table.insert(ident::UI64, AdeType::Ui64);
    table.insert(ident::SI08, AdeType::Si08);
    table.insert(ident::SI16, AdeType::Si16);
    table.insert(ident::SI32, AdeType::Si32);
    table.insert(ident::SI64, AdeType::Si64);
    table.insert(ident::FP32, AdeType::Fp32);
    table.insert(ident::FP64, AdeType::Fp64);
    table.insert(ident::UF32, AdeType::Uf32);
    table.insert(ident::UF64, AdeType::Uf64);
    table.insert(ident::SF32, AdeType::Sf32);
    table.insert(ident::SF64, AdeType::Sf64);
    table.insert(ident::UR32, AdeType::Ur32);
    table.insert(ident::UR64, AdeType::Ur64);
    table.insert(ident::SR32, AdeType::Sr32);
    table.insert(ident::SR64, AdeType::Sr64);
    table.insert(ident::FC32, AdeType::Fc32);
    table.insert(ident::IP32, AdeType::Ip32);
    table.insert(ident::IPAD, AdeType::Ipad);
    // ENUM is SI32 in every respect but the tag in error messages.
    table.insert(ident::ENUM, AdeType::Si32);
    table.insert(ident::UUID, AdeType::Uuid);
    table.insert(ident::CSTR, AdeType::Cstr);
    table.insert(ident::USTR, AdeType::Ustr);
    table.insert(ident::DATA, AdeType::Data);
    table.insert(ident::CNCT, AdeType::Data);
    table.insert(ident::CNCT_LOWER, AdeType::Data);
    table.insert(ident::NULL, AdeType::Null);
    table.insert(ident::CONT, AdeType::Cont);
    table
}

/// The codec kind backing a registered type tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AdeType {
    Ui01,
    Ui08,
    Ui16,
    Ui32,
    Ui64,
    Si08,
    Si16,
    Si32,
    Si64,
    Fp32,
    Fp64,
    Uf32,
    Uf64,
    Sf32,
    Sf64,
    Ur32,
    Ur64,
    Sr32,
    Sr64,
    Fc32,
    Ip32,
    Ipad,
    Uuid,
    Cstr,
    Ustr,
    Data,
    Null,
    Cont,
}

impl AdeType {
    /// The fixed payload width in bytes, or `None` for variable width types.
    fn width(self) -> Option<usize> {
        match self {
            AdeType::Ui08 | AdeType::Si08 => Some(1),
            AdeType::Ui16 | AdeType::Si16 => Some(2),
            AdeType::Ui01
            | AdeType::Ui32
            | AdeType::Si32
            | AdeType::Fp32
            | AdeType::Uf32
            | AdeType::Sf32
            | AdeType::Ur32
            | AdeType::Sr32
            | AdeType::Fc32
            | AdeType::Ip32 => Some(4),
            AdeType::Ui64
            | AdeType::Si64
            | AdeType::Fp64
            | AdeType::Uf64
            | AdeType::Sf64
            | AdeType::Ur64
            | AdeType::Sr64 => Some(8),
            AdeType::Uuid => Some(16),
            AdeType::Null => Some(0),
            AdeType::Ipad | AdeType::Cstr | AdeType::Ustr | AdeType::Data | AdeType::Cont => None,
        }
    }
}

/// The native kind a conversion targets, named in no-codec error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeKind {
    /// A boolean value.
    Bool,
    /// An unsigned 64 bit integer.
    Uint,
    /// A signed 64 bit integer.
    Int,
    /// A double precision floating point value.
    Float,
    /// The undelimited text form.
    Text,
    /// The delimited text form.
    TextDelimited,
    /// A sequence of unsigned integers.
    SeqUint,
    /// A sequence of signed integers.
    SeqInt,
    /// The raw payload bytes.
    Bytes,
}

impl fmt::Display for NativeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NativeKind::Bool => "bool",
            NativeKind::Uint => "uint",
            NativeKind::Int => "int",
            NativeKind::Float => "float",
            NativeKind::Text => "string",
            NativeKind::TextDelimited => "delimited string",
            NativeKind::SeqUint => "uint sequence",
            NativeKind::SeqInt => "int sequence",
            NativeKind::Bytes => "bytes",
        };
        f.write_str(name)
    }
}

/// A codec translating one atom payload between its big-endian byte form,
/// native values, and the canonical text form.
///
/// The codec borrows the caller-owned payload buffer for its lifetime.
/// Decoders read the buffer, encoders overwrite it and resize it to the
/// width the type requires.
pub struct Codec<'a> {
    ident: Fourcc,
    kind: AdeType,
    data: &'a mut Vec<u8>,
}

impl<'a> Codec<'a> {
    /// Creates a codec for the type tag, borrowing the payload buffer.
    /// Fails if the tag is not registered.
    pub fn new(ident: Fourcc, data: &'a mut Vec<u8>) -> Result<Codec<'a>> {
        let kind = match CODECS.get(&ident) {
            Some(kind) => *kind,
            None => return Err(Error::unknown_type(ident)),
        };
        Ok(Codec { ident, kind, data })
    }

    /// Returns the type tag this codec was created for.
    pub fn ident(&self) -> Fourcc {
        self.ident
    }

    /// Returns the fixed payload width in bytes, or `None` for variable
    /// width types.
    pub fn width(&self) -> Option<usize> {
        self.kind.width()
    }

    /// Decodes the payload into its undelimited text form.
    pub fn to_text(&self) -> Result<String> {
        match self.kind {
            AdeType::Ui01 => int::ui01_to_text(self.ident, self.data),
            AdeType::Ui08 => int::uint_to_text(self.ident, self.data, 1),
            AdeType::Ui16 => int::uint_to_text(self.ident, self.data, 2),
            AdeType::Ui32 => int::uint_to_text(self.ident, self.data, 4),
            AdeType::Ui64 => int::uint_to_text(self.ident, self.data, 8),
            AdeType::Si08 => int::int_to_text(self.ident, self.data, 1),
            AdeType::Si16 => int::int_to_text(self.ident, self.data, 2),
            AdeType::Si32 => int::int_to_text(self.ident, self.data, 4),
            AdeType::Si64 => int::int_to_text(self.ident, self.data, 8),
            AdeType::Fp32 => float::fp32_to_text(self.ident, self.data),
            AdeType::Fp64 => float::fp64_to_text(self.ident, self.data),
            AdeType::Uf32 => fixed::uf32_to_text(self.ident, self.data),
            AdeType::Uf64 => fixed::uf64_to_text(self.ident, self.data),
            AdeType::Sf32 => fixed::sf32_to_text(self.ident, self.data),
            AdeType::Sf64 => fixed::sf64_to_text(self.ident, self.data),
            AdeType::Ur32 => frac::ur_to_text(self.ident, self.data, 2),
            AdeType::Ur64 => frac::ur_to_text(self.ident, self.data, 4),
            AdeType::Sr32 => frac::sr_to_text(self.ident, self.data, 2),
            AdeType::Sr64 => frac::sr_to_text(self.ident, self.data, 4),
            AdeType::Fc32 => fc32::to_text(self.ident, self.data),
            AdeType::Ip32 => ip::ip32_to_text(self.ident, self.data),
            AdeType::Ipad => ip::ipad_to_text(self.ident, self.data),
            AdeType::Uuid => uuid::to_text(self.ident, self.data),
            AdeType::Cstr => text::cstr_to_text(self.ident, self.data),
            AdeType::Ustr => text::ustr_to_text(self.ident, self.data),
            AdeType::Data => Ok(data::to_text(self.data)),
            AdeType::Null | AdeType::Cont => Ok(String::new()),
        }
    }

    /// Decodes the payload into its delimited text form. Types with no
    /// delimiter convention return the undelimited form.
    pub fn to_text_delimited(&self) -> Result<String> {
        match self.kind {
            AdeType::Fc32 => fc32::to_text_delimited(self.ident, self.data),
            AdeType::Ipad | AdeType::Uuid | AdeType::Cstr | AdeType::Ustr => {
                let text = self.to_text()?;
                Ok(format!("\"{}\"", text))
            }
            _ => self.to_text(),
        }
    }

    /// Decodes the payload into a boolean.
    pub fn to_bool(&self) -> Result<bool> {
        match self.kind {
            AdeType::Ui01 => int::ui01_to_bool(self.ident, self.data),
            _ => Err(Error::no_decoder(self.ident, NativeKind::Bool)),
        }
    }

    /// Decodes the payload into an unsigned integer.
    pub fn to_uint(&self) -> Result<u64> {
        match self.kind {
            AdeType::Ui01 => int::ui01_to_uint(self.ident, self.data),
            AdeType::Ui08 => int::to_uint(self.ident, self.data, 1),
            AdeType::Ui16 => int::to_uint(self.ident, self.data, 2),
            AdeType::Ui32 => int::to_uint(self.ident, self.data, 4),
            AdeType::Ui64 => int::to_uint(self.ident, self.data, 8),
            AdeType::Fc32 => fc32::to_uint(self.ident, self.data),
            AdeType::Ip32 => ip::ip32_to_uint(self.ident, self.data),
            _ => Err(Error::no_decoder(self.ident, NativeKind::Uint)),
        }
    }

    /// Decodes the payload into a signed integer.
    pub fn to_int(&self) -> Result<i64> {
        match self.kind {
            AdeType::Ui01 => Ok(int::ui01_to_uint(self.ident, self.data)? as i64),
            AdeType::Ui08 => int::uint_to_int(self.ident, self.data, 1),
            AdeType::Ui16 => int::uint_to_int(self.ident, self.data, 2),
            AdeType::Ui32 => int::uint_to_int(self.ident, self.data, 4),
            AdeType::Ui64 => int::uint_to_int(self.ident, self.data, 8),
            AdeType::Si08 => int::to_int(self.ident, self.data, 1),
            AdeType::Si16 => int::to_int(self.ident, self.data, 2),
            AdeType::Si32 => int::to_int(self.ident, self.data, 4),
            AdeType::Si64 => int::to_int(self.ident, self.data, 8),
            _ => Err(Error::no_decoder(self.ident, NativeKind::Int)),
        }
    }

    /// Decodes the payload into a floating point value.
    pub fn to_float(&self) -> Result<f64> {
        match self.kind {
            AdeType::Fp32 => float::fp32_to_float(self.ident, self.data),
            AdeType::Fp64 => float::fp64_to_float(self.ident, self.data),
            AdeType::Uf32 => fixed::uf32_to_float(self.ident, self.data),
            AdeType::Uf64 => fixed::uf64_to_float(self.ident, self.data),
            AdeType::Sf32 => fixed::sf32_to_float(self.ident, self.data),
            AdeType::Sf64 => fixed::sf64_to_float(self.ident, self.data),
            _ => Err(Error::no_decoder(self.ident, NativeKind::Float)),
        }
    }

    /// Decodes the payload into a sequence of unsigned integers.
    pub fn to_seq_uint(&self) -> Result<Vec<u64>> {
        match self.kind {
            AdeType::Ur32 => frac::ur_to_seq(self.ident, self.data, 2),
            AdeType::Ur64 => frac::ur_to_seq(self.ident, self.data, 4),
            _ => Err(Error::no_decoder(self.ident, NativeKind::SeqUint)),
        }
    }

    /// Decodes the payload into a sequence of signed integers.
    pub fn to_seq_int(&self) -> Result<Vec<i64>> {
        match self.kind {
            AdeType::Sr32 => frac::sr_to_seq(self.ident, self.data, 2),
            AdeType::Sr64 => frac::sr_to_seq(self.ident, self.data, 4),
            _ => Err(Error::no_decoder(self.ident, NativeKind::SeqInt)),
        }
    }

    /// Returns the raw payload bytes. Supported by every type.
    pub fn to_bytes(&self) -> Result<&[u8]> {
        Ok(self.data.as_slice())
    }

    /// Encodes the undelimited text form into the payload.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        match self.kind {
            AdeType::Ui01 => int::ui01_set_text(self.ident, self.data, text),
            AdeType::Ui08 => int::uint_set_text(self.ident, self.data, 1, text),
            AdeType::Ui16 => int::uint_set_text(self.ident, self.data, 2, text),
            AdeType::Ui32 => int::uint_set_text(self.ident, self.data, 4, text),
            AdeType::Ui64 => int::uint_set_text(self.ident, self.data, 8, text),
            AdeType::Si08 => int::int_set_text(self.ident, self.data, 1, text),
            AdeType::Si16 => int::int_set_text(self.ident, self.data, 2, text),
            AdeType::Si32 => int::int_set_text(self.ident, self.data, 4, text),
            AdeType::Si64 => int::int_set_text(self.ident, self.data, 8, text),
            AdeType::Fp32 => float::fp32_set_text(self.ident, self.data, text),
            AdeType::Fp64 => float::fp64_set_text(self.ident, self.data, text),
            AdeType::Uf32 => fixed::uf32_set_text(self.ident, self.data, text),
            AdeType::Uf64 => fixed::uf64_set_text(self.ident, self.data, text),
            AdeType::Sf32 => fixed::sf32_set_text(self.ident, self.data, text),
            AdeType::Sf64 => fixed::sf64_set_text(self.ident, self.data, text),
            AdeType::Ur32 => frac::ur_set_text(self.ident, self.data, 2, text),
            AdeType::Ur64 => frac::ur_set_text(self.ident, self.data, 4, text),
            AdeType::Sr32 => frac::sr_set_text(self.ident, self.data, 2, text),
            AdeType::Sr64 => frac::sr_set_text(self.ident, self.data, 4, text),
            AdeType::Fc32 => fc32::set_text(self.ident, self.data, text),
            AdeType::Ip32 => ip::ip32_set_text(self.ident, self.data, text),
            AdeType::Ipad => ip::ipad_set_text(self.ident, self.data, text),
            AdeType::Uuid => uuid::set_text(self.ident, self.data, text),
            AdeType::Cstr => text::cstr_set_text(self.ident, self.data, text),
            AdeType::Ustr => text::ustr_set_text(self.ident, self.data, text),
            AdeType::Data => data::set_text(self.ident, self.data, text),
            // The empty types accept and discard any text.
            AdeType::Null | AdeType::Cont => Ok(()),
        }
    }

    /// Encodes the delimited text form into the payload. For types without
    /// a delimiter convention this is the same as [`Codec::set_text`];
    /// IPAD and UUID treat the quotes as optional, CSTR and USTR require
    /// them.
    pub fn set_text_delimited(&mut self, text: &str) -> Result<()> {
        match self.kind {
            AdeType::Cstr => text::cstr_set_text_delimited(self.ident, self.data, text),
            AdeType::Ustr => text::ustr_set_text_delimited(self.ident, self.data, text),
            _ => self.set_text(text),
        }
    }

    /// Encodes a boolean into the payload.
    pub fn set_bool(&mut self, value: bool) -> Result<()> {
        match self.kind {
            AdeType::Ui01 => {
                int::ui01_set_bool(self.data, value);
                Ok(())
            }
            _ => Err(Error::no_encoder(self.ident, NativeKind::Bool)),
        }
    }

    /// Encodes an unsigned integer into the payload.
    pub fn set_uint(&mut self, value: u64) -> Result<()> {
        match self.kind {
            AdeType::Ui01 => int::ui01_set_uint(self.ident, self.data, value),
            AdeType::Ui08 => int::set_uint(self.ident, self.data, 1, value),
            AdeType::Ui16 => int::set_uint(self.ident, self.data, 2, value),
            AdeType::Ui32 => int::set_uint(self.ident, self.data, 4, value),
            AdeType::Ui64 => int::set_uint(self.ident, self.data, 8, value),
            AdeType::Fc32 => fc32::set_uint(self.ident, self.data, value),
            AdeType::Ip32 => {
                ip::ip32_set_uint(self.data, value);
                Ok(())
            }
            _ => Err(Error::no_encoder(self.ident, NativeKind::Uint)),
        }
    }

    /// Encodes a signed integer into the payload.
    pub fn set_int(&mut self, value: i64) -> Result<()> {
        match self.kind {
            AdeType::Ui01 => int::ui01_set_int(self.ident, self.data, value),
            AdeType::Ui08 => int::set_uint_from_int(self.ident, self.data, 1, value),
            AdeType::Ui16 => int::set_uint_from_int(self.ident, self.data, 2, value),
            AdeType::Ui32 => int::set_uint_from_int(self.ident, self.data, 4, value),
            AdeType::Ui64 => int::set_uint_from_int(self.ident, self.data, 8, value),
            AdeType::Si08 => int::set_int(self.ident, self.data, 1, value),
            AdeType::Si16 => int::set_int(self.ident, self.data, 2, value),
            AdeType::Si32 => int::set_int(self.ident, self.data, 4, value),
            AdeType::Si64 => int::set_int(self.ident, self.data, 8, value),
            _ => Err(Error::no_encoder(self.ident, NativeKind::Int)),
        }
    }

    /// Encodes a floating point value into the payload.
    pub fn set_float(&mut self, value: f64) -> Result<()> {
        match self.kind {
            AdeType::Fp32 => float::fp32_set_float(self.ident, self.data, value),
            AdeType::Fp64 => float::fp64_set_float(self.ident, self.data, value),
            AdeType::Uf32 => fixed::uf32_set_float(self.ident, self.data, value),
            AdeType::Uf64 => fixed::uf64_set_float(self.ident, self.data, value),
            AdeType::Sf32 => fixed::sf32_set_float(self.ident, self.data, value),
            AdeType::Sf64 => fixed::sf64_set_float(self.ident, self.data, value),
            _ => Err(Error::no_encoder(self.ident, NativeKind::Float)),
        }
    }

    /// Encodes a (numerator, denominator) pair into the payload.
    pub fn set_seq_uint(&mut self, seq: &[u64]) -> Result<()> {
        match self.kind {
            AdeType::Ur32 => frac::ur_set_seq(self.ident, self.data, 2, seq),
            AdeType::Ur64 => frac::ur_set_seq(self.ident, self.data, 4, seq),
            _ => Err(Error::no_encoder(self.ident, NativeKind::SeqUint)),
        }
    }

    /// Encodes a signed (numerator, denominator) pair into the payload.
    pub fn set_seq_int(&mut self, seq: &[i64]) -> Result<()> {
        match self.kind {
            AdeType::Sr32 => frac::sr_set_seq(self.ident, self.data, 2, seq),
            AdeType::Sr64 => frac::sr_set_seq(self.ident, self.data, 4, seq),
            _ => Err(Error::no_encoder(self.ident, NativeKind::SeqInt)),
        }
    }

    /// Replaces the payload with raw bytes.
    pub fn set_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        match self.kind {
            AdeType::Data => {
                data::set_bytes(self.data, bytes);
                Ok(())
            }
            _ => Err(Error::no_encoder(self.ident, NativeKind::Bytes)),
        }
    }

    /// Resets the payload to the type's natural zero: a zeroed buffer of
    /// the fixed width, or an empty buffer for variable width types. Zeroes
    /// in place when the length already matches.
    pub fn zero_data(&mut self) {
        match self.kind.width() {
            Some(width) if self.data.len() == width => {
                for b in self.data.iter_mut() {
                    *b = 0;
                }
            }
            Some(width) => {
                self.data.clear();
                self.data.resize(width, 0);
            }
            None => self.data.clear(),
        }
    }

    /// Returns whether the type is the boolean type.
    pub fn is_bool(&self) -> bool {
        self.kind == AdeType::Ui01
    }

    /// Returns whether the type holds an unsigned integer.
    pub fn is_uint(&self) -> bool {
        matches!(
            self.kind,
            AdeType::Ui01 | AdeType::Ui08 | AdeType::Ui16 | AdeType::Ui32 | AdeType::Ui64
        )
    }

    /// Returns whether the type holds a signed integer.
    pub fn is_int(&self) -> bool {
        matches!(self.kind, AdeType::Si08 | AdeType::Si16 | AdeType::Si32 | AdeType::Si64)
    }

    /// Returns whether the type holds a floating or fixed point value.
    pub fn is_float(&self) -> bool {
        matches!(
            self.kind,
            AdeType::Fp32
                | AdeType::Fp64
                | AdeType::Uf32
                | AdeType::Uf64
                | AdeType::Sf32
                | AdeType::Sf64
        )
    }

    /// Returns whether the type's canonical payload reading is textual.
    pub fn is_string(&self) -> bool {
        matches!(
            self.kind,
            AdeType::Fc32 | AdeType::Ipad | AdeType::Uuid | AdeType::Cstr | AdeType::Ustr
        )
    }
}

impl fmt::Debug for Codec<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Codec").field("ident", &self.ident).field("data", &self.data).finish()
    }
}
