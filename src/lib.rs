//! A library for reading and writing data stored in ADE atom containers.
//!
//! Every atom carries a 4 character type tag and a big-endian payload. The
//! [`Codec`] type translates one payload between three representations: the
//! raw bytes, native values (`bool`, `u64`, `i64`, `f64`, sequences), and
//! the canonical text form used by the container's text grammar.
//!
//! ```
//! use adeatom::{ident, Codec};
//!
//! let mut payload = vec![0x00, 0x00, 0x00, 0x2A];
//! let mut codec = Codec::new(ident::UI32, &mut payload).unwrap();
//!
//! assert_eq!(codec.to_uint().unwrap(), 42);
//! assert_eq!(codec.to_text().unwrap(), "42");
//!
//! codec.set_text("0x2B").unwrap();
//! assert_eq!(payload, vec![0x00, 0x00, 0x00, 0x2B]);
//! ```
#![warn(missing_docs)]

pub use crate::codec::ident;
pub use crate::codec::{Codec, Fourcc, NativeKind, Uuid};
pub use crate::error::{Error, ErrorKind, Result};

mod codec;
mod error;
