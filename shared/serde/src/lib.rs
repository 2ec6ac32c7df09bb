//! # Wirenet Serde
//! Byte-aligned serialization primitives for the wirenet operation codec.
//!
//! Integers are written as 4-byte little-endian values and strings carry a
//! 7-bit variable length prefix followed by UTF-8 bytes.

mod byte_reader;
mod byte_writer;
mod error;
mod integer;
mod serde;

pub use byte_reader::ByteReader;
pub use byte_writer::{ByteWrite, ByteWriter};
pub use error::SerdeErr;
pub use integer::VarLength;
pub use serde::Serde;
