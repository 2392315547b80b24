//! Encodes and decodes bencoded structures.
//!
//! The crate is built around three operations that share one grammar:
//!
//! - [`decode`] reads bytes (or text) into an [`Object`] tree, borrowing from the input
//!   wherever possible.
//! - [`encode`] writes a [`Value`] tree as canonical bencode: dictionary keys sorted by
//!   byte value, [`Value::Null`] left out.
//! - [`encoding_length`] computes the exact size `encode` would produce without
//!   producing it.
//!
//! ```
//! use bencodec::{decode, encode, encoding_length, Object, Value};
//!
//! let value = Value::dict().with("b", 1).with("a", 2);
//! let bytes = encode(&value);
//! assert_eq!(bytes, b"d1:ai2e1:bi1ee");
//! assert_eq!(encoding_length(&value), bytes.len());
//!
//! let object = decode(&bytes).unwrap().unwrap();
//! assert_eq!(object.get("a"), Some(&Object::Integer(2)));
//! ```
//!
//! The [`decoding::Decoder`] and [`encoding::Encoder`] builders expose the remaining
//! options: decode windows, text decoding, nesting limits and strict encoding.
//!
//! Neither builder keeps state between calls, so both can be shared freely between
//! threads.
#![cfg_attr(not(test), warn(missing_docs))]

pub mod decoding;
pub mod encoding;
pub mod value;

pub use crate::{
    decoding::{Decoder, Object, TextEncoding},
    encoding::{Encoder, encode, encode_into, encoding_length},
    value::{AsString, Value},
};

/// Decode the first bencoded value in `input` with default options.
///
/// Byte strings are returned as raw bytes. Returns `Ok(None)` for empty input.
pub fn decode<I: AsRef<[u8]> + ?Sized>(input: &I) -> Result<Option<Object<'_>>, decoding::Error> {
    Decoder::new(input).decode()
}

/// Decode the first bencoded value in `input`, turning byte strings into text.
pub fn decode_text<I: AsRef<[u8]> + ?Sized>(
    input: &I,
    encoding: TextEncoding,
) -> Result<Option<Object<'_>>, decoding::Error> {
    Decoder::new(input).with_text_encoding(encoding).decode()
}

#[cfg(doctest)]
doc_comment::doctest!("../README.md");
