//! Decodes bencoded data into an [`Object`] tree
//!
//! # Basic decoding
//!
//! For any decoding process, first we need to create a decoder. It accepts raw bytes
//! or text:
//!
//! ```
//! # use bencodec::decoding::{Decoder, Object};
//! #
//! let decoder = Decoder::new(b"d3:fooi1ee");
//! let object = decoder.decode().unwrap().unwrap();
//! assert_eq!(object.get("foo"), Some(&Object::Integer(1)));
//! ```
//!
//! Byte strings stay raw bytes unless a text encoding is requested:
//!
//! ```
//! # use bencodec::decoding::{Decoder, TextEncoding};
//! #
//! let object = Decoder::new("l4:spam4:eggse")
//!     .with_text_encoding(TextEncoding::Utf8)
//!     .decode()
//!     .unwrap()
//!     .unwrap();
//! let items: Vec<_> = object.as_list().unwrap().iter().filter_map(|o| o.as_str()).collect();
//! assert_eq!(items, ["spam", "eggs"]);
//! ```
//!
//! # Decoding a window
//!
//! The decoder can be limited to a `[start, end)` window of a larger buffer. Every
//! option is independent; none has to be given for another to apply:
//!
//! ```
//! # use bencodec::decoding::{Decoder, Object};
//! #
//! let buffer = b"____i42e____";
//! let (object, consumed) = Decoder::new(buffer).with_start(4).with_end(8).decode_prefix().unwrap();
//! assert_eq!(object, Some(Object::Integer(42)));
//! assert_eq!(consumed, 4);
//! ```
//!
//! # Leniency
//!
//! The decoder follows the de-facto behaviour of widely deployed bencode libraries
//! rather than a strict reading of BEP-3: dictionary key order is not checked, a
//! leading `+` is accepted on integers and anything after a `.` in an integer is
//! discarded. An empty window decodes to `None`.
//!
//! Dictionary keys are always rendered as UTF-8 text. A key that is not valid UTF-8 is
//! rendered as the hex encoding of its raw bytes instead.
//!
//! # Error handling
//!
//! Errors abort the decode call. They carry the offset into the caller's buffer (not
//! into the window) where the problem was detected.

mod decoder;
mod error;
mod object;
mod text;

pub use self::{
    decoder::{DEFAULT_MAX_DEPTH, Decoder},
    error::Error,
    object::{Dictionary, Object},
    text::TextEncoding,
};
