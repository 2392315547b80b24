//! Encodes [`Value`](crate::Value)s into canonical bencode and computes encoded sizes
//!
//! # Encoding a value
//!
//! Build a [`Value`](crate::Value) once, usually through its `From` conversions, and hand it to
//! [`encode`]:
//!
//! ```
//! # use bencodec::{encoding::encode, Value};
//! let value = Value::dict().with("spam", "eggs").with("cow", "moo");
//! assert_eq!(encode(&value), b"d3:cow3:moo4:spam4:eggse");
//! ```
//!
//! Dictionary keys are always written in byte order, whatever order the input map
//! iterates in. [`Value::Null`](crate::Value::Null) never reaches the output: dictionary entries holding it
//! are dropped and list items holding it are skipped.
//!
//! # Writing into an existing buffer
//!
//! [`encoding_length`] tells how many bytes a value needs, so a caller can size a buffer
//! and let [`encode_into`] fill a span of it:
//!
//! ```
//! # use bencodec::{encoding::{encode_into, encoding_length}, Value};
//! let value = Value::from(vec![1, 2, 3]);
//! let mut buffer = vec![0; 4 + encoding_length(&value)];
//! let written = encode_into(&value, &mut buffer, 4).unwrap();
//! assert_eq!(&buffer[4..4 + written], b"li1ei2ei3ee");
//! ```
//!
//! # Unsupported values
//!
//! A non-finite [`Value::Float`](crate::Value::Float) has no integer form. By default it is written as an
//! empty dictionary, matching deployed bencode encoders. Use [`Encoder::strict`] to get
//! [`Error::UnsupportedValue`] instead.

mod emitter;
mod encoder;
mod error;
mod length;
mod printable_integer;

pub use self::{
    encoder::{Encoder, Strictness, encode, encode_into},
    error::Error,
    length::encoding_length,
};

pub(crate) use self::printable_integer::PrintableInteger;
