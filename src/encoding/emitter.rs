//! The single traversal behind both the encoder and the length calculator.
//!
//! Every byte decision is made here; sinks only store or count what they receive.

use std::{convert::Infallible, fmt};

use crate::{
    encoding::{Error, PrintableInteger},
    value::Value,
};

/// Destination for encoded bytes
pub(crate) trait Sink {
    fn put(&mut self, bytes: &[u8]);

    fn put_byte(&mut self, byte: u8) {
        self.put(&[byte]);
    }
}

impl Sink for Vec<u8> {
    fn put(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn put_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// Counts bytes without storing them
#[derive(Default, Debug)]
pub(crate) struct Counter(pub usize);

impl Sink for Counter {
    fn put(&mut self, bytes: &[u8]) {
        self.0 += bytes.len();
    }
}

/// Writes into a caller-supplied slice that was sized by a [`Counter`] pass
pub(crate) struct SliceWriter<'a> {
    target: &'a mut [u8],
    position: usize,
}

impl<'a> SliceWriter<'a> {
    pub(crate) fn new(target: &'a mut [u8]) -> Self {
        SliceWriter {
            target,
            position: 0,
        }
    }

    pub(crate) fn written(&self) -> usize {
        self.position
    }
}

impl Sink for SliceWriter<'_> {
    fn put(&mut self, bytes: &[u8]) {
        let end = self.position + bytes.len();
        self.target[self.position..end].copy_from_slice(bytes);
        self.position = end;
    }
}

/// Adapter so that `core::fmt` can print integers straight into a sink
struct Digits<'s, S>(&'s mut S);

impl<S: Sink> fmt::Write for Digits<'_, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0.put(s.as_bytes());
        Ok(())
    }
}

/// What to do with a value that has no bencode representation
pub(crate) trait Fallback {
    type Error;

    fn unsupported<S: Sink>(&self, value: &Value, sink: &mut S) -> Result<(), Self::Error>;
}

/// Degrade unsupported values to an empty dictionary
pub(crate) struct Lenient;

impl Fallback for Lenient {
    type Error = Infallible;

    fn unsupported<S: Sink>(&self, value: &Value, sink: &mut S) -> Result<(), Infallible> {
        log::debug!(
            "encoding unsupported {} {:?} as an empty dictionary",
            value.kind(),
            value
        );
        sink.put(b"de");
        Ok(())
    }
}

/// Reject unsupported values
pub(crate) struct Strict;

impl Fallback for Strict {
    type Error = Error;

    fn unsupported<S: Sink>(&self, value: &Value, _sink: &mut S) -> Result<(), Error> {
        Err(Error::unsupported(format_args!("{} {:?}", value.kind(), value)))
    }
}

/// Unwrap a result whose error type cannot be constructed
pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Emit `value` into `sink`. `Null` emits nothing.
pub(crate) fn emit<S, F>(value: &Value, sink: &mut S, fallback: &F) -> Result<(), F::Error>
where
    S: Sink,
    F: Fallback,
{
    match value {
        Value::Null => {},
        Value::Integer(integer) => emit_int(integer, value, sink, fallback)?,
        Value::Float(float) => emit_int(float, value, sink, fallback)?,
        Value::Bytes(bytes) => emit_bytes(bytes, sink),
        Value::Text(text) => emit_bytes(text.as_bytes(), sink),
        Value::List(list) => {
            sink.put_byte(b'l');
            for item in list {
                // Null items vanish without a placeholder
                emit(item, sink, fallback)?;
            }
            sink.put_byte(b'e');
        },
        Value::Dict(dict) => {
            let mut pairs: Vec<_> = dict.iter().filter(|(_, value)| !value.is_null()).collect();
            // Hash maps iterate in arbitrary order; canonical output needs byte order
            pairs.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));

            sink.put_byte(b'd');
            for (key, value) in pairs {
                emit_bytes(key, sink);
                emit(value, sink, fallback)?;
            }
            sink.put_byte(b'e');
        },
    }

    Ok(())
}

fn emit_int<S, F, I>(
    integer: &I,
    value: &Value,
    sink: &mut S,
    fallback: &F,
) -> Result<(), F::Error>
where
    S: Sink,
    F: Fallback,
    I: PrintableInteger,
{
    if !integer.is_printable() {
        return fallback.unsupported(value, sink);
    }

    sink.put_byte(b'i');
    // Digits never fails to write
    let _ = integer.write_to(&mut Digits(&mut *sink));
    sink.put_byte(b'e');
    Ok(())
}

fn emit_bytes<S: Sink>(bytes: &[u8], sink: &mut S) {
    let _ = bytes.len().write_to(&mut Digits(&mut *sink));
    sink.put_byte(b':');
    sink.put(bytes);
}
