use crate::{
    encoding::{
        Error,
        emitter::{self, Counter, Lenient, Sink, SliceWriter, Strict, infallible},
        encoding_length,
    },
    value::Value,
};

/// How the encoder treats values that have no bencode representation, such as a
/// non-finite [`Value::Float`]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Strictness {
    /// Write an empty dictionary (`de`) in place of the value
    #[default]
    Lenient,
    /// Fail with [`Error::UnsupportedValue`]
    Strict,
}

/// The encoder. Holds only options; every call traverses the value afresh.
///
/// The output is always canonical: dictionary keys are sorted by byte value and
/// [`Value::Null`] entries are left out.
#[derive(Clone, Copy, Debug, Default)]
pub struct Encoder {
    strictness: Strictness,
}

impl Encoder {
    /// Create a new lenient encoder
    pub fn new() -> Self {
        <Self as Default>::default()
    }

    /// Create an encoder that rejects unsupported values
    pub fn strict() -> Self {
        Self::new().with_strictness(Strictness::Strict)
    }

    /// Set how unsupported values are handled
    #[must_use]
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Encode `value` into a new buffer of exactly the encoded size
    pub fn encode(&self, value: &Value) -> Result<Vec<u8>, Error> {
        let mut output = Vec::with_capacity(self.encoding_length(value)?);
        self.emit(value, &mut output)?;
        Ok(output)
    }

    /// Encode `value` into `target`, starting at `offset`.
    ///
    /// Returns the number of bytes written. Only `target[offset..offset + n]` is
    /// modified; if the value does not fit, nothing is written.
    pub fn encode_into(
        &self,
        value: &Value,
        target: &mut [u8],
        offset: usize,
    ) -> Result<usize, Error> {
        let needed = self.encoding_length(value)?;
        let end = offset
            .checked_add(needed)
            .filter(|&end| end <= target.len())
            .ok_or(Error::BufferTooSmall {
                offset,
                needed,
                capacity: target.len(),
            })?;

        log::trace!("encoding {} bytes at offset {}", needed, offset);
        let mut writer = SliceWriter::new(&mut target[offset..end]);
        self.emit(value, &mut writer)?;
        debug_assert_eq!(writer.written(), needed);

        Ok(needed)
    }

    /// Number of bytes [`Encoder::encode`] would produce for `value`
    pub fn encoding_length(&self, value: &Value) -> Result<usize, Error> {
        let mut counter = Counter::default();
        self.emit(value, &mut counter)?;
        Ok(counter.0)
    }

    fn emit<S: Sink>(&self, value: &Value, sink: &mut S) -> Result<(), Error> {
        match self.strictness {
            Strictness::Lenient => {
                infallible(emitter::emit(value, sink, &Lenient));
                Ok(())
            },
            Strictness::Strict => emitter::emit(value, sink, &Strict),
        }
    }
}

/// Encode `value` into a new buffer.
///
/// Values without a bencode representation are written as empty dictionaries, so this
/// never fails. `Null` encodes to an empty buffer.
pub fn encode(value: &Value) -> Vec<u8> {
    let mut output = Vec::with_capacity(encoding_length(value));
    log::trace!("encoding {} bytes", output.capacity());
    infallible(emitter::emit(value, &mut output, &Lenient));
    output
}

/// Encode `value` into `target` at `offset` with the lenient policy.
///
/// Returns the number of bytes written, or [`Error::BufferTooSmall`] if they don't fit.
pub fn encode_into(value: &Value, target: &mut [u8], offset: usize) -> Result<usize, Error> {
    Encoder::new().encode_into(value, target, offset)
}
