use thiserror::Error;

/// An enumeration of potential errors that appear during bencode decoding.
///
/// Every error aborts the decode call that raised it; no partial result is returned.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A byte that is neither a digit nor an allowed sign/fraction marker inside an
    /// integer token or a string length.
    #[error("not a number: unexpected byte {:?} at offset {offset}", char::from(*byte))]
    InvalidInteger { byte: u8, offset: usize },

    /// Scanning forward for a delimiter reached the end of the input.
    #[error("missing delimiter {delimiter:?} after offset {offset}")]
    MissingDelimiter { delimiter: char, offset: usize },

    /// The integer starting at `offset` does not fit into 64 bits.
    #[error("integer at offset {offset} does not fit into 64 bits")]
    IntegerOverflow { offset: usize },

    /// A byte string announced a length that is negative or does not fit in memory.
    #[error("invalid byte string length {length} at offset {offset}")]
    InvalidLength { length: i64, offset: usize },

    /// A byte string body extends past the end of the input.
    #[error("byte string at offset {offset} needs {needed} bytes but only {available} remain")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// The requested `[start, end)` window does not fit the input.
    #[error("invalid range {start}..{end} for input of {len} bytes")]
    InvalidRange { start: usize, end: usize, len: usize },

    /// Lists and dictionaries are nested deeper than the decoder allows.
    #[error("maximum nesting depth of {max_depth} exceeded at offset {offset}")]
    NestingTooDeep { max_depth: usize, offset: usize },

    /// The name does not denote a supported text encoding.
    #[error("unknown text encoding: {0}")]
    UnknownEncoding(String),
}

impl Error {
    /// The input offset the error refers to, if any
    pub fn offset(&self) -> Option<usize> {
        match self {
            Error::InvalidInteger { offset, .. }
            | Error::MissingDelimiter { offset, .. }
            | Error::IntegerOverflow { offset }
            | Error::InvalidLength { offset, .. }
            | Error::UnexpectedEof { offset, .. }
            | Error::NestingTooDeep { offset, .. } => Some(*offset),
            Error::InvalidRange { .. } | Error::UnknownEncoding(_) => None,
        }
    }
}

#[test]
fn decoding_errors_are_sync_send() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}
    is_send::<Error>();
    is_sync::<Error>();
}
