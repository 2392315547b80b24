use thiserror::Error;

/// An enumeration of potential errors that appear during bencode encoding.
///
/// With the default lenient policy, encoding into a fresh buffer never fails.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The value has no bencode representation. Only raised by the strict policy;
    /// the lenient policy writes an empty dictionary instead.
    #[error("unsupported value: {kind}")]
    UnsupportedValue { kind: String },

    /// The caller-supplied buffer cannot hold the encoded value at the given offset.
    #[error("buffer of {capacity} bytes cannot hold {needed} bytes at offset {offset}")]
    BufferTooSmall {
        offset: usize,
        needed: usize,
        capacity: usize,
    },
}

impl Error {
    /// Raised when a value cannot be represented in bencode.
    pub fn unsupported(kind: impl std::fmt::Display) -> Self {
        Error::UnsupportedValue {
            kind: kind.to_string(),
        }
    }
}

#[test]
fn encoding_errors_are_sync_send() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}
    is_send::<Error>();
    is_sync::<Error>();
}
