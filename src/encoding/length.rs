use crate::{
    encoding::emitter::{Counter, Lenient, emit, infallible},
    value::Value,
};

/// Number of bytes [`encode`](crate::encode) produces for `value`, without producing them.
///
/// Shares its traversal with the encoder, so the result always equals the encoded size,
/// including for omitted `Null`s, truncated floats and degraded unsupported values.
/// `Null` has length 0.
pub fn encoding_length(value: &Value) -> usize {
    let mut counter = Counter::default();
    infallible(emit(value, &mut counter, &Lenient));
    counter.0
}
