//! `Value`s are the input side of the codec: a closed set of encodable kinds that
//! callers build once at the API boundary, usually through one of the `From`
//! conversions below.
//!
//! If the `serde` feature is enabled, `Value` also implements `Serialize`.

use std::{
    borrow::Cow,
    collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque},
};

#[cfg(feature = "serde")]
use serde_ as serde;

use crate::decoding::Object;

/// An owned or borrowed value that can be bencoded.
#[derive(PartialEq, Clone, Debug, Default)]
pub enum Value<'a> {
    /// Absent value. Encodes to nothing: dropped from dictionaries and skipped in lists.
    #[default]
    Null,
    /// A signed integer
    Integer(i128),
    /// A number with a possible fractional part. Truncated toward zero on encode.
    Float(f64),
    /// An owned or borrowed byte string
    Bytes(Cow<'a, [u8]>),
    /// Text, written as its UTF-8 bytes
    Text(Cow<'a, str>),
    /// A list of values, written in order
    List(Vec<Value<'a>>),
    /// A dictionary mapping byte strings to values. Written with keys sorted by byte value.
    Dict(HashMap<Cow<'a, [u8]>, Value<'a>>),
}

impl<'a> Value<'a> {
    /// Create a byte string value borrowing the given bytes
    pub fn bytes(bytes: &'a [u8]) -> Self {
        Value::Bytes(Cow::Borrowed(bytes))
    }

    /// Create an empty dictionary
    pub fn dict() -> Self {
        Value::Dict(HashMap::new())
    }

    /// Insert a key/value pair into a dictionary and return it for chaining.
    ///
    /// Any other value is returned unchanged.
    #[must_use]
    pub fn with(mut self, key: impl AsRef<[u8]>, value: impl Into<Value<'a>>) -> Self {
        match &mut self {
            Value::Dict(dict) => {
                dict.insert(Cow::Owned(key.as_ref().to_vec()), value.into());
            },
            other => log::debug!("ignoring dictionary entry for {}", other.kind()),
        }
        self
    }

    /// Returns true for [`Value::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Convert this Value into an owned Value with static lifetime
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::Null => Value::Null,
            Value::Integer(integer) => Value::Integer(integer),
            Value::Float(float) => Value::Float(float),
            Value::Bytes(bytes) => Value::Bytes(Cow::Owned(bytes.into_owned())),
            Value::Text(text) => Value::Text(Cow::Owned(text.into_owned())),
            Value::List(list) => Value::List(list.into_iter().map(Value::into_owned).collect()),
            Value::Dict(dict) => Value::Dict(
                dict.into_iter()
                    .map(|(key, value)| (Cow::Owned(key.into_owned()), value.into_owned()))
                    .collect(),
            ),
        }
    }

    /// Name of the value kind, as used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::Bytes(_) => "byte string",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Dict(_) => "dictionary",
        }
    }
}

// Scalars

macro_rules! impl_from_integer {
    ($($type:ty)*) => {$(
        impl From<$type> for Value<'_> {
            fn from(value: $type) -> Self {
                Value::Integer(i128::from(value))
            }
        }
    )*}
}

impl_from_integer!(u8 u16 u32 u64 i8 i16 i32 i64 i128);

impl From<usize> for Value<'_> {
    fn from(value: usize) -> Self {
        // usize is at most 64 bits on every supported target
        Value::Integer(value as i128)
    }
}

impl From<isize> for Value<'_> {
    fn from(value: isize) -> Self {
        Value::Integer(value as i128)
    }
}

impl From<f32> for Value<'_> {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Integer(i128::from(value))
    }
}

impl From<()> for Value<'_> {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Text(Cow::Borrowed(value))
    }
}

impl From<String> for Value<'_> {
    fn from(value: String) -> Self {
        Value::Text(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for Value<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Value::Text(value)
    }
}

impl<'a> From<Cow<'a, [u8]>> for Value<'a> {
    fn from(value: Cow<'a, [u8]>) -> Self {
        Value::Bytes(value)
    }
}

/// Wrapper to turn byte containers such as `Vec<u8>` into a byte string instead of
/// a list of integers.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct AsString<I>(pub I);

impl<I: AsRef<[u8]>> From<AsString<I>> for Value<'_> {
    fn from(AsString(bytes): AsString<I>) -> Self {
        Value::Bytes(Cow::Owned(bytes.as_ref().to_vec()))
    }
}

impl<'a, T: Into<Value<'a>>> From<Option<T>> for Value<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

// Sequences. Unordered sets are written in their iteration order.

macro_rules! impl_from_iterable {
    ($($type:ident)*) => {$(
        impl<'a, T: Into<Value<'a>>> From<$type<T>> for Value<'a> {
            fn from(items: $type<T>) -> Self {
                Value::List(items.into_iter().map(Into::into).collect())
            }
        }
    )*}
}

impl_from_iterable!(Vec VecDeque LinkedList HashSet BTreeSet);

impl<'a, T> From<&[T]> for Value<'a>
where
    T: Clone + Into<Value<'a>>,
{
    fn from(items: &[T]) -> Self {
        Value::List(items.iter().cloned().map(Into::into).collect())
    }
}

impl<'a, T: Into<Value<'a>>> FromIterator<T> for Value<'a> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Value::List(iter.into_iter().map(Into::into).collect())
    }
}

// Mappings

fn dict_from<'a, K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Value<'a>
where
    K: AsRef<[u8]>,
    V: Into<Value<'a>>,
{
    Value::Dict(
        pairs
            .into_iter()
            .map(|(key, value)| (Cow::Owned(key.as_ref().to_vec()), value.into()))
            .collect(),
    )
}

impl<'a, K, V, S> From<HashMap<K, V, S>> for Value<'a>
where
    K: AsRef<[u8]>,
    V: Into<Value<'a>>,
{
    fn from(map: HashMap<K, V, S>) -> Self {
        dict_from(map)
    }
}

impl<'a, K, V> From<BTreeMap<K, V>> for Value<'a>
where
    K: AsRef<[u8]>,
    V: Into<Value<'a>>,
{
    fn from(map: BTreeMap<K, V>) -> Self {
        dict_from(map)
    }
}

// Decoded trees re-encode as they were read, except that text stays text and
// dictionary keys are the rendered (possibly hex) key strings.

impl<'a> From<Object<'a>> for Value<'a> {
    fn from(object: Object<'a>) -> Self {
        match object {
            Object::Integer(integer) => Value::Integer(i128::from(integer)),
            Object::Bytes(bytes) => Value::Bytes(bytes),
            Object::Text(text) => Value::Text(text),
            Object::List(list) => Value::List(list.into_iter().map(Value::from).collect()),
            Object::Dict(dict) => Value::Dict(
                dict.into_iter()
                    .map(|(key, value)| {
                        let key = match key {
                            Cow::Borrowed(key) => Cow::Borrowed(key.as_bytes()),
                            Cow::Owned(key) => Cow::Owned(key.into_bytes()),
                        };
                        (key, Value::from(value))
                    })
                    .collect(),
            ),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;

    use serde::{
        Serialize,
        ser::{SerializeMap, SerializeSeq},
    };
    use serde_bytes::Bytes;

    impl Serialize for Value<'_> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::ser::Serializer,
        {
            match self {
                Value::Null => serializer.serialize_none(),
                Value::Integer(int) => serializer.serialize_i128(*int),
                Value::Float(float) => serializer.serialize_f64(*float),
                Value::Bytes(bytes) => serializer.serialize_bytes(bytes),
                Value::Text(text) => serializer.serialize_str(text),
                Value::List(list) => {
                    let items: Vec<_> = list.iter().filter(|v| !v.is_null()).collect();
                    let mut seq = serializer.serialize_seq(Some(items.len()))?;
                    for value in items {
                        seq.serialize_element(value)?;
                    }
                    seq.end()
                },
                Value::Dict(dict) => {
                    let mut pairs: Vec<_> = dict.iter().filter(|(_, v)| !v.is_null()).collect();
                    pairs.sort_unstable_by(|(a, _), (b, _)| a.cmp(b));
                    let mut map = serializer.serialize_map(Some(pairs.len()))?;
                    for (key, value) in pairs {
                        // Text keys keep formats with string-only keys usable
                        match std::str::from_utf8(key) {
                            Ok(key) => map.serialize_entry(key, value)?,
                            Err(_) => map.serialize_entry(Bytes::new(key), value)?,
                        }
                    }
                    map.end()
                },
            }
        }
    }
}
