use std::borrow::Cow;

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde_ as serde;

/// Dictionary produced by the decoder. Keys are rendered as text and keep the order in
/// which they appeared on the wire.
pub type Dictionary<'ser> = IndexMap<Cow<'ser, str>, Object<'ser>>;

/// A decoded value tree, borrowing from the input wherever possible.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Object<'ser> {
    /// A dictionary with text keys
    Dict(Dictionary<'ser>),
    /// A list of arbitrary objects
    List(Vec<Object<'ser>>),
    /// A raw byte string
    Bytes(Cow<'ser, [u8]>),
    /// A byte string decoded as text. Only produced when a text encoding was requested.
    Text(Cow<'ser, str>),
    /// A signed integer
    Integer(i64),
}

impl<'ser> Object<'ser> {
    /// Convert this object into an owned object with static lifetime
    pub fn into_owned(self) -> Object<'static> {
        match self {
            Object::Dict(dict) => Object::Dict(
                dict.into_iter()
                    .map(|(key, value)| (Cow::Owned(key.into_owned()), value.into_owned()))
                    .collect(),
            ),
            Object::List(list) => Object::List(list.into_iter().map(Object::into_owned).collect()),
            Object::Bytes(bytes) => Object::Bytes(Cow::Owned(bytes.into_owned())),
            Object::Text(text) => Object::Text(Cow::Owned(text.into_owned())),
            Object::Integer(integer) => Object::Integer(integer),
        }
    }

    /// The integer, if this is one
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Integer(integer) => Some(*integer),
            _ => None,
        }
    }

    /// The raw bytes of a byte string, or the UTF-8 bytes of a decoded text
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Object::Bytes(bytes) => Some(bytes),
            Object::Text(text) => Some(text.as_bytes()),
            _ => None,
        }
    }

    /// The text, if this is decoded text or a byte string holding valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Object::Text(text) => Some(text),
            Object::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }

    /// The items, if this is a list
    pub fn as_list(&self) -> Option<&[Object<'ser>]> {
        match self {
            Object::List(list) => Some(list),
            _ => None,
        }
    }

    /// The entries, if this is a dictionary
    pub fn as_dict(&self) -> Option<&Dictionary<'ser>> {
        match self {
            Object::Dict(dict) => Some(dict),
            _ => None,
        }
    }

    /// Look up a dictionary entry by its rendered key
    pub fn get(&self, key: &str) -> Option<&Object<'ser>> {
        self.as_dict().and_then(|dict| dict.get(key))
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::*;

    use serde::{
        Serialize,
        ser::{SerializeMap, SerializeSeq},
    };

    impl Serialize for Object<'_> {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::ser::Serializer,
        {
            match self {
                Object::Integer(int) => serializer.serialize_i64(*int),
                Object::Bytes(bytes) => serializer.serialize_bytes(bytes),
                Object::Text(text) => serializer.serialize_str(text),
                Object::List(list) => {
                    let mut seq = serializer.serialize_seq(Some(list.len()))?;
                    for value in list {
                        seq.serialize_element(value)?;
                    }
                    seq.end()
                },
                Object::Dict(dict) => {
                    let mut map = serializer.serialize_map(Some(dict.len()))?;
                    for (key, value) in dict {
                        map.serialize_entry(key, value)?;
                    }
                    map.end()
                },
            }
        }
    }
}
