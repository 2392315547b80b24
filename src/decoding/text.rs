use std::{borrow::Cow, fmt, str::FromStr};

use crate::decoding::Error;

/// Character encoding used to turn byte strings into text while decoding.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum TextEncoding {
    /// UTF-8. Invalid sequences are replaced by U+FFFD.
    #[default]
    Utf8,
}

impl TextEncoding {
    /// Decode `bytes` as text. Borrows from the input if no replacement was necessary.
    pub fn decode<'a>(self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes),
        }
    }
}

impl FromStr for TextEncoding {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if name.eq_ignore_ascii_case("utf8") || name.eq_ignore_ascii_case("utf-8") {
            Ok(TextEncoding::Utf8)
        } else {
            Err(Error::UnknownEncoding(name.to_owned()))
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => f.write_str("utf8"),
        }
    }
}

/// Render a dictionary key as text.
///
/// Keys are always decoded as UTF-8, independently of the requested text encoding. A
/// key whose decoded form contains U+FFFD is rendered as the lowercase hex of its raw
/// bytes instead.
pub(crate) fn render_key(raw: &[u8]) -> Cow<'_, str> {
    let text = String::from_utf8_lossy(raw);
    if text.contains(char::REPLACEMENT_CHARACTER) {
        Cow::Owned(hex::encode(raw))
    } else {
        text
    }
}
