use std::borrow::Cow;

use crate::decoding::{Dictionary, Error, Object, TextEncoding, text::render_key};

const DICTIONARY_START: u8 = b'd';
const LIST_START: u8 = b'l';
const INTEGER_START: u8 = b'i';
const STRING_DELIMITER: u8 = b':';
const END_OF_TYPE: u8 = b'e';

/// Default nesting limit. Decoding recurses once per level.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// A bencode decoder
///
/// The decoder only holds the input and the decode options; every call to
/// [`Decoder::decode`] or [`Decoder::decode_prefix`] walks the input with its own
/// cursor. A single decoder can therefore be shared between threads.
#[derive(Clone, Copy, Debug)]
pub struct Decoder<'ser> {
    source: &'ser [u8],
    start: Option<usize>,
    end: Option<usize>,
    encoding: Option<TextEncoding>,
    max_depth: usize,
}

impl<'ser> Decoder<'ser> {
    /// Create a new decoder over raw bytes or text
    pub fn new<I: AsRef<[u8]> + ?Sized>(input: &'ser I) -> Self {
        Decoder {
            source: input.as_ref(),
            start: None,
            end: None,
            encoding: None,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Start decoding at `start` instead of the beginning of the input
    #[must_use]
    pub fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    /// Stop decoding at `end` (exclusive) instead of the end of the input
    #[must_use]
    pub fn with_end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }

    /// Decode byte strings into text using the given encoding. Without an encoding,
    /// byte strings are returned as raw bytes.
    #[must_use]
    pub fn with_text_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the maximum nesting depth of lists and dictionaries. An unlimited-depth decoder
    /// may be created using `with_max_depth(usize::MAX)`, but be warned that deeply nested
    /// hostile input will then exhaust the stack.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    fn window(&self) -> Result<(usize, &'ser [u8]), Error> {
        let len = self.source.len();
        let start = self.start.unwrap_or(0);
        let end = self.end.unwrap_or(len);

        if start > end || end > len {
            return Err(Error::InvalidRange { start, end, len });
        }

        Ok((start, &self.source[start..end]))
    }

    /// Decode the value at the start of the window.
    ///
    /// Returns `Ok(None)` if the window is empty. Bytes following the first complete
    /// value are ignored.
    pub fn decode(&self) -> Result<Option<Object<'ser>>, Error> {
        self.decode_prefix().map(|(object, _)| object)
    }

    /// Like [`Decoder::decode`], but also returns the number of bytes the decoded value
    /// occupied.
    pub fn decode_prefix(&self) -> Result<(Option<Object<'ser>>, usize), Error> {
        let (base, data) = self.window()?;
        log::trace!("decoding {} bytes at offset {}", data.len(), base);

        if data.is_empty() {
            return Ok((None, 0));
        }

        let mut cursor = Cursor {
            data,
            base,
            position: 0,
            encoding: self.encoding,
            depth: 0,
            max_depth: self.max_depth,
        };
        let object = cursor.next()?;

        Ok((Some(object), cursor.position))
    }
}

/// Traversal state of a single decode call
struct Cursor<'ser> {
    data: &'ser [u8],
    base: usize,
    position: usize,
    encoding: Option<TextEncoding>,
    depth: usize,
    max_depth: usize,
}

impl<'ser> Cursor<'ser> {
    /// Offset in the caller's buffer
    fn offset(&self, position: usize) -> usize {
        self.base + position
    }

    fn next(&mut self) -> Result<Object<'ser>, Error> {
        match self.data.get(self.position) {
            Some(&DICTIONARY_START) => self.dictionary(),
            Some(&LIST_START) => self.list(),
            Some(&INTEGER_START) => self.integer(),
            _ => {
                let bytes = self.string()?;
                Ok(match self.encoding {
                    Some(encoding) => Object::Text(encoding.decode(bytes)),
                    None => Object::Bytes(Cow::Borrowed(bytes)),
                })
            },
        }
    }

    /// Position of the next `delimiter` at or after the cursor
    fn find(&self, delimiter: u8) -> Result<usize, Error> {
        self.data[self.position..]
            .iter()
            .position(|&byte| byte == delimiter)
            .map(|index| self.position + index)
            .ok_or(Error::MissingDelimiter {
                delimiter: char::from(delimiter),
                offset: self.offset(self.position),
            })
    }

    /// Byte at the cursor inside a container opened at `start`
    fn peek_in(&self, start: usize) -> Result<u8, Error> {
        self.data
            .get(self.position)
            .copied()
            .ok_or(Error::MissingDelimiter {
                delimiter: char::from(END_OF_TYPE),
                offset: self.offset(start),
            })
    }

    fn enter(&mut self) -> Result<usize, Error> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::NestingTooDeep {
                max_depth: self.max_depth,
                offset: self.offset(self.position),
            });
        }

        let start = self.position;
        self.position += 1;
        Ok(start)
    }

    fn leave(&mut self) {
        self.depth -= 1;
        self.position += 1;
    }

    fn dictionary(&mut self) -> Result<Object<'ser>, Error> {
        let start = self.enter()?;
        let mut dict = Dictionary::new();

        while self.peek_in(start)? != END_OF_TYPE {
            let key = render_key(self.string()?);
            self.peek_in(start)?;
            let value = self.next()?;
            dict.insert(key, value);
        }

        self.leave();
        Ok(Object::Dict(dict))
    }

    fn list(&mut self) -> Result<Object<'ser>, Error> {
        let start = self.enter()?;
        let mut list = Vec::new();

        while self.peek_in(start)? != END_OF_TYPE {
            list.push(self.next()?);
        }

        self.leave();
        Ok(Object::List(list))
    }

    fn integer(&mut self) -> Result<Object<'ser>, Error> {
        let end = self.find(END_OF_TYPE)?;
        let number = self.parse_int(self.position + 1, end)?;
        self.position = end + 1;

        Ok(Object::Integer(number))
    }

    fn string(&mut self) -> Result<&'ser [u8], Error> {
        let start = self.position;
        let separator = self.find(STRING_DELIMITER)?;
        let length = self.parse_int(start, separator)?;

        let length = usize::try_from(length).map_err(|_| Error::InvalidLength {
            length,
            offset: self.offset(start),
        })?;

        let body = separator + 1;
        let available = self.data.len() - body;
        if length > available {
            return Err(Error::UnexpectedEof {
                offset: self.offset(start),
                needed: length,
                available,
            });
        }

        self.position = body + length;
        Ok(&self.data[body..self.position])
    }

    /// Parse the decimal integer in `data[from..to]`.
    ///
    /// A sign is only accepted as the first byte, and a `.` ends the number; whatever
    /// follows it is discarded. An empty number is zero.
    fn parse_int(&self, from: usize, to: usize) -> Result<i64, Error> {
        let mut sum: i64 = 0;
        let mut negative = false;

        for (index, &byte) in self.data[from..to].iter().enumerate() {
            match byte {
                b'0'..=b'9' => {
                    let digit = i64::from(byte - b'0');
                    sum = sum
                        .checked_mul(10)
                        .and_then(|sum| {
                            if negative {
                                sum.checked_sub(digit)
                            } else {
                                sum.checked_add(digit)
                            }
                        })
                        .ok_or(Error::IntegerOverflow {
                            offset: self.offset(from),
                        })?;
                },
                b'+' if index == 0 => {},
                b'-' if index == 0 => negative = true,
                b'.' => break,
                _ => {
                    return Err(Error::InvalidInteger {
                        byte,
                        offset: self.offset(from + index),
                    });
                },
            }
        }

        Ok(sum)
    }
}
