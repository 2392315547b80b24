use std::fmt::{self, Write};

/// A value that can be formatted as a canonical bencode integer
pub(crate) trait PrintableInteger {
    /// Whether the value has an integer form at all
    fn is_printable(&self) -> bool {
        true
    }

    /// Write the value as a decimal integer.
    ///
    /// Fractional parts are truncated toward zero and negative zero is written as `0`.
    /// Must only be called on printable values.
    fn write_to<W: Write>(&self, w: &mut W) -> fmt::Result;
}

macro_rules! impl_integer {
    ($($type:ty)*) => {$(
        impl PrintableInteger for $type {
            fn write_to<W: Write>(&self, w: &mut W) -> fmt::Result {
                write!(w, "{}", self)
            }
        }
    )*}
}

impl_integer!(usize i128);

impl PrintableInteger for f64 {
    fn is_printable(&self) -> bool {
        self.is_finite()
    }

    fn write_to<W: Write>(&self, w: &mut W) -> fmt::Result {
        let integer = self.trunc();
        if integer == 0.0 {
            // Covers -0.0 and fractions in (-1, 0)
            w.write_char('0')
        } else {
            // A truncated float prints its exact decimal digits at precision 0
            write!(w, "{:.0}", integer)
        }
    }
}
