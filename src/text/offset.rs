//! Offset conversion between text encodings
//!
//! Text views report caret positions in characters or UTF-16 code units;
//! the matcher works on byte offsets into the UTF-8 text.

/// Unit an offset is counted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetEncoding {
    /// Bytes of the UTF-8 text
    #[default]
    Utf8,
    /// UTF-16 code units
    Utf16,
    /// Unicode scalar values
    Char,
}

impl OffsetEncoding {
    #[inline]
    fn width(self, c: char) -> usize {
        match self {
            OffsetEncoding::Utf8 => c.len_utf8(),
            OffsetEncoding::Utf16 => c.len_utf16(),
            OffsetEncoding::Char => 1,
        }
    }
}

/// Convert `offset` in `encoding` units into a byte offset of `text`.
///
/// `None` if the offset is past the end or falls inside a character
/// (e.g. between the two halves of a surrogate pair).
pub fn to_byte_offset(text: &str, offset: usize, encoding: OffsetEncoding) -> Option<usize> {
    if encoding == OffsetEncoding::Utf8 {
        return text.is_char_boundary(offset).then_some(offset);
    }

    let mut units = 0;
    for (byte, c) in text.char_indices() {
        if units == offset {
            return Some(byte);
        }
        units += encoding.width(c);
        if units > offset {
            return None;
        }
    }
    (units == offset).then_some(text.len())
}

/// Convert byte offset `byte` of `text` into `encoding` units.
///
/// `None` if `byte` is past the end or not on a character boundary.
pub fn from_byte_offset(text: &str, byte: usize, encoding: OffsetEncoding) -> Option<usize> {
    let prefix = text.get(..byte)?;
    Some(match encoding {
        OffsetEncoding::Utf8 => byte,
        OffsetEncoding::Utf16 => prefix.encode_utf16().count(),
        OffsetEncoding::Char => prefix.chars().count(),
    })
}
