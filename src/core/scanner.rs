//! SIMD-accelerated text scanning using memchr
//!
//! Uses memchr crate for fast byte and substring searching with SIMD acceleration:
//! - SSE2 (default x86_64)
//! - AVX2 (runtime detection)
//! - NEON (aarch64)

use memchr::{memchr, memmem};

/// Scanner for XML delimiter detection
pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Create a new scanner for the given input
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    /// Get the current position
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Set the current position (clamped to the input length)
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Input length
    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Byte at an absolute position
    #[inline]
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.input.get(pos).copied()
    }

    /// Check if input starts with a byte sequence at current position
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.input[self.pos..].starts_with(needle)
    }

    /// Find next occurrence of a specific byte
    #[inline]
    pub fn find_byte(&self, byte: u8) -> Option<usize> {
        memchr(byte, &self.input[self.pos..]).map(|i| self.pos + i)
    }

    /// Find next occurrence of a byte sequence at or after `from`
    #[inline]
    pub fn find_from(&self, from: usize, needle: &[u8]) -> Option<usize> {
        let from = from.min(self.input.len());
        memmem::find(&self.input[from..], needle).map(|i| from + i)
    }

    /// Find tag end while handling quotes properly
    /// Returns the position of '>' that is not inside quotes
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut pos = self.pos;
        let mut in_single_quote = false;
        let mut in_double_quote = false;

        while pos < self.input.len() {
            match self.input[pos] {
                b'"' if !in_single_quote => in_double_quote = !in_double_quote,
                b'\'' if !in_double_quote => in_single_quote = !in_single_quote,
                b'>' if !in_single_quote && !in_double_quote => return Some(pos),
                _ => {}
            }
            pos += 1;
        }
        None
    }

    /// Find the '>' closing a `<!...>` declaration, skipping quoted
    /// strings and a bracketed internal subset
    pub fn find_declaration_end(&self) -> Option<usize> {
        let mut pos = self.pos;
        let mut depth = 0usize;
        let mut quote: Option<u8> = None;

        while pos < self.input.len() {
            let b = self.input[pos];
            match quote {
                Some(q) if b == q => quote = None,
                Some(_) => {}
                None => match b {
                    b'"' | b'\'' => quote = Some(b),
                    b'[' => depth += 1,
                    b']' => depth = depth.saturating_sub(1),
                    b'>' if depth == 0 => return Some(pos),
                    _ => {}
                },
            }
            pos += 1;
        }
        None
    }
}

/// All non-overlapping occurrences of `needle` in `content`, left to right
///
/// An empty needle has no occurrences.
pub fn occurrences(content: &str, needle: &str) -> Vec<usize> {
    if needle.is_empty() {
        return Vec::new();
    }
    memmem::find_iter(content.as_bytes(), needle.as_bytes()).collect()
}

/// 1-based ordinal of `index` among sorted occurrence offsets
///
/// `None` when `index` is not one of the offsets.
#[inline]
pub fn ordinal_of(offsets: &[usize], index: usize) -> Option<usize> {
    offsets.binary_search(&index).ok().map(|i| i + 1)
}

/// Whether `content` holds exactly `needle` at byte offset `index`
///
/// Out-of-range and non-char-boundary offsets are simply `false`.
#[inline]
pub fn occurs_at(content: &str, index: usize, needle: &str) -> bool {
    index
        .checked_add(needle.len())
        .and_then(|end| content.get(index..end))
        == Some(needle)
}
