//! Character cursor for traversing source code.
//!
//! The cursor maintains a byte position in the source string and provides
//! methods for advancing, peeking ahead, and slicing lexemes. It handles
//! UTF-8 correctly with a fast path for ASCII.

/// A cursor for traversing source code character by character.
///
/// # Example
///
/// ```
/// use plcc_lex::Cursor;
///
/// let mut cursor = Cursor::new("LET x;");
/// assert_eq!(cursor.current_char(), 'L');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), 'E');
/// ```
pub struct Cursor<'src> {
    /// The source text being traversed.
    source: &'src str,

    /// Current byte position in the source.
    position: usize,
}

impl<'src> Cursor<'src> {
    /// Creates a new cursor at the start of the given source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            position: 0,
        }
    }

    /// Returns the character at the cursor position, or `'\0'` at the end.
    #[inline]
    pub fn current_char(&self) -> char {
        self.peek_char(0)
    }

    /// Returns the character `offset` characters ahead of the cursor,
    /// or `'\0'` past the end of the source.
    #[inline]
    pub fn peek_char(&self, offset: usize) -> char {
        let rest = &self.source.as_bytes()[self.position.min(self.source.len())..];

        // Fast path: the lookahead window is pure ASCII.
        if let Some(&b) = rest.get(offset) {
            if rest[..=offset].is_ascii() {
                return b as char;
            }
        }

        self.source[self.position..]
            .chars()
            .nth(offset)
            .unwrap_or('\0')
    }

    /// Advances the cursor past the current character.
    #[inline]
    pub fn advance(&mut self) {
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
        }
    }

    /// Returns true when the whole source has been consumed.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Current byte position in the source.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The slice of source text from `start` up to the cursor.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.position]
    }
}
