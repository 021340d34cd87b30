/// A cursor over a type string that tracks the current column.
///
/// Type strings are single-line, so only a byte-based column is tracked.
pub struct Cursor<'src> {
    /// Remaining source text (slice starting at current position).
    rest: &'src str,
    /// Current column number (1-indexed, byte-based).
    column: u32,
}

impl<'src> Cursor<'src> {
    /// Create a new cursor at the start of the source.
    pub fn new(source: &'src str) -> Self {
        Self {
            rest: source,
            column: 1,
        }
    }

    /// Current column number (1-indexed, byte-based).
    #[inline]
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Check if we've reached the end of input.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.rest.is_empty()
    }

    /// Peek at the current character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Consume the current character and advance.
    #[inline]
    pub fn advance(&mut self) -> Option<char> {
        let ch = self.rest.chars().next()?;
        let len = ch.len_utf8();
        self.rest = &self.rest[len..];
        self.column += len as u32;
        Some(ch)
    }

    /// Consume characters while the predicate holds, returning the consumed slice.
    pub fn eat_while(&mut self, f: impl Fn(char) -> bool) -> &'src str {
        let start = self.rest;
        let mut consumed = 0;
        for ch in start.chars() {
            if !f(ch) {
                break;
            }
            consumed += ch.len_utf8();
        }
        self.rest = &start[consumed..];
        self.column += consumed as u32;
        &start[..consumed]
    }

    /// Skip ASCII whitespace.
    pub fn skip_whitespace(&mut self) {
        self.eat_while(|c| c.is_ascii_whitespace());
    }
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
///
/// `:` is included so scoped names such as `std::string` lex as one identifier.
#[inline]
pub fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == ':'
}
