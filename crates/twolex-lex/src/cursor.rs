//! Character-level navigation over source text (`§4.1 Cursor`).
//!
//! The cursor is the only thing in the crate that knows about byte offsets
//! vs. character counts. Everything above it (scanner, driver) talks in
//! terms of `char`s and trusts the cursor to keep `line`/`column`/`offset`
//! consistent. Line/column always describe the position of the *next*
//! character to be read, matching the component contract.

/// Sentinel returned by [`Cursor::peek`] and [`Cursor::advance`] past EOF.
/// Never a valid character a real source file would contain mid-token, so
/// callers can match on it without an `Option` wrapper at every call site.
pub const EOF_SENTINEL: char = '\0';

pub struct Cursor<'a> {
    source: &'a str,
    position: usize,
    line: u32,
    column: u32,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the character `k` positions ahead of the cursor without
    /// consuming it. Returns [`EOF_SENTINEL`] once `k` runs past the end.
    #[inline]
    pub fn peek(&self, k: usize) -> char {
        let mut pos = self.position;
        for _ in 0..k {
            if pos >= self.source.len() {
                return EOF_SENTINEL;
            }
            let b = self.source.as_bytes()[pos];
            pos += if b < 0x80 {
                1
            } else {
                self.source[pos..].chars().next().map(char::len_utf8).unwrap_or(1)
            };
        }
        if pos >= self.source.len() {
            return EOF_SENTINEL;
        }
        let b = self.source.as_bytes()[pos];
        if b < 0x80 {
            b as char
        } else {
            self.source[pos..].chars().next().unwrap_or(EOF_SENTINEL)
        }
    }

    /// Shorthand for `peek(0)`.
    #[inline]
    pub fn current(&self) -> char {
        self.peek(0)
    }

    /// Consumes and returns one character, advancing `offset`/`line`/`column`.
    /// At EOF returns the sentinel and does not move the cursor.
    #[inline]
    pub fn advance(&mut self) -> char {
        if self.position >= self.source.len() {
            return EOF_SENTINEL;
        }
        let b = self.source.as_bytes()[self.position];
        if b < 0x80 {
            self.position += 1;
            let c = b as char;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            c
        } else {
            let c = self.source[self.position..].chars().next().unwrap_or(EOF_SENTINEL);
            self.position += c.len_utf8();
            self.column += 1;
            c
        }
    }

    /// If the current character equals `expected`, consumes it and returns
    /// true; otherwise leaves the cursor untouched and returns false.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn offset(&self) -> usize {
        self.position
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn remaining(&self) -> &'a str {
        &self.source[self.position..]
    }

    /// Slice of the source from `start` (inclusive) to the cursor's current
    /// position (exclusive).
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Slice of the source between two arbitrary byte offsets, independent
    /// of the cursor's current position.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.source[start..end]
    }

    pub fn snapshot(&self) -> CursorSnapshot {
        CursorSnapshot {
            position: self.position,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, snapshot: CursorSnapshot) {
        self.position = snapshot.position;
        self.line = snapshot.line;
        self.column = snapshot.column;
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CursorSnapshot {
    pub position: usize,
    pub line: u32,
    pub column: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_ascii_and_returns_consumed_char() {
        let mut c = Cursor::new("ab");
        assert_eq!(c.advance(), 'a');
        assert_eq!(c.advance(), 'b');
        assert_eq!(c.advance(), EOF_SENTINEL);
    }

    #[test]
    fn advance_handles_utf8() {
        let mut c = Cursor::new("αβ");
        assert_eq!(c.advance(), 'α');
        assert_eq!(c.advance(), 'β');
        assert!(c.at_end());
    }

    #[test]
    fn peek_does_not_consume() {
        let c = Cursor::new("abc");
        assert_eq!(c.peek(0), 'a');
        assert_eq!(c.peek(1), 'b');
        assert_eq!(c.peek(2), 'c');
        assert_eq!(c.peek(3), EOF_SENTINEL);
        assert_eq!(c.current(), 'a');
    }

    #[test]
    fn match_char_consumes_only_on_match() {
        let mut c = Cursor::new("=>");
        assert!(c.match_char('='));
        assert!(!c.match_char('='));
        assert!(c.match_char('>'));
    }

    #[test]
    fn newline_resets_column_and_bumps_line() {
        let mut c = Cursor::new("ab\ncd");
        c.advance();
        c.advance();
        assert_eq!((c.line(), c.column()), (1, 3));
        c.advance(); // '\n'
        assert_eq!((c.line(), c.column()), (2, 1));
    }

    #[test]
    fn slice_from_returns_consumed_text() {
        let mut c = Cursor::new("let x");
        let start = c.offset();
        c.advance();
        c.advance();
        c.advance();
        assert_eq!(c.slice_from(start), "let");
    }

    #[test]
    fn snapshot_restore_round_trips() {
        let mut c = Cursor::new("let x");
        let snap = c.snapshot();
        c.advance();
        c.advance();
        c.restore(snap);
        assert_eq!(c.offset(), 0);
        assert_eq!(c.current(), 'l');
    }

    #[test]
    fn at_end_past_empty_source() {
        let mut c = Cursor::new("");
        assert!(c.at_end());
        assert_eq!(c.advance(), EOF_SENTINEL);
    }
}
