//! Comment scanning (`§4.2.2 4.2.1 Comments`).
//!
//! A lone `#` starts a regular comment, consumed silently with no token. A
//! leading `###` starts a documentation comment: everything after the three
//! `#`s up to (not including) the next newline becomes a single
//! [`TokenKind::DocComment`].

use std::borrow::Cow;

use super::Lexer;
use crate::token::TokenKind;

impl<'a> Lexer<'a> {
    /// Called with the lead `#` already consumed. Returns `Some` for a doc
    /// comment (the caller emits it as a token), `None` for a regular
    /// comment (nothing is emitted).
    pub(super) fn lex_hash(&mut self) -> Option<(TokenKind, Cow<'a, str>)> {
        if self.cursor.current() == '#' && self.cursor.peek(1) == '#' {
            self.cursor.advance();
            self.cursor.advance();
            let start = self.cursor.offset();
            while !self.cursor.at_end() && self.cursor.current() != '\n' {
                self.cursor.advance();
            }
            let text = self.cursor.slice(start, self.cursor.offset());
            return Some((TokenKind::DocComment, Cow::Borrowed(text)));
        }

        while !self.cursor.at_end() && self.cursor.current() != '\n' {
            self.cursor.advance();
        }
        None
    }
}
