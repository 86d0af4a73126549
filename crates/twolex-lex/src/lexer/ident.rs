//! Identifier, keyword, and string/char-prefix dispatch (`§4.2.2`).
//!
//! An identifier's lead character is ambiguous until the whole body has been
//! scanned: `r`, `f`, `b`, `t8`, `letter16`, … are all valid identifiers on
//! their own, but become literal *prefixes* the instant a quote follows them
//! with no space. So this module always scans the full identifier body
//! first, then decides what it actually was — literal prefix, keyword, or
//! plain identifier — the same maximal-munch-then-classify shape `number`
//! uses for radix markers.

use std::borrow::Cow;

use super::Lexer;
use crate::error::LexResult;
use crate::token::{keyword_lookup, Dialect, TextAttrs, TokenKind};
use crate::unicode;

impl<'a> Lexer<'a> {
    /// Entry point for an identifier-start lead character (already consumed
    /// by the driver). Scans the body, then either dispatches into a
    /// string/char literal (when the body is a recognized prefix directly
    /// followed by a quote) or resolves the keyword/identifier/type-identifier
    /// kind.
    pub(super) fn lex_identifier_or_literal(&mut self) -> LexResult<(TokenKind, Cow<'a, str>)> {
        while unicode::is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        let ident_text = self.cursor.slice_from(self.token_start_offset);

        if self.cursor.current() == '"' {
            if let Some(attrs) = self.text_prefix_attrs(ident_text) {
                self.cursor.advance(); // opening quote
                return self.lex_text_literal(attrs);
            }
        } else if self.cursor.current() == '\'' {
            if let Some(width) = self.char_prefix_width(ident_text) {
                self.cursor.advance();
                return self.lex_char_literal(width, false);
            }
            if self.dialect == Dialect::I && ident_text == "b" {
                self.cursor.advance();
                return self.lex_char_literal(8, true);
            }
        }

        // Not a literal prefix: absorb a trailing failable-type `?` (§4.2.2:
        // "iff the next character is not also `?`" — `x??` must stay an
        // identifier plus a separate `??` operator).
        if self.cursor.current() == '?' && self.cursor.peek(1) != '?' {
            self.cursor.advance();
        }
        let text = self.cursor.slice_from(self.token_start_offset);

        if let Some(kind) = keyword_lookup(text) {
            return Ok((kind, Cow::Borrowed(text)));
        }

        let kind = match self.dialect {
            Dialect::B if text.chars().next().map(char::is_uppercase).unwrap_or(false) => TokenKind::TypeIdentifier,
            _ => TokenKind::Identifier,
        };
        Ok((kind, Cow::Borrowed(text)))
    }

    /// Dialect-B text prefixes: `r`, `f`, `rf`, and the width-tagged
    /// `t8`/`t16` families crossed with raw/formatted (`§4.2.4`). Plain
    /// `"…"` (no prefix letters at all) is handled separately by the
    /// driver's direct `"` dispatch and never reaches this table.
    fn text_prefix_attrs_b(text: &str) -> Option<TextAttrs> {
        let mk = |raw, formatted, width| TextAttrs { raw, formatted, byte: false, width };
        Some(match text {
            "r" => mk(true, false, 8),
            "f" => mk(false, true, 8),
            "rf" => mk(true, true, 8),
            "t8" => mk(false, false, 8),
            "t8r" => mk(true, false, 8),
            "t8f" => mk(false, true, 8),
            "t8rf" => mk(true, true, 8),
            "t16" => mk(false, false, 16),
            "t16r" => mk(true, false, 16),
            "t16f" => mk(false, true, 16),
            "t16rf" => mk(true, true, 16),
            _ => return None,
        })
    }

    /// Dialect-B char prefixes: `letter8`, `letter16`, `letter32`.
    fn char_prefix_width_b(text: &str) -> Option<u8> {
        match text {
            "letter8" => Some(8),
            "letter16" => Some(16),
            "letter32" => Some(32),
            _ => None,
        }
    }

    /// Dialect-I text prefixes: `r`, `f`, `rf`, `b`, `br`, `bf`, `brf`.
    fn text_prefix_attrs_i(text: &str) -> Option<TextAttrs> {
        Some(match text {
            "r" => TextAttrs { raw: true, formatted: false, byte: false, width: 32 },
            "f" => TextAttrs { raw: false, formatted: true, byte: false, width: 32 },
            "rf" => TextAttrs { raw: true, formatted: true, byte: false, width: 32 },
            "b" => TextAttrs { raw: false, formatted: false, byte: true, width: 8 },
            "br" => TextAttrs { raw: true, formatted: false, byte: true, width: 8 },
            "bf" => TextAttrs { raw: false, formatted: true, byte: true, width: 8 },
            "brf" => TextAttrs { raw: true, formatted: true, byte: true, width: 8 },
            _ => return None,
        })
    }

    fn text_prefix_attrs(&self, text: &str) -> Option<TextAttrs> {
        match self.dialect {
            Dialect::B => Self::text_prefix_attrs_b(text),
            Dialect::I => Self::text_prefix_attrs_i(text),
        }
    }

    fn char_prefix_width(&self, text: &str) -> Option<u8> {
        match self.dialect {
            Dialect::B => Self::char_prefix_width_b(text),
            Dialect::I => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{Dialect, Keyword, TextAttrs, TokenKind};
    use crate::Lexer;

    fn lex_one(source: &str, dialect: Dialect) -> (TokenKind, String) {
        let out = Lexer::new(source, dialect).tokenize().expect("tokenize should succeed");
        (out.tokens[0].kind.clone(), out.tokens[0].text.to_string())
    }

    #[test]
    fn plain_identifier() {
        let (kind, text) = lex_one("foo_bar", Dialect::B);
        assert_eq!(kind, TokenKind::Identifier);
        assert_eq!(text, "foo_bar");
    }

    #[test]
    fn dialect_b_pascal_case_is_type_identifier() {
        let (kind, _) = lex_one("Widget", Dialect::B);
        assert_eq!(kind, TokenKind::TypeIdentifier);
    }

    #[test]
    fn dialect_i_never_emits_type_identifier() {
        let (kind, _) = lex_one("Widget", Dialect::I);
        assert_eq!(kind, TokenKind::Identifier);
    }

    #[test]
    fn keyword_wins_over_identifier_classification() {
        let (kind, _) = lex_one("routine", Dialect::B);
        assert_eq!(kind, TokenKind::Keyword(Keyword::Routine));
    }

    #[test]
    fn failable_marker_is_absorbed() {
        let (kind, text) = lex_one("x?", Dialect::B);
        assert_eq!(kind, TokenKind::Identifier);
        assert_eq!(text, "x?");
    }

    #[test]
    fn double_question_mark_is_not_absorbed() {
        let out = Lexer::new("x??", Dialect::B).tokenize().unwrap();
        assert_eq!(out.tokens[0].kind, TokenKind::Identifier);
        assert_eq!(out.tokens[0].text.as_ref(), "x");
        assert_eq!(out.tokens[1].kind, TokenKind::NullCoalesce);
    }

    #[test]
    fn triple_question_equals_is_identifier_then_coalesce_assign() {
        let out = Lexer::new("x??=", Dialect::B).tokenize().unwrap();
        assert_eq!(out.tokens[0].kind, TokenKind::Identifier);
        assert_eq!(out.tokens[1].kind, TokenKind::NullCoalesceAssign);
    }

    #[test]
    fn dialect_b_raw_formatted_width8_prefix_is_recognized() {
        let (kind, text) = lex_one(r#"t8rf"hello""#, Dialect::B);
        assert_eq!(
            kind,
            TokenKind::StringLit(TextAttrs { raw: true, formatted: true, byte: false, width: 8 })
        );
        assert_eq!(text, "hello");
    }

    #[test]
    fn dialect_i_byte_text_prefix_is_recognized() {
        let (kind, _) = lex_one(r#"b"bytes""#, Dialect::I);
        assert_eq!(
            kind,
            TokenKind::StringLit(TextAttrs { raw: false, formatted: false, byte: true, width: 8 })
        );
    }

    #[test]
    fn dialect_i_byte_char_prefix_is_recognized() {
        let (kind, _) = lex_one("b'x'", Dialect::I);
        assert_eq!(kind, TokenKind::ByteChar);
    }

    #[test]
    fn unrecognized_prefix_is_identifier_then_separate_string() {
        let out = Lexer::new(r#"zz"hi""#, Dialect::B).tokenize().unwrap();
        assert_eq!(out.tokens[0].kind, TokenKind::Identifier);
        assert_eq!(out.tokens[0].text.as_ref(), "zz");
        assert!(matches!(out.tokens[1].kind, TokenKind::StringLit(_)));
    }

    #[test]
    fn dialect_b_letter8_char_prefix() {
        let (kind, _) = lex_one("letter8'a'", Dialect::B);
        assert_eq!(kind, TokenKind::Character { width: 8 });
    }
}
