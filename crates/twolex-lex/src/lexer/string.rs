//! String and character literal scanning (`§4.2.4`).
//!
//! Both entry points assume the opening quote is already consumed — by the
//! driver's direct `"`/`'` dispatch for an unprefixed literal, or by
//! [`super::ident`]'s prefix dispatch once it has matched a prefix word.
//! `raw` literals copy their body verbatim (backslashes included) straight
//! out of the source as a borrowed slice; everything else decodes escapes
//! into a freshly owned `String`, since the decoded text can differ in
//! length from its source spelling.

use std::borrow::Cow;

use super::Lexer;
use crate::error::{LexError, LexResult};
use crate::token::{TextAttrs, TokenKind};
use crate::unicode;

impl<'a> Lexer<'a> {
    pub(super) fn lex_text_literal(&mut self, attrs: TextAttrs) -> LexResult<(TokenKind, Cow<'a, str>)> {
        if attrs.raw {
            let start = self.cursor.offset();
            loop {
                if self.cursor.at_end() {
                    return Err(self.unterminated("text"));
                }
                if self.cursor.current() == '"' {
                    let text = self.cursor.slice(start, self.cursor.offset());
                    self.cursor.advance();
                    return Ok((TokenKind::StringLit(attrs), Cow::Borrowed(text)));
                }
                self.cursor.advance();
            }
        }

        let mut decoded = String::new();
        loop {
            if self.cursor.at_end() {
                return Err(self.unterminated("text"));
            }
            match self.cursor.current() {
                '"' => {
                    self.cursor.advance();
                    return Ok((TokenKind::StringLit(attrs), Cow::Owned(decoded)));
                }
                '\\' => {
                    self.cursor.advance();
                    self.decode_escape(&mut decoded, attrs.width, attrs.byte)?;
                }
                c => {
                    decoded.push(c);
                    self.cursor.advance();
                }
            }
        }
    }

    /// `width`/`is_byte` pick the escape decode rules; the caller has
    /// already resolved which prefix (`letter8'`, `b'`, plain `'`, …)
    /// applies (`§4.2.4`).
    pub(super) fn lex_char_literal(&mut self, width: u8, is_byte: bool) -> LexResult<(TokenKind, Cow<'a, str>)> {
        if self.cursor.at_end() || self.cursor.current() == '\'' {
            return Err(self.unterminated("character"));
        }

        let mut decoded = String::new();
        if self.cursor.current() == '\\' {
            self.cursor.advance();
            self.decode_escape(&mut decoded, width, is_byte)?;
        } else {
            decoded.push(self.cursor.current());
            self.cursor.advance();
        }

        if self.cursor.current() != '\'' {
            return Err(self.unterminated("character"));
        }
        self.cursor.advance();

        let kind = if is_byte { TokenKind::ByteChar } else { TokenKind::Character { width } };
        Ok((kind, Cow::Owned(decoded)))
    }

    fn unterminated(&self, kind: &'static str) -> LexError {
        LexError::UnterminatedLiteral {
            kind,
            line: self.token_start_line,
            column: self.token_start_column,
            offset: self.token_start_offset,
        }
    }

    /// Decodes a single escape sequence (the backslash is already consumed;
    /// the cursor sits on the selector character). `\n \t \r \\ \" \' \0`
    /// decode directly; `\u` requires exactly `width/4` hex digits and a
    /// value that both fits `width` and, for byte literals, stays `<= 0xFF`.
    fn decode_escape(&mut self, out: &mut String, width: u8, is_byte: bool) -> LexResult<()> {
        if self.cursor.at_end() {
            return Err(self.unterminated_escape());
        }
        match self.cursor.current() {
            'n' => {
                out.push('\n');
                self.cursor.advance();
            }
            't' => {
                out.push('\t');
                self.cursor.advance();
            }
            'r' => {
                out.push('\r');
                self.cursor.advance();
            }
            '\\' => {
                out.push('\\');
                self.cursor.advance();
            }
            '"' => {
                out.push('"');
                self.cursor.advance();
            }
            '\'' => {
                out.push('\'');
                self.cursor.advance();
            }
            '0' => {
                out.push('\0');
                self.cursor.advance();
            }
            'u' => {
                self.cursor.advance();
                self.decode_unicode_escape(out, width, is_byte)?;
            }
            other => {
                return Err(LexError::InvalidEscape {
                    reason: format!("unknown escape character '\\{other}'"),
                    line: self.token_start_line,
                    column: self.token_start_column,
                    offset: self.token_start_offset,
                });
            }
        }
        Ok(())
    }

    fn decode_unicode_escape(&mut self, out: &mut String, width: u8, is_byte: bool) -> LexResult<()> {
        let needed = unicode::hex_digits_for_width(width);
        let start = self.cursor.offset();
        let mut count = 0;
        while count < needed && self.cursor.current().is_ascii_hexdigit() {
            self.cursor.advance();
            count += 1;
        }
        if count != needed {
            return Err(LexError::InvalidEscape {
                reason: format!("'\\u' escape needs exactly {needed} hex digits for a {width}-bit literal"),
                line: self.token_start_line,
                column: self.token_start_column,
                offset: self.token_start_offset,
            });
        }

        let hex = self.cursor.slice(start, self.cursor.offset());
        let value = unicode::parse_hex_codepoint(hex).ok_or_else(|| LexError::InvalidEscape {
            reason: format!("'\\u{hex}' is not a valid unicode scalar value"),
            line: self.token_start_line,
            column: self.token_start_column,
            offset: self.token_start_offset,
        })?;

        if !unicode::fits_width(value, width) || (is_byte && value > 0xFF) {
            return Err(LexError::InvalidEscape {
                reason: format!("unicode value U+{value:04X} exceeds the {width}-bit target width"),
                line: self.token_start_line,
                column: self.token_start_column,
                offset: self.token_start_offset,
            });
        }

        match char::from_u32(value) {
            Some(ch) => {
                out.push(ch);
                Ok(())
            }
            None => Err(LexError::InvalidEscape {
                reason: format!("'\\u{hex}' is not a valid unicode scalar value"),
                line: self.token_start_line,
                column: self.token_start_column,
                offset: self.token_start_offset,
            }),
        }
    }

    fn unterminated_escape(&self) -> LexError {
        LexError::UnterminatedLiteral {
            kind: "text",
            line: self.token_start_line,
            column: self.token_start_column,
            offset: self.token_start_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{Dialect, TextAttrs, TokenKind};
    use crate::Lexer;

    fn lex_one(source: &str, dialect: Dialect) -> (TokenKind, String) {
        let out = Lexer::new(source, dialect).tokenize().expect("tokenize should succeed");
        (out.tokens[0].kind.clone(), out.tokens[0].text.to_string())
    }

    #[test]
    fn plain_dialect_b_string_decodes_escapes() {
        let (kind, text) = lex_one(r#""hi\nthere""#, Dialect::B);
        assert_eq!(kind, TokenKind::StringLit(TextAttrs { raw: false, formatted: false, byte: false, width: 8 }));
        assert_eq!(text, "hi\nthere");
    }

    #[test]
    fn plain_dialect_i_string_defaults_to_width_32() {
        let (kind, _) = lex_one(r#""hi""#, Dialect::I);
        assert_eq!(kind, TokenKind::StringLit(TextAttrs { raw: false, formatted: false, byte: false, width: 32 }));
    }

    #[test]
    fn raw_string_preserves_backslashes() {
        let (_, text) = lex_one(r#"r"path: {p}\file""#, Dialect::B);
        assert_eq!(text, r"path: {p}\file");
    }

    #[test]
    fn t8rf_raw_formatted_body_is_preserved_verbatim() {
        let (kind, text) = lex_one(r#"t8rf"path: {p}\file""#, Dialect::B);
        assert_eq!(kind, TokenKind::StringLit(TextAttrs { raw: true, formatted: true, byte: false, width: 8 }));
        assert_eq!(text, r"path: {p}\file");
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::new(r#""unterminated"#, Dialect::B).tokenize().unwrap_err();
        assert!(matches!(err, crate::error::LexError::UnterminatedLiteral { .. }));
    }

    #[test]
    fn letter16_decodes_unicode_escape() {
        let (kind, text) = lex_one("letter16'\\u00FF'", Dialect::B);
        assert_eq!(kind, TokenKind::Character { width: 16 });
        assert_eq!(text.chars().next(), Some('\u{FF}'));
    }

    #[test]
    fn letter8_accepts_value_within_width() {
        let (kind, _) = lex_one("letter8'\\u00FF'", Dialect::B);
        assert_eq!(kind, TokenKind::Character { width: 8 });
    }

    #[test]
    fn letter8_rejects_value_exceeding_width() {
        let err = Lexer::new("letter8'\\u01FF'", Dialect::B).tokenize().unwrap_err();
        assert!(matches!(err, crate::error::LexError::InvalidEscape { .. }));
    }

    #[test]
    fn plain_char_literal_defaults_to_width_32_in_both_dialects() {
        let (kind, _) = lex_one("'x'", Dialect::B);
        assert_eq!(kind, TokenKind::Character { width: 32 });
        let (kind, _) = lex_one("'x'", Dialect::I);
        assert_eq!(kind, TokenKind::Character { width: 32 });
    }

    #[test]
    fn unknown_escape_is_rejected() {
        let err = Lexer::new(r#""\q""#, Dialect::B).tokenize().unwrap_err();
        assert!(matches!(err, crate::error::LexError::InvalidEscape { .. }));
    }

    #[test]
    fn wrong_digit_count_unicode_escape_is_rejected() {
        let err = Lexer::new(r#""\u12""#, Dialect::B).tokenize().unwrap_err();
        assert!(matches!(err, crate::error::LexError::InvalidEscape { .. }));
    }

    #[test]
    fn unterminated_char_literal_is_an_error() {
        let err = Lexer::new("'x", Dialect::B).tokenize().unwrap_err();
        assert!(matches!(err, crate::error::LexError::UnterminatedLiteral { .. }));
    }
}
