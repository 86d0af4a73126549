//! Operator, delimiter, and structural-punctuation lexing (`§4.2.5`).
//!
//! Every function here assumes its lead character is already consumed by
//! the driver's dispatch loop (the same convention `number` and `ident`
//! use) and recognizes the rest of its family by maximal munch: check the
//! longest possible suffix first, falling back one character at a time.

use super::Lexer;
use crate::error::{LexError, LexResult};
use crate::token::{ArithOp, BitOp, CompareOp, Dialect, Overflow, TokenKind};

impl<'a> Lexer<'a> {
    /// The overflow-behavior suffix shared by every arithmetic lead
    /// (`§4.2.5`'s canonical shape table): `%` wrapping, `^` saturating,
    /// `?` checked, `!` unchecked, or none of those — the default.
    fn overflow_suffix(&mut self) -> Overflow {
        match self.cursor.current() {
            '%' => {
                self.cursor.advance();
                Overflow::Wrapping
            }
            '^' => {
                self.cursor.advance();
                Overflow::Saturating
            }
            '?' => {
                self.cursor.advance();
                Overflow::Checked
            }
            '!' => {
                self.cursor.advance();
                Overflow::Unchecked
            }
            _ => Overflow::Default,
        }
    }

    fn arith(&mut self, op: ArithOp) -> TokenKind {
        let overflow = self.overflow_suffix();
        let assign = self.cursor.match_char('=');
        TokenKind::Arith { op, overflow, assign }
    }

    pub(super) fn lex_plus(&mut self) -> TokenKind {
        self.arith(ArithOp::Add)
    }

    /// `-`, `->`, and the overflow/assign family of `-`.
    pub(super) fn lex_minus(&mut self) -> TokenKind {
        if self.cursor.match_char('>') {
            return TokenKind::Arrow;
        }
        self.arith(ArithOp::Sub)
    }

    /// `*` (mul) or `**` (pow), each with the overflow/assign family.
    pub(super) fn lex_star(&mut self) -> TokenKind {
        let op = if self.cursor.match_char('*') { ArithOp::Pow } else { ArithOp::Mul };
        self.arith(op)
    }

    /// Floating division (`/`, `/=`) vs. integer division (`//`, with the
    /// full overflow/assign family) — `§4.2.5`: "applies overflow suffixes
    /// to the integer form" only.
    pub(super) fn lex_slash(&mut self) -> TokenKind {
        if self.cursor.match_char('/') {
            return self.arith(ArithOp::IntDiv);
        }
        let assign = self.cursor.match_char('=');
        TokenKind::Arith { op: ArithOp::Div, overflow: Overflow::Default, assign }
    }

    pub(super) fn lex_percent(&mut self) -> TokenKind {
        self.arith(ArithOp::Rem)
    }

    /// `=`, `==`, `===`, `=>`.
    pub(super) fn lex_eq(&mut self) -> TokenKind {
        if self.cursor.match_char('=') {
            return if self.cursor.match_char('=') {
                TokenKind::Compare(CompareOp::RefEq)
            } else {
                TokenKind::Compare(CompareOp::Eq)
            };
        }
        if self.cursor.match_char('>') {
            return TokenKind::FatArrow;
        }
        TokenKind::Assign
    }

    /// `!`, `!=`, `!==`.
    pub(super) fn lex_bang(&mut self) -> TokenKind {
        if self.cursor.match_char('=') {
            return if self.cursor.match_char('=') {
                TokenKind::Compare(CompareOp::RefNotEq)
            } else {
                TokenKind::Compare(CompareOp::NotEq)
            };
        }
        TokenKind::Bang
    }

    /// `<`, `<=`, `<=>`, `<<`, `<<<`, `<<?`, plus the assign form of every
    /// bitwise shape reached along the way.
    pub(super) fn lex_lt(&mut self) -> TokenKind {
        if self.cursor.match_char('=') {
            return if self.cursor.match_char('>') {
                TokenKind::Compare(CompareOp::Spaceship)
            } else {
                TokenKind::Compare(CompareOp::LtEq)
            };
        }
        if self.cursor.match_char('<') {
            if self.cursor.match_char('<') {
                let assign = self.cursor.match_char('=');
                return TokenKind::Bitwise { op: BitOp::LogicalShl, assign };
            }
            if self.cursor.match_char('?') {
                let assign = self.cursor.match_char('=');
                return TokenKind::Bitwise { op: BitOp::ShlChecked, assign };
            }
            let assign = self.cursor.match_char('=');
            return TokenKind::Bitwise { op: BitOp::Shl, assign };
        }
        TokenKind::Compare(CompareOp::Lt)
    }

    /// Mirror of `lex_lt` for `>`: `>`, `>=`, `>>`, `>>>`, `>>?`.
    pub(super) fn lex_gt(&mut self) -> TokenKind {
        if self.cursor.match_char('=') {
            return TokenKind::Compare(CompareOp::GtEq);
        }
        if self.cursor.match_char('>') {
            if self.cursor.match_char('>') {
                let assign = self.cursor.match_char('=');
                return TokenKind::Bitwise { op: BitOp::LogicalShr, assign };
            }
            if self.cursor.match_char('?') {
                let assign = self.cursor.match_char('=');
                return TokenKind::Bitwise { op: BitOp::ShrChecked, assign };
            }
            let assign = self.cursor.match_char('=');
            return TokenKind::Bitwise { op: BitOp::Shr, assign };
        }
        TokenKind::Compare(CompareOp::Gt)
    }

    pub(super) fn lex_amp(&mut self) -> TokenKind {
        let assign = self.cursor.match_char('=');
        TokenKind::Bitwise { op: BitOp::And, assign }
    }

    pub(super) fn lex_pipe(&mut self) -> TokenKind {
        let assign = self.cursor.match_char('=');
        TokenKind::Bitwise { op: BitOp::Or, assign }
    }

    pub(super) fn lex_caret(&mut self) -> TokenKind {
        let assign = self.cursor.match_char('=');
        TokenKind::Bitwise { op: BitOp::Xor, assign }
    }

    /// `~` is unary bitwise-not; it has no compound-assign form.
    pub(super) fn lex_tilde(&mut self) -> TokenKind {
        TokenKind::Bitwise { op: BitOp::Not, assign: false }
    }

    /// `?`, `??`, `??=`, `?:`.
    pub(super) fn lex_question(&mut self) -> TokenKind {
        if self.cursor.match_char('?') {
            return if self.cursor.match_char('=') {
                TokenKind::NullCoalesceAssign
            } else {
                TokenKind::NullCoalesce
            };
        }
        if self.cursor.match_char(':') {
            return TokenKind::Elvis;
        }
        TokenKind::Question
    }

    /// `:`, `::` (Dialect-B only — Dialect-I forbids it, `§4.2.5`/`§7`), and
    /// arming Dialect-I's block-starter flag on a bare end-of-line colon.
    pub(super) fn lex_colon(&mut self) -> LexResult<TokenKind> {
        if self.cursor.current() == ':' {
            if self.dialect == Dialect::I {
                return Err(LexError::ForbiddenSyntax {
                    reason: "'::' is forbidden in Dialect-I; use '.' for member access".into(),
                    line: self.token_start_line,
                    column: self.token_start_column,
                    offset: self.token_start_offset,
                });
            }
            self.cursor.advance();
            return Ok(TokenKind::ColonColon);
        }
        if self.dialect == Dialect::I {
            self.maybe_arm_expect_indent();
        }
        Ok(TokenKind::Colon)
    }

    /// `.`, `...`; a bare `..` is forbidden in both dialects (`§9` design
    /// notes: "this spec defaults to reject `..`, require `to` keyword").
    pub(super) fn lex_dot(&mut self) -> LexResult<TokenKind> {
        if self.cursor.current() == '.' {
            self.cursor.advance();
            if self.cursor.current() == '.' {
                self.cursor.advance();
                return Ok(TokenKind::DotDotDot);
            }
            return Err(LexError::ForbiddenSyntax {
                reason: "'..' is forbidden; use the 'to' keyword to express a range".into(),
                line: self.token_start_line,
                column: self.token_start_column,
                offset: self.token_start_offset,
            });
        }
        Ok(TokenKind::Dot)
    }

    /// `;` is Dialect-B's alternate statement terminator (emitted as a
    /// `Newline` token, same as a physical newline); Dialect-I forbids it.
    pub(super) fn lex_semicolon(&mut self) -> LexResult<TokenKind> {
        if self.dialect == Dialect::I {
            return Err(LexError::ForbiddenSyntax {
                reason: "';' is forbidden in Dialect-I; end a statement with a newline instead".into(),
                line: self.token_start_line,
                column: self.token_start_column,
                offset: self.token_start_offset,
            });
        }
        Ok(TokenKind::Newline)
    }

    /// `@intrinsic` and `@native` are recognized atomically; anything else
    /// after a bare `@` is just `At` (`§4.2.5`).
    pub(super) fn lex_at(&mut self) -> TokenKind {
        if self.match_word("intrinsic") {
            return TokenKind::AtIntrinsic;
        }
        if self.match_word("native") {
            return TokenKind::AtNative;
        }
        TokenKind::At
    }

    /// Consumes `word` if it appears next, in full, with no identifier
    /// continuation character directly after it (so `@intrinsics` doesn't
    /// wrongly match `@intrinsic` plus a stray `s`).
    fn match_word(&mut self, word: &str) -> bool {
        for (i, expected) in word.chars().enumerate() {
            if self.cursor.peek(i) != expected {
                return false;
            }
        }
        if crate::unicode::is_ident_continue(self.cursor.peek(word.chars().count())) {
            return false;
        }
        for _ in 0..word.chars().count() {
            self.cursor.advance();
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::token::{ArithOp, BitOp, CompareOp, Dialect, Overflow, TokenKind};
    use crate::Lexer;

    fn kinds(source: &str, dialect: Dialect) -> Vec<TokenKind> {
        Lexer::new(source, dialect)
            .tokenize()
            .expect("tokenize should succeed")
            .tokens
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn arrow_is_not_minus_then_gt() {
        let got = kinds("->", Dialect::B);
        assert_eq!(got, vec![TokenKind::Arrow, TokenKind::Eof]);
    }

    #[test]
    fn power_with_checked_overflow_and_assign() {
        let got = kinds("**?=", Dialect::B);
        assert_eq!(
            got,
            vec![
                TokenKind::Arith { op: ArithOp::Pow, overflow: Overflow::Checked, assign: true },
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn floating_division_has_no_overflow_suffix() {
        let got = kinds("/=", Dialect::B);
        assert_eq!(
            got,
            vec![TokenKind::Arith { op: ArithOp::Div, overflow: Overflow::Default, assign: true }, TokenKind::Eof]
        );
    }

    #[test]
    fn integer_division_checked() {
        let got = kinds("//?", Dialect::B);
        assert_eq!(
            got,
            vec![
                TokenKind::Arith { op: ArithOp::IntDiv, overflow: Overflow::Checked, assign: false },
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn spaceship_operator() {
        let got = kinds("<=>", Dialect::B);
        assert_eq!(got, vec![TokenKind::Compare(CompareOp::Spaceship), TokenKind::Eof]);
    }

    #[test]
    fn logical_left_shift_assign_is_one_token() {
        let got = kinds("<<<=", Dialect::B);
        assert_eq!(
            got,
            vec![TokenKind::Bitwise { op: BitOp::LogicalShl, assign: true }, TokenKind::Eof]
        );
    }

    #[test]
    fn checked_shift_right() {
        let got = kinds(">>?", Dialect::B);
        assert_eq!(got, vec![TokenKind::Bitwise { op: BitOp::ShrChecked, assign: false }, TokenKind::Eof]);
    }

    #[test]
    fn reference_equality_vs_value_equality() {
        assert_eq!(kinds("===", Dialect::B), vec![TokenKind::Compare(CompareOp::RefEq), TokenKind::Eof]);
        assert_eq!(kinds("==", Dialect::B), vec![TokenKind::Compare(CompareOp::Eq), TokenKind::Eof]);
        assert_eq!(kinds("!==", Dialect::B), vec![TokenKind::Compare(CompareOp::RefNotEq), TokenKind::Eof]);
        assert_eq!(kinds("!=", Dialect::B), vec![TokenKind::Compare(CompareOp::NotEq), TokenKind::Eof]);
    }

    #[test]
    fn elvis_operator() {
        assert_eq!(kinds("?:", Dialect::B), vec![TokenKind::Elvis, TokenKind::Eof]);
    }

    #[test]
    fn at_intrinsic_and_at_native_are_atomic() {
        assert_eq!(kinds("@intrinsic", Dialect::B), vec![TokenKind::AtIntrinsic, TokenKind::Eof]);
        assert_eq!(kinds("@native", Dialect::B), vec![TokenKind::AtNative, TokenKind::Eof]);
        assert_eq!(kinds("@other", Dialect::B), vec![TokenKind::At, TokenKind::Identifier, TokenKind::Eof]);
    }

    #[test]
    fn at_intrinsics_plural_does_not_match_atomic_word() {
        let got = kinds("@intrinsics", Dialect::B);
        assert_eq!(got, vec![TokenKind::At, TokenKind::Identifier, TokenKind::Eof]);
    }
}
