//! The dialect driver (`§4.3 DIALECT DRIVER`).
//!
//! [`Lexer`] owns the per-file state — cursor position, the token buffer,
//! and Dialect-I's indentation/newline state machine — and runs the main
//! dispatch loop. Everything that recognizes a specific lexeme family lives
//! in this module's siblings (`comment`, `ident`, `number`, `string`,
//! `operator`) as `impl<'a> Lexer<'a>` blocks; this file only decides,
//! character by character, which of them to call.
//!
//! Composition, not inheritance (`§9`): there is no base "tokenizer" type
//! the two dialects extend. One struct carries a `Dialect` tag and the
//! handful of fields Dialect-I needs; Dialect-B simply never touches them.

mod comment;
mod ident;
mod number;
mod operator;
mod string;

use std::borrow::Cow;

use crate::cursor::Cursor;
use crate::error::{LexError, LexResult};
use crate::token::{Dialect, Keyword, Token, TokenKind};
use crate::unicode;
use crate::TokenizeOutput;

/// Per-file lexer state. Constructed once per `tokenize` call and consumed
/// by it — there is no reuse across sources (`§5`: non-reentrant per
/// instance).
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    dialect: Dialect,
    tokens: Vec<Token<'a>>,

    /// Position of the token currently being scanned; snapshotted at the
    /// top of the dispatch loop before the lead character is consumed.
    token_start_offset: usize,
    token_start_line: u32,
    token_start_column: u32,

    /// Depth of open `(`/`[`/`{` — continuation suppression inside
    /// bracketing (`§1`, `§4.3`): while this is nonzero, Dialect-I treats
    /// physical newlines and leading whitespace as plain whitespace, the
    /// same way Dialect-B always does.
    bracket_depth: u32,

    /// Dialect-I structural state (`§4.3`).
    indent_level: u32,
    expect_indent: bool,
    has_token_on_line: bool,
    has_definitions: bool,
    last_kind: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, dialect: Dialect) -> Self {
        Self {
            cursor: Cursor::new(source),
            dialect,
            tokens: Vec::new(),
            token_start_offset: 0,
            token_start_line: 1,
            token_start_column: 1,
            bracket_depth: 0,
            indent_level: 0,
            expect_indent: false,
            has_token_on_line: false,
            has_definitions: false,
            last_kind: None,
        }
    }

    /// Runs the dispatch loop to completion (`§4.3`): until EOF, record the
    /// next token's start, consume its lead character, and dispatch on it.
    /// Dialect-I then closes any still-open indentation with `Dedent`
    /// before the trailing `Eof`.
    pub fn tokenize(mut self) -> LexResult<TokenizeOutput<'a>> {
        loop {
            if self.dialect == Dialect::I && self.cursor.column() == 1 && self.bracket_depth == 0 {
                self.handle_line_start()?;
            }
            if self.cursor.at_end() {
                break;
            }
            self.begin_token();
            let c = self.cursor.advance();
            self.dispatch(c)?;
        }

        if self.dialect == Dialect::I {
            while self.indent_level > 0 {
                self.push_structural(TokenKind::Dedent);
                self.indent_level -= 1;
            }
        }
        self.push_structural(TokenKind::Eof);

        let script_mode = self.dialect == Dialect::I && !self.has_definitions;
        Ok(TokenizeOutput {
            tokens: self.tokens,
            script_mode,
        })
    }

    fn begin_token(&mut self) {
        self.token_start_offset = self.cursor.offset();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
    }

    /// Dispatch on one already-consumed lead character (`§4.3`: "consume
    /// one character; dispatch on it to the Scanner Core").
    fn dispatch(&mut self, c: char) -> LexResult<()> {
        match c {
            ' ' | '\t' | '\r' => {}
            '\n' => {
                if self.dialect == Dialect::I {
                    self.handle_newline_i();
                }
            }
            '#' => {
                if let Some((kind, text)) = self.lex_hash() {
                    self.emit(kind, text);
                }
            }
            '(' => {
                self.bracket_depth += 1;
                self.emit_static(TokenKind::LeftParen);
            }
            ')' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                self.emit_static(TokenKind::RightParen);
            }
            '[' => {
                self.bracket_depth += 1;
                self.emit_static(TokenKind::LeftBracket);
            }
            ']' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                self.emit_static(TokenKind::RightBracket);
            }
            '{' => {
                self.bracket_depth += 1;
                self.emit_static(TokenKind::LeftBrace);
            }
            '}' => {
                self.bracket_depth = self.bracket_depth.saturating_sub(1);
                self.emit_static(TokenKind::RightBrace);
            }
            ',' => self.emit_static(TokenKind::Comma),
            ';' => {
                let kind = self.lex_semicolon()?;
                self.emit_static(kind);
            }
            '+' => {
                let kind = self.lex_plus();
                self.emit_static(kind);
            }
            '-' => {
                let kind = self.lex_minus();
                self.emit_static(kind);
            }
            '*' => {
                let kind = self.lex_star();
                self.emit_static(kind);
            }
            '/' => {
                let kind = self.lex_slash();
                self.emit_static(kind);
            }
            '%' => {
                let kind = self.lex_percent();
                self.emit_static(kind);
            }
            '=' => {
                let kind = self.lex_eq();
                self.emit_static(kind);
            }
            '!' => {
                let kind = self.lex_bang();
                self.emit_static(kind);
            }
            '<' => {
                let kind = self.lex_lt();
                self.emit_static(kind);
            }
            '>' => {
                let kind = self.lex_gt();
                self.emit_static(kind);
            }
            '&' => {
                let kind = self.lex_amp();
                self.emit_static(kind);
            }
            '|' => {
                let kind = self.lex_pipe();
                self.emit_static(kind);
            }
            '^' => {
                let kind = self.lex_caret();
                self.emit_static(kind);
            }
            '~' => {
                let kind = self.lex_tilde();
                self.emit_static(kind);
            }
            '?' => {
                let kind = self.lex_question();
                self.emit_static(kind);
            }
            ':' => {
                let kind = self.lex_colon()?;
                self.emit_static(kind);
            }
            '.' => {
                let kind = self.lex_dot()?;
                self.emit_static(kind);
            }
            '@' => {
                let kind = self.lex_at();
                self.emit_static(kind);
            }
            '"' => {
                let attrs = self.default_text_attrs();
                let (kind, text) = self.lex_text_literal(attrs)?;
                self.emit(kind, text);
            }
            '\'' => {
                let (kind, text) = self.lex_char_literal(32, false)?;
                self.emit(kind, text);
            }
            c if c.is_ascii_digit() => {
                let kind = self.lex_number(c)?;
                let text = self.cursor.slice_from(self.token_start_offset);
                self.emit(kind, Cow::Borrowed(text));
            }
            c if unicode::is_ident_start(c) => {
                let (kind, text) = self.lex_identifier_or_literal()?;
                self.emit(kind, text);
            }
            other => {
                return Err(LexError::UnexpectedCharacter {
                    ch: other,
                    line: self.token_start_line,
                    column: self.token_start_column,
                    offset: self.token_start_offset,
                })
            }
        }
        Ok(())
    }

    /// Pushes a token whose text is exactly the source slice consumed since
    /// `begin_token` — the common case for every fixed-shape operator and
    /// delimiter.
    fn emit_static(&mut self, kind: TokenKind) {
        let text = self.cursor.slice_from(self.token_start_offset);
        self.emit(kind, Cow::Borrowed(text));
    }

    /// Pushes a token and updates the Dialect-I bookkeeping every *real*
    /// token participates in: the newline-significance flag and the
    /// declaration-starter tracking that derives script mode.
    fn emit(&mut self, kind: TokenKind, text: Cow<'a, str>) {
        if self.dialect == Dialect::I {
            self.has_token_on_line = true;
            if let TokenKind::Keyword(kw) = &kind {
                if kw.is_declaration_starter() {
                    self.has_definitions = true;
                }
            }
        }
        self.last_kind = Some(kind.clone());
        self.tokens.push(Token::new(
            kind,
            text,
            self.token_start_line,
            self.token_start_column,
            self.token_start_offset,
        ));
    }

    /// Pushes a virtual structural token (`Indent`/`Dedent`/`Eof`) with no
    /// source text, at the cursor's current position. Deliberately doesn't
    /// touch `has_token_on_line` — structural tokens aren't the "non-trivial
    /// token" the newline-significance rule means (`§4.3`).
    fn push_structural(&mut self, kind: TokenKind) {
        self.last_kind = Some(kind.clone());
        self.tokens.push(Token::new(
            kind,
            Cow::Borrowed(""),
            self.cursor.line(),
            self.cursor.column(),
            self.cursor.offset(),
        ));
    }

    // --- Dialect-I structural state machine (`§4.3`) ------------------

    /// The line-start procedure: count leading indentation, then emit
    /// `Indent`/`Dedent` or fail, per the six numbered steps in `§4.3`.
    fn handle_line_start(&mut self) -> LexResult<()> {
        let mut spaces = 0u32;
        loop {
            match self.cursor.current() {
                ' ' => {
                    spaces += 1;
                    self.cursor.advance();
                }
                '\t' => {
                    spaces += 4;
                    self.cursor.advance();
                }
                _ => break,
            }
        }

        let line = self.cursor.line();
        let column = self.cursor.column();
        let offset = self.cursor.offset();

        // Step 1: blank or comment-only lines don't touch indentation state.
        if self.cursor.at_end() || matches!(self.cursor.current(), '\n' | '#') {
            return Ok(());
        }

        // Step 2.
        if spaces % 4 != 0 {
            return Err(LexError::IndentationError {
                reason: "indentation is not a multiple of four spaces".into(),
                line,
                column,
                offset,
            });
        }

        // Step 3.
        let new_level = spaces / 4;

        // Step 4.
        if self.expect_indent {
            if new_level <= self.indent_level {
                return Err(LexError::IndentationError {
                    reason: "expected an indent after ':'".into(),
                    line,
                    column,
                    offset,
                });
            }
            self.push_structural(TokenKind::Indent);
            self.indent_level = new_level;
            self.expect_indent = false;
            return Ok(());
        }

        // Step 5.
        if new_level < self.indent_level {
            while new_level < self.indent_level {
                self.push_structural(TokenKind::Dedent);
                self.indent_level -= 1;
            }
            return Ok(());
        }

        // Step 6.
        if new_level > self.indent_level {
            return Err(LexError::IndentationError {
                reason: "unexpected indent".into(),
                line,
                column,
                offset,
            });
        }

        Ok(())
    }

    /// Newline-significance rule (`§4.3`): emit `Newline` iff a token has
    /// appeared on this line, we're not inside brackets, and the last token
    /// isn't one that implies a continuation.
    fn handle_newline_i(&mut self) {
        let significant =
            self.bracket_depth == 0 && self.has_token_on_line && !Self::suppresses_newline(self.last_kind.as_ref());
        if significant {
            self.push_structural(TokenKind::Newline);
        }
        self.has_token_on_line = false;
    }

    fn suppresses_newline(kind: Option<&TokenKind>) -> bool {
        match kind {
            None => true,
            Some(
                TokenKind::LeftParen
                | TokenKind::LeftBracket
                | TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::Arrow
                | TokenKind::FatArrow
                | TokenKind::Newline
                | TokenKind::LogicalAnd
                | TokenKind::LogicalOr
                | TokenKind::Arith { .. }
                | TokenKind::Compare(_)
                | TokenKind::Bitwise { .. }
                | TokenKind::Assign,
            ) => true,
            _ => false,
        }
    }

    /// Peeks past spaces/tabs (without consuming) to decide whether a `:`
    /// just emitted is a block-starter (arms `expect_indent`) or a plain
    /// type-annotation colon (`§4.3` block-starter colon).
    fn maybe_arm_expect_indent(&mut self) {
        let mut k = 0usize;
        loop {
            match self.cursor.peek(k) {
                ' ' | '\t' => k += 1,
                '\n' | '\r' | '#' | '\0' => {
                    self.expect_indent = true;
                    return;
                }
                _ => return,
            }
        }
    }

    fn default_text_attrs(&self) -> crate::token::TextAttrs {
        match self.dialect {
            Dialect::B => crate::token::TextAttrs {
                raw: false,
                formatted: false,
                byte: false,
                width: 8,
            },
            Dialect::I => crate::token::TextAttrs {
                raw: false,
                formatted: false,
                byte: false,
                width: 32,
            },
        }
    }
}
