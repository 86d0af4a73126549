//! Lexical analysis core for a two-dialect compiler front-end.
//!
//! # Architecture
//!
//! Three components, layered bottom-up (`§2 SYSTEM OVERVIEW`):
//!
//! - [`cursor`] — character-level navigation with 1-based line/column
//!   tracking and bounded lookahead. Knows nothing about tokens.
//! - [`lexer`]'s scanner functions — dialect-neutral recognizers for
//!   comments, identifiers, numeric literals, string/character literals,
//!   and operator families. Know nothing about indentation or keyword
//!   tables beyond the shared ones.
//! - [`Lexer`] itself — the per-dialect dispatch loop and Dialect-I's
//!   indentation/newline state machine. Owns the token buffer and decides,
//!   character by character, which scanner function to call.
//!
//! Data flows forward only: cursor → dispatch → scanner → token sink. There
//! is no backtracking beyond the bounded lookahead the cursor exposes, and
//! no shared mutable state crosses the scanner/driver boundary except
//! through the `Lexer` struct itself (composition, not inheritance — see
//! the design notes this crate's sibling `DESIGN.md` records).
//!
//! # Error policy
//!
//! Lexing is total but not always successful: [`tokenize`] returns either a
//! complete token sequence ending in `Eof`, or the *first* [`LexError`]
//! encountered. There is no partial-success mode — a malformed token aborts
//! the whole call, because a downstream parser has no use for a token
//! stream with a hole in it.

pub mod cursor;
pub mod error;
pub mod lexer;
pub mod token;
pub mod unicode;

pub use error::{LexError, LexResult};
pub use lexer::Lexer;
pub use token::{Dialect, Token, TokenKind};

/// The result of a successful tokenization: the token sequence plus
/// Dialect-I's derived script-mode flag (`§4.3`, `§6`).
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizeOutput<'a> {
    /// Ordered tokens, always ending in exactly one `Eof`.
    pub tokens: Vec<Token<'a>>,
    /// True iff this is a Dialect-I source with no top-level declaration
    /// starter. Always false for Dialect-B.
    pub script_mode: bool,
}

/// `tokenize(source, dialect) -> Sequence<Token>` (`§6 EXTERNAL INTERFACES`).
///
/// A deterministic total function over well-formed UTF-8 input: either
/// returns a token sequence ending in `Eof`, or fails with the first lex
/// diagnostic encountered.
pub fn tokenize(source: &str, dialect: Dialect) -> LexResult<TokenizeOutput<'_>> {
    Lexer::new(source, dialect).tokenize()
}

/// `is_script_mode(source) -> bool` (`§6`): Dialect-I only, always false for
/// Dialect-B. Folds a lex failure into `false` since this query has no
/// `Result` in its contract — callers who need the diagnostic should call
/// [`tokenize`] directly.
pub fn is_script_mode(source: &str, dialect: Dialect) -> bool {
    if dialect == Dialect::B {
        return false;
    }
    tokenize(source, dialect).map(|out| out.script_mode).unwrap_or(false)
}
