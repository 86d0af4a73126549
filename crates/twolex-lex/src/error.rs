//! Lexical error kinds (`§7 ERROR HANDLING DESIGN`).
//!
//! The lexer's error policy is non-recoverable: the first error encountered
//! aborts `tokenize` with a single [`LexError`] and no partial token stream
//! is returned. This is a deliberate departure from the accumulating,
//! `Handler`-based diagnostics style used elsewhere in this toolchain: a
//! downstream phase that can keep going after an error wants to collect
//! many; a lexer whose output is a flat token sequence has nothing useful
//! to hand the parser once one token is malformed, so it simply stops.
//!
//! Each variant still carries enough position information to build a
//! [`twolex_util::Diagnostic`] via [`LexError::into_diagnostic`], so the
//! driver/CLI layer that eventually renders this to a user sees the same
//! shape of error it would from any other phase.

use thiserror::Error;
use twolex_util::diagnostic::DiagnosticCode;
use twolex_util::{Diagnostic, DiagnosticBuilder, Span};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    /// EOF reached mid-string or mid-character literal.
    #[error("unterminated {kind} literal starting at line {line}, column {column}")]
    UnterminatedLiteral {
        kind: &'static str,
        line: u32,
        column: u32,
        offset: usize,
    },

    /// An unknown single-letter escape, or a malformed/out-of-range `\u` escape.
    #[error("invalid escape sequence at line {line}, column {column}: {reason}")]
    InvalidEscape {
        reason: String,
        line: u32,
        column: u32,
        offset: usize,
    },

    /// A numeric suffix matched none of the three suffix tables.
    #[error("unknown suffix '{suffix}' at line {line}")]
    UnknownSuffix {
        suffix: String,
        line: u32,
        column: u32,
        offset: usize,
    },

    /// Dialect-I only: non-multiple-of-four indent, missing expected indent,
    /// or an unexpected indent.
    #[error("{reason} at line {line}, column {column}")]
    IndentationError {
        reason: String,
        line: u32,
        column: u32,
        offset: usize,
    },

    /// Dialect-I only: `..`, `::`, or `;` used as a separator.
    #[error("{reason} at line {line}, column {column}")]
    ForbiddenSyntax {
        reason: String,
        line: u32,
        column: u32,
        offset: usize,
    },

    /// A numeric body that is not one of the five closed kinds (e.g. `0x`
    /// with no hex digits). Not one of §7's five named kinds, but they need
    /// somewhere to report to just the same.
    #[error("{reason} at line {line}, column {column}")]
    MalformedNumber {
        reason: String,
        line: u32,
        column: u32,
        offset: usize,
    },

    /// A byte that matched none of the dispatch loop's recognizers.
    #[error("unexpected character '{ch}' at line {line}, column {column}")]
    UnexpectedCharacter {
        ch: char,
        line: u32,
        column: u32,
        offset: usize,
    },
}

impl LexError {
    pub fn line(&self) -> u32 {
        match self {
            LexError::UnterminatedLiteral { line, .. }
            | LexError::InvalidEscape { line, .. }
            | LexError::UnknownSuffix { line, .. }
            | LexError::IndentationError { line, .. }
            | LexError::ForbiddenSyntax { line, .. }
            | LexError::MalformedNumber { line, .. }
            | LexError::UnexpectedCharacter { line, .. } => *line,
        }
    }

    fn code(&self) -> DiagnosticCode {
        match self {
            LexError::UnterminatedLiteral { .. } => DiagnosticCode::UNTERMINATED_LITERAL,
            LexError::InvalidEscape { .. } => DiagnosticCode::INVALID_ESCAPE,
            LexError::UnknownSuffix { .. } => DiagnosticCode::UNKNOWN_SUFFIX,
            LexError::IndentationError { .. } => DiagnosticCode::INDENTATION_ERROR,
            LexError::ForbiddenSyntax { .. } => DiagnosticCode::FORBIDDEN_SYNTAX,
            LexError::MalformedNumber { .. } => DiagnosticCode::MALFORMED_NUMBER,
            LexError::UnexpectedCharacter { .. } => DiagnosticCode::UNEXPECTED_CHARACTER,
        }
    }

    fn position(&self) -> (u32, u32, usize) {
        match *self {
            LexError::UnterminatedLiteral { line, column, offset, .. }
            | LexError::InvalidEscape { line, column, offset, .. }
            | LexError::UnknownSuffix { line, column, offset, .. }
            | LexError::IndentationError { line, column, offset, .. }
            | LexError::ForbiddenSyntax { line, column, offset, .. }
            | LexError::MalformedNumber { line, column, offset, .. }
            | LexError::UnexpectedCharacter { line, column, offset, .. } => (line, column, offset),
        }
    }

    /// Converts this error into the shared [`Diagnostic`] representation, so
    /// a single renderer can handle errors from any compiler phase.
    pub fn into_diagnostic(self) -> Diagnostic {
        let code = self.code();
        let (line, column, offset) = self.position();
        let span = Span::with_file(offset, offset, Default::default(), line, column);
        let message = self.to_string();
        let mut builder = DiagnosticBuilder::error(message).span(span).code(code);
        if let LexError::ForbiddenSyntax { .. } = &self {
            builder = builder.with_help("see the dialect's separator rules");
        }
        builder.build()
    }
}

pub type LexResult<T> = std::result::Result<T, LexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_suffix_message_includes_suffix_and_line() {
        let err = LexError::UnknownSuffix {
            suffix: "qq".into(),
            line: 3,
            column: 10,
            offset: 40,
        };
        assert_eq!(err.to_string(), "unknown suffix 'qq' at line 3");
    }

    #[test]
    fn into_diagnostic_carries_the_matching_code() {
        let err = LexError::IndentationError {
            reason: "unexpected indent".into(),
            line: 2,
            column: 5,
            offset: 10,
        };
        let diag = err.into_diagnostic();
        assert_eq!(diag.code, Some(DiagnosticCode::INDENTATION_ERROR));
        assert_eq!(diag.span.line, 2);
    }
}
