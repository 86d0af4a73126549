//! Numeric literal scanning (`§4.2.3 Numbers`).
//!
//! A numeric body is one of three shapes — decimal (with optional fraction
//! and exponent), hex, or binary — followed by an optional suffix. Hex and
//! binary bodies only accept a width suffix from the integer table; decimal
//! bodies search all five suffix tables (integer width, binary float width,
//! decimal float width, memory size, duration) in a fixed order, since the
//! five are disjoint by construction.

use super::Lexer;
use crate::error::{LexError, LexResult};
use crate::token::{Dialect, DecimalWidth, DurationUnit, FloatWidth, IntWidth, MemScale, MemSizeUnit, TokenKind};
use crate::unicode;

impl<'a> Lexer<'a> {
    /// Entry point for a digit lead character. `first` is the digit the
    /// driver already consumed.
    pub(super) fn lex_number(&mut self, first: char) -> LexResult<TokenKind> {
        if first == '0' {
            match self.cursor.current() {
                'x' | 'X' => return self.lex_radix_number(16, "hexadecimal", false),
                'b' | 'B' => return self.lex_radix_number(2, "binary", true),
                _ => {}
            }
        }
        self.lex_decimal_number()
    }

    /// `fallback_to_identifier`: §4.2.3's `0b1010` vs. `0bExample`
    /// disambiguation — a binary marker with no binary digits after it
    /// isn't an error, it's pushed back so the marker letter starts an
    /// ordinary identifier and the `0` stands alone as an integer literal.
    /// Hex has no such fallback: `0x` with nothing after it is just malformed.
    fn lex_radix_number(&mut self, base: u32, name: &'static str, fallback_to_identifier: bool) -> LexResult<TokenKind> {
        let marker_snapshot = self.cursor.snapshot();
        let marker_line = self.cursor.line();
        let marker_column = self.cursor.column();
        self.cursor.advance(); // the radix marker itself

        let digits_start = self.cursor.offset();
        while unicode::is_digit_in_base(self.cursor.current(), base) || self.cursor.current() == '_' {
            self.cursor.advance();
        }
        if self.cursor.offset() == digits_start {
            if fallback_to_identifier {
                self.cursor.restore(marker_snapshot);
                return Ok(self.default_int_kind());
            }
            return Err(LexError::MalformedNumber {
                reason: format!("a {name} literal needs at least one digit after its prefix"),
                line: marker_line,
                column: marker_column,
                offset: self.token_start_offset,
            });
        }

        let suffix_start = self.cursor.offset();
        while unicode::is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        if self.cursor.offset() == suffix_start {
            return Ok(self.default_int_kind());
        }

        let suffix = self.cursor.slice(suffix_start, self.cursor.offset());
        int_width_suffix(suffix).map(TokenKind::WidthInt).ok_or_else(|| LexError::UnknownSuffix {
            suffix: suffix.to_string(),
            line: self.token_start_line,
            column: self.token_start_column,
            offset: self.token_start_offset,
        })
    }

    fn lex_decimal_number(&mut self) -> LexResult<TokenKind> {
        while self.cursor.current().is_ascii_digit() || self.cursor.current() == '_' {
            self.cursor.advance();
        }

        let mut is_float = false;
        if self.cursor.current() == '.' && self.cursor.peek(1).is_ascii_digit() {
            is_float = true;
            self.cursor.advance();
            while self.cursor.current().is_ascii_digit() || self.cursor.current() == '_' {
                self.cursor.advance();
            }
        }

        if matches!(self.cursor.current(), 'e' | 'E') {
            let snapshot = self.cursor.snapshot();
            self.cursor.advance();
            if matches!(self.cursor.current(), '+' | '-') {
                self.cursor.advance();
            }
            if self.cursor.current().is_ascii_digit() {
                is_float = true;
                while self.cursor.current().is_ascii_digit() || self.cursor.current() == '_' {
                    self.cursor.advance();
                }
            } else {
                self.cursor.restore(snapshot);
            }
        }

        let suffix_start = self.cursor.offset();
        while unicode::is_ident_continue(self.cursor.current()) {
            self.cursor.advance();
        }
        let suffix = self.cursor.slice(suffix_start, self.cursor.offset());

        if suffix.is_empty() {
            return Ok(if is_float { self.default_float_kind() } else { self.default_int_kind() });
        }

        resolve_numeric_suffix(suffix, is_float).ok_or_else(|| LexError::UnknownSuffix {
            suffix: suffix.to_string(),
            line: self.token_start_line,
            column: self.token_start_column,
            offset: self.token_start_offset,
        })
    }

    fn default_int_kind(&self) -> TokenKind {
        match self.dialect {
            Dialect::B => TokenKind::WidthInt(IntWidth::S64),
            Dialect::I => TokenKind::Integer,
        }
    }

    fn default_float_kind(&self) -> TokenKind {
        match self.dialect {
            Dialect::B => TokenKind::BinaryFloat(FloatWidth::F64),
            Dialect::I => TokenKind::Decimal,
        }
    }
}

/// Tries every suffix table in a fixed order. Hex/binary/octal bodies only
/// ever call the integer-width table directly (`lex_radix_number`); this is
/// the decimal-body search, which is why it also takes `is_float`: a
/// fractional or exponentiated body can't carry an integer-width or
/// memory-size suffix, only a float-width, decimal-width, or duration one.
fn resolve_numeric_suffix(suffix: &str, is_float: bool) -> Option<TokenKind> {
    if !is_float {
        if let Some(w) = int_width_suffix(suffix) {
            return Some(TokenKind::WidthInt(w));
        }
        if let Some(m) = mem_size_suffix(suffix) {
            return Some(TokenKind::MemorySize(m));
        }
    }
    if let Some(w) = float_width_suffix(suffix) {
        return Some(TokenKind::BinaryFloat(w));
    }
    if let Some(w) = decimal_width_suffix(suffix) {
        return Some(TokenKind::DecimalFloat(w));
    }
    if let Some(u) = duration_suffix(suffix) {
        return Some(TokenKind::Duration(u));
    }
    None
}

fn int_width_suffix(s: &str) -> Option<IntWidth> {
    Some(match s {
        "s8" => IntWidth::S8,
        "s16" => IntWidth::S16,
        "s32" => IntWidth::S32,
        "s64" => IntWidth::S64,
        "s128" => IntWidth::S128,
        "saddr" => IntWidth::SAddr,
        "u8" => IntWidth::U8,
        "u16" => IntWidth::U16,
        "u32" => IntWidth::U32,
        "u64" => IntWidth::U64,
        "u128" => IntWidth::U128,
        "uaddr" => IntWidth::UAddr,
        _ => return None,
    })
}

fn float_width_suffix(s: &str) -> Option<FloatWidth> {
    Some(match s {
        "f16" => FloatWidth::F16,
        "f32" => FloatWidth::F32,
        "f64" => FloatWidth::F64,
        "f128" => FloatWidth::F128,
        _ => return None,
    })
}

fn decimal_width_suffix(s: &str) -> Option<DecimalWidth> {
    Some(match s {
        "d32" => DecimalWidth::D32,
        "d64" => DecimalWidth::D64,
        "d128" => DecimalWidth::D128,
        _ => return None,
    })
}

/// 21 variants: bare `b`, plus 5 SI and 5 binary scales for each of byte and
/// bit (`§4.2.3`).
fn mem_size_suffix(s: &str) -> Option<MemSizeUnit> {
    use MemScale::*;
    Some(match s {
        "b" => MemSizeUnit::Byte { scale: None, binary: false },
        "kb" => MemSizeUnit::Byte { scale: Some(Kilo), binary: false },
        "mb" => MemSizeUnit::Byte { scale: Some(Mega), binary: false },
        "gb" => MemSizeUnit::Byte { scale: Some(Giga), binary: false },
        "tb" => MemSizeUnit::Byte { scale: Some(Tera), binary: false },
        "pb" => MemSizeUnit::Byte { scale: Some(Peta), binary: false },
        "kib" => MemSizeUnit::Byte { scale: Some(Kilo), binary: true },
        "mib" => MemSizeUnit::Byte { scale: Some(Mega), binary: true },
        "gib" => MemSizeUnit::Byte { scale: Some(Giga), binary: true },
        "tib" => MemSizeUnit::Byte { scale: Some(Tera), binary: true },
        "pib" => MemSizeUnit::Byte { scale: Some(Peta), binary: true },
        "kbit" => MemSizeUnit::Bit { scale: Some(Kilo), binary: false },
        "mbit" => MemSizeUnit::Bit { scale: Some(Mega), binary: false },
        "gbit" => MemSizeUnit::Bit { scale: Some(Giga), binary: false },
        "tbit" => MemSizeUnit::Bit { scale: Some(Tera), binary: false },
        "pbit" => MemSizeUnit::Bit { scale: Some(Peta), binary: false },
        "kibit" => MemSizeUnit::Bit { scale: Some(Kilo), binary: true },
        "mibit" => MemSizeUnit::Bit { scale: Some(Mega), binary: true },
        "gibit" => MemSizeUnit::Bit { scale: Some(Giga), binary: true },
        "tibit" => MemSizeUnit::Bit { scale: Some(Tera), binary: true },
        "pibit" => MemSizeUnit::Bit { scale: Some(Peta), binary: true },
        _ => return None,
    })
}

fn duration_suffix(s: &str) -> Option<DurationUnit> {
    Some(match s {
        "w" => DurationUnit::Week,
        "d" => DurationUnit::Day,
        "h" => DurationUnit::Hour,
        "m" => DurationUnit::Minute,
        "s" => DurationUnit::Second,
        "ms" => DurationUnit::Millisecond,
        "us" => DurationUnit::Microsecond,
        "ns" => DurationUnit::Nanosecond,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use crate::token::{Dialect, IntWidth, MemScale, MemSizeUnit, TokenKind};
    use crate::Lexer;

    fn lex_one(source: &str, dialect: Dialect) -> TokenKind {
        let out = Lexer::new(source, dialect).tokenize().expect("tokenize should succeed");
        out.tokens[0].kind.clone()
    }

    #[test]
    fn dialect_b_unsuffixed_integer_defaults_to_s64() {
        assert_eq!(lex_one("42", Dialect::B), TokenKind::WidthInt(IntWidth::S64));
    }

    #[test]
    fn dialect_i_unsuffixed_integer_is_arbitrary_precision() {
        assert_eq!(lex_one("42", Dialect::I), TokenKind::Integer);
    }

    #[test]
    fn width_suffix_is_recognized() {
        assert_eq!(lex_one("7u32", Dialect::B), TokenKind::WidthInt(IntWidth::U32));
    }

    #[test]
    fn underscores_are_allowed_inside_the_digit_run() {
        assert_eq!(lex_one("1_000_000", Dialect::B), TokenKind::WidthInt(IntWidth::S64));
    }

    #[test]
    fn float_body_with_exponent_and_suffix() {
        assert_eq!(
            lex_one("1.5e10f32", Dialect::B),
            TokenKind::BinaryFloat(crate::token::FloatWidth::F32)
        );
    }

    #[test]
    fn hex_literal_with_width_suffix() {
        assert_eq!(lex_one("0xFFu8", Dialect::B), TokenKind::WidthInt(IntWidth::U8));
    }

    #[test]
    fn binary_literal_without_suffix() {
        assert_eq!(lex_one("0b1010", Dialect::B), TokenKind::WidthInt(IntWidth::S64));
    }

    #[test]
    fn hex_prefix_with_no_digits_is_malformed() {
        let err = Lexer::new("0x", Dialect::B).tokenize().unwrap_err();
        assert!(matches!(err, crate::error::LexError::MalformedNumber { .. }));
    }

    #[test]
    fn binary_prefix_with_no_binary_digits_falls_back_to_identifier() {
        let out = Lexer::new("0bExample", Dialect::B).tokenize().unwrap();
        assert_eq!(
            out.tokens[0].kind,
            TokenKind::WidthInt(IntWidth::S64)
        );
        assert_eq!(out.tokens[0].text.as_ref(), "0");
        assert_eq!(out.tokens[1].kind, TokenKind::Identifier);
        assert_eq!(out.tokens[1].text.as_ref(), "bExample");
    }

    #[test]
    fn memory_size_suffix_resolves() {
        assert_eq!(
            lex_one("4kib", Dialect::B),
            TokenKind::MemorySize(MemSizeUnit::Byte { scale: Some(MemScale::Kilo), binary: true })
        );
    }

    #[test]
    fn duration_suffix_resolves() {
        assert_eq!(lex_one("30ms", Dialect::B), TokenKind::Duration(crate::token::DurationUnit::Millisecond));
    }

    #[test]
    fn unknown_suffix_is_an_error() {
        let err = Lexer::new("42qq", Dialect::B).tokenize().unwrap_err();
        assert!(matches!(err, crate::error::LexError::UnknownSuffix { .. }));
    }
}
