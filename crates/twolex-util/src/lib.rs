//! Shared infrastructure for the twolex toolchain.
//!
//! This crate holds the pieces every compiler phase needs regardless of
//! which dialect it is processing: source location tracking (`span`),
//! diagnostic construction (`diagnostic`), and the crate's own error types
//! (`error`).

pub mod diagnostic;
pub mod error;
pub mod span;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Level};
pub use error::{SourceMapError, SourceMapResult};
pub use span::{FileId, Span};
