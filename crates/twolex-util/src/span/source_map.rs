//! Registry of source files, keyed by [`FileId`].
//!
//! The lexer itself only ever sees one in-memory buffer at a time (see
//! `§5 CONCURRENCY & RESOURCE MODEL`: no I/O, no multi-file orchestration),
//! but downstream phases (the parser, the diagnostic renderer) need to turn
//! a `Span` back into a file name and a line of text. `SourceMap` is the
//! ambient piece that makes that possible without the lexer itself knowing
//! about the filesystem.

use crate::error::{SourceMapError, SourceMapResult};
use crate::span::FileId;
use rustc_hash::FxHashMap;

/// A single registered source file: its display name and full contents.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

impl SourceFile {
    /// Returns the 0-based line containing `offset`, or `None` if out of
    /// range.
    pub fn line_of_offset(&self, offset: usize) -> Option<&str> {
        if offset > self.content.len() {
            return None;
        }
        self.content.lines().nth(self.content[..offset].matches('\n').count())
    }
}

/// A flat registry mapping [`FileId`] to [`SourceFile`].
#[derive(Default)]
pub struct SourceMap {
    files: Vec<SourceFile>,
    by_name: FxHashMap<String, FileId>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new file, returning the `FileId` it was assigned.
    /// Re-adding an already-registered name returns the existing id.
    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<String>) -> FileId {
        let name = name.into();
        if let Some(&id) = self.by_name.get(&name) {
            return id;
        }
        let id = FileId::new(self.files.len());
        self.files.push(SourceFile {
            name: name.clone(),
            content: content.into(),
        });
        self.by_name.insert(name, id);
        id
    }

    pub fn get(&self, id: FileId) -> SourceMapResult<&SourceFile> {
        self.files
            .get(id.index())
            .ok_or_else(|| SourceMapError::FileNotFound(format!("{id:?}")))
    }
}
