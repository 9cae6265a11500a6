//! Structural data model shared by every layer.
//!
//! These types are what a host hands to the coverage engine: classes, their
//! methods and the documentation comments attached to them, each carrying
//! byte ranges into the owning source file. They are plain values, built fresh
//! for each analysis pass and never mutated by the engine.

pub mod errors;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub use errors::{Error, Result};

/// Half-open byte range `[start, end)` into a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted range {}..{}", start, end);
        Self { start, end }
    }

    /// Zero-width range at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn contains_range(&self, other: TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// Shape of a class declaration as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassKind {
    /// An ordinary named class.
    Regular,
    /// Anonymous class body; never a class-under-test.
    Anonymous,
    /// Produced by tooling (template engines, annotation processors).
    Synthesized,
}

/// A documentation comment and where it starts in its file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    /// Raw comment text including the `/**` and `*/` delimiters.
    pub text: String,
    /// Absolute byte offset of the first character of `text`.
    pub offset: usize,
}

impl DocComment {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.offset, self.offset + self.text.len())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    pub name: String,
    pub name_range: TextRange,
    pub doc: Option<DocComment>,
}

impl MethodDecl {
    pub fn new(name: impl Into<String>, name_range: TextRange) -> Self {
        Self {
            name: name.into(),
            name_range,
            doc: None,
        }
    }

    pub fn with_doc(mut self, doc: DocComment) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// A class declaration as seen through the host's structural model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDecl {
    /// Fully-qualified name; `None` when the host cannot resolve one.
    pub qualified_name: Option<String>,
    /// Simple name as written in source (empty for anonymous classes).
    pub name: String,
    pub name_range: TextRange,
    pub kind: ClassKind,
    pub file: PathBuf,
    /// Byte offset of the closing `}` of the class body.
    pub body_end: usize,
    /// Declared methods in source order.
    pub methods: Vec<MethodDecl>,
}

impl ClassDecl {
    pub fn new(
        qualified_name: impl Into<String>,
        name_range: TextRange,
        file: impl Into<PathBuf>,
    ) -> Self {
        let qualified_name = qualified_name.into();
        let name = simple_name(&qualified_name).to_string();
        Self {
            qualified_name: Some(qualified_name),
            name,
            name_range,
            kind: ClassKind::Regular,
            file: file.into(),
            body_end: name_range.end,
            methods: Vec::new(),
        }
    }

    pub fn with_kind(mut self, kind: ClassKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_body_end(mut self, body_end: usize) -> Self {
        self.body_end = body_end;
        self
    }

    pub fn with_method(mut self, method: MethodDecl) -> Self {
        self.methods.push(method);
        self
    }

    pub fn find_method(&self, name: &str) -> Option<&MethodDecl> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// Last dot-separated segment of a qualified name.
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map(|(_, name)| name)
        .unwrap_or(qualified_name)
}
