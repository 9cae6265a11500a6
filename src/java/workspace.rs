//! Java sources loaded from disk, indexed and editable.

use crate::config::SourcesConfig;
use crate::core::{ClassDecl, Error, Result};
use crate::io::walker::find_java_files;
use crate::java::parser::parse_java;
use crate::java::position::{LineIndex, Position};
use crate::model::{InMemoryIndex, ProjectIndex};
use crate::quickfix::{EditConflict, StructureEditor, StubMethod};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// Indentation added per nesting level when placing a stub.
const MEMBER_INDENT: &str = "    ";

static IMPORT_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*import[ \t]+(static[ \t]+)?([\w.]+)(\.\*)?[ \t]*;[^\n]*\n?").unwrap());

static PACKAGE_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*package[ \t]+[\w.]+[ \t]*;[^\n]*\n?").unwrap());

#[derive(Debug, Clone)]
struct SourceText {
    text: String,
    is_test: bool,
    lines: LineIndex,
}

impl SourceText {
    fn new(text: String, is_test: bool) -> Self {
        let lines = LineIndex::new(&text);
        Self {
            text,
            is_test,
            lines,
        }
    }
}

/// A Java project: every source file, the class index built from them, and
/// the files changed by fixes since the last [`save`](Self::save).
#[derive(Debug, Default)]
pub struct JavaWorkspace {
    files: HashMap<PathBuf, SourceText>,
    index: InMemoryIndex,
    dirty: BTreeSet<PathBuf>,
    /// Only classes declared under this path are analyzed.
    scope: Option<PathBuf>,
}

impl JavaWorkspace {
    /// Build from `(path, text, is_test)` triples. Files that fail to parse
    /// are logged and left out.
    pub fn from_sources(sources: Vec<(PathBuf, String, bool)>) -> Self {
        let parsed: Vec<_> = sources
            .par_iter()
            .map(|(path, text, _)| (path.clone(), parse_java(path, text)))
            .collect();

        let mut workspace = Self::default();
        for ((path, text, is_test), (_, result)) in sources.into_iter().zip(parsed) {
            match result {
                Ok(classes) => {
                    for class in classes {
                        workspace.index.insert(class);
                    }
                    workspace
                        .files
                        .insert(path, SourceText::new(text, is_test));
                }
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        workspace
    }

    /// Index every Java file under `root`.
    pub fn load(root: &Path, sources: &SourcesConfig) -> Result<Self> {
        let files = find_java_files(root, &sources.test_patterns, &sources.ignore)?;
        log::info!("Indexing {} Java files under {}", files.len(), root.display());

        let texts: Vec<_> = files
            .into_par_iter()
            .filter_map(|file| match fs::read_to_string(&file.path) {
                Ok(text) => Some((file.path, text, file.is_test)),
                Err(e) => {
                    log::warn!("Skipping {}: {}", file.path.display(), e);
                    None
                }
            })
            .collect();

        Ok(Self::from_sources(texts))
    }

    /// Restrict analysis to classes declared under `scope`. The whole
    /// workspace stays indexed, so test classes outside it still resolve.
    pub fn with_scope(mut self, scope: PathBuf) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn index(&self) -> &InMemoryIndex {
        &self.index
    }

    /// Classes eligible for analysis: declared outside test sources and
    /// inside the scope, if one is set.
    pub fn classes_under_test(&self) -> impl Iterator<Item = &ClassDecl> {
        self.index.classes().filter(|class| {
            let in_scope = self
                .scope
                .as_ref()
                .is_none_or(|scope| class.file.starts_with(scope));
            in_scope
                && self
                    .files
                    .get(&class.file)
                    .is_some_and(|source| !source.is_test)
        })
    }

    pub fn source(&self, file: &Path) -> Option<&str> {
        self.files.get(file).map(|source| source.text.as_str())
    }

    pub fn position(&self, file: &Path, offset: usize) -> Option<Position> {
        self.files
            .get(file)
            .map(|source| source.lines.position(&source.text, offset))
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Files edited since the last save.
    pub fn dirty_files(&self) -> impl Iterator<Item = &Path> {
        self.dirty.iter().map(PathBuf::as_path)
    }

    /// Write edited files back to disk.
    pub fn save(&mut self) -> Result<Vec<PathBuf>> {
        let mut saved = Vec::with_capacity(self.dirty.len());
        for path in std::mem::take(&mut self.dirty) {
            let Some(source) = self.files.get(&path) else {
                continue;
            };
            fs::write(&path, &source.text).map_err(|e| Error::FileSystem {
                message: "failed to write edited source".to_string(),
                path: Some(path.clone()),
                source: Some(e),
            })?;
            log::info!("Wrote {}", path.display());
            saved.push(path);
        }
        Ok(saved)
    }
}

impl ProjectIndex for JavaWorkspace {
    fn find_class(&self, qualified_name: &str) -> Option<&ClassDecl> {
        self.index.find_class(qualified_name)
    }
}

impl StructureEditor for JavaWorkspace {
    fn append_method(&mut self, class: &str, stub: &StubMethod) -> std::result::Result<(), EditConflict> {
        let decl = self
            .index
            .find_class(class)
            .ok_or_else(|| EditConflict::ClassNotFound(class.to_string()))?;
        let file = decl.file.clone();
        let body_end = decl.body_end;

        let stale = || EditConflict::StaleAnchor {
            class: class.to_string(),
        };
        let source = self.files.get(&file).ok_or_else(stale)?;
        if source.text.as_bytes().get(body_end) != Some(&b'}') {
            return Err(stale());
        }

        let edited = add_imports(&insert_stub(&source.text, body_end, stub), &stub.imports);
        let classes = reparse(&file, &edited, class, &stub.name)?;

        let is_test = source.is_test;
        self.files
            .insert(file.clone(), SourceText::new(edited, is_test));
        self.index.replace_file(&file, classes);
        self.dirty.insert(file);
        Ok(())
    }
}

/// Parse the edited text and confirm the stub landed in `class`.
fn reparse(
    file: &Path,
    edited: &str,
    class: &str,
    method: &str,
) -> std::result::Result<Vec<ClassDecl>, EditConflict> {
    let reparse_error = |message: String| EditConflict::Reparse {
        class: class.to_string(),
        message,
    };
    let classes = parse_java(file, edited).map_err(|e| reparse_error(e.to_string()))?;
    let landed = classes
        .iter()
        .any(|c| c.qualified_name.as_deref() == Some(class) && c.find_method(method).is_some());
    if !landed {
        return Err(reparse_error(format!("{} not found after edit", method)));
    }
    Ok(classes)
}

/// Text with `stub` placed as the last member before the brace at `body_end`.
fn insert_stub(text: &str, body_end: usize, stub: &StubMethod) -> String {
    let line_start = text[..body_end].rfind('\n').map_or(0, |i| i + 1);
    let before_brace = &text[line_start..body_end];
    let brace_alone = before_brace.trim().is_empty();

    let outer_indent: String = before_brace
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();
    let member_indent = format!("{}{}", outer_indent, MEMBER_INDENT);
    let method = stub.to_source(&member_indent);

    let mut edited = String::with_capacity(text.len() + method.len() + 8);
    if brace_alone {
        edited.push_str(&text[..line_start]);
        edited.push('\n');
        edited.push_str(&method);
        edited.push('\n');
        edited.push_str(&text[line_start..]);
    } else {
        edited.push_str(&text[..body_end]);
        edited.push('\n');
        edited.push_str(&method);
        edited.push('\n');
        edited.push_str(&outer_indent);
        edited.push_str(&text[body_end..]);
    }
    edited
}

/// Text with an `import` line for every entry of `imports` not yet covered.
fn add_imports(text: &str, imports: &[&str]) -> String {
    let existing: Vec<(String, bool)> = IMPORT_LINE
        .captures_iter(text)
        .filter(|caps| caps.get(1).is_none())
        .map(|caps| (caps[2].to_string(), caps.get(3).is_some()))
        .collect();
    let covered = |import: &str| {
        existing.iter().any(|(name, wildcard)| {
            if *wildcard {
                import
                    .rsplit_once('.')
                    .is_some_and(|(package, _)| package == name)
            } else {
                name == import
            }
        })
    };

    let missing: Vec<&str> = imports
        .iter()
        .copied()
        .filter(|import| !covered(import))
        .collect();
    if missing.is_empty() {
        return text.to_string();
    }

    let lines: String = missing
        .iter()
        .map(|import| format!("import {};\n", import))
        .collect();

    let (at, block) = if let Some(last) = IMPORT_LINE.find_iter(text).last() {
        (last.end(), ensure_line_start(text, last.end(), lines))
    } else if let Some(package) = PACKAGE_LINE.find(text) {
        let block = ensure_line_start(text, package.end(), format!("\n{}", lines));
        (package.end(), block)
    } else {
        (0, format!("{}\n", lines))
    };

    let mut edited = String::with_capacity(text.len() + block.len());
    edited.push_str(&text[..at]);
    edited.push_str(&block);
    edited.push_str(&text[at..]);
    edited
}

/// Prefix a newline when `at` is the end of a file lacking a trailing one.
fn ensure_line_start(text: &str, at: usize, block: String) -> String {
    if at > 0 && !text[..at].ends_with('\n') {
        format!("\n{}", block)
    } else {
        block
    }
}
