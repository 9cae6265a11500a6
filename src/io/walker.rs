use crate::core::{Error, Result};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

const JAVA_EXTENSION: &str = "java";

/// A Java file found under the analyzed root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Matched one of the test patterns: indexed, never analyzed.
    pub is_test: bool,
}

pub struct FileWalker {
    root: PathBuf,
    test_patterns: Vec<glob::Pattern>,
    ignore_patterns: Vec<glob::Pattern>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            test_patterns: vec![],
            ignore_patterns: vec![],
        }
    }

    pub fn with_test_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.test_patterns = compile(patterns)?;
        Ok(self)
    }

    pub fn with_ignore_patterns(mut self, patterns: &[String]) -> Result<Self> {
        self.ignore_patterns = compile(patterns)?;
        Ok(self)
    }

    /// Every `.java` file under the root, sorted by path.
    pub fn walk(&self) -> Result<Vec<SourceFile>> {
        if !self.root.exists() {
            return Err(Error::file_system("path does not exist", &self.root));
        }

        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(SourceFile {
                    path: path.to_path_buf(),
                    is_test: self.is_test(path),
                });
            }
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let is_java = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(JAVA_EXTENSION));
        is_java && !matches_any(&self.ignore_patterns, self.relative(path))
    }

    fn is_test(&self, path: &Path) -> bool {
        matches_any(&self.test_patterns, self.relative(path))
    }

    /// Patterns are written relative to the root.
    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

fn compile(patterns: &[String]) -> Result<Vec<glob::Pattern>> {
    patterns
        .iter()
        .map(|p| glob::Pattern::new(p).map_err(Error::from))
        .collect()
}

fn matches_any(patterns: &[glob::Pattern], path: &Path) -> bool {
    patterns.iter().any(|p| p.matches_path(path))
}

/// Java files under `root`, classified with the given test patterns.
pub fn find_java_files(
    root: &Path,
    test_patterns: &[String],
    ignore_patterns: &[String],
) -> Result<Vec<SourceFile>> {
    FileWalker::new(root.to_path_buf())
        .with_test_patterns(test_patterns)?
        .with_ignore_patterns(ignore_patterns)?
        .walk()
}
