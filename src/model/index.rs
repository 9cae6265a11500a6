use crate::core::{ClassDecl, MethodDecl, TextRange};
use crate::quickfix::{EditConflict, StructureEditor, StubMethod};
use std::collections::HashMap;
use std::path::Path;

/// Read-only structural access to the project being analyzed.
///
/// Lookups return `None` for anything that does not exist; absence is a
/// normal answer, not an error.
pub trait ProjectIndex: Send + Sync {
    /// Find a class declaration by fully-qualified name.
    fn find_class(&self, qualified_name: &str) -> Option<&ClassDecl>;

    /// Find a method declared directly in the named class.
    fn find_method(&self, qualified_name: &str, method: &str) -> Option<&MethodDecl> {
        self.find_class(qualified_name)
            .and_then(|class| class.find_method(method))
    }
}

/// Class index held in memory, in insertion order.
///
/// Used as the backing store of the Java workspace and as a standalone fake
/// host in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIndex {
    classes: Vec<ClassDecl>,
    by_name: HashMap<String, usize>,
}

impl InMemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class(mut self, class: ClassDecl) -> Self {
        self.insert(class);
        self
    }

    /// Add a class. The first declaration of a qualified name wins lookups;
    /// later duplicates are kept for iteration only.
    pub fn insert(&mut self, class: ClassDecl) {
        if let Some(name) = &class.qualified_name {
            if self.by_name.contains_key(name) {
                log::warn!(
                    "Duplicate class {} in {}; keeping the first declaration",
                    name,
                    class.file.display()
                );
            } else {
                self.by_name.insert(name.clone(), self.classes.len());
            }
        }
        self.classes.push(class);
    }

    /// Replace every class declared in `file` with `classes`.
    pub fn replace_file(&mut self, file: &Path, classes: Vec<ClassDecl>) {
        let mut kept: Vec<ClassDecl> = std::mem::take(&mut self.classes)
            .into_iter()
            .filter(|class| class.file != file)
            .collect();
        kept.extend(classes);
        self.classes = Vec::with_capacity(kept.len());
        self.by_name.clear();
        for class in kept {
            self.insert(class);
        }
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDecl> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ProjectIndex for InMemoryIndex {
    fn find_class(&self, qualified_name: &str) -> Option<&ClassDecl> {
        self.by_name
            .get(qualified_name)
            .and_then(|&idx| self.classes.get(idx))
    }
}

/// Appends a method declaration with no source text behind it. Enough for a
/// re-run of the analysis to see the method.
impl StructureEditor for InMemoryIndex {
    fn append_method(&mut self, class: &str, stub: &StubMethod) -> Result<(), EditConflict> {
        let idx = *self
            .by_name
            .get(class)
            .ok_or_else(|| EditConflict::ClassNotFound(class.to_string()))?;
        let target = &mut self.classes[idx];
        let at = target.body_end;
        target
            .methods
            .push(MethodDecl::new(stub.name.clone(), TextRange::empty(at)));
        Ok(())
    }
}
