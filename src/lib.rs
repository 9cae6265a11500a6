// Export modules for library usage
pub mod behavior;
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod frameworks;
pub mod inspection;
pub mod io;
pub mod java;
pub mod model;
pub mod quickfix;

// Re-export commonly used types
pub use crate::core::{ClassDecl, ClassKind, DocComment, Error, MethodDecl, Result, TextRange};

pub use crate::behavior::{parse_behaviors, BehaviorSpecification};
pub use crate::frameworks::{TestFramework, DEFAULT_TEST_FRAMEWORK};
pub use crate::inspection::{
    CancellationToken, CoverageEngine, Diagnostic, ExecutionMode, PassOutcome, Severity,
    INSPECTION, MISSING_TEST_CLASS, MISSING_TEST_METHOD,
};
pub use crate::java::JavaWorkspace;
pub use crate::model::{InMemoryIndex, ProjectIndex, TestClass, TestMethod};
pub use crate::quickfix::{EditConflict, Fix, StructureEditor, StubMethod};
