//! The coverage inspection: one pass per class, producing diagnostics.

pub mod diagnostic;
pub mod engine;

pub use diagnostic::{
    Diagnostic, InspectionInfo, Severity, INSPECTION, MISSING_TEST_CLASS, MISSING_TEST_METHOD,
};
pub use engine::{
    resolve_framework, CancellationToken, Cancelled, CoverageEngine, ExecutionMode, PassOutcome,
};
