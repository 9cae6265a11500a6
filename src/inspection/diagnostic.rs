use crate::core::TextRange;
use crate::quickfix::Fix;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

pub const MISSING_TEST_CLASS: &str = "Missing Test Class";
pub const MISSING_TEST_METHOD: &str = "Missing test method for should annotation";

/// Identity of the inspection as a host would list it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InspectionInfo {
    pub group: &'static str,
    pub display_name: &'static str,
    pub short_name: &'static str,
    pub enabled_by_default: bool,
}

pub const INSPECTION: InspectionInfo = InspectionInfo {
    group: "BDD",
    display_name: "Unused Should Annotations",
    short_name: "UnusedShould",
    enabled_by_default: true,
};

/// Every coverage diagnostic is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Short name of the inspection that produced this diagnostic.
    pub rule: &'static str,
    pub severity: Severity,
    pub file: PathBuf,
    /// Exact span to highlight.
    pub range: TextRange,
    pub message: &'static str,
    /// Qualified name of the class-under-test.
    pub class: String,
    pub fix: Option<Fix>,
}

impl Diagnostic {
    pub fn missing_test_class(class: &str, file: PathBuf, name_range: TextRange) -> Self {
        Self {
            rule: INSPECTION.short_name,
            severity: Severity::Warning,
            file,
            range: name_range,
            message: MISSING_TEST_CLASS,
            class: class.to_string(),
            fix: None,
        }
    }

    pub fn missing_test_method(class: &str, file: PathBuf, range: TextRange, fix: Fix) -> Self {
        Self {
            rule: INSPECTION.short_name,
            severity: Severity::Warning,
            file,
            range,
            message: MISSING_TEST_METHOD,
            class: class.to_string(),
            fix: Some(fix),
        }
    }
}
