//! Quick fixes offered with missing-test-method diagnostics.
//!
//! A [`Fix`] is plain data describing which stub to create where. Nothing is
//! touched until the host calls [`Fix::apply`] with a [`StructureEditor`], and
//! the editor performs the insertion as one edit.

pub mod stub;

use crate::frameworks::TestFramework;
use crate::model::{TestClass, TestMethod};
use serde::Serialize;
use thiserror::Error;

pub use stub::StubMethod;

/// Family name shared by every fix this crate produces.
pub const CREATE_TEST_METHOD_FAMILY: &str = "Create test method";

/// Why a fix could not be applied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditConflict {
    #[error("test class {0} no longer exists")]
    ClassNotFound(String),

    #[error("test class {class} changed since it was analyzed")]
    StaleAnchor { class: String },

    #[error("edited source of {class} no longer parses: {message}")]
    Reparse { class: String, message: String },
}

/// The host side of a fix: a structure that can take one new method.
pub trait StructureEditor {
    /// Append `stub` as the last member of `class`, as a single edit.
    fn append_method(&mut self, class: &str, stub: &StubMethod) -> Result<(), EditConflict>;
}

/// Creates one missing test method in the backing test class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    /// Shown to the user, names the source method.
    pub name: String,
    pub family_name: &'static str,
    pub framework: TestFramework,
    /// Qualified name of the class receiving the stub.
    pub test_class: String,
    /// Qualified name of the class-under-test.
    pub source_class: String,
    pub source_method: String,
    /// Identity of the method to create.
    pub method_name: String,
    pub description: String,
}

impl Fix {
    /// Bind a fix to one missing test method of `test_class`.
    pub fn for_missing_method(test_class: &TestClass<'_>, method: &TestMethod<'_>) -> Self {
        let source_method = method.source_method().name.clone();
        Self {
            name: format!(
                "Create test method {} for '{}'",
                method.name(),
                source_method
            ),
            family_name: CREATE_TEST_METHOD_FAMILY,
            framework: test_class.framework(),
            test_class: test_class.name().to_string(),
            source_class: test_class.class_under_test().qualified_name().to_string(),
            source_method,
            method_name: method.name().to_string(),
            description: method.description().to_string(),
        }
    }

    pub fn stub(&self) -> StubMethod {
        StubMethod::render(
            self.framework,
            &self.source_class,
            &self.source_method,
            &self.method_name,
            &self.description,
        )
    }

    /// Synthesize the stub in the test class.
    ///
    /// Applying a fix twice creates two methods; re-run the analysis after
    /// applying before offering fixes again.
    pub fn apply(&self, editor: &mut dyn StructureEditor) -> Result<(), EditConflict> {
        editor.append_method(&self.test_class, &self.stub())
    }

    /// Host entry point: apply, log a conflict and carry on.
    ///
    /// Returns whether the edit happened.
    pub fn invoke(&self, editor: &mut dyn StructureEditor) -> bool {
        match self.apply(editor) {
            Ok(()) => {
                log::debug!("{} applied to {}", self.method_name, self.test_class);
                true
            }
            Err(e) => {
                log::error!("Could not apply '{}': {}", self.name, e);
                false
            }
        }
    }

    /// Key identifying the edit; fixes with equal keys create the same method.
    pub fn target_key(&self) -> (&str, &str) {
        (&self.test_class, &self.method_name)
    }
}
