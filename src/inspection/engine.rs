use crate::core::{ClassDecl, Result};
use crate::frameworks::{TestFramework, DEFAULT_TEST_FRAMEWORK};
use crate::inspection::Diagnostic;
use crate::model::{ClassUnderTest, ProjectIndex, TestClass, TestMethod};
use crate::quickfix::Fix;
use std::convert::Infallible;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;

/// Whether the engine runs for real or under an automated test harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Interactive,
    /// Ignore configuration and use [`DEFAULT_TEST_FRAMEWORK`].
    UnitTest,
}

/// Pick the active framework from the configured key.
///
/// `Ok(None)` means nothing is configured; an unknown key is a
/// configuration error.
pub fn resolve_framework(
    setting: Option<&str>,
    mode: ExecutionMode,
) -> Result<Option<TestFramework>> {
    if mode == ExecutionMode::UnitTest {
        return Ok(Some(DEFAULT_TEST_FRAMEWORK));
    }
    match setting.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(key) => key.parse().map(Some),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("analysis pass cancelled")]
pub struct Cancelled;

/// Cooperative cancellation shared between the host and running passes.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> std::result::Result<(), Cancelled> {
        if self.is_cancelled() {
            Err(Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Result of one pass over one class. The first matching state wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    /// Anonymous, synthesized or unnamed class; not inspected at all.
    Excluded,
    /// No test framework configured.
    Unconfigured,
    /// The test class does not exist.
    MissingTestClass(Diagnostic),
    /// The test class exists; one diagnostic per uncovered `@should` fragment.
    /// Empty means fully covered.
    PartialCoverage(Vec<Diagnostic>),
}

impl PassOutcome {
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        match self {
            PassOutcome::Excluded | PassOutcome::Unconfigured => Vec::new(),
            PassOutcome::MissingTestClass(diagnostic) => vec![diagnostic],
            PassOutcome::PartialCoverage(diagnostics) => diagnostics,
        }
    }

    /// The class was inspected and everything it declares is covered.
    pub fn is_covered(&self) -> bool {
        matches!(self, PassOutcome::PartialCoverage(d) if d.is_empty())
    }
}

/// Runs the coverage inspection against a project index.
///
/// The engine only reads from the index. Each call builds its model from
/// scratch, so repeated calls on unchanged input give identical results.
pub struct CoverageEngine<'a> {
    index: &'a dyn ProjectIndex,
    framework: Option<TestFramework>,
}

impl<'a> CoverageEngine<'a> {
    pub fn new(index: &'a dyn ProjectIndex, framework: Option<TestFramework>) -> Self {
        Self { index, framework }
    }

    /// Build from a raw configuration value. An unknown key disables the
    /// engine rather than failing the host.
    pub fn from_setting(
        index: &'a dyn ProjectIndex,
        setting: Option<&str>,
        mode: ExecutionMode,
    ) -> Self {
        let framework = resolve_framework(setting, mode).unwrap_or_else(|e| {
            log::warn!("Coverage inspection disabled: {}", e);
            None
        });
        Self::new(index, framework)
    }

    pub fn framework(&self) -> Option<TestFramework> {
        self.framework
    }

    /// Diagnostics for `class`.
    pub fn analyze(&self, class: &ClassDecl) -> Vec<Diagnostic> {
        self.evaluate(class).into_diagnostics()
    }

    pub fn evaluate(&self, class: &ClassDecl) -> PassOutcome {
        match self.run(class, || Ok::<(), Infallible>(())) {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    /// Like [`evaluate`](Self::evaluate), checking `token` between methods.
    pub fn evaluate_cancellable(
        &self,
        class: &ClassDecl,
        token: &CancellationToken,
    ) -> std::result::Result<PassOutcome, Cancelled> {
        self.run(class, || token.check())
    }

    fn run<E>(
        &self,
        class: &ClassDecl,
        checkpoint: impl Fn() -> std::result::Result<(), E>,
    ) -> std::result::Result<PassOutcome, E> {
        let Some(class_under_test) = ClassUnderTest::from_decl(class) else {
            log::trace!("Skipping excluded class {:?} in {}", class.name, class.file.display());
            return Ok(PassOutcome::Excluded);
        };
        let Some(framework) = self.framework else {
            return Ok(PassOutcome::Unconfigured);
        };

        let test_class = TestClass::build(class_under_test, framework, self.index);

        if !test_class.really_exists() {
            log::debug!(
                "{}: no test class {}",
                class_under_test.qualified_name(),
                test_class.name()
            );
            return Ok(PassOutcome::MissingTestClass(Diagnostic::missing_test_class(
                class_under_test.qualified_name(),
                class.file.clone(),
                class.name_range,
            )));
        }

        let mut diagnostics = Vec::new();
        for method in test_class.all_methods() {
            checkpoint()?;
            if !method.really_exists() {
                diagnostics.extend(missing_method_diagnostics(&test_class, method));
            }
        }

        log::debug!(
            "{}: {} uncovered behavior(s) against {}",
            class_under_test.qualified_name(),
            diagnostics.len(),
            test_class.name()
        );
        Ok(PassOutcome::PartialCoverage(diagnostics))
    }
}

/// One diagnostic per fragment, all sharing a fix for the same method.
fn missing_method_diagnostics(
    test_class: &TestClass<'_>,
    method: &TestMethod<'_>,
) -> Vec<Diagnostic> {
    let fix = Fix::for_missing_method(test_class, method);
    let class = test_class.class_under_test();
    method
        .specifications()
        .iter()
        .map(|spec| {
            Diagnostic::missing_test_method(
                class.qualified_name(),
                class.decl().file.clone(),
                spec.range,
                fix.clone(),
            )
        })
        .collect()
}
