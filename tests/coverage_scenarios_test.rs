//! Coverage scenarios against real Java sources parsed into a workspace.

mod common;

use common::*;
use pretty_assertions::assert_eq;
use shouldmap::commands::{apply_fixes, run_pass};
use shouldmap::{
    ClassDecl, CoverageEngine, Diagnostic, ExecutionMode, JavaWorkspace, PassOutcome,
    ProjectIndex, TestFramework, MISSING_TEST_CLASS, MISSING_TEST_METHOD,
};
use std::path::Path;

fn workspace(test_class: Option<&str>) -> JavaWorkspace {
    let mut files = vec![(FOO_PATH, FOO, false)];
    if let Some(text) = test_class {
        files.push((FOO_TEST_PATH, text, true));
    }
    JavaWorkspace::from_sources(sources(&files))
}

fn foo(ws: &JavaWorkspace) -> &ClassDecl {
    ws.find_class("com.acme.Foo").unwrap()
}

fn text_of<'a>(ws: &'a JavaWorkspace, d: &Diagnostic) -> &'a str {
    &ws.source(&d.file).unwrap()[d.range.start..d.range.end]
}

fn for_method<'d>(diagnostics: &'d [Diagnostic], method: &str) -> Vec<&'d Diagnostic> {
    diagnostics
        .iter()
        .filter(|d| d.fix.as_ref().is_some_and(|f| f.source_method == method))
        .collect()
}

#[test]
fn missing_test_class_is_reported_once_at_class_name() {
    let ws = workspace(None);
    let engine = CoverageEngine::new(&ws, Some(TestFramework::JUnit4));

    let diagnostics = engine.analyze(foo(&ws));

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, MISSING_TEST_CLASS);
    assert_eq!(text_of(&ws, &diagnostics[0]), "Foo");
    assert!(diagnostics[0].fix.is_none());
}

#[test]
fn missing_test_method_points_at_description() {
    let ws = workspace(Some(EMPTY_FOO_TEST));
    let engine = CoverageEngine::new(&ws, Some(TestFramework::JUnit4));

    let diagnostics = engine.analyze(foo(&ws));
    let bar = for_method(&diagnostics, "bar");

    assert_eq!(bar.len(), 1);
    assert_eq!(bar[0].message, MISSING_TEST_METHOD);
    assert_eq!(text_of(&ws, bar[0]), "return true when input is valid");
    let fix = bar[0].fix.as_ref().unwrap();
    assert!(fix.name.contains("bar"));
    assert_eq!(fix.test_class, "com.acme.FooTest");
    assert_eq!(fix.method_name, "bar_shouldReturnTrueWhenInputIsValid");
}

#[test]
fn existing_test_method_covers_behavior() {
    let ws = workspace(Some(FOO_TEST_WITH_BAR));
    let engine = CoverageEngine::new(&ws, Some(TestFramework::JUnit4));

    let diagnostics = engine.analyze(foo(&ws));

    assert!(for_method(&diagnostics, "bar").is_empty());
    assert_eq!(for_method(&diagnostics, "baz").len(), 2);
}

#[test]
fn each_tag_gets_its_own_diagnostic_and_fix() {
    let ws = workspace(Some(EMPTY_FOO_TEST));
    let engine = CoverageEngine::new(&ws, Some(TestFramework::JUnit4));

    let diagnostics = engine.analyze(foo(&ws));
    let baz = for_method(&diagnostics, "baz");

    let anchors: Vec<_> = baz.iter().map(|d| text_of(&ws, d)).collect();
    assert_eq!(anchors, vec!["do one thing", "do another thing"]);
    let names: Vec<_> = baz
        .iter()
        .map(|d| d.fix.as_ref().unwrap().method_name.as_str())
        .collect();
    assert_eq!(names, vec!["baz_shouldDoOneThing", "baz_shouldDoAnotherThing"]);
}

#[test]
fn applying_fix_then_reanalyzing_clears_the_diagnostic() {
    let mut ws = workspace(Some(EMPTY_FOO_TEST));
    let before = run_pass(&ws, Some(TestFramework::JUnit4));
    let bar_fix = for_method(&before.diagnostics, "bar")[0]
        .fix
        .clone()
        .unwrap();

    assert!(bar_fix.invoke(&mut ws));

    let after = run_pass(&ws, Some(TestFramework::JUnit4));
    assert!(for_method(&after.diagnostics, "bar").is_empty());
    assert_eq!(for_method(&after.diagnostics, "baz").len(), 2);

    let test_source = ws.source(Path::new(FOO_TEST_PATH)).unwrap();
    assert!(test_source.contains("public void bar_shouldReturnTrueWhenInputIsValid() throws Exception {"));
    assert!(test_source.contains("import org.junit.Assert;"));
    assert_eq!(test_source.matches("import org.junit.Test;").count(), 1);
}

#[test]
fn applying_all_fixes_covers_the_class() {
    let mut ws = workspace(Some(EMPTY_FOO_TEST));
    let before = run_pass(&ws, Some(TestFramework::JUnit5));

    let applied = apply_fixes(&mut ws, &before.diagnostics);

    assert_eq!(applied.len(), 3);
    let after = run_pass(&ws, Some(TestFramework::JUnit5));
    assert!(after.diagnostics.is_empty());
    assert_eq!(after.classes_analyzed, 1);
}

#[test]
fn analysis_is_idempotent() {
    let ws = workspace(Some(EMPTY_FOO_TEST));
    let engine = CoverageEngine::new(&ws, Some(TestFramework::TestNg));

    assert_eq!(engine.analyze(foo(&ws)), engine.analyze(foo(&ws)));
}

#[test]
fn unconfigured_engine_reports_nothing() {
    let ws = workspace(None);
    let engine = CoverageEngine::from_setting(&ws, None, ExecutionMode::Interactive);

    assert_eq!(engine.evaluate(foo(&ws)), PassOutcome::Unconfigured);
    assert!(run_pass(&ws, None).diagnostics.is_empty());
}

#[test]
fn unit_test_mode_falls_back_to_junit4() {
    let ws = workspace(Some(EMPTY_FOO_TEST));
    let engine = CoverageEngine::from_setting(&ws, None, ExecutionMode::UnitTest);

    let diagnostics = engine.analyze(foo(&ws));
    let bar = for_method(&diagnostics, "bar");
    assert_eq!(bar[0].fix.as_ref().unwrap().framework, TestFramework::JUnit4);
}

#[test]
fn anonymous_and_generated_classes_are_excluded() {
    let source = indoc::indoc! {r#"
        package com.acme;

        import javax.annotation.Generated;

        @Generated("tool")
        public class Gen {
            /** @should never be reported */
            void m() {
                Runnable r = new Runnable() {
                    /** @should not be reported either */
                    public void run() {}
                };
            }
        }
    "#};
    let ws = JavaWorkspace::from_sources(sources(&[("Gen.java", source, false)]));
    let engine = CoverageEngine::new(&ws, Some(TestFramework::JUnit4));

    let outcomes: Vec<_> = ws.classes_under_test().map(|c| engine.evaluate(c)).collect();
    assert_eq!(outcomes, vec![PassOutcome::Excluded, PassOutcome::Excluded]);
}

const SHAPE: &str = indoc::indoc! {r#"
    package com.acme;

    public interface Shape {

        /**
         * @should compute area from dimensions
         * @should return zero for empty shapes
         */
        double area();
    }
"#};

const EMPTY_SHAPE_TEST: &str = indoc::indoc! {r#"
    package com.acme;

    public class ShapeTest {
    }
"#};

const COLOR: &str = indoc::indoc! {r#"
    package com.acme;

    public enum Color {
        RED, GREEN;

        /** @should return hex code */
        public String hex() {
            return "";
        }
    }
"#};

const EMPTY_COLOR_TEST: &str = indoc::indoc! {r#"
    package com.acme;

    public class ColorTest {
    }
"#};

fn type_workspace(files: &[(&str, &str, bool)]) -> JavaWorkspace {
    JavaWorkspace::from_sources(sources(files))
}

fn analyze(ws: &JavaWorkspace, class: &str) -> Vec<Diagnostic> {
    let engine = CoverageEngine::new(ws, Some(TestFramework::JUnit4));
    engine.analyze(ws.find_class(class).unwrap())
}

#[test]
fn interface_without_test_class_reports_missing_test_class() {
    let ws = type_workspace(&[("Shape.java", SHAPE, false)]);

    let diagnostics = analyze(&ws, "com.acme.Shape");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, MISSING_TEST_CLASS);
    assert_eq!(text_of(&ws, &diagnostics[0]), "Shape");
}

#[test]
fn interface_with_empty_test_class_reports_each_tag() {
    let ws = type_workspace(&[
        ("Shape.java", SHAPE, false),
        ("ShapeTest.java", EMPTY_SHAPE_TEST, true),
    ]);

    let diagnostics = analyze(&ws, "com.acme.Shape");

    let anchors: Vec<_> = diagnostics.iter().map(|d| text_of(&ws, d)).collect();
    assert_eq!(
        anchors,
        vec!["compute area from dimensions", "return zero for empty shapes"]
    );
    assert!(diagnostics.iter().all(|d| d.message == MISSING_TEST_METHOD));
}

#[test]
fn enum_without_test_class_reports_missing_test_class() {
    let ws = type_workspace(&[("Color.java", COLOR, false)]);

    let diagnostics = analyze(&ws, "com.acme.Color");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, MISSING_TEST_CLASS);
    assert_eq!(text_of(&ws, &diagnostics[0]), "Color");
}

#[test]
fn enum_with_empty_test_class_reports_each_tag() {
    let ws = type_workspace(&[
        ("Color.java", COLOR, false),
        ("ColorTest.java", EMPTY_COLOR_TEST, true),
    ]);

    let diagnostics = analyze(&ws, "com.acme.Color");

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message, MISSING_TEST_METHOD);
    assert_eq!(text_of(&ws, &diagnostics[0]), "return hex code");
    assert_eq!(
        diagnostics[0].fix.as_ref().unwrap().method_name,
        "hex_shouldReturnHexCode"
    );
}

#[test]
fn fixing_enum_tags_covers_the_enum() {
    let mut ws = type_workspace(&[
        ("Color.java", COLOR, false),
        ("ColorTest.java", EMPTY_COLOR_TEST, true),
    ]);
    let before = run_pass(&ws, Some(TestFramework::JUnit4));
    assert_eq!(before.diagnostics.len(), 1);

    apply_fixes(&mut ws, &before.diagnostics);

    let after = run_pass(&ws, Some(TestFramework::JUnit4));
    assert!(after.diagnostics.is_empty());
    assert_eq!(after.classes_analyzed, 1);
}
