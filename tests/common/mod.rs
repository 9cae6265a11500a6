#![allow(dead_code)]

use indoc::indoc;
use std::fs;
use std::path::{Path, PathBuf};

pub const FOO_PATH: &str = "src/main/java/com/acme/Foo.java";
pub const FOO_TEST_PATH: &str = "src/test/java/com/acme/FooTest.java";

pub const FOO: &str = indoc! {r#"
    package com.acme;

    public class Foo {

        /**
         * Validates input.
         *
         * @should return true when input is valid
         */
        public boolean bar(String input) {
            return input != null;
        }

        /**
         * @should do one thing
         * @should do another thing
         */
        public void baz() {
        }

        public void undocumented() {
        }
    }
"#};

pub const EMPTY_FOO_TEST: &str = indoc! {r#"
    package com.acme;

    import org.junit.Test;

    public class FooTest {
    }
"#};

pub const FOO_TEST_WITH_BAR: &str = indoc! {r#"
    package com.acme;

    import org.junit.Assert;
    import org.junit.Test;

    public class FooTest {

        @Test
        public void bar_shouldReturnTrueWhenInputIsValid() throws Exception {
            Assert.assertTrue(new Foo().bar("x"));
        }
    }
"#};

/// Write `files` (relative path, contents) under `root`.
pub fn write_project(root: &Path, files: &[(&str, &str)]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

/// In-memory sources for `JavaWorkspace::from_sources`.
pub fn sources(files: &[(&str, &str, bool)]) -> Vec<(PathBuf, String, bool)> {
    files
        .iter()
        .map(|(path, text, is_test)| (PathBuf::from(path), text.to_string(), *is_test))
        .collect()
}
