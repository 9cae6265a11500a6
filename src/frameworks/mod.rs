//! Test framework naming conventions.
//!
//! Each supported framework is one variant of [`TestFramework`]. A variant
//! decides two identities: the test class expected for a class-under-test and
//! the test method expected for a `@should` description. Matching between
//! production code and tests is done purely on these identity strings, so both
//! mappings must be deterministic.

pub mod naming;

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use naming::{camel_suffix, capitalize, underscore_suffix, words};

/// Suffix appended to the class-under-test name to find its test class.
pub const TEST_CLASS_SUFFIX: &str = "Test";

/// Framework used when running under [`crate::inspection::ExecutionMode::UnitTest`].
pub const DEFAULT_TEST_FRAMEWORK: TestFramework = TestFramework::JUnit4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestFramework {
    JUnit3,
    JUnit4,
    JUnit5,
    TestNg,
}

/// How a framework joins the words of a description into a method name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordStyle {
    Camel,
    Underscore,
}

impl TestFramework {
    pub const ALL: [TestFramework; 4] = [
        TestFramework::JUnit3,
        TestFramework::JUnit4,
        TestFramework::JUnit5,
        TestFramework::TestNg,
    ];

    /// Configuration key, as accepted by [`FromStr`].
    pub fn key(self) -> &'static str {
        match self {
            TestFramework::JUnit3 => "junit3",
            TestFramework::JUnit4 => "junit4",
            TestFramework::JUnit5 => "junit5",
            TestFramework::TestNg => "testng",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TestFramework::JUnit3 => "JUnit 3",
            TestFramework::JUnit4 => "JUnit 4",
            TestFramework::JUnit5 => "JUnit 5 (Jupiter)",
            TestFramework::TestNg => "TestNG",
        }
    }

    pub fn word_style(self) -> WordStyle {
        match self {
            TestFramework::JUnit3 | TestFramework::JUnit4 | TestFramework::TestNg => {
                WordStyle::Camel
            }
            TestFramework::JUnit5 => WordStyle::Underscore,
        }
    }

    /// Expected test class for a class-under-test: `com.acme.Foo` -> `com.acme.FooTest`.
    pub fn class_test_name(self, class_under_test: &str) -> String {
        match self {
            TestFramework::JUnit3
            | TestFramework::JUnit4
            | TestFramework::JUnit5
            | TestFramework::TestNg => format!("{}{}", class_under_test, TEST_CLASS_SUFFIX),
        }
    }

    /// Expected test method for one `@should` description of `method`.
    ///
    /// `position` is the 1-based index of the tag on its method; it only shows
    /// up in the name when the description has no usable words.
    pub fn method_test_name(self, method: &str, description: &str, position: usize) -> String {
        let words = words(description);
        let suffix = match (self.word_style(), words.is_empty()) {
            (WordStyle::Camel, false) => camel_suffix(&words),
            (WordStyle::Underscore, false) => underscore_suffix(&words),
            (WordStyle::Camel, true) => position.to_string(),
            (WordStyle::Underscore, true) => format!("_{}", position),
        };

        match self {
            TestFramework::JUnit3 => format!("test{}_should{}", capitalize(method), suffix),
            TestFramework::JUnit4 | TestFramework::JUnit5 | TestFramework::TestNg => {
                format!("{}_should{}", method, suffix)
            }
        }
    }
}

impl fmt::Display for TestFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for TestFramework {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        TestFramework::ALL
            .into_iter()
            .find(|framework| framework.key() == key)
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "unknown test framework '{}' (supported: {})",
                    s.trim(),
                    supported_keys().join(", ")
                ))
            })
    }
}

pub fn supported_keys() -> Vec<&'static str> {
    TestFramework::ALL.iter().map(|f| f.key()).collect()
}
