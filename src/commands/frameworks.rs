use crate::frameworks::{TestFramework, DEFAULT_TEST_FRAMEWORK};
use anyhow::Result;
use std::io::Write;

const SAMPLE_CLASS: &str = "com.acme.Foo";
const SAMPLE_METHOD: &str = "bar";
const SAMPLE_DESCRIPTION: &str = "return true when input is valid";

/// Print every supported framework key with a naming example.
pub fn list_frameworks(out: &mut dyn Write) -> Result<()> {
    for framework in TestFramework::ALL {
        let marker = if framework == DEFAULT_TEST_FRAMEWORK {
            " (test-mode default)"
        } else {
            ""
        };
        writeln!(out, "{:<8} {}{}", framework.key(), framework.display_name(), marker)?;
        writeln!(
            out,
            "         {} -> {}#{}",
            SAMPLE_CLASS,
            framework.class_test_name(SAMPLE_CLASS),
            framework.method_test_name(SAMPLE_METHOD, SAMPLE_DESCRIPTION, 1)
        )?;
    }
    Ok(())
}
