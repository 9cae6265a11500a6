use crate::core::simple_name;
use crate::frameworks::TestFramework;

/// Indentation unit used inside generated method bodies.
const INDENT: &str = "    ";

/// Source of a generated test method, before it is placed in a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubMethod {
    pub name: String,
    /// Method text without outer indentation, one entry per line.
    pub lines: Vec<String>,
    /// Imports the method relies on.
    pub imports: Vec<&'static str>,
}

impl StubMethod {
    pub fn render(
        framework: TestFramework,
        source_class: &str,
        source_method: &str,
        method_name: &str,
        description: &str,
    ) -> Self {
        let mut lines = vec![
            "/**".to_string(),
            format!(" * @verifies {}", description).trim_end().to_string(),
            format!(" * @see {}#{}()", simple_name(source_class), source_method),
            " */".to_string(),
        ];

        let (annotation, signature, fail, imports): (Option<&str>, String, &str, Vec<&'static str>) =
            match framework {
                TestFramework::JUnit3 => (
                    None,
                    format!("public void {}() throws Exception {{", method_name),
                    "fail(\"Not yet implemented\");",
                    vec![],
                ),
                TestFramework::JUnit4 => (
                    Some("@Test"),
                    format!("public void {}() throws Exception {{", method_name),
                    "Assert.fail(\"Not yet implemented\");",
                    vec!["org.junit.Assert", "org.junit.Test"],
                ),
                TestFramework::JUnit5 => (
                    Some("@Test"),
                    format!("void {}() throws Exception {{", method_name),
                    "Assertions.fail(\"Not yet implemented\");",
                    vec!["org.junit.jupiter.api.Assertions", "org.junit.jupiter.api.Test"],
                ),
                TestFramework::TestNg => (
                    Some("@Test"),
                    format!("public void {}() throws Exception {{", method_name),
                    "Assert.fail(\"Not yet implemented\");",
                    vec!["org.testng.Assert", "org.testng.annotations.Test"],
                ),
            };

        lines.extend(annotation.map(str::to_string));
        lines.push(signature);
        lines.push(format!("{}//TODO auto-generated", INDENT));
        lines.push(format!("{}{}", INDENT, fail));
        lines.push("}".to_string());

        Self {
            name: method_name.to_string(),
            lines,
            imports,
        }
    }

    /// Method text with every non-empty line prefixed by `indent`.
    pub fn to_source(&self, indent: &str) -> String {
        self.lines
            .iter()
            .map(|line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", indent, line)
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
