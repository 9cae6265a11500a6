use serde::{Deserialize, Serialize};

/// Name of the per-project configuration file.
pub const CONFIG_FILE_NAME: &str = ".shouldmap.toml";

/// Root configuration structure for shouldmap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShouldmapConfig {
    /// Active test framework key (`junit3`, `junit4`, `junit5`, `testng`).
    /// Absent or empty leaves the inspection unconfigured.
    #[serde(default)]
    pub test_framework: Option<String>,

    /// Source tree layout
    #[serde(default)]
    pub sources: SourcesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourcesConfig {
    /// Globs (relative to the analyzed root) for test sources. Test sources
    /// are indexed so test classes can be found, but are not analyzed.
    #[serde(default = "default_test_patterns")]
    pub test_patterns: Vec<String>,

    /// Globs excluded from indexing entirely.
    #[serde(default = "default_ignore_patterns")]
    pub ignore: Vec<String>,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            test_patterns: default_test_patterns(),
            ignore: default_ignore_patterns(),
        }
    }
}

pub fn default_test_patterns() -> Vec<String> {
    vec!["**/src/test/**".to_string()]
}

pub fn default_ignore_patterns() -> Vec<String> {
    vec!["**/target/**".to_string(), "**/build/**".to_string()]
}

impl ShouldmapConfig {
    /// Configured framework key, with blank values treated as unset.
    pub fn framework_key(&self) -> Option<&str> {
        self.test_framework
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}
