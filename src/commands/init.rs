use crate::config::{parse_and_validate_config, CONFIG_FILE_NAME};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# shouldmap configuration

# Test framework used to name test classes and methods:
# junit3, junit4, junit5 or testng. Leave empty to disable the check.
test_framework = "junit4"

[sources]
# Indexed so test classes can be found, never checked themselves
test_patterns = ["**/src/test/**"]
# Not indexed at all
ignore = ["**/target/**", "**/build/**"]
"#;

/// Write `.shouldmap.toml` in the current directory.
pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_in(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

pub fn init_config_in(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}
