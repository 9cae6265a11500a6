use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::{ShouldmapConfig, CONFIG_FILE_NAME};
use crate::core::Result;

/// How many directories to climb when looking for a config file.
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<ShouldmapConfig> {
    let config = toml::from_str::<ShouldmapConfig>(contents)?;

    for pattern in config
        .sources
        .test_patterns
        .iter()
        .chain(config.sources.ignore.iter())
    {
        glob::Pattern::new(pattern)?;
    }

    Ok(config)
}

/// Pure function to try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<ShouldmapConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Failed to parse {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// A config file together with the directory it was found in.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Directory holding the config file; `[sources]` patterns are relative to it.
    pub root: PathBuf,
    pub config: ShouldmapConfig,
}

/// The nearest valid `.shouldmap.toml` at or above `start`.
pub fn find_config(start: &Path) -> Option<LoadedConfig> {
    let start = if start.is_file() {
        start.parent().map(Path::to_path_buf).unwrap_or_default()
    } else {
        start.to_path_buf()
    };
    let start = start.canonicalize().unwrap_or(start);

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH).find_map(|dir| {
        try_load_config_from_path(&dir.join(CONFIG_FILE_NAME))
            .map(|config| LoadedConfig { root: dir, config })
    })
}
