//! `.shouldmap.toml` configuration.

mod core;
mod loader;

pub use self::core::{
    default_ignore_patterns, default_test_patterns, ShouldmapConfig, SourcesConfig,
    CONFIG_FILE_NAME,
};
pub use loader::{
    directory_ancestors, find_config, parse_and_validate_config, LoadedConfig,
};
