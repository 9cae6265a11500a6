//! CLI command implementations.
//!
//! - **analyze**: check `@should` coverage, optionally creating missing test methods
//! - **init**: write a default `.shouldmap.toml`
//! - **frameworks**: list supported test frameworks

pub mod analyze;
pub mod frameworks;
pub mod init;

pub use analyze::{apply_fixes, handle_analyze, run_pass, AnalyzeConfig, PassSummary};
pub use frameworks::list_frameworks;
pub use init::init_config;
