//! Behavior-tag extraction from documentation comments.
//!
//! A behavior tag is a `@should <description>` block tag. Each tag runs until
//! the next block tag of any kind or the end of the comment. The reported
//! range covers only the human-written description, so a diagnostic underlines
//! exactly the sentence that lacks a test.

pub mod parser;

pub use parser::{has_behaviors, parse_behaviors, BehaviorSpecification, SHOULD_TAG};
