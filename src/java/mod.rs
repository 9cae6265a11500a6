//! Java host: turns `.java` files into the structural model the coverage
//! engine reads, and applies fixes back to source text.

pub mod parser;
pub mod position;
pub mod workspace;

pub use parser::{parse_java, JavaParser};
pub use position::{LineIndex, Position};
pub use workspace::JavaWorkspace;
