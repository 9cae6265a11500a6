//! Coverage model: what a class-under-test expects to find in the test tree.
//!
//! The host is only reached through [`ProjectIndex`], a read-only lookup by
//! qualified name. [`TestClass::build`] pairs a class-under-test with its
//! backing test class (if any) and one [`TestMethod`] per expected test method
//! identity.

pub mod index;
pub mod test_class;

pub use index::{InMemoryIndex, ProjectIndex};
pub use test_class::{ClassUnderTest, TestClass, TestMethod};
