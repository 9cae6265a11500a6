use crate::behavior::{has_behaviors, parse_behaviors, BehaviorSpecification};
use crate::core::{ClassDecl, ClassKind, DocComment, MethodDecl};
use crate::frameworks::TestFramework;
use crate::model::ProjectIndex;
use std::collections::HashMap;

/// A class eligible for coverage analysis.
///
/// Only named, regular classes with a resolvable qualified name qualify;
/// anything else is invisible to the inspection.
#[derive(Debug, Clone, Copy)]
pub struct ClassUnderTest<'a> {
    decl: &'a ClassDecl,
    qualified_name: &'a str,
}

impl<'a> ClassUnderTest<'a> {
    /// Returns `None` for anonymous or synthesized classes and for classes the
    /// host could not give a qualified name.
    pub fn from_decl(decl: &'a ClassDecl) -> Option<Self> {
        if decl.kind != ClassKind::Regular {
            return None;
        }
        let qualified_name = decl.qualified_name.as_deref().filter(|n| !n.is_empty())?;
        Some(Self {
            decl,
            qualified_name,
        })
    }

    pub fn qualified_name(&self) -> &'a str {
        self.qualified_name
    }

    pub fn decl(&self) -> &'a ClassDecl {
        self.decl
    }

    /// Methods whose documentation carries at least one `@should` tag.
    pub fn documented_methods(&self) -> impl Iterator<Item = &'a MethodDecl> {
        self.decl
            .methods
            .iter()
            .filter(|m| has_behaviors(m.doc.as_ref()))
    }
}

/// Expected test method for one behavior identity of a source method.
#[derive(Debug, Clone)]
pub struct TestMethod<'a> {
    source: &'a MethodDecl,
    name: String,
    specifications: Vec<BehaviorSpecification>,
    backing: Option<&'a MethodDecl>,
}

impl<'a> TestMethod<'a> {
    pub fn really_exists(&self) -> bool {
        self.backing.is_some()
    }

    /// Expected identity in the test class.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_method(&self) -> &'a MethodDecl {
        self.source
    }

    /// Comment the specifications were taken from.
    pub fn backing_doc(&self) -> Option<&'a DocComment> {
        self.source.doc.as_ref()
    }

    /// Fragments that map to this identity, in textual order. Usually one;
    /// duplicate wording on the same method collapses into a single entry.
    pub fn specifications(&self) -> &[BehaviorSpecification] {
        &self.specifications
    }

    pub fn description(&self) -> &str {
        self.specifications
            .first()
            .map(|s| s.description.as_str())
            .unwrap_or_default()
    }
}

/// A class-under-test paired with its (possibly missing) test class.
#[derive(Debug, Clone)]
pub struct TestClass<'a> {
    class_under_test: ClassUnderTest<'a>,
    framework: TestFramework,
    name: String,
    backing: Option<&'a ClassDecl>,
    methods: Vec<TestMethod<'a>>,
}

impl<'a> TestClass<'a> {
    pub fn build(
        class_under_test: ClassUnderTest<'a>,
        framework: TestFramework,
        index: &'a dyn ProjectIndex,
    ) -> Self {
        let name = framework.class_test_name(class_under_test.qualified_name());
        let backing = index.find_class(&name);
        let methods = backing
            .map(|test_class| {
                class_under_test
                    .documented_methods()
                    .flat_map(|method| expected_methods(method, framework, test_class))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            class_under_test,
            framework,
            name,
            backing,
            methods,
        }
    }

    pub fn really_exists(&self) -> bool {
        self.backing.is_some()
    }

    pub fn class_under_test(&self) -> &ClassUnderTest<'a> {
        &self.class_under_test
    }

    pub fn framework(&self) -> TestFramework {
        self.framework
    }

    /// Expected qualified name of the test class.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn backing_class(&self) -> Option<&'a ClassDecl> {
        self.backing
    }

    /// Empty when the test class does not exist.
    pub fn all_methods(&self) -> &[TestMethod<'a>] {
        &self.methods
    }

    pub fn missing_methods(&self) -> impl Iterator<Item = &TestMethod<'a>> {
        self.methods.iter().filter(|m| !m.really_exists())
    }
}

/// One expected test method per distinct identity derived from `method`'s tags.
fn expected_methods<'a>(
    method: &'a MethodDecl,
    framework: TestFramework,
    test_class: &'a ClassDecl,
) -> Vec<TestMethod<'a>> {
    let mut methods: Vec<TestMethod<'a>> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for spec in parse_behaviors(method.doc.as_ref()) {
        let name = framework.method_test_name(&method.name, &spec.description, spec.position);
        match by_name.get(&name) {
            Some(&idx) => methods[idx].specifications.push(spec),
            None => {
                by_name.insert(name.clone(), methods.len());
                methods.push(TestMethod {
                    source: method,
                    backing: test_class.find_method(&name),
                    name,
                    specifications: vec![spec],
                });
            }
        }
    }

    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TextRange;
    use crate::model::InMemoryIndex;
    use pretty_assertions::assert_eq;

    fn documented(name: &str, doc: &str) -> MethodDecl {
        MethodDecl::new(name, TextRange::new(0, name.len())).with_doc(DocComment::new(doc, 0))
    }

    fn foo() -> ClassDecl {
        ClassDecl::new("com.acme.Foo", TextRange::new(13, 16), "Foo.java")
            .with_method(documented("bar", "/** @should return true */"))
            .with_method(MethodDecl::new("helper", TextRange::new(0, 6)))
            .with_method(documented(
                "baz",
                "/**\n * @should do one thing\n * @should do another\n */",
            ))
    }

    #[test]
    fn test_excluded_shapes() {
        let anonymous = foo().with_kind(ClassKind::Anonymous);
        let synthesized = foo().with_kind(ClassKind::Synthesized);
        let mut unnamed = foo();
        unnamed.qualified_name = None;

        assert!(ClassUnderTest::from_decl(&anonymous).is_none());
        assert!(ClassUnderTest::from_decl(&synthesized).is_none());
        assert!(ClassUnderTest::from_decl(&unnamed).is_none());
        assert!(ClassUnderTest::from_decl(&foo()).is_some());
    }

    #[test]
    fn test_documented_methods_skip_untagged() {
        let decl = foo();
        let cut = ClassUnderTest::from_decl(&decl).unwrap();
        let names: Vec<_> = cut.documented_methods().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["bar", "baz"]);
    }

    #[test]
    fn test_missing_test_class_has_no_methods() {
        let index = InMemoryIndex::new().with_class(foo());
        let decl = index.find_class("com.acme.Foo").unwrap();
        let cut = ClassUnderTest::from_decl(decl).unwrap();

        let test_class = TestClass::build(cut, TestFramework::JUnit4, &index);

        assert!(!test_class.really_exists());
        assert_eq!(test_class.name(), "com.acme.FooTest");
        assert!(test_class.all_methods().is_empty());
    }

    #[test]
    fn test_methods_resolved_against_backing_class() {
        let test_decl = ClassDecl::new("com.acme.FooTest", TextRange::new(0, 7), "FooTest.java")
            .with_method(MethodDecl::new("bar_shouldReturnTrue", TextRange::new(0, 1)));
        let index = InMemoryIndex::new().with_class(foo()).with_class(test_decl);
        let decl = index.find_class("com.acme.Foo").unwrap();
        let cut = ClassUnderTest::from_decl(decl).unwrap();

        let test_class = TestClass::build(cut, TestFramework::JUnit4, &index);

        let names: Vec<_> = test_class.all_methods().iter().map(|m| m.name()).collect();
        assert_eq!(
            names,
            vec![
                "bar_shouldReturnTrue",
                "baz_shouldDoOneThing",
                "baz_shouldDoAnother"
            ]
        );
        assert!(test_class.all_methods()[0].really_exists());
        assert_eq!(test_class.missing_methods().count(), 2);
        assert_eq!(test_class.all_methods()[1].source_method().name, "baz");
        assert!(test_class.all_methods()[1].backing_doc().is_some());
    }

    #[test]
    fn test_duplicate_descriptions_share_one_method() {
        let decl = ClassDecl::new("com.acme.Dup", TextRange::new(0, 3), "Dup.java").with_method(
            documented(
                "run",
                "/**\n * @should work\n * @should Work!\n */",
            ),
        );
        let test_decl = ClassDecl::new("com.acme.DupTest", TextRange::new(0, 7), "DupTest.java");
        let index = InMemoryIndex::new().with_class(decl).with_class(test_decl);
        let cut = ClassUnderTest::from_decl(index.find_class("com.acme.Dup").unwrap()).unwrap();

        let test_class = TestClass::build(cut, TestFramework::JUnit4, &index);

        assert_eq!(test_class.all_methods().len(), 1);
        assert_eq!(test_class.all_methods()[0].specifications().len(), 2);
        assert_eq!(test_class.all_methods()[0].description(), "work");
    }

    #[test]
    fn test_really_exists_is_repeatable() {
        let index = InMemoryIndex::new().with_class(foo());
        let cut = ClassUnderTest::from_decl(index.find_class("com.acme.Foo").unwrap()).unwrap();
        let test_class = TestClass::build(cut, TestFramework::JUnit4, &index);

        assert_eq!(test_class.really_exists(), test_class.really_exists());
    }
}
