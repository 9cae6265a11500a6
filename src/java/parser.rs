//! Class extraction from Java sources using tree-sitter.

use crate::core::{simple_name, ClassDecl, ClassKind, DocComment, Error, MethodDecl, Result, TextRange};
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Parser, Tree};

/// Annotation marking tool-generated classes.
const GENERATED_ANNOTATION: &str = "Generated";

/// Members whose bodies hold code; classes declared there have no canonical name.
const CODE_MEMBERS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "compact_constructor_declaration",
    "field_declaration",
    "constant_declaration",
    "static_initializer",
    "block",
];

/// Type declarations; each one is a class as far as the inspection goes.
const TYPE_DECLARATIONS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Members that count as methods of their type, constructors included.
const METHOD_MEMBERS: &[&str] = &[
    "method_declaration",
    "constructor_declaration",
    "compact_constructor_declaration",
];

pub struct JavaParser {
    parser: Parser,
}

impl JavaParser {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_java::LANGUAGE.into())
            .map_err(|e| Error::Configuration(format!("Failed to set Java language: {}", e)))?;
        Ok(Self { parser })
    }

    fn parse_tree(&mut self, path: &Path, source: &str) -> Result<Tree> {
        self.parser
            .parse(source, None)
            .ok_or_else(|| Error::parse(path, "tree-sitter produced no syntax tree"))
    }

    /// Every class declared in `source`, outer classes before their members.
    pub fn parse_classes(&mut self, path: &Path, source: &str) -> Result<Vec<ClassDecl>> {
        let tree = self.parse_tree(path, source)?;
        let root = tree.root_node();
        if root.has_error() {
            log::debug!("{} has syntax errors; extracting what parsed", path.display());
        }

        let mut extractor = ClassExtractor {
            source,
            file: path.to_path_buf(),
            classes: Vec::new(),
        };
        let package = package_name(root, source);
        extractor.walk(root, Scope::Named(package));
        Ok(extractor.classes)
    }
}

/// Parse one file with a fresh parser.
pub fn parse_java(path: &Path, source: &str) -> Result<Vec<ClassDecl>> {
    JavaParser::new()?.parse_classes(path, source)
}

/// Naming context of the node being visited.
#[derive(Debug, Clone)]
enum Scope {
    /// Inside a package or a named type; holds the dotted prefix.
    Named(String),
    /// Inside code; classes here are local and unnamed.
    Local,
}

impl Scope {
    fn qualify(&self, name: &str) -> Option<String> {
        match self {
            Scope::Named(prefix) if prefix.is_empty() => Some(name.to_string()),
            Scope::Named(prefix) => Some(format!("{}.{}", prefix, name)),
            Scope::Local => None,
        }
    }

    fn enter(&self, name: &str) -> Scope {
        self.qualify(name).map(Scope::Named).unwrap_or(Scope::Local)
    }
}

struct ClassExtractor<'s> {
    source: &'s str,
    file: PathBuf,
    classes: Vec<ClassDecl>,
}

impl<'s> ClassExtractor<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        &self.source[node.byte_range()]
    }

    fn walk(&mut self, node: Node<'_>, scope: Scope) {
        let kind = node.kind();
        match kind {
            _ if TYPE_DECLARATIONS.contains(&kind) => self.type_declaration(node, &scope),
            "object_creation_expression" | "enum_constant" => {
                self.anonymous_class(node);
                self.walk_children(node, &Scope::Local);
            }
            _ if CODE_MEMBERS.contains(&kind) => self.walk_children(node, &Scope::Local),
            _ => self.walk_children(node, &scope),
        }
    }

    fn walk_children(&mut self, node: Node<'_>, scope: &Scope) {
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        for child in children {
            self.walk(child, scope.clone());
        }
    }

    fn type_declaration(&mut self, node: Node<'_>, scope: &Scope) {
        let (Some(name_node), Some(body)) = (
            node.child_by_field_name("name"),
            node.child_by_field_name("body"),
        ) else {
            return;
        };
        let name = self.text(name_node);
        let qualified_name = scope.qualify(name);
        let kind = if self.is_generated(node) {
            ClassKind::Synthesized
        } else {
            ClassKind::Regular
        };

        self.classes.push(ClassDecl {
            qualified_name: qualified_name.clone(),
            name: name.to_string(),
            name_range: range_of(name_node),
            kind,
            file: self.file.clone(),
            body_end: body.end_byte().saturating_sub(1),
            methods: self.methods(body),
        });

        let inner = qualified_name.map(Scope::Named).unwrap_or(Scope::Local);
        self.walk_children(body, &inner);
    }

    fn anonymous_class(&mut self, node: Node<'_>) {
        let Some(body) = child_of_kind(node, "class_body") else {
            return;
        };
        let anchor = node
            .child_by_field_name("type")
            .or_else(|| node.child_by_field_name("name"))
            .unwrap_or(node);

        self.classes.push(ClassDecl {
            qualified_name: None,
            name: String::new(),
            name_range: range_of(anchor),
            kind: ClassKind::Anonymous,
            file: self.file.clone(),
            body_end: body.end_byte().saturating_sub(1),
            methods: self.methods(body),
        });
    }

    fn methods(&self, body: Node<'_>) -> Vec<MethodDecl> {
        let mut methods = Vec::new();
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            if member.kind() == "enum_body_declarations" {
                methods.extend(self.methods(member));
            } else if METHOD_MEMBERS.contains(&member.kind()) {
                methods.extend(self.method(member));
            }
        }
        methods
    }

    fn method(&self, member: Node<'_>) -> Option<MethodDecl> {
        let name = member.child_by_field_name("name")?;
        let mut method = MethodDecl::new(self.text(name), range_of(name));
        method.doc = self.doc_comment(member);
        Some(method)
    }

    /// The `/** */` comment directly before `member`, skipping line comments.
    fn doc_comment(&self, member: Node<'_>) -> Option<DocComment> {
        let mut previous = member.prev_named_sibling();
        while let Some(node) = previous {
            match node.kind() {
                "line_comment" => previous = node.prev_named_sibling(),
                "block_comment" | "comment" => {
                    let text = self.text(node);
                    return text
                        .starts_with("/**")
                        .then(|| DocComment::new(text, node.start_byte()));
                }
                _ => return None,
            }
        }
        None
    }

    fn is_generated(&self, class: Node<'_>) -> bool {
        let Some(modifiers) = child_of_kind(class, "modifiers") else {
            return false;
        };
        let mut cursor = modifiers.walk();
        let found = modifiers
            .named_children(&mut cursor)
            .filter(|m| matches!(m.kind(), "marker_annotation" | "annotation"))
            .filter_map(|m| m.child_by_field_name("name"))
            .any(|name| simple_name(self.text(name)) == GENERATED_ANNOTATION);
        found
    }
}

fn range_of(node: Node<'_>) -> TextRange {
    TextRange::new(node.start_byte(), node.end_byte())
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.named_children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn package_name(root: Node<'_>, source: &str) -> String {
    child_of_kind(root, "package_declaration")
        .and_then(|package| {
            let mut cursor = package.walk();
            let name = package
                .named_children(&mut cursor)
                .find(|c| matches!(c.kind(), "scoped_identifier" | "identifier"));
            name
        })
        .map(|name| source[name.byte_range()].to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    const FOO: &str = indoc! {r#"
        package com.acme;

        import java.util.List;

        public class Foo {

            /**
             * Validates input.
             *
             * @should return true when input is valid
             */
            public boolean bar(String input) {
                Runnable r = new Runnable() {
                    public void run() {}
                };
                return input != null;
            }

            // helper without docs
            void helper() {}

            static class Inner {
                /** @should do inner work */
                void work() {}
            }
        }
    "#};

    fn parse(source: &str) -> Vec<ClassDecl> {
        parse_java(Path::new("Foo.java"), source).unwrap()
    }

    #[test]
    fn test_qualified_names_include_package_and_outer_class() {
        let classes = parse(FOO);
        let names: Vec<_> = classes
            .iter()
            .map(|c| c.qualified_name.clone())
            .collect();

        assert_eq!(
            names,
            vec![
                Some("com.acme.Foo".to_string()),
                None,
                Some("com.acme.Foo.Inner".to_string())
            ]
        );
        assert_eq!(classes[1].kind, ClassKind::Anonymous);
    }

    #[test]
    fn test_name_range_covers_identifier() {
        let classes = parse(FOO);
        let foo = &classes[0];
        assert_eq!(&FOO[foo.name_range.start..foo.name_range.end], "Foo");
        assert_eq!(&FOO[foo.body_end..foo.body_end + 1], "}");
    }

    #[test]
    fn test_methods_and_doc_comments() {
        let classes = parse(FOO);
        let foo = &classes[0];

        let names: Vec<_> = foo.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["bar", "helper"]);

        let doc = foo.methods[0].doc.as_ref().unwrap();
        assert!(doc.text.contains("@should return true when input is valid"));
        assert_eq!(&FOO[doc.range().start..doc.range().end], doc.text);
        assert!(foo.methods[1].doc.is_none());
    }

    #[test]
    fn test_generated_classes_are_synthesized() {
        let source = indoc! {r#"
            package gen;

            @javax.annotation.Generated("tool")
            public class Stub {}

            @Generated
            class Other {}

            class Plain {}
        "#};
        let kinds: Vec<_> = parse(source).iter().map(|c| c.kind).collect();
        assert_eq!(
            kinds,
            vec![ClassKind::Synthesized, ClassKind::Synthesized, ClassKind::Regular]
        );
    }

    #[test]
    fn test_local_classes_have_no_qualified_name() {
        let source = indoc! {r#"
            class Outer {
                void m() {
                    class Local {}
                }
            }
        "#};
        let classes = parse(source);
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].qualified_name.as_deref(), Some("Outer"));
        assert_eq!(classes[1].qualified_name, None);
        assert_eq!(classes[1].kind, ClassKind::Regular);
    }

    #[test]
    fn test_classes_nested_in_interfaces_and_enums() {
        let source = indoc! {r#"
            package p;
            interface Api {
                class Impl {}
            }
            enum Mode {
                ON;
                static class Holder {}
            }
        "#};
        let names: Vec<_> = parse(source)
            .into_iter()
            .filter_map(|c| c.qualified_name)
            .collect();
        assert_eq!(names, vec!["p.Api", "p.Api.Impl", "p.Mode", "p.Mode.Holder"]);
    }

    #[test]
    fn test_interfaces_enums_and_records_carry_their_methods() {
        let source = indoc! {r#"
            package p;
            interface Shape {
                /** @should compute area */
                double area();
            }
            enum Color {
                RED, GREEN;

                /** @should return hex code */
                public String hex() { return ""; }
            }
            record Point(int x, int y) {
                /** @should reject negatives */
                Point {}

                int sum() { return x + y; }
            }
        "#};
        let classes = parse(source);
        let summary: Vec<_> = classes
            .iter()
            .map(|c| {
                let methods: Vec<_> = c.methods.iter().map(|m| m.name.as_str()).collect();
                (c.qualified_name.clone().unwrap(), methods)
            })
            .collect();
        assert_eq!(
            summary,
            vec![
                ("p.Shape".to_string(), vec!["area"]),
                ("p.Color".to_string(), vec!["hex"]),
                ("p.Point".to_string(), vec!["Point", "sum"]),
            ]
        );

        for class in &classes {
            assert_eq!(&source[class.body_end..class.body_end + 1], "}");
            assert!(class.methods[0].doc.is_some(), "{:?}", class.qualified_name);
        }
    }

    #[test]
    fn test_constructors_are_methods() {
        let source = indoc! {r#"
            class Account {
                /** @should start empty */
                Account() {}
            }
        "#};
        let classes = parse(source);
        assert_eq!(classes[0].methods.len(), 1);
        assert_eq!(classes[0].methods[0].name, "Account");
        assert!(classes[0].methods[0].doc.is_some());
    }

    #[test]
    fn test_generated_enum_is_synthesized() {
        let source = "@Generated\nenum Mode { ON }\n";
        assert_eq!(parse(source)[0].kind, ClassKind::Synthesized);
    }

    #[test]
    fn test_plain_block_comment_is_not_documentation() {
        let source = "class A {\n  /* @should nope */\n  void m() {}\n}\n";
        let classes = parse(source);
        assert!(classes[0].methods[0].doc.is_none());
    }
}
