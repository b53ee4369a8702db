//! Per-file fact extraction from a Java syntax tree
//!
//! Walks the tree once and records declared types, imports, the simple names of
//! referenced types, and per-method metrics.

use crate::models::source_file::{
    qualify, simple_name_of, FileFacts, ImportRef, MethodFacts, TypeInfo, TypeKind, Visibility,
    DEFAULT_PACKAGE,
};
use crate::parsers::java_parser::SyntaxTree;
use std::collections::BTreeSet;
use std::path::Path;
use tree_sitter::Node;

/// Extract facts from a successfully parsed file
pub fn extract_facts(tree: &SyntaxTree, path: &Path) -> FileFacts {
    let mut extractor = FactExtractor {
        source: tree.source_bytes(),
        path,
        facts: FileFacts {
            package: DEFAULT_PACKAGE.to_string(),
            ..Default::default()
        },
    };

    extractor.walk(tree.root());
    extractor.facts
}

/// Innermost enclosing type while walking
#[derive(Debug, Clone, Default)]
struct Scope {
    /// Dotted in-file name of the enclosing named type (`Outer.Inner`)
    type_path: Option<String>,
    /// Index into `facts.types`; `None` at top level and inside anonymous class bodies
    owner: Option<usize>,
    owner_is_interface: bool,
}

impl Scope {
    fn anonymous(&self) -> Scope {
        Scope {
            type_path: self.type_path.clone(),
            owner: None,
            owner_is_interface: false,
        }
    }
}

/// Scope a queued node is visited in, relative to its parent's
enum ChildScope {
    Same,
    Anonymous,
    Inner(Scope),
}

/// What to walk once a node has been handled
enum Descend<'t> {
    Stop,
    Children,
    Nodes(Vec<(Node<'t>, ChildScope)>),
}

#[derive(Debug, Default, Clone, Copy)]
struct Modifiers {
    public: bool,
    private: bool,
    is_abstract: bool,
}

struct FactExtractor<'a> {
    source: &'a [u8],
    path: &'a Path,
    facts: FileFacts,
}

impl<'a> FactExtractor<'a> {
    fn text(&self, node: Node<'_>) -> &'a str {
        node.utf8_text(self.source).unwrap_or("")
    }

    /// Dotted name text with any whitespace or comments between segments removed
    fn dotted_text(&self, node: Node<'_>) -> String {
        self.text(node).split_whitespace().collect()
    }

    /// Depth-first walk in document order with an explicit stack, so deeply
    /// nested expressions cannot exhaust the thread stack
    fn walk(&mut self, root: Node<'_>) {
        let mut scopes = vec![Scope::default()];
        let mut stack = vec![(root, 0usize)];

        while let Some((node, scope_id)) = stack.pop() {
            let next = match self.visit(node, &scopes[scope_id]) {
                Descend::Stop => continue,
                Descend::Children => node
                    .children(&mut node.walk())
                    .map(|child| (child, ChildScope::Same))
                    .collect(),
                Descend::Nodes(nodes) => nodes,
            };

            for (child, child_scope) in next.into_iter().rev() {
                let id = match child_scope {
                    ChildScope::Same => scope_id,
                    ChildScope::Anonymous => {
                        let anonymous = scopes[scope_id].anonymous();
                        scopes.push(anonymous);
                        scopes.len() - 1
                    }
                    ChildScope::Inner(inner) => {
                        scopes.push(inner);
                        scopes.len() - 1
                    }
                };
                stack.push((child, id));
            }
        }
    }

    fn visit<'t>(&mut self, node: Node<'t>, scope: &Scope) -> Descend<'t> {
        match node.kind() {
            "package_declaration" => {
                self.record_package(node);
                Descend::Stop
            }
            "import_declaration" => {
                self.record_import(node);
                Descend::Stop
            }
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration" => self.record_type(node, scope),
            "method_declaration" | "constructor_declaration" | "compact_constructor_declaration" => {
                self.record_method(node, scope)
            }
            "field_declaration" | "constant_declaration" => self.record_field(node, scope),
            "local_variable_declaration" => {
                if let Some(ty) = node.child_by_field_name("type") {
                    self.collect_type_names(ty);
                }
                Descend::Children
            }
            "object_creation_expression" => {
                if let Some(ty) = node.child_by_field_name("type") {
                    self.collect_type_names(ty);
                }
                with_anonymous_body(node)
            }
            "enum_constant" => with_anonymous_body(node),
            "method_invocation" => {
                if let Some(object) = node.child_by_field_name("object") {
                    if object.kind() == "identifier" {
                        let name = self.text(object);
                        self.add_used(name);
                    }
                }
                Descend::Children
            }
            "catch_clause" => {
                if let Some(body) = node.child_by_field_name("body") {
                    if is_empty_block(body) {
                        self.facts.empty_catch_lines.push(line_of(node));
                    }
                }
                Descend::Children
            }
            _ => Descend::Children,
        }
    }

    fn record_package(&mut self, node: Node<'_>) {
        for child in node.named_children(&mut node.walk()) {
            if matches!(child.kind(), "scoped_identifier" | "identifier") {
                self.facts.package = self.dotted_text(child);
                return;
            }
        }
    }

    fn record_import(&mut self, node: Node<'_>) {
        let mut path = None;
        let mut is_static = false;
        let mut is_wildcard = false;

        for child in node.children(&mut node.walk()) {
            match child.kind() {
                "static" => is_static = true,
                "asterisk" => is_wildcard = true,
                "scoped_identifier" | "identifier" => path = Some(self.dotted_text(child)),
                _ => {}
            }
        }

        if let Some(path) = path {
            self.facts.imports.push(ImportRef {
                path,
                is_static,
                is_wildcard,
            });
        }
    }

    fn record_type<'t>(&mut self, node: Node<'t>, scope: &Scope) -> Descend<'t> {
        let Some(name_node) = node.child_by_field_name("name") else {
            return Descend::Children;
        };
        let simple_name = self.text(name_node).to_string();

        let kind = match node.kind() {
            "interface_declaration" => TypeKind::Interface,
            "enum_declaration" => TypeKind::Enum,
            "record_declaration" => TypeKind::Record,
            "annotation_type_declaration" => TypeKind::Annotation,
            _ => TypeKind::Class,
        };

        let type_path = match &scope.type_path {
            Some(outer) => format!("{}.{}", outer, simple_name),
            None => simple_name.clone(),
        };

        let modifiers = self.modifiers(node);
        let info = TypeInfo {
            fqn: qualify(&self.facts.package, &type_path),
            simple_name,
            package: self.facts.package.clone(),
            file: self.path.to_path_buf(),
            visibility: if modifiers.public {
                Visibility::Public
            } else {
                Visibility::NonPublic
            },
            kind,
            is_abstract: modifiers.is_abstract,
            nested: scope.type_path.is_some(),
            line: line_of(node),
            public_methods: BTreeSet::new(),
            public_fields: BTreeSet::new(),
        };

        tracing::trace!(fqn = %info.fqn, kind = ?info.kind, "declared type");
        self.facts.types.push(info);

        let inner = Scope {
            type_path: Some(type_path),
            owner: Some(self.facts.types.len() - 1),
            owner_is_interface: kind.is_interface(),
        };

        let mut bodies = Vec::new();
        for child in node.children(&mut node.walk()) {
            match child.kind() {
                // extends / implements / record components
                "superclass" | "super_interfaces" | "extends_interfaces" | "formal_parameters" => {
                    self.collect_type_names(child)
                }
                "class_body" | "interface_body" | "enum_body" | "annotation_type_body" => {
                    bodies.push((child, ChildScope::Inner(inner.clone())))
                }
                _ => {}
            }
        }
        Descend::Nodes(bodies)
    }

    fn record_method<'t>(&mut self, node: Node<'t>, scope: &Scope) -> Descend<'t> {
        if let Some(ret) = node.child_by_field_name("type") {
            self.collect_type_names(ret);
        }

        let mut parameter_count = 0;
        if let Some(params) = node.child_by_field_name("parameters") {
            for param in params.named_children(&mut params.walk()) {
                if matches!(param.kind(), "formal_parameter" | "spread_parameter") {
                    parameter_count += 1;
                    self.collect_type_names(param);
                }
            }
        }

        if let Some(owner) = scope.owner {
            let name = match node.child_by_field_name("name") {
                Some(name_node) => self.text(name_node).to_string(),
                None => self.facts.types[owner].simple_name.clone(),
            };

            let modifiers = self.modifiers(node);
            let is_public = modifiers.public || (scope.owner_is_interface && !modifiers.private);
            if is_public {
                self.facts.types[owner].public_methods.insert(name.clone());
            }

            self.facts.methods.push(MethodFacts {
                name,
                owner: self.facts.types[owner].simple_name.clone(),
                is_constructor: node.kind() != "method_declaration",
                parameter_count,
                line_start: line_of(node),
                line_end: node.end_position().row + 1,
                complexity: calculate_complexity(node),
            });
        }

        match node.child_by_field_name("body") {
            Some(body) => Descend::Nodes(vec![(body, ChildScope::Same)]),
            None => Descend::Stop,
        }
    }

    fn record_field<'t>(&mut self, node: Node<'t>, scope: &Scope) -> Descend<'t> {
        if let Some(ty) = node.child_by_field_name("type") {
            self.collect_type_names(ty);
        }

        let modifiers = self.modifiers(node);
        let is_public = modifiers.public || scope.owner_is_interface;

        let mut values = Vec::new();
        for child in node.children(&mut node.walk()) {
            if child.kind() != "variable_declarator" {
                continue;
            }
            if let (true, Some(owner), Some(name)) =
                (is_public, scope.owner, child.child_by_field_name("name"))
            {
                let name = self.text(name).to_string();
                self.facts.types[owner].public_fields.insert(name);
            }
            if let Some(value) = child.child_by_field_name("value") {
                values.push((value, ChildScope::Same));
            }
        }
        Descend::Nodes(values)
    }

    /// Record the simple names of every type mentioned in a type expression
    fn collect_type_names(&mut self, node: Node<'_>) {
        let mut pending = vec![node];
        while let Some(node) = pending.pop() {
            self.collect_type_name(node, &mut pending);
        }
    }

    fn collect_type_name<'t>(&mut self, node: Node<'t>, pending: &mut Vec<Node<'t>>) {
        match node.kind() {
            "type_identifier" => {
                let name = self.text(node);
                self.add_used(name);
            }
            "scoped_type_identifier" => {
                let last = node
                    .named_children(&mut node.walk())
                    .filter(|child| child.kind() == "type_identifier")
                    .last();
                let name = match last {
                    Some(segment) => self.text(segment),
                    None => simple_name_of(self.text(node)),
                };
                self.add_used(name);
            }
            "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {}
            _ => pending.extend(node.named_children(&mut node.walk())),
        }
    }

    fn add_used(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() || name == "var" {
            return;
        }
        self.facts.used_types.insert(name.to_string());
    }

    fn modifiers(&self, node: Node<'_>) -> Modifiers {
        let mut modifiers = Modifiers::default();
        for child in node.children(&mut node.walk()) {
            if child.kind() != "modifiers" {
                continue;
            }
            for keyword in child.children(&mut child.walk()) {
                match keyword.kind() {
                    "public" => modifiers.public = true,
                    "private" => modifiers.private = true,
                    "abstract" => modifiers.is_abstract = true,
                    _ => {}
                }
            }
        }
        modifiers
    }
}

/// Walk children, treating a trailing `class_body` as an anonymous class
fn with_anonymous_body(node: Node<'_>) -> Descend<'_> {
    let children = node
        .children(&mut node.walk())
        .map(|child| {
            let scope = if child.kind() == "class_body" {
                ChildScope::Anonymous
            } else {
                ChildScope::Same
            };
            (child, scope)
        })
        .collect();
    Descend::Nodes(children)
}

fn line_of(node: Node<'_>) -> usize {
    node.start_position().row + 1
}

/// A block holding nothing but comments counts as empty
fn is_empty_block(block: Node<'_>) -> bool {
    block
        .named_children(&mut block.walk())
        .all(|child| matches!(child.kind(), "line_comment" | "block_comment"))
}

/// Cyclomatic complexity: 1 plus one per branch point in the method.
///
/// Named types declared inside the body are measured as their own methods and
/// are not descended into; anonymous class bodies count toward the method.
fn calculate_complexity(method: Node<'_>) -> u32 {
    let mut complexity = 1;
    let mut pending = vec![method];

    while let Some(node) = pending.pop() {
        match node.kind() {
            "if_statement"
            | "while_statement"
            | "for_statement"
            | "enhanced_for_statement"
            | "do_statement"
            | "catch_clause"
            | "switch_block_statement_group"
            | "switch_rule"
            | "ternary_expression" => complexity += 1,
            "binary_expression" => {
                if let Some(op) = node.child_by_field_name("operator") {
                    if matches!(op.kind(), "&&" | "||") {
                        complexity += 1;
                    }
                }
            }
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration" => continue,
            _ => {}
        }
        pending.extend(node.children(&mut node.walk()));
    }

    complexity
}
