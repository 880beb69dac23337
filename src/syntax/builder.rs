//! Source model construction.
//!
//! Walks the parse tree of one snapshot and emits typed [`Declaration`]
//! nodes with byte spans and classification-relevant attributes. The walk is
//! a pure transformation; nothing is resolved or rewritten here.
//!
//! Anything the walker does not recognize becomes an opaque `Unknown` node.
//! The orchestrator refuses to reorganize a file containing one, so an
//! unanalyzable construct can never be reordered or dropped.

use smol_str::SmolStr;
use tree_sitter::Node;

use crate::base::{TextSize, offset};

use super::model::{
    Container, DeclKind, Declaration, SourceModel, TopLevel, Visibility, WriteMode,
};
use super::parse::{ParseError, parse};

/// Build the source model for one snapshot.
pub fn build_model(text: &str) -> Result<SourceModel, ParseError> {
    let tree = parse(text)?;
    let root = tree.root_node();

    let mut model = SourceModel {
        nodes: Vec::new(),
        has_syntax_errors: root.has_error(),
    };

    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if child.kind() == "comment" {
            continue;
        }
        model.nodes.push(build_top_level(child, text));
    }

    // Leading trivia travels with the following declaration: the full start
    // of each node is the end of the previous one, and the first node owns
    // everything from the start of the file.
    let mut prev_end = offset(0);
    for node in &mut model.nodes {
        let decl = match node {
            TopLevel::Decl(d) => d,
            TopLevel::Container(c) => &mut c.decl,
        };
        decl.full_start = prev_end;
        prev_end = decl.end;
    }

    Ok(model)
}

fn build_top_level(node: Node<'_>, text: &str) -> TopLevel {
    let (outer, inner) = unwrap_wrappers(node);
    let start = offset(outer.start_byte());
    let end = offset(outer.end_byte());

    match inner.kind() {
        "import_statement" => TopLevel::Decl(Declaration::new(DeclKind::Import, "import", start, end)),
        "type_alias_declaration" => {
            TopLevel::Decl(Declaration::new(DeclKind::TypeAlias, name_of(inner, text), start, end))
        }
        "enum_declaration" => {
            TopLevel::Decl(Declaration::new(DeclKind::Enum, name_of(inner, text), start, end))
        }
        "function_declaration" | "generator_function_declaration" | "function_signature" => {
            TopLevel::Decl(Declaration::new(DeclKind::Function, name_of(inner, text), start, end))
        }
        "lexical_declaration" | "variable_declaration" => {
            TopLevel::Decl(Declaration::new(DeclKind::Variable, "", start, end))
        }
        "expression_statement" => {
            TopLevel::Decl(Declaration::new(DeclKind::Expression, "", start, end))
        }
        "class_declaration" | "abstract_class_declaration" => {
            TopLevel::Container(build_container(DeclKind::Class, outer, inner, text))
        }
        "interface_declaration" => {
            TopLevel::Container(build_container(DeclKind::Interface, outer, inner, text))
        }
        _ => TopLevel::Decl(Declaration::new(DeclKind::Unknown, "unknown", start, end)),
    }
}

/// Strip `export` and `declare` wrappers for classification while keeping the
/// wrapper's span as the declaration span.
fn unwrap_wrappers(node: Node<'_>) -> (Node<'_>, Node<'_>) {
    let mut inner = node;
    loop {
        match inner.kind() {
            "export_statement" => match inner.child_by_field_name("declaration") {
                Some(declaration) => inner = declaration,
                None => break,
            },
            "ambient_declaration" => {
                let mut cursor = inner.walk();
                let child = inner.named_children(&mut cursor).find(|c| c.kind() != "comment");
                match child {
                    Some(declaration) => inner = declaration,
                    None => break,
                }
            }
            _ => break,
        }
    }
    (node, inner)
}

fn build_container(kind: DeclKind, outer: Node<'_>, inner: Node<'_>, text: &str) -> Container {
    let mut decl = Declaration::new(
        kind,
        name_of(inner, text),
        offset(outer.start_byte()),
        offset(outer.end_byte()),
    );
    decl.is_abstract = inner.kind() == "abstract_class_declaration";
    decl.decorators = decorators_of(outer, text);
    if outer.id() != inner.id() {
        decl.decorators.extend(decorators_of(inner, text));
    }

    let mut members = Vec::new();
    let mut members_start = offset(0);
    let mut members_end = offset(0);

    if let Some(body) = inner.child_by_field_name("body") {
        // Decorators parsed as standalone body children attach to the member
        // that follows them.
        let mut pending: Vec<Node<'_>> = Vec::new();
        let mut cursor = body.walk();
        for child in body.named_children(&mut cursor) {
            match child.kind() {
                "comment" => continue,
                "decorator" => {
                    pending.push(child);
                    continue;
                }
                _ => {}
            }
            let mut member = if kind == DeclKind::Interface {
                build_interface_member(child, text)
            } else {
                build_class_member(child, text)
            };
            if let Some(first) = pending.first() {
                member.start = offset(first.start_byte());
                let mut decorators: Vec<SmolStr> =
                    pending.iter().map(|d| node_text(*d, text).trim().into()).collect();
                decorators.append(&mut member.decorators);
                member.decorators = decorators;
                pending.clear();
            }
            members.push(member);
        }

        if !members.is_empty() {
            // The member span opens right after the `{` of the body.
            members_start = offset(body.start_byte() + 1);
            let mut prev = members_start;
            for member in &mut members {
                member.full_start = prev;
                prev = member.end;
            }
            members_end = prev;
        }
    }

    Container { decl, members_start, members_end, members }
}

fn build_class_member(node: Node<'_>, text: &str) -> Declaration {
    let start = offset(node.start_byte());

    match node.kind() {
        "method_definition" | "method_signature" | "abstract_method_signature" => {
            let name = name_of(node, text);
            let kind = if has_token(node, "get") {
                DeclKind::Getter
            } else if has_token(node, "set") {
                DeclKind::Setter
            } else if name == "constructor" {
                DeclKind::Constructor
            } else {
                DeclKind::Method
            };
            let end = member_end(node, text);
            let mut decl = Declaration::new(kind, name, start, end);
            decl.visibility = visibility_of(node, text);
            decl.is_static = has_token(node, "static");
            decl.is_abstract = node.kind() == "abstract_method_signature" || has_token(node, "abstract");
            decl.is_async = has_token(node, "async");
            decl.decorators = decorators_of(node, text);
            decl
        }
        "public_field_definition" | "field_definition" => {
            let kind = if has_token(node, "accessor") {
                DeclKind::Accessor
            } else {
                DeclKind::Property
            };
            let end = member_end(node, text);
            let mut decl = Declaration::new(kind, name_of(node, text), start, end);
            decl.visibility = visibility_of(node, text);
            decl.is_static = has_token(node, "static");
            decl.is_abstract = has_token(node, "abstract");
            decl.write_mode = write_mode_of(node);
            decl.is_arrow_function = node
                .child_by_field_name("value")
                .is_some_and(|v| v.kind() == "arrow_function");
            decl.decorators = decorators_of(node, text);
            decl
        }
        "index_signature" => {
            let end = member_end(node, text);
            let mut decl = Declaration::new(DeclKind::Index, "index", start, end);
            decl.visibility = visibility_of(node, text);
            decl.is_static = has_token(node, "static");
            decl.write_mode = write_mode_of(node);
            decl
        }
        "class_static_block" => {
            Declaration::new(DeclKind::StaticBlock, "", start, offset(node.end_byte()))
        }
        _ => Declaration::new(DeclKind::Unknown, "unknown", start, offset(node.end_byte())),
    }
}

fn build_interface_member(node: Node<'_>, text: &str) -> Declaration {
    let start = offset(node.start_byte());
    let end = member_end(node, text);

    match node.kind() {
        "property_signature" => {
            let mut decl = Declaration::new(DeclKind::Property, name_of(node, text), start, end);
            decl.write_mode = write_mode_of(node);
            decl
        }
        "method_signature" => {
            let kind = if has_token(node, "get") {
                DeclKind::Getter
            } else if has_token(node, "set") {
                DeclKind::Setter
            } else {
                DeclKind::Method
            };
            Declaration::new(kind, name_of(node, text), start, end)
        }
        "index_signature" => {
            let mut decl = Declaration::new(DeclKind::Index, "index", start, end);
            decl.write_mode = write_mode_of(node);
            decl
        }
        _ => Declaration::new(DeclKind::Unknown, "unknown", start, offset(node.end_byte())),
    }
}

/// Member end offset, extended over the statement terminator.
///
/// The grammar leaves `;` and `,` separators outside member nodes, but the
/// terminator belongs to the member's code span. Body-terminated members
/// (`method_definition`, `class_static_block`) never own a terminator.
fn member_end(node: Node<'_>, text: &str) -> TextSize {
    let end = node.end_byte();
    if matches!(node.kind(), "method_definition" | "class_static_block") {
        return offset(end);
    }
    let bytes = text.as_bytes();
    let mut i = end;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    if i < bytes.len() && (bytes[i] == b';' || bytes[i] == b',') {
        offset(i + 1)
    } else {
        offset(end)
    }
}

fn node_text<'a>(node: Node<'_>, text: &'a str) -> &'a str {
    &text[node.byte_range()]
}

fn name_of(node: Node<'_>, text: &str) -> SmolStr {
    node.child_by_field_name("name")
        .map(|n| SmolStr::from(node_text(n, text).trim()))
        .unwrap_or_default()
}

fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    node.children(&mut cursor).any(|c| c.kind() == token)
}

/// Explicit accessibility keyword, or the `#`-name private convention.
fn visibility_of(node: Node<'_>, text: &str) -> Option<Visibility> {
    if node
        .child_by_field_name("name")
        .is_some_and(|n| node_text(n, text).starts_with('#'))
    {
        return Some(Visibility::Private);
    }
    let mut cursor = node.walk();
    let modifier = node
        .children(&mut cursor)
        .find(|c| c.kind() == "accessibility_modifier")?;
    match node_text(modifier, text) {
        "public" => Some(Visibility::Public),
        "protected" => Some(Visibility::Protected),
        "private" => Some(Visibility::Private),
        _ => None,
    }
}

/// First matching write modifier wins: const over readonly over nothing.
fn write_mode_of(node: Node<'_>) -> WriteMode {
    if has_token(node, "const") {
        WriteMode::Const
    } else if has_token(node, "readonly") {
        WriteMode::ReadOnly
    } else {
        WriteMode::Writable
    }
}

fn decorators_of(node: Node<'_>, text: &str) -> Vec<SmolStr> {
    let mut cursor = node.walk();
    node.children(&mut cursor)
        .filter(|c| c.kind() == "decorator")
        .map(|d| SmolStr::from(node_text(d, text).trim()))
        .collect()
}
