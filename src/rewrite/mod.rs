//! Span rewriting.
//!
//! Renders an ordered group tree plus the original text into replacement
//! text for one span. Member text is never regenerated: the comment span
//! `[full_start, start)` and the code span `[start, end)` are sliced from
//! the snapshot the model was built from, so reorganization cannot lose
//! a byte of code.

mod lines;
mod visibility;

pub use lines::{detect_indentation, format_lines, remove_regions};
pub use visibility::insert_public_modifier;

use std::fmt::Write;

use crate::base::{TextSize, offset, slice};
use crate::ordering::Group;
use crate::syntax::DeclKind;

/// Formatting options for one rewrite.
#[derive(Clone, Copy, Debug)]
pub struct PrintOptions<'a> {
    /// Indentation unit detected from the file.
    pub indentation: &'a str,
    /// True when rewriting one level below the document root.
    pub indent_members: bool,
    /// Indent region marker lines.
    pub indent_regions: bool,
    pub add_member_count: bool,
    pub add_public_modifier: bool,
    pub region_caption_at_end: bool,
    pub group_with_decorators: bool,
    pub arrow_functions_as_methods: bool,
}

/// Render `groups` and splice the result over `[start, end)` of `source`.
///
/// Whitespace immediately around the span is trimmed so the new block is
/// separated from its surroundings by exactly one line break; the line
/// normalization pass settles blank-line runs afterwards.
pub fn print_groups(
    groups: &[Group<'_>],
    source: &str,
    start: TextSize,
    end: TextSize,
    options: &PrintOptions<'_>,
) -> String {
    let mut members = String::new();
    for group in groups {
        render_group(group, source, options, &mut members);
    }

    let region_indent = if options.indent_regions { options.indentation } else { "" };

    let mut result = String::new();
    result.push_str(slice(source, offset(0), start).trim_end());
    result.push('\n');
    result.push_str(region_indent);
    result.push_str(members.trim());
    result.push('\n');
    result.push_str(source[usize::from(end)..].trim_start());
    result.trim_start().to_string()
}

fn render_group(group: &Group<'_>, source: &str, options: &PrintOptions<'_>, out: &mut String) {
    let count = group.count();
    if count == 0 {
        // no empty region is ever emitted
        return;
    }

    let region_indent = if options.indent_regions { options.indentation } else { "" };

    if group.is_region {
        out.push('\n');
        out.push_str(region_indent);
        out.push_str("// #region");
        if let Some(caption) = &group.caption {
            let _ = write!(out, " {caption}");
        }
        if options.add_member_count {
            let _ = write!(out, " ({count})");
        }
        out.push('\n');
    }

    out.push('\n');

    if !group.nodes.is_empty() {
        render_run(&group.nodes, source, options, out);
        out.push('\n');
    }
    for child in &group.sub_groups {
        if child.count() == 0 {
            continue;
        }
        if child.is_region {
            render_group(child, source, options, out);
        } else {
            render_run(&child.nodes, source, options, out);
            out.push('\n');
            for grandchild in &child.sub_groups {
                render_group(grandchild, source, options, out);
            }
        }
    }

    if group.is_region {
        out.push('\n');
        out.push_str(region_indent);
        out.push_str("// #endregion");
        if options.region_caption_at_end {
            if let Some(caption) = &group.caption {
                let _ = write!(out, " {caption}");
            }
        }
        if options.add_member_count {
            let _ = write!(out, " ({count})");
        }
        out.push('\n');
    }

    out.push('\n');
}

fn render_run(
    nodes: &[&crate::syntax::Declaration],
    source: &str,
    options: &PrintOptions<'_>,
    out: &mut String,
) {
    let member_indent = if options.indent_members { options.indentation } else { "" };

    for (i, node) in nodes.iter().enumerate() {
        let comment = slice(source, node.full_start, node.start).trim();
        let raw_code = slice(source, node.start, node.end).trim();
        let code = if options.add_public_modifier && node.visibility.is_none() && patchable(node.kind)
        {
            insert_public_modifier(raw_code, node)
        } else {
            raw_code.to_string()
        };

        if options.group_with_decorators
            && i > 0
            && !nodes[i - 1].decorators.is_empty()
            && node.decorators.is_empty()
        {
            // separate the decorated cluster from the undecorated rest
            out.push('\n');
        }

        if !comment.is_empty() {
            out.push_str(member_indent);
            out.push_str(comment);
            out.push('\n');
        }
        out.push_str(member_indent);
        out.push_str(&code);
        out.push('\n');

        if code.ends_with('}') {
            out.push('\n');
        } else if node.kind == DeclKind::Property
            && node.is_arrow_function
            && options.arrow_functions_as_methods
        {
            // reads like a method, spaced like a method
            out.push('\n');
        }
    }
}

fn patchable(kind: DeclKind) -> bool {
    matches!(
        kind,
        DeclKind::Property
            | DeclKind::Method
            | DeclKind::Accessor
            | DeclKind::Getter
            | DeclKind::Setter
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::Declaration;

    fn options<'a>() -> PrintOptions<'a> {
        PrintOptions {
            indentation: "  ",
            indent_members: false,
            indent_regions: false,
            add_member_count: true,
            add_public_modifier: false,
            region_caption_at_end: true,
            group_with_decorators: false,
            arrow_functions_as_methods: false,
        }
    }

    #[test]
    fn test_empty_group_contributes_nothing() {
        let source = "function a() {}\n";
        let groups = vec![Group::flat(Some("Functions"), Vec::new(), true)];
        let result = print_groups(&groups, source, offset(0), offset(source.len()), &options());
        assert!(!result.contains("#region"));
    }

    #[test]
    fn test_region_markers_carry_caption_and_count() {
        let source = "function b() {}\nfunction a() {}\n";
        let model = crate::syntax::build_model(source).unwrap();
        let nodes: Vec<&Declaration> = model.nodes.iter().map(|n| n.decl()).collect();
        let groups = vec![Group::flat(Some("Functions"), nodes, true)];
        let result = print_groups(&groups, source, offset(0), offset(source.len()), &options());
        assert!(result.contains("// #region Functions (2)"));
        assert!(result.contains("// #endregion Functions (2)"));
    }

    #[test]
    fn test_members_render_in_group_order_with_trivia() {
        let source = "// about b\nfunction b() {}\n// about a\nfunction a() {}\n";
        let model = crate::syntax::build_model(source).unwrap();
        let mut nodes: Vec<&Declaration> = model.nodes.iter().map(|n| n.decl()).collect();
        nodes.sort_by_key(|n| n.name.clone());
        let groups = vec![Group::flat(Some("Functions"), nodes, false)];
        let result = print_groups(&groups, source, offset(0), offset(source.len()), &options());
        let a = result.find("// about a").unwrap();
        let b = result.find("// about b").unwrap();
        assert!(a < b, "a sorts before b together with its comment");
    }
}
