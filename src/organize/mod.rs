//! Reorganization orchestration.
//!
//! Three sequential passes over one document: the whole-file pass reorders
//! top-level declarations, the member pass rewrites each container body, and
//! the cleanup pass settles region markers and blank lines. Each pass
//! re-derives spans from the text the previous pass produced; containers are
//! rewritten in descending offset order so earlier spans stay valid.
//!
//! Nothing here can fail. Every guard degrades to "document unchanged".

use std::borrow::Cow;

use tracing::debug;

use crate::base::offset;
use crate::config::Configuration;
use crate::ordering::{
    Group, GroupingOptions, member_groups, resolve_member_order, sorted_nodes,
};
use crate::rewrite::{
    PrintOptions, detect_indentation, format_lines, print_groups, remove_regions,
};
use crate::syntax::{Container, DeclKind, Declaration, SourceModel, TopLevel, build_model};

/// Comment marker that opts a file out of reorganization.
pub const OPT_OUT_MARKER: &str = "tidyts:ignore";

/// Reorganize one document.
///
/// Returns the replacement text, or the input unchanged (borrowed) when the
/// file opts out, cannot be parsed, or contains a construct the model does
/// not understand.
pub fn organize_source<'a>(text: &'a str, config: &Configuration) -> Cow<'a, str> {
    if is_opted_out(text) {
        debug!("file carries an opt-out or generated-file marker, leaving unchanged");
        return Cow::Borrowed(text);
    }

    // existing markers are regenerated from scratch each run
    let mut code = remove_regions(text);
    let indentation = detect_indentation(&code);

    let Ok(model) = build_model(&code) else {
        return Cow::Borrowed(text);
    };
    if model.has_unknown() {
        // an unanalyzable construct anywhere makes reordering unsafe
        debug!("unrecognized construct found, leaving unchanged");
        return Cow::Borrowed(text);
    }

    // Phase 1: top-level declarations. Skipped when executable expressions
    // are present (reordering could change behavior) or when there is at
    // most one reorderable declaration.
    if model.has_expressions() {
        debug!("top-level expressions present, skipping whole-file pass");
    } else if reorderable_count(&model) > 1 {
        if let Some(end) = model.last_end() {
            let groups = top_level_groups(&model, config);
            let options = print_options(config, indentation, false);
            code = print_groups(&groups, &code, offset(0), end, &options);
        }
    } else {
        debug!("at most one reorderable declaration, skipping whole-file pass");
    }

    // Phase 2: container members. Spans from phase 1 are invalid now, so the
    // model is rebuilt; descending offset order keeps remaining spans valid
    // across sequential rewrites.
    let Ok(model) = build_model(&code) else {
        return Cow::Borrowed(text);
    };
    if model.has_unknown() {
        return Cow::Borrowed(text);
    }

    let order = resolve_member_order(&config.member_order);
    let mut containers: Vec<&Container> =
        model.containers().filter(|c| c.has_members()).collect();
    containers.sort_by(|a, b| b.decl.full_start.cmp(&a.decl.full_start));

    let grouping = GroupingOptions {
        group_with_decorators: config.group_properties_with_decorators,
        arrow_functions_as_methods: config.treat_arrow_function_properties_as_methods,
    };

    for container in containers {
        let groups = member_groups(container, &order, grouping);
        let mut options = print_options(config, indentation, true);
        // interfaces never carry accessibility keywords
        options.add_public_modifier =
            config.add_public_modifier_if_missing && !container.is_interface();
        code = print_groups(
            &groups,
            &code,
            container.members_start,
            container.members_end,
            &options,
        );
    }

    // Phase 3: cleanup.
    if !config.use_regions {
        code = remove_regions(&code);
    }
    code = format_lines(&code);

    Cow::Owned(code)
}

fn print_options<'a>(
    config: &Configuration,
    indentation: &'a str,
    members_pass: bool,
) -> PrintOptions<'a> {
    PrintOptions {
        indentation,
        indent_members: members_pass,
        indent_regions: members_pass && config.add_region_indentation,
        add_member_count: config.add_member_count_in_region_name,
        add_public_modifier: false,
        region_caption_at_end: config.add_region_caption_to_region_end,
        group_with_decorators: config.group_properties_with_decorators,
        arrow_functions_as_methods: config.treat_arrow_function_properties_as_methods,
    }
}

/// Top-level declarations that participate in the ≤1 churn guard.
fn reorderable_count(model: &SourceModel) -> usize {
    [
        DeclKind::TypeAlias,
        DeclKind::Interface,
        DeclKind::Class,
        DeclKind::Enum,
        DeclKind::Function,
    ]
    .iter()
    .map(|kind| model.count_of(*kind))
    .sum()
}

fn top_level_groups<'a>(model: &'a SourceModel, config: &Configuration) -> Vec<Group<'a>> {
    let collect = |kind: DeclKind| -> Vec<&'a Declaration> {
        model.of_kind(kind).map(TopLevel::decl).collect()
    };
    let sorted = |kind: DeclKind| -> Vec<&'a Declaration> {
        sorted_nodes(collect(kind), config.group_properties_with_decorators)
    };

    vec![
        Group::flat(Some("Imports"), sorted(DeclKind::Import), false),
        Group::flat(Some("Type aliases"), sorted(DeclKind::TypeAlias), true),
        Group::flat(Some("Interfaces"), sorted(DeclKind::Interface), true),
        Group::flat(Some("Classes"), sorted(DeclKind::Class), true),
        Group::flat(Some("Enums"), sorted(DeclKind::Enum), true),
        Group::flat(Some("Functions"), sorted(DeclKind::Function), true),
        // variable initializers can depend on declaration order
        Group::flat(Some("Variables"), collect(DeclKind::Variable), true),
    ]
}

/// Opt-out marker anywhere, or a generated-file marker in the file header.
fn is_opted_out(text: &str) -> bool {
    if text.contains(OPT_OUT_MARKER) {
        return true;
    }
    text.lines()
        .take(10)
        .any(|line| line.contains("<auto-generated") || line.contains("@generated"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opt_out_markers() {
        assert!(is_opted_out("// tidyts:ignore\nclass C {}\n"));
        assert!(is_opted_out("// <auto-generated/>\nclass C {}\n"));
        assert!(is_opted_out("/* @generated */\nclass C {}\n"));
        assert!(!is_opted_out("class C {}\n"));
    }

    #[test]
    fn test_opted_out_file_is_borrowed() {
        let text = "// tidyts:ignore\nclass C { b = 1; a = 2; }\n";
        let result = organize_source(text, &Configuration::default());
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_unknown_construct_aborts_whole_file() {
        let text = "class C { b = 1; a = 2; }\nif (true) { run(); }\n";
        let result = organize_source(text, &Configuration::default());
        assert_eq!(result.as_ref(), text);
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_single_function_file_is_untouched() {
        let text = "function only() {\n  return 1;\n}\n";
        let result = organize_source(text, &Configuration::default());
        assert_eq!(result.as_ref(), text);
    }
}
