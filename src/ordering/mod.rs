//! Ordering resolution and group construction.
//!
//! The resolver merges the user's `memberOrder` with the canonical category
//! sequence into a total order: every category referenced exactly once,
//! user entries first, canonical fallbacks appended. Groups are then built
//! per container per pass and discarded after rendering.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use crate::config::MemberOrderEntry;
use crate::members::MemberType;
use crate::syntax::{Container, Declaration};

/// A resolved group of members ready for rendering: either a flat node list
/// or a list of child groups.
#[derive(Debug)]
pub struct Group<'a> {
    pub caption: Option<String>,
    pub is_region: bool,
    pub nodes: Vec<&'a Declaration>,
    pub sub_groups: Vec<Group<'a>>,
}

impl<'a> Group<'a> {
    /// A flat group over the given nodes.
    pub fn flat(caption: Option<&str>, nodes: Vec<&'a Declaration>, is_region: bool) -> Self {
        Self {
            caption: caption.map(str::to_owned),
            is_region,
            nodes,
            sub_groups: Vec::new(),
        }
    }

    /// Total number of leaf members under this group.
    pub fn count(&self) -> usize {
        self.nodes.len() + self.sub_groups.iter().map(Group::count).sum::<usize>()
    }
}

/// Merge the user ordering with the canonical defaults into a total order.
///
/// Repeated category references are kept only at their first occurrence
/// (search is recursive into sub-groups); every category the user does not
/// mention is appended as a single-category entry captioned with its
/// title-cased name.
pub fn resolve_member_order(user: &[MemberOrderEntry]) -> Vec<MemberOrderEntry> {
    let mut seen: IndexSet<MemberType> = IndexSet::new();
    let mut resolved: Vec<MemberOrderEntry> = user
        .iter()
        .map(|entry| dedup_entry(entry, &mut seen))
        .collect();

    for member_type in MemberType::CANONICAL_ORDER {
        if !seen.contains(member_type) {
            resolved.push(MemberOrderEntry::leaf(member_type.caption(), vec![*member_type]));
        }
    }

    resolved
}

fn dedup_entry(entry: &MemberOrderEntry, seen: &mut IndexSet<MemberType>) -> MemberOrderEntry {
    MemberOrderEntry {
        caption: entry.caption.clone(),
        member_types: entry
            .member_types
            .iter()
            .filter(|t| seen.insert(**t))
            .copied()
            .collect(),
        sub_groups: entry
            .sub_groups
            .iter()
            .map(|child| dedup_entry(child, seen))
            .collect(),
        place_above: entry.place_above.clone(),
        place_below: entry.place_below.clone(),
    }
}

/// Options affecting how members bucket and sort into groups.
#[derive(Clone, Copy, Debug, Default)]
pub struct GroupingOptions {
    pub group_with_decorators: bool,
    pub arrow_functions_as_methods: bool,
}

/// Build the member group tree for one container from a resolved order.
pub fn member_groups<'a>(
    container: &'a Container,
    order: &[MemberOrderEntry],
    options: GroupingOptions,
) -> Vec<Group<'a>> {
    order
        .iter()
        .map(|entry| build_group(container, entry, options))
        .collect()
}

fn build_group<'a>(
    container: &'a Container,
    entry: &MemberOrderEntry,
    options: GroupingOptions,
) -> Group<'a> {
    let mut sub_groups: Vec<Group<'a>> = entry
        .member_types
        .iter()
        .map(|member_type| {
            Group::flat(None, bucket(container, *member_type, entry, options), false)
        })
        .collect();
    for child in &entry.sub_groups {
        sub_groups.push(build_group(container, child, options));
    }
    Group {
        caption: entry.caption.clone(),
        is_region: true,
        nodes: Vec::new(),
        sub_groups,
    }
}

/// The sorted, pin-partitioned members of one category.
fn bucket<'a>(
    container: &'a Container,
    member_type: MemberType,
    entry: &MemberOrderEntry,
    options: GroupingOptions,
) -> Vec<&'a Declaration> {
    let nodes: Vec<&Declaration> = container
        .members
        .iter()
        .filter(|m| MemberType::of(m, options.arrow_functions_as_methods) == Some(member_type))
        .collect();

    // static blocks execute in declaration order; never reorder them
    if member_type == MemberType::StaticBlockDeclarations {
        return nodes;
    }

    let sorted = sorted_nodes(nodes, options.group_with_decorators);
    split_by_pins(sorted, &entry.place_above, &entry.place_below)
}

/// Ordinal sort by the declaration sort key; stable, so equal keys keep
/// source order.
pub fn sorted_nodes(
    mut nodes: Vec<&Declaration>,
    group_with_decorators: bool,
) -> Vec<&Declaration> {
    nodes.sort_by_key(|n| n.sort_key(group_with_decorators));
    nodes
}

/// Partition into pinned-above (in pin-list order), the sorted middle, and
/// pinned-below (in pin-list order). A name pinned both ways counts as above.
fn split_by_pins<'a>(
    nodes: Vec<&'a Declaration>,
    place_above: &[String],
    place_below: &[String],
) -> Vec<&'a Declaration> {
    if place_above.is_empty() && place_below.is_empty() {
        return nodes;
    }

    let above_names: FxHashSet<&str> = place_above.iter().map(String::as_str).collect();
    let below_names: FxHashSet<&str> = place_below
        .iter()
        .map(String::as_str)
        .filter(|n| !above_names.contains(n))
        .collect();

    let pick = |names: &[String], exclude: &FxHashSet<&str>| -> Vec<&'a Declaration> {
        let mut taken: FxHashSet<&str> = FxHashSet::default();
        names
            .iter()
            .filter(|name| !exclude.contains(name.as_str()) && taken.insert(name.as_str()))
            .filter_map(|name| nodes.iter().find(|n| n.name == name.as_str()).copied())
            .collect()
    };

    let above = pick(place_above, &FxHashSet::default());
    let below = pick(place_below, &above_names);

    let mut result = above;
    result.extend(
        nodes
            .iter()
            .filter(|n| !above_names.contains(n.name.as_str()) && !below_names.contains(n.name.as_str()))
            .copied(),
    );
    result.extend(below);
    result
}
