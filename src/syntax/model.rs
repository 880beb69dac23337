//! Typed declaration model extracted from one source snapshot.
//!
//! Every node records byte spans into the snapshot it was built from.
//! Spans are invalidated by any edit earlier in the file, so the model is
//! rebuilt from scratch after every rewrite pass.

use smol_str::SmolStr;

use crate::base::{TextRange, TextSize};

/// The syntactic kind of a declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Import,
    TypeAlias,
    Interface,
    Class,
    Enum,
    Function,
    Variable,
    Expression,
    Property,
    Method,
    Constructor,
    Getter,
    Setter,
    Accessor,
    Index,
    StaticBlock,
    /// A construct the builder does not recognize. Its presence makes the
    /// whole file unanalyzable (see the orchestrator guards).
    Unknown,
}

/// Explicit access level of a member.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

/// Write mode of a property or index signature.
///
/// The first matching modifier wins: `const` over `readonly` over nothing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum WriteMode {
    #[default]
    Writable,
    ReadOnly,
    Const,
}

/// One declaration with its spans and classification-relevant attributes.
///
/// `full_start` extends back to the end of the previous sibling (or the start
/// of the enclosing region for the first sibling), so the leading comment and
/// blank-line trivia in `[full_start, start)` travels with the declaration.
#[derive(Clone, Debug)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: SmolStr,
    pub full_start: TextSize,
    pub start: TextSize,
    pub end: TextSize,
    /// `None` means no explicit accessibility keyword was written.
    pub visibility: Option<Visibility>,
    pub write_mode: WriteMode,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_async: bool,
    /// Property initialized with an arrow function.
    pub is_arrow_function: bool,
    /// Decorator text, verbatim, in source order (e.g. `@Input()`).
    pub decorators: Vec<SmolStr>,
}

impl Declaration {
    pub fn new(kind: DeclKind, name: impl Into<SmolStr>, start: TextSize, end: TextSize) -> Self {
        Self {
            kind,
            name: name.into(),
            full_start: start,
            start,
            end,
            visibility: None,
            write_mode: WriteMode::Writable,
            is_static: false,
            is_abstract: false,
            is_async: false,
            is_arrow_function: false,
            decorators: Vec::new(),
        }
    }

    /// The code span, decorators included, trivia excluded.
    pub fn span(&self) -> TextRange {
        TextRange::new(self.start, self.end)
    }

    /// The span including leading trivia.
    pub fn full_span(&self) -> TextRange {
        TextRange::new(self.full_start, self.end)
    }

    /// Access level used for classification: an unspecified visibility
    /// classifies as public.
    pub fn effective_visibility(&self) -> Visibility {
        self.visibility.unwrap_or(Visibility::Public)
    }

    /// Decorator names with call-argument lists stripped, for comparison.
    ///
    /// `@Foo(x)` compares as `@Foo`.
    pub fn decorators_without_arguments(&self) -> Vec<String> {
        self.decorators
            .iter()
            .map(|d| strip_decorator_arguments(d))
            .collect()
    }

    /// Sort key within a category: the name, prefixed with the stripped
    /// decorator text when decorator grouping is enabled, so members sharing
    /// identical decorators cluster together.
    pub fn sort_key(&self, group_with_decorators: bool) -> String {
        if group_with_decorators && !self.decorators.is_empty() {
            format!(
                "{} {}",
                self.decorators_without_arguments().join(", "),
                self.name
            )
        } else {
            self.name.to_string()
        }
    }
}

fn strip_decorator_arguments(decorator: &str) -> String {
    match (decorator.find('('), decorator.rfind(')')) {
        (Some(open), Some(close)) if close > open => {
            format!("{}{}", &decorator[..open], &decorator[close + 1..])
        }
        _ => decorator.to_string(),
    }
}

/// A class-like or interface-like declaration owning a member span.
#[derive(Clone, Debug)]
pub struct Container {
    pub decl: Declaration,
    /// Span covering all member declarations, `[members_start, members_end)`.
    /// Both are zero when the body is empty.
    pub members_start: TextSize,
    pub members_end: TextSize,
    pub members: Vec<Declaration>,
}

impl Container {
    pub fn is_interface(&self) -> bool {
        self.decl.kind == DeclKind::Interface
    }

    pub fn has_members(&self) -> bool {
        self.members_start < self.members_end && !self.members.is_empty()
    }

    pub fn has_unknown_members(&self) -> bool {
        self.members.iter().any(|m| m.kind == DeclKind::Unknown)
    }

    /// Members of one kind, in source order.
    pub fn members_of(&self, kind: DeclKind) -> impl Iterator<Item = &Declaration> {
        self.members.iter().filter(move |m| m.kind == kind)
    }
}

/// One top-level node: either a plain declaration or a container with members.
#[derive(Clone, Debug)]
pub enum TopLevel {
    Decl(Declaration),
    Container(Container),
}

impl TopLevel {
    pub fn decl(&self) -> &Declaration {
        match self {
            TopLevel::Decl(d) => d,
            TopLevel::Container(c) => &c.decl,
        }
    }
}

/// All top-level declarations of one snapshot, in source order.
#[derive(Clone, Debug, Default)]
pub struct SourceModel {
    pub nodes: Vec<TopLevel>,
    /// True when the parse tree contained syntax errors.
    pub has_syntax_errors: bool,
}

impl SourceModel {
    pub fn of_kind(&self, kind: DeclKind) -> impl Iterator<Item = &TopLevel> {
        self.nodes.iter().filter(move |n| n.decl().kind == kind)
    }

    pub fn count_of(&self, kind: DeclKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn containers(&self) -> impl Iterator<Item = &Container> {
        self.nodes.iter().filter_map(|n| match n {
            TopLevel::Container(c) => Some(c),
            TopLevel::Decl(_) => None,
        })
    }

    pub fn has_expressions(&self) -> bool {
        self.count_of(DeclKind::Expression) > 0
    }

    /// True when anything in the snapshot failed classification, at the top
    /// level or inside a container body.
    pub fn has_unknown(&self) -> bool {
        self.has_syntax_errors
            || self.nodes.iter().any(|n| match n {
                TopLevel::Decl(d) => d.kind == DeclKind::Unknown,
                TopLevel::Container(c) => c.has_unknown_members(),
            })
    }

    /// End offset of the last top-level declaration, if any.
    pub fn last_end(&self) -> Option<TextSize> {
        self.nodes.last().map(|n| n.decl().end)
    }
}
