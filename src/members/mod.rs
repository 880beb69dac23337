//! Member taxonomy.
//!
//! Every member declaration of a container maps to exactly one fine-grained
//! category, keyed on kind, visibility, static/abstract flags and write mode.
//! The categories double as the configuration vocabulary: each one has a
//! camelCase name used in `memberOrder` entries and a title-cased caption
//! used for generated region groups.

use crate::syntax::{DeclKind, Declaration, Visibility, WriteMode};

macro_rules! member_types {
    ($($variant:ident => $name:literal,)+) => {
        /// One leaf of the member classification partition.
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
        pub enum MemberType {
            $($variant,)+
        }

        impl MemberType {
            /// Every category exactly once, in the documented canonical
            /// fallback order used by the ordering resolver.
            pub const CANONICAL_ORDER: &'static [MemberType] = &[
                $(MemberType::$variant,)+
            ];

            /// The configuration name of this category.
            pub const fn name(self) -> &'static str {
                match self {
                    $(MemberType::$variant => $name,)+
                }
            }
        }
    };
}

member_types! {
    PrivateStaticConstProperties => "privateStaticConstProperties",
    PrivateConstProperties => "privateConstProperties",
    PrivateStaticReadOnlyProperties => "privateStaticReadOnlyProperties",
    PrivateReadOnlyProperties => "privateReadOnlyProperties",
    PrivateStaticProperties => "privateStaticProperties",
    PrivateProperties => "privateProperties",

    ProtectedStaticConstProperties => "protectedStaticConstProperties",
    ProtectedConstProperties => "protectedConstProperties",
    ProtectedStaticReadOnlyProperties => "protectedStaticReadOnlyProperties",
    ProtectedReadOnlyProperties => "protectedReadOnlyProperties",
    ProtectedStaticProperties => "protectedStaticProperties",
    ProtectedProperties => "protectedProperties",

    PublicStaticConstProperties => "publicStaticConstProperties",
    PublicConstProperties => "publicConstProperties",
    PublicStaticReadOnlyProperties => "publicStaticReadOnlyProperties",
    PublicReadOnlyProperties => "publicReadOnlyProperties",
    PublicStaticProperties => "publicStaticProperties",
    PublicProperties => "publicProperties",

    StaticBlockDeclarations => "staticBlockDeclarations",
    Constructors => "constructors",

    PublicStaticIndexes => "publicStaticIndexes",
    PublicIndexes => "publicIndexes",
    PublicAbstractIndexes => "publicAbstractIndexes",
    ProtectedStaticIndexes => "protectedStaticIndexes",
    ProtectedIndexes => "protectedIndexes",
    ProtectedAbstractIndexes => "protectedAbstractIndexes",
    PrivateStaticIndexes => "privateStaticIndexes",
    PrivateIndexes => "privateIndexes",
    PrivateAbstractIndexes => "privateAbstractIndexes",

    PublicStaticAccessors => "publicStaticAccessors",
    PublicAccessors => "publicAccessors",
    PublicAbstractAccessors => "publicAbstractAccessors",
    ProtectedStaticAccessors => "protectedStaticAccessors",
    ProtectedAccessors => "protectedAccessors",
    ProtectedAbstractAccessors => "protectedAbstractAccessors",
    PrivateStaticAccessors => "privateStaticAccessors",
    PrivateAccessors => "privateAccessors",
    PrivateAbstractAccessors => "privateAbstractAccessors",

    PublicStaticGettersAndSetters => "publicStaticGettersAndSetters",
    PublicGettersAndSetters => "publicGettersAndSetters",
    PublicAbstractGettersAndSetters => "publicAbstractGettersAndSetters",
    ProtectedStaticGettersAndSetters => "protectedStaticGettersAndSetters",
    ProtectedGettersAndSetters => "protectedGettersAndSetters",
    ProtectedAbstractGettersAndSetters => "protectedAbstractGettersAndSetters",
    PrivateStaticGettersAndSetters => "privateStaticGettersAndSetters",
    PrivateGettersAndSetters => "privateGettersAndSetters",
    PrivateAbstractGettersAndSetters => "privateAbstractGettersAndSetters",

    PublicStaticMethods => "publicStaticMethods",
    PublicMethods => "publicMethods",
    PublicAbstractMethods => "publicAbstractMethods",
    ProtectedStaticMethods => "protectedStaticMethods",
    ProtectedMethods => "protectedMethods",
    ProtectedAbstractMethods => "protectedAbstractMethods",
    PrivateStaticMethods => "privateStaticMethods",
    PrivateMethods => "privateMethods",
    PrivateAbstractMethods => "privateAbstractMethods",
}

impl MemberType {
    /// Look up a category by its configuration name.
    pub fn from_name(name: &str) -> Option<MemberType> {
        Self::CANONICAL_ORDER.iter().copied().find(|t| t.name() == name)
    }

    /// Title-cased caption for generated groups, e.g.
    /// `Private Static Const Properties`.
    pub fn caption(self) -> String {
        title_case(self.name())
    }

    /// Classify one member declaration. Returns `None` for declarations that
    /// are not container members (imports, unknown nodes, ...).
    pub fn of(decl: &Declaration, treat_arrow_functions_as_methods: bool) -> Option<MemberType> {
        let vis = decl.effective_visibility();
        match decl.kind {
            DeclKind::Property if treat_arrow_functions_as_methods && decl.is_arrow_function => {
                Some(Self::method(vis, decl.is_static, decl.is_abstract))
            }
            DeclKind::Property => Some(Self::property(vis, decl.is_static, decl.write_mode)),
            DeclKind::StaticBlock => Some(MemberType::StaticBlockDeclarations),
            DeclKind::Constructor => Some(MemberType::Constructors),
            DeclKind::Index => Some(Self::index(vis, decl.is_static, decl.is_abstract)),
            DeclKind::Accessor => Some(Self::accessor(vis, decl.is_static, decl.is_abstract)),
            DeclKind::Getter | DeclKind::Setter => {
                Some(Self::getter_setter(vis, decl.is_static, decl.is_abstract))
            }
            DeclKind::Method => Some(Self::method(vis, decl.is_static, decl.is_abstract)),
            _ => None,
        }
    }

    fn property(vis: Visibility, is_static: bool, write_mode: WriteMode) -> MemberType {
        use MemberType::*;
        use Visibility::*;
        use WriteMode::*;
        match (vis, is_static, write_mode) {
            (Private, true, Const) => PrivateStaticConstProperties,
            (Private, false, Const) => PrivateConstProperties,
            (Private, true, ReadOnly) => PrivateStaticReadOnlyProperties,
            (Private, false, ReadOnly) => PrivateReadOnlyProperties,
            (Private, true, Writable) => PrivateStaticProperties,
            (Private, false, Writable) => PrivateProperties,
            (Protected, true, Const) => ProtectedStaticConstProperties,
            (Protected, false, Const) => ProtectedConstProperties,
            (Protected, true, ReadOnly) => ProtectedStaticReadOnlyProperties,
            (Protected, false, ReadOnly) => ProtectedReadOnlyProperties,
            (Protected, true, Writable) => ProtectedStaticProperties,
            (Protected, false, Writable) => ProtectedProperties,
            (Public, true, Const) => PublicStaticConstProperties,
            (Public, false, Const) => PublicConstProperties,
            (Public, true, ReadOnly) => PublicStaticReadOnlyProperties,
            (Public, false, ReadOnly) => PublicReadOnlyProperties,
            (Public, true, Writable) => PublicStaticProperties,
            (Public, false, Writable) => PublicProperties,
        }
    }

    // A static member always classifies into the static bucket; abstract only
    // applies to instance members.
    fn index(vis: Visibility, is_static: bool, is_abstract: bool) -> MemberType {
        use MemberType::*;
        match (vis, is_static, is_abstract) {
            (Visibility::Public, true, _) => PublicStaticIndexes,
            (Visibility::Public, false, true) => PublicAbstractIndexes,
            (Visibility::Public, false, false) => PublicIndexes,
            (Visibility::Protected, true, _) => ProtectedStaticIndexes,
            (Visibility::Protected, false, true) => ProtectedAbstractIndexes,
            (Visibility::Protected, false, false) => ProtectedIndexes,
            (Visibility::Private, true, _) => PrivateStaticIndexes,
            (Visibility::Private, false, true) => PrivateAbstractIndexes,
            (Visibility::Private, false, false) => PrivateIndexes,
        }
    }

    fn accessor(vis: Visibility, is_static: bool, is_abstract: bool) -> MemberType {
        use MemberType::*;
        match (vis, is_static, is_abstract) {
            (Visibility::Public, true, _) => PublicStaticAccessors,
            (Visibility::Public, false, true) => PublicAbstractAccessors,
            (Visibility::Public, false, false) => PublicAccessors,
            (Visibility::Protected, true, _) => ProtectedStaticAccessors,
            (Visibility::Protected, false, true) => ProtectedAbstractAccessors,
            (Visibility::Protected, false, false) => ProtectedAccessors,
            (Visibility::Private, true, _) => PrivateStaticAccessors,
            (Visibility::Private, false, true) => PrivateAbstractAccessors,
            (Visibility::Private, false, false) => PrivateAccessors,
        }
    }

    fn getter_setter(vis: Visibility, is_static: bool, is_abstract: bool) -> MemberType {
        use MemberType::*;
        match (vis, is_static, is_abstract) {
            (Visibility::Public, true, _) => PublicStaticGettersAndSetters,
            (Visibility::Public, false, true) => PublicAbstractGettersAndSetters,
            (Visibility::Public, false, false) => PublicGettersAndSetters,
            (Visibility::Protected, true, _) => ProtectedStaticGettersAndSetters,
            (Visibility::Protected, false, true) => ProtectedAbstractGettersAndSetters,
            (Visibility::Protected, false, false) => ProtectedGettersAndSetters,
            (Visibility::Private, true, _) => PrivateStaticGettersAndSetters,
            (Visibility::Private, false, true) => PrivateAbstractGettersAndSetters,
            (Visibility::Private, false, false) => PrivateGettersAndSetters,
        }
    }

    fn method(vis: Visibility, is_static: bool, is_abstract: bool) -> MemberType {
        use MemberType::*;
        match (vis, is_static, is_abstract) {
            (Visibility::Public, true, _) => PublicStaticMethods,
            (Visibility::Public, false, true) => PublicAbstractMethods,
            (Visibility::Public, false, false) => PublicMethods,
            (Visibility::Protected, true, _) => ProtectedStaticMethods,
            (Visibility::Protected, false, true) => ProtectedAbstractMethods,
            (Visibility::Protected, false, false) => ProtectedMethods,
            (Visibility::Private, true, _) => PrivateStaticMethods,
            (Visibility::Private, false, true) => PrivateAbstractMethods,
            (Visibility::Private, false, false) => PrivateMethods,
        }
    }
}

/// `privateStaticConstProperties` -> `Private Static Const Properties`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    for (i, ch) in name.chars().enumerate() {
        if i == 0 {
            out.extend(ch.to_uppercase());
        } else if ch.is_uppercase() {
            out.push(' ');
            out.push(ch);
        } else {
            out.push(ch);
        }
    }
    out
}
