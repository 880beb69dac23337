//! Missing-visibility patch.
//!
//! Inserts `public` into a member's code when no accessibility keyword was
//! written. The patch skips past leading decorator lines, then rewrites the
//! modifier-and-name sequence with the normalized modifier order. If the
//! pattern does not match, the code is returned untouched.

use regex::{NoExpand, Regex};

use crate::syntax::{DeclKind, Declaration, WriteMode};

const SPACES: &str = r"\s*";

/// Rewrite `code` so the member carries an explicit `public` modifier.
pub fn insert_public_modifier(code: &str, decl: &Declaration) -> String {
    let name = decl.name.as_str();
    let escaped = regex::escape(name);

    let mut parts: Vec<&str> = Vec::new();
    if decl.is_static {
        parts.push("static");
    }
    if decl.is_abstract {
        parts.push("abstract");
    }

    let pattern = match decl.kind {
        DeclKind::Method => {
            if decl.is_async {
                parts.push("async");
            }
            format!("(static{SPACES})?(abstract{SPACES})?(async{SPACES})?{escaped}")
        }
        DeclKind::Property => {
            match decl.write_mode {
                WriteMode::Const => parts.push("const"),
                WriteMode::ReadOnly => parts.push("readonly"),
                WriteMode::Writable => {}
            }
            format!("(static{SPACES})?(abstract{SPACES})?(const{SPACES})?(readonly{SPACES})?{escaped}")
        }
        DeclKind::Accessor => {
            parts.push("accessor");
            format!("(static{SPACES})?(abstract{SPACES})?accessor{SPACES}{escaped}")
        }
        DeclKind::Getter => {
            parts.push("get");
            format!("(static{SPACES})?(abstract{SPACES})?get{SPACES}{escaped}")
        }
        DeclKind::Setter => {
            parts.push("set");
            format!("(static{SPACES})?(abstract{SPACES})?set{SPACES}{escaped}")
        }
        _ => return code.to_string(),
    };
    parts.push(name);

    let replacement = format!("public {}", parts.join(" "));

    let Ok(regex) = Regex::new(&pattern) else {
        return code.to_string();
    };

    // never touch anything before the last decorator
    let after_decorators = decl
        .decorators
        .last()
        .and_then(|d| code.rfind(d.as_str()).map(|i| i + d.len()))
        .unwrap_or(0);
    let (head, tail) = code.split_at(after_decorators);

    format!("{head}{}", regex.replace(tail, NoExpand(&replacement)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::offset;

    fn decl(kind: DeclKind, name: &str) -> Declaration {
        Declaration::new(kind, name, offset(0), offset(1))
    }

    #[test]
    fn test_plain_method() {
        let node = decl(DeclKind::Method, "run");
        assert_eq!(
            insert_public_modifier("run(): void {}", &node),
            "public run(): void {}"
        );
    }

    #[test]
    fn test_static_async_method_modifiers_are_normalized() {
        let mut node = decl(DeclKind::Method, "run");
        node.is_static = true;
        node.is_async = true;
        assert_eq!(
            insert_public_modifier("static async run() {}", &node),
            "public static async run() {}"
        );
    }

    #[test]
    fn test_readonly_property() {
        let mut node = decl(DeclKind::Property, "total");
        node.write_mode = WriteMode::ReadOnly;
        assert_eq!(
            insert_public_modifier("readonly total = 0;", &node),
            "public readonly total = 0;"
        );
    }

    #[test]
    fn test_getter_and_setter() {
        let getter = decl(DeclKind::Getter, "size");
        assert_eq!(
            insert_public_modifier("get size(): number { return 0; }", &getter),
            "public get size(): number { return 0; }"
        );
        let setter = decl(DeclKind::Setter, "size");
        assert_eq!(
            insert_public_modifier("set size(v: number) {}", &setter),
            "public set size(v: number) {}"
        );
    }

    #[test]
    fn test_accessor() {
        let node = decl(DeclKind::Accessor, "label");
        assert_eq!(
            insert_public_modifier("accessor label = \"x\";", &node),
            "public accessor label = \"x\";"
        );
    }

    #[test]
    fn test_decorators_are_skipped() {
        let mut node = decl(DeclKind::Property, "title");
        node.decorators = vec!["@Input()".into()];
        assert_eq!(
            insert_public_modifier("@Input()\ntitle = \"\";", &node),
            "@Input()\npublic title = \"\";"
        );
    }

    #[test]
    fn test_no_match_leaves_code_untouched() {
        let node = decl(DeclKind::Method, "missing");
        assert_eq!(insert_public_modifier("somethingElse() {}", &node), "somethingElse() {}");
    }
}
