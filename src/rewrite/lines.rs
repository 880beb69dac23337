//! Line-level passes: region marker removal, blank-line normalization, and
//! indentation detection.
//!
//! All passes work line-wise and emit `\n` line endings; `\r\n` input is
//! normalized as a side effect.

/// True for `// #region ...` and `// #endregion ...` lines, any case.
pub fn is_region_marker(line: &str) -> bool {
    let Some(rest) = line.trim().strip_prefix("//") else {
        return false;
    };
    let rest = rest.trim_start();
    let lower = rest.to_ascii_lowercase();
    if let Some(tail) = lower.strip_prefix("#endregion") {
        tail.is_empty() || tail.starts_with(char::is_whitespace)
    } else if let Some(tail) = lower.strip_prefix("#region") {
        tail.is_empty() || tail.starts_with(char::is_whitespace)
    } else {
        false
    }
}

/// Strip every region marker line, together with the blank lines directly
/// above it.
pub fn remove_regions(source: &str) -> String {
    let mut kept: Vec<&str> = Vec::new();
    for line in source.lines() {
        if is_region_marker(line) {
            while kept.last().is_some_and(|l| l.is_empty()) {
                kept.pop();
            }
        } else {
            kept.push(line);
        }
    }
    if source.ends_with('\n') {
        kept.push("");
    }
    kept.join("\n")
}

/// Blank-line normalization: no blank directly after an opening brace, none
/// directly before a lone closing brace, and runs of blank lines collapse to
/// one.
pub fn format_lines(source: &str) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let mut kept: Vec<&str> = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        if !line.trim().is_empty() {
            kept.push(line);
            continue;
        }

        let after_opening = kept
            .last()
            .is_some_and(|prev| prev.trim_end().ends_with('{'));
        let next = lines[i + 1..].iter().find(|l| !l.trim().is_empty());
        let before_closing = next.is_some_and(|n| n.trim() == "}");
        let duplicate = kept.last().is_some_and(|prev| prev.trim().is_empty());

        if !after_opening && !before_closing && !duplicate {
            kept.push(line);
        }
    }

    let mut result = kept.join("\n");
    if source.ends_with('\n') && !result.is_empty() {
        result.push('\n');
    }
    result
}

/// Detect the file's indentation unit: tab, four spaces, or two spaces.
/// The first indented line decides; unindented files default to two spaces.
pub fn detect_indentation(source: &str) -> &'static str {
    for line in source.lines() {
        if line.starts_with('\t') {
            return "\t";
        }
        if line.starts_with("    ") {
            return "    ";
        }
        if line.starts_with("  ") {
            return "  ";
        }
    }
    "  "
}
