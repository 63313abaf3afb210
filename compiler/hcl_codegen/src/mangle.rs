//! JavaScript-safe identifiers and string literals.

use std::fmt::Write;

const RESERVED: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "finally", "for", "function", "if", "import", "in",
    "instanceof", "let", "new", "return", "super", "switch", "throw", "try", "typeof", "var",
    "void", "while", "with", "yield",
    // Strict-mode restrictions and literal words.
    "arguments", "eval", "implements", "interface", "package", "private", "protected", "public",
    "static", "this", "null", "true", "false",
];

/// Mangle a Lisp symbol into a JavaScript identifier path.
///
/// Dotted symbols (`console.log`) are treated as member access and each
/// segment is mangled on its own. Property segments may be reserved words;
/// the head may be `this`. A symbol with an empty segment or a segment
/// starting with a digit (`a..b`, `.x`, `v.0`) is not a member path and is
/// mangled as one name.
pub fn identifier(symbol: &str) -> String {
    let is_member_path = symbol.contains('.')
        && symbol
            .split('.')
            .all(|seg| seg.chars().next().is_some_and(|c| !c.is_ascii_digit()));
    if !is_member_path {
        return segment(symbol);
    }

    let mut parts = symbol.split('.');
    let mut out = match parts.next() {
        Some("this") => "this".to_string(),
        Some(head) => segment(head),
        None => String::new(),
    };
    for property in parts {
        out.push('.');
        out.push_str(&escape(property));
    }
    out
}

/// A standalone name: escaped, then suffixed if it is reserved.
fn segment(name: &str) -> String {
    let mut out = escape(name);
    if RESERVED.contains(&out.as_str()) {
        out.push('_');
    }
    out
}

fn escape(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '-' => out.push('_'),
            '?' => out.push_str("_p"),
            '!' => out.push_str("_b"),
            '<' => out.push_str("_lt"),
            '>' => out.push_str("_gt"),
            '=' => out.push_str("_eq"),
            '+' => out.push_str("_plus"),
            '*' => out.push_str("_star"),
            '/' => out.push_str("_slash"),
            '%' => out.push_str("_pct"),
            '&' => out.push_str("_amp"),
            '.' => out.push_str("_dot"),
            c => out.push(c),
        }
    }
    out
}

/// Quote `value` as a double-quoted JavaScript string literal.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Line/paragraph separators end a line in older JS engines.
            c if c.is_control() || matches!(c, '\u{2028}' | '\u{2029}') => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
