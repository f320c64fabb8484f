//! String utilities for emitting TypeScript source

use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex is valid"));

/// Words that cannot name a generated method, function or property shorthand
const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "enum", "export", "extends", "false", "finally", "for", "function", "if", "import",
    "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw", "true", "try",
    "typeof", "var", "void", "while", "with", "yield", "let", "static", "await", "implements",
    "interface", "package", "private", "protected", "public",
];

/// Whether `name` can be used as a bare identifier in the generated TypeScript
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER.is_match(name) && !RESERVED_WORDS.contains(&name)
}

/// Quote a value as a single-quoted TypeScript string literal
pub fn ts_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Collapse `text` onto one line that is safe inside a block comment
pub fn comment_text(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("*/", "*\\/")
}

/// Render a one-line JSDoc comment at the given indentation, or nothing for empty text
pub fn doc_comment(text: &str, indent: usize) -> String {
    let text = comment_text(text);
    if text.is_empty() {
        return String::new();
    }
    format!("{}/** {} */\n", " ".repeat(indent), text)
}

/// Strip the leading slash from an API path (`/users/list` -> `users/list`)
pub fn relative_path(path: &str) -> &str {
    path.trim_start_matches('/')
}
