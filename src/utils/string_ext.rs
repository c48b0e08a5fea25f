//! String helpers for SQL identifiers and statement text

use once_cell::sync::Lazy;
use regex::Regex;

/// One identifier part: `[bracketed]`, `"quoted"` or bare up to the next dot
static IDENTIFIER_PART_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[([^\]]*)\]|"([^"]*)"|([^.\[\]"]+)"#).unwrap());

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Trim and remove surrounding brackets or double quotes, e.g. `[Salary]` -> `Salary`
pub fn strip_decoration(s: &str) -> String {
    s.trim().trim_matches(|c| matches!(c, '[' | ']' | '"')).trim().to_string()
}

/// Split a possibly qualified identifier into undecorated parts.
///
/// `[dbo].[Employees]` -> `["dbo", "Employees"]`; empty parts are dropped.
pub fn identifier_parts(s: &str) -> Vec<String> {
    IDENTIFIER_PART_REGEX
        .captures_iter(s)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).or_else(|| caps.get(3)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Bracket-quote one identifier part, escaping `]` as `]]`
pub fn quote_identifier(part: &str) -> String {
    format!("[{}]", part.replace(']', "]]"))
}

/// Collapse whitespace runs to one space and cut to `max_chars` characters,
/// appending "..." when cut
pub fn collapse_and_truncate(s: &str, max_chars: usize) -> String {
    let collapsed = WHITESPACE_REGEX.replace_all(s.trim(), " ");
    if collapsed.chars().count() <= max_chars {
        return collapsed.into_owned();
    }

    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.push_str("...");
    cut
}
