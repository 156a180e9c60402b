//! Splitting raw input on the separator set

use std::sync::OnceLock;

use regex::Regex;

/// Characters that separate values in bulk input
pub const SEPARATORS: &[char] = &[',', ';', '，', '；', '|', '\t', '/', '／', '、'];

fn separator_re() -> &'static Regex {
    static SEPARATOR_RE: OnceLock<Regex> = OnceLock::new();
    SEPARATOR_RE.get_or_init(|| Regex::new(r"[,;，；|\t/／、]+").expect("valid regex"))
}

/// Split `raw` into trimmed, non-empty tokens, in input order
pub fn tokenize(raw: &str) -> Vec<String> {
    separator_re()
        .split(raw)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
