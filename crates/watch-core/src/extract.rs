use regex::Regex;
use std::sync::LazyLock;

/// Unsigned integer or decimal literal: no sign, exponent or separators.
static NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+(?:\.[0-9]+)?").expect("number pattern is valid")
});

/// First number in `line`, if any.
pub fn first_number(line: &str) -> Option<&str> {
    NUMBER.find(line).map(|m| m.as_str())
}

/// Text up to the first newline, or all of it.
pub fn first_line(output: &str) -> &str {
    output.split('\n').next().unwrap_or(output)
}
