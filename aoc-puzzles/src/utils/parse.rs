//! Small parsing helpers shared by the days

use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;

static INT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-?\d+").expect("valid regex"));

/// Every signed integer in `text`, in order of appearance
///
/// Digits that do not fit in `i64` are skipped.
pub fn ints(text: &str) -> Vec<i64> {
    INT.find_iter(text)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Parse each non-blank line, tagging failures with their 1-based line number
pub fn parse_lines<'a, T>(
    input: &'a str,
    mut parse: impl FnMut(&'a str) -> Result<T>,
) -> Result<Vec<T>> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse(line.trim()).with_context(|| format!("line {}", idx + 1)))
        .collect()
}
