//! Stopword sets

use crate::error::Result;
use std::collections::HashSet;
use std::path::Path;
use stop_words::{get, LANGUAGE};

/// Built-in English stopword list
pub fn english() -> HashSet<String> {
    let words: Vec<String> = get(LANGUAGE::English);
    words.into_iter().map(|w| w.to_lowercase()).collect()
}

/// Read a stopword file: one word per line, `#` starts a comment line
pub fn load(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse(&content))
}

fn parse(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}
