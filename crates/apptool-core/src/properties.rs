//! Flat `key=value` files: the on-disk format of the app index and the app catalogs.
//!
//! Only the subset the tool writes is understood. No escapes and no line
//! continuations; tokens never contain `=`.

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

/// Parses `key=value` lines into a map sorted by key.
///
/// Blank lines and lines starting with `#` or `!` are skipped. Keys and values
/// are trimmed. A repeated key keeps the last value.
pub fn parse_properties(text: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }
        match line.split_once('=') {
            Some((key, value)) => {
                out.insert(key.trim().to_string(), value.trim().to_string());
            }
            None => tracing::debug!(line, "skipping properties line without '='"),
        }
    }
    out
}

pub fn load_properties(path: &Path) -> io::Result<BTreeMap<String, String>> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_properties(&text))
}

/// Renders entries as `key=value` lines in key order, each newline terminated.
pub fn render_properties(entries: &BTreeMap<String, String>) -> String {
    entries
        .iter()
        .map(|(key, value)| format!("{key}={value}\n"))
        .collect()
}
