//! Bulk-import file for a Data Flow server: every indexed app pointed at the
//! HTTP location where the local repository is served.

use std::collections::BTreeMap;

pub const IMPORT_FILENAME: &str = "app-import.properties";

/// `scheme://host[:port]`, leaving out the default HTTP port.
pub fn base_url(scheme: &str, host: &str, port: u16) -> String {
    if port == 80 {
        format!("{scheme}://{host}")
    } else {
        format!("{scheme}://{host}:{port}")
    }
}

/// One `key=<base_url>/<filename>` line per index entry, sorted by key.
pub fn render_import(entries: &BTreeMap<String, String>, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    entries
        .iter()
        .map(|(key, filename)| format!("{key}={base}/{filename}\n"))
        .collect()
}
