//! `apptool repo import` – write an app import file for the served repository.

use anyhow::{Context, Result};
use apptool_core::import::{base_url, render_import, IMPORT_FILENAME};
use apptool_core::repo::LocalRepo;
use std::path::Path;

use crate::cli::Settings;

/// Renders the import file from the index. Without `--base-url` the URL is
/// built from `host` and `port`. Without `--output` the file is written to
/// `app-import.properties` in the current directory; `-` prints to stdout.
pub fn run_repo_import(
    settings: &Settings,
    base: Option<&str>,
    host: &str,
    port: u16,
    output: Option<&Path>,
) -> Result<()> {
    let base = match base {
        Some(url) => url.to_string(),
        None => base_url("http", host, port),
    };
    let entries = LocalRepo::new(&settings.repo_dir).index().find_all_as_map()?;
    let text = render_import(&entries, &base);

    let output = output.unwrap_or_else(|| Path::new(IMPORT_FILENAME));
    if output == Path::new("-") {
        print!("{text}");
        return Ok(());
    }
    std::fs::write(output, &text).with_context(|| format!("write {}", output.display()))?;
    println!("Wrote {} entries to {}", entries.len(), output.display());
    Ok(())
}
