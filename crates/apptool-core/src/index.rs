//! Persisted record of the artifacts present in the local repository.
//!
//! One `key=filename` line per artifact in `app-info.properties`, sorted by
//! key. Every mutation loads the whole file, applies the change and rewrites
//! it through a temp file in the same directory that is renamed over the
//! index, so readers see either the old or the new file, never a partial one.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{AppToolError, Result};
use crate::properties::{parse_properties, render_properties};
use crate::resolver::{AppResource, ArtifactKey, Pattern};

/// File name of the index inside the local repository directory.
pub const INDEX_FILENAME: &str = "app-info.properties";

#[derive(Debug, Clone)]
pub struct AppIndex {
    path: PathBuf,
}

impl AppIndex {
    /// Index stored as `app-info.properties` in `repo_dir`.
    pub fn in_repo(repo_dir: &Path) -> Self {
        Self::at_path(repo_dir.join(INDEX_FILENAME))
    }

    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records `key → filename` unless the key is already present (put-if-absent).
    /// Creates the index on first use. Returns true if the entry was inserted.
    pub fn add(&self, key: &ArtifactKey, filename: &str) -> Result<bool> {
        let mut entries = self.load()?;
        let key = key.to_string();
        let inserted = !entries.contains_key(&key);
        if inserted {
            entries.insert(key.clone(), filename.to_string());
        } else {
            tracing::debug!(key = %key, "index already has entry; keeping existing filename");
        }
        self.store(&entries)?;
        Ok(inserted)
    }

    pub fn add_resource(&self, resource: &AppResource) -> Result<bool> {
        self.add(resource.key(), resource.filename())
    }

    /// Removes every entry whose filename equals `filename`. Returns how many
    /// entries went away; a missing index is a no-op.
    pub fn remove(&self, filename: &str) -> Result<usize> {
        if !self.path.exists() {
            return Ok(0);
        }
        let mut entries = self.load()?;
        let before = entries.len();
        entries.retain(|_, value| value != filename);
        let removed = before - entries.len();
        self.store(&entries)?;
        Ok(removed)
    }

    /// `key=filename` lines sorted by key; empty if the index does not exist.
    pub fn find_all(&self) -> Result<Vec<String>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|(key, filename)| format!("{key}={filename}"))
            .collect())
    }

    pub fn find_all_as_map(&self) -> Result<BTreeMap<String, String>> {
        self.load()
    }

    /// Filenames whose key matches `name_pattern` on the name token and
    /// `type_pattern` on the type token (`*` globs).
    ///
    /// The result carries no ordering guarantee; sort it if order matters.
    /// Stored keys that are not valid artifact keys never match.
    pub fn find_by_name_and_type(&self, name_pattern: &str, type_pattern: &str) -> Result<Vec<String>> {
        let (name, component_type) = (Pattern::new(name_pattern), Pattern::new(type_pattern));
        Ok(self
            .load()?
            .into_iter()
            .filter(|(key, _)| {
                ArtifactKey::parse(key)
                    .map(|k| k.matches_patterns(&name, &component_type))
                    .unwrap_or(false)
            })
            .map(|(_, filename)| filename)
            .collect())
    }

    /// Deletes the index file. A missing file is not an error.
    pub fn clean(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "index removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(parse_properties(&text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn store(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(|e| self.io_error(e))?;

        let mut tmp = tempfile::Builder::new()
            .prefix(".app-info")
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| self.io_error(e))?;
        tmp.write_all(render_properties(entries).as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| self.io_error(e))?;
        tmp.persist(&self.path).map_err(|e| self.io_error(e.error))?;
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> AppToolError {
        AppToolError::IndexIo {
            path: self.path.clone(),
            source,
        }
    }
}
