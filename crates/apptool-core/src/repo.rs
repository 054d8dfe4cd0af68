//! Maintenance of the local repository directory: listing, removal, cleanup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::component_type::validate_app_type;
use crate::error::{AppToolError, Result};
use crate::index::{AppIndex, INDEX_FILENAME};

/// Files touched by a removal or cleanup. Per-file failures do not stop the operation.
#[derive(Debug, Default)]
pub struct RemoveReport {
    pub removed: Vec<String>,
    /// `(filename, message)`
    pub failed: Vec<(String, String)>,
}

impl RemoveReport {
    /// True when nothing matched and nothing was attempted.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.failed.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct LocalRepo {
    dir: PathBuf,
    index: AppIndex,
}

impl LocalRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let index = AppIndex::in_repo(&dir);
        Self { dir, index }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index(&self) -> &AppIndex {
        &self.index
    }

    /// Index entries as sorted `key=filename` lines.
    pub fn list(&self) -> Result<Vec<String>> {
        self.index.find_all()
    }

    /// Sorted names of the regular files in the repository, index excluded.
    /// A missing directory is an empty repository.
    pub fn files(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .regular_files()?
            .into_iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(str::to_string))
            .filter(|n| n != INDEX_FILENAME)
            .collect();
        names.sort();
        Ok(names)
    }

    /// Deletes the artifacts whose index key matches the globs and drops their
    /// index entries. A file already gone from disk still loses its entry.
    pub fn remove(&self, name_pattern: &str, type_pattern: &str) -> Result<RemoveReport> {
        validate_app_type(type_pattern)?;
        let mut filenames = self.index.find_by_name_and_type(name_pattern, type_pattern)?;
        filenames.sort();
        filenames.dedup();

        let mut report = RemoveReport::default();
        for filename in filenames {
            let path = self.dir.join(&filename);
            match fs::remove_file(&path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::debug!(file = %filename, "indexed file already missing");
                }
                Err(e) => {
                    tracing::warn!(file = %filename, "remove failed: {}", e);
                    report.failed.push((filename, e.to_string()));
                    continue;
                }
            }
            self.index.remove(&filename)?;
            tracing::info!(file = %filename, "removed");
            report.removed.push(filename);
        }
        Ok(report)
    }

    /// Deletes every regular file in the repository, then the index.
    pub fn clean(&self) -> Result<RemoveReport> {
        let mut report = RemoveReport::default();
        for path in self.regular_files()? {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match fs::remove_file(&path) {
                Ok(()) => report.removed.push(name),
                Err(e) => {
                    tracing::warn!(file = %name, "remove failed: {}", e);
                    report.failed.push((name, e.to_string()));
                }
            }
        }
        self.index.clean()?;
        Ok(report)
    }

    fn regular_files(&self) -> Result<Vec<PathBuf>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.dir_error(e)),
        };
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.dir_error(e))?;
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if is_file {
                files.push(entry.path());
            }
        }
        Ok(files)
    }

    fn dir_error(&self, e: io::Error) -> AppToolError {
        AppToolError::RepoDirectory {
            path: self.dir.clone(),
            reason: format!("cannot be listed: {e}"),
        }
    }
}
