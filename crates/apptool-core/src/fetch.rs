//! Download resolved apps into the local repository and record them in the index.

use std::fs;
use std::path::{Path, PathBuf};

use crate::downloader::Transport;
use crate::error::{AppToolError, Result};
use crate::index::AppIndex;
use crate::resolver::AppResource;

/// Outcome of a batch fetch. Failures are isolated per item.
#[derive(Debug, Default)]
pub struct FetchReport {
    /// Filenames downloaded and indexed.
    pub fetched: Vec<String>,
    /// `(url, message)` for every item that could not be downloaded.
    pub failed: Vec<(String, String)>,
}

impl FetchReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Creates `dir` if needed and checks it is a writable directory.
pub fn ensure_writable_directory(dir: &Path) -> Result<()> {
    let repo_error = |reason: String| AppToolError::RepoDirectory {
        path: dir.to_path_buf(),
        reason,
    };
    if dir.exists() && !dir.is_dir() {
        return Err(repo_error("is not a directory".to_string()));
    }
    fs::create_dir_all(dir).map_err(|e| repo_error(format!("cannot be created: {e}")))?;
    tempfile::tempfile_in(dir).map_err(|e| repo_error(format!("is not writable: {e}")))?;
    Ok(())
}

pub struct Fetcher<'a> {
    repo_dir: PathBuf,
    index: AppIndex,
    transport: &'a dyn Transport,
}

impl<'a> Fetcher<'a> {
    pub fn new(repo_dir: impl Into<PathBuf>, index: AppIndex, transport: &'a dyn Transport) -> Result<Self> {
        let repo_dir = repo_dir.into();
        ensure_writable_directory(&repo_dir)?;
        Ok(Self {
            repo_dir,
            index,
            transport,
        })
    }

    /// Fetcher whose index is `app-info.properties` inside `repo_dir`.
    pub fn for_repo(repo_dir: impl Into<PathBuf>, transport: &'a dyn Transport) -> Result<Self> {
        let repo_dir = repo_dir.into();
        let index = AppIndex::in_repo(&repo_dir);
        Self::new(repo_dir, index, transport)
    }

    pub fn repo_dir(&self) -> &Path {
        &self.repo_dir
    }

    pub fn index(&self) -> &AppIndex {
        &self.index
    }

    /// Downloads `resource` to `<repo_dir>/<filename>`, then records it.
    /// The index is only touched once the file is in place.
    pub fn fetch(&self, resource: &AppResource) -> Result<u64> {
        let dest = self.repo_dir.join(resource.filename());
        tracing::info!(key = %resource.key(), url = %resource.url(), "downloading");
        let bytes = self.transport.fetch(resource.url(), &dest)?;
        self.index.add_resource(resource)?;
        Ok(bytes)
    }

    /// Fetches each resource in order. A failed download is recorded and the
    /// batch moves on; an index failure stops it.
    pub fn fetch_all<'r, I>(&self, resources: I) -> Result<FetchReport>
    where
        I: IntoIterator<Item = &'r AppResource>,
    {
        let mut report = FetchReport::default();
        for resource in resources {
            match self.fetch(resource) {
                Ok(_) => report.fetched.push(resource.filename().to_string()),
                Err(e @ AppToolError::IndexIo { .. }) => return Err(e),
                Err(e) => {
                    tracing::warn!(url = %resource.url(), "fetch failed: {}", e);
                    report.failed.push((resource.url().to_string(), e.to_string()));
                }
            }
        }
        Ok(report)
    }
}
