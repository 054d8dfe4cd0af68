//! Download collaborator: copies a resolved artifact URL to a local file.
//!
//! `http(s)` goes through libcurl with retry/backoff, `file://` is a local copy.
//! Either way the bytes land in `<dest>.part` first and are renamed into place
//! only when the transfer succeeded.

mod error;
mod file;
mod single;

pub use error::{classify, classify_curl_error, classify_http_status, FetchError};
pub use single::{download_single, probe_exists, CurlOptions};

use std::path::Path;
use url::Url;

use crate::error::{AppToolError, Result};
use crate::retry::{run_with_retry, RetryPolicy};
use crate::storage::PartFile;

/// Fetches artifacts to disk. The seam between repository operations and the network.
pub trait Transport {
    /// Download `url` to `dest`, returning the number of bytes written.
    fn fetch(&self, url: &Url, dest: &Path) -> Result<u64>;

    /// True if something can be fetched from `url`.
    fn exists(&self, url: &Url) -> bool;
}

/// [`Transport`] backed by libcurl.
#[derive(Debug, Clone, Default)]
pub struct CurlTransport {
    options: CurlOptions,
    retry: RetryPolicy,
}

impl CurlTransport {
    pub fn new(retry: RetryPolicy) -> Self {
        Self {
            options: CurlOptions::default(),
            retry,
        }
    }

    pub fn with_options(mut self, options: CurlOptions) -> Self {
        self.options = options;
        self
    }

    fn transfer(&self, url: &Url, part: &mut PartFile) -> std::result::Result<u64, FetchError> {
        if url.scheme() == "file" {
            return file::copy_file_url(url, part);
        }
        run_with_retry(&self.retry, classify, |attempt| {
            if attempt > 1 {
                part.reset().map_err(FetchError::Storage)?;
            }
            download_single(url.as_str(), part, &self.options)
        })
    }
}

impl Transport for CurlTransport {
    fn fetch(&self, url: &Url, dest: &Path) -> Result<u64> {
        let download_error = |reason: String| AppToolError::Download {
            url: url.to_string(),
            reason,
        };

        let mut part = PartFile::create(dest).map_err(|e| download_error(format!("{e:#}")))?;
        match self.transfer(url, &mut part) {
            Ok(written) => {
                part.finalize(dest)
                    .map_err(|e| download_error(format!("{e:#}")))?;
                tracing::debug!(url = %url, bytes = written, dest = %dest.display(), "download complete");
                Ok(written)
            }
            Err(e) => {
                part.discard();
                Err(download_error(e.to_string()))
            }
        }
    }

    fn exists(&self, url: &Url) -> bool {
        if url.scheme() == "file" {
            return url.to_file_path().map(|p| p.is_file()).unwrap_or(false);
        }
        match probe_exists(url.as_str(), &self.options) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(url = %url, "existence probe failed: {}", e);
                false
            }
        }
    }
}
