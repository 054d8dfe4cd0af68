//! Coordinate resolver: turns a catalog entry (`key=value`) into an [`AppResource`].
//!
//! A key is `<type>.<name>[.<classifier>]`; a value is either a literal URL
//! or `maven://` coordinates expanded against a repository base URL.

mod coordinates;
mod custom;
mod key;
mod pattern;

pub use coordinates::{resolve_url, MavenCoordinates, DEFAULT_EXTENSION, MAVEN_SCHEME};
pub use custom::{derive_metadata_url, CustomAppResource};
pub use key::{ArtifactKey, METADATA_CLASSIFIER};
pub use pattern::{simple_match, Pattern, WILDCARD};

use url::Url;

use crate::error::{AppToolError, Result};

/// A resolved app artifact: its key, download URL and local filename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppResource {
    key: ArtifactKey,
    url: Url,
    filename: String,
}

impl AppResource {
    /// Resolves a raw catalog entry.
    ///
    /// # Examples
    ///
    /// - `resolve("sink.log", "maven://org.example:log-sink:1.0", "https://repo")`
    ///   → url `https://repo/org/example/log-sink/1.0/log-sink-1.0.jar`, filename `log-sink-1.0.jar`
    pub fn resolve(key: &str, value: &str, repo_base: &str) -> Result<Self> {
        let key = ArtifactKey::parse(key)?;
        Self::from_value(key, value, repo_base)
    }

    pub fn from_value(key: ArtifactKey, value: &str, repo_base: &str) -> Result<Self> {
        let url = resolve_url(value, repo_base)?;
        Self::from_url(key, url)
    }

    /// Fails with `InvalidUrl` when the URL path has no final segment to use as filename.
    pub fn from_url(key: ArtifactKey, url: Url) -> Result<Self> {
        let filename = derive_filename(&url);
        if filename.is_empty() {
            return Err(AppToolError::invalid_url(url.as_str(), "URL has no file name"));
        }
        Ok(Self { key, url, filename })
    }

    pub fn key(&self) -> &ArtifactKey {
        &self.key
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn component_type(&self) -> &str {
        &self.key.component_type
    }

    pub fn name(&self) -> &str {
        &self.key.name
    }

    pub fn classifier(&self) -> Option<&str> {
        self.key.classifier.as_deref()
    }

    pub fn matches(&self, name_pattern: &str, type_pattern: &str) -> bool {
        self.key.matches(name_pattern, type_pattern)
    }
}

/// Last path segment of `url` (query and fragment excluded). Empty when the path ends in `/`.
pub fn derive_filename(url: &Url) -> String {
    url.path().rsplit('/').next().unwrap_or_default().to_string()
}
