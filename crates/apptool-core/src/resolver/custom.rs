//! Apps given directly by URL (e.g. locally built jars) rather than by a catalog entry,
//! and the location of their metadata sibling.

use url::Url;

use super::coordinates::parse_url;
use super::key::{ArtifactKey, METADATA_CLASSIFIER};
use super::{derive_filename, AppResource};
use crate::downloader::Transport;
use crate::error::{AppToolError, Result};

#[derive(Debug, Clone)]
pub struct CustomAppResource {
    resource: AppResource,
    metadata_url: Option<Url>,
}

impl CustomAppResource {
    pub fn new(component_type: &str, name: &str, url: &str) -> Result<Self> {
        let key = ArtifactKey::from_tokens(component_type, name, None)?;
        let resource = AppResource::from_url(key, parse_url(url)?)?;
        Ok(Self {
            resource,
            metadata_url: None,
        })
    }

    /// Use an explicit metadata location instead of the derived sibling.
    pub fn with_metadata_url(mut self, metadata_url: &str) -> Result<Self> {
        self.metadata_url = Some(parse_url(metadata_url)?);
        Ok(self)
    }

    pub fn resource(&self) -> &AppResource {
        &self.resource
    }

    /// Explicit metadata URL if one was given, else [`derive_metadata_url`] of the app URL.
    pub fn metadata_url(&self) -> Result<Url> {
        match &self.metadata_url {
            Some(url) => Ok(url.clone()),
            None => derive_metadata_url(self.resource.url()),
        }
    }

    /// The metadata artifact keyed `<type>.<name>.metadata`, or `None` when
    /// nothing exists at the metadata URL.
    pub fn metadata_resource(&self, transport: &dyn Transport) -> Result<Option<AppResource>> {
        let url = self.metadata_url()?;
        if !transport.exists(&url) {
            tracing::debug!(url = %url, "no metadata artifact");
            return Ok(None);
        }
        let key = self.resource.key().with_classifier(METADATA_CLASSIFIER)?;
        AppResource::from_url(key, url).map(Some)
    }
}

/// Default metadata location: `<stem>.<ext>` in the final path segment becomes
/// `<stem>-metadata.<ext>`. Directories, query and fragment are left untouched.
///
/// A final segment without an extension is an `InvalidUrl` error.
pub fn derive_metadata_url(url: &Url) -> Result<Url> {
    let filename = derive_filename(url);
    let (stem, extension) = match filename.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => (stem, extension),
        _ => {
            return Err(AppToolError::invalid_url(
                url.as_str(),
                "file name has no extension to derive a metadata location from",
            ))
        }
    };

    let path = url.path();
    let dir = &path[..path.len() - filename.len()];
    let mut metadata_url = url.clone();
    metadata_url.set_path(&format!("{dir}{stem}-{METADATA_CLASSIFIER}.{extension}"));
    Ok(metadata_url)
}
