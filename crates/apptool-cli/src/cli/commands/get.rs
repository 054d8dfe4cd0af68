//! `apptool get stream-apps|task-apps|custom` – download apps into the local repository.

use anyhow::{bail, Result};
use apptool_core::catalog::Catalog;
use apptool_core::component_type::{validate_app_type, validate_stream_type};
use apptool_core::downloader::{CurlTransport, Transport};
use apptool_core::fetch::Fetcher;
use apptool_core::resolver::{AppResource, CustomAppResource, WILDCARD};

use crate::cli::Settings;

pub fn run_get_stream_apps(settings: &Settings, name: &str, component_type: &str) -> Result<()> {
    validate_stream_type(component_type)?;
    let catalog = Catalog::stream_apps(&settings.catalog_dir, settings.binder)?;
    let resources = catalog.select(&settings.maven_repo_url, name, component_type)?;
    let transport = CurlTransport::new(settings.retry);
    download(settings, &transport, &resources)
}

pub fn run_get_task_apps(settings: &Settings, name: &str) -> Result<()> {
    let catalog = Catalog::task_apps(&settings.catalog_dir)?;
    let resources = catalog.select(&settings.maven_repo_url, name, WILDCARD)?;
    let transport = CurlTransport::new(settings.retry);
    download(settings, &transport, &resources)
}

/// Downloads the app at `url` and, when it can be found, its metadata jar.
pub fn run_get_custom(
    settings: &Settings,
    component_type: &str,
    name: &str,
    url: &str,
    metadata_url: Option<&str>,
) -> Result<()> {
    validate_app_type(component_type)?;
    let mut custom = CustomAppResource::new(component_type, name, url)?;
    if let Some(metadata_url) = metadata_url {
        custom = custom.with_metadata_url(metadata_url)?;
    }

    let transport = CurlTransport::new(settings.retry);
    let mut resources = vec![custom.resource().clone()];
    match custom.metadata_resource(&transport) {
        Ok(Some(metadata)) => resources.push(metadata),
        Ok(None) => println!("No metadata artifact found for {component_type}.{name}"),
        Err(e) => {
            tracing::warn!("skipping metadata for {}.{}: {}", component_type, name, e);
            println!("Skipping metadata: {e}");
        }
    }
    download(settings, &transport, &resources)
}

/// Fetches every resource, reporting each failure and carrying on.
/// Fails at the end if any download failed.
fn download(settings: &Settings, transport: &dyn Transport, resources: &[AppResource]) -> Result<()> {
    if resources.is_empty() {
        println!("No matching apps.");
        return Ok(());
    }
    let fetcher = Fetcher::for_repo(&settings.repo_dir, transport)?;
    let report = fetcher.fetch_all(resources)?;
    for filename in &report.fetched {
        println!("Downloaded {filename}");
    }
    for (url, message) in &report.failed {
        println!("Failed {url}: {message}");
    }
    if !report.is_clean() {
        bail!(
            "{} of {} downloads failed",
            report.failed.len(),
            resources.len()
        );
    }
    Ok(())
}
