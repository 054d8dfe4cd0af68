//! `apptool list stream-apps|task-apps` – show what the catalogs offer.

use anyhow::Result;
use apptool_core::catalog::Catalog;

use crate::cli::Settings;

pub fn run_list_stream_apps(settings: &Settings) -> Result<()> {
    let catalog = Catalog::stream_apps(&settings.catalog_dir, settings.binder)?;
    for line in catalog.list_stream_apps()? {
        println!("{line}");
    }
    Ok(())
}

pub fn run_list_task_apps(settings: &Settings) -> Result<()> {
    let catalog = Catalog::task_apps(&settings.catalog_dir)?;
    for line in catalog.list_task_apps()? {
        println!("{line}");
    }
    Ok(())
}
