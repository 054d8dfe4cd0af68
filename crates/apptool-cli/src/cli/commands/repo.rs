//! `apptool repo list|files|rm|clean` – inspect and prune the local repository.

use anyhow::Result;
use apptool_core::repo::{LocalRepo, RemoveReport};

use crate::cli::Settings;

pub fn run_repo_list(settings: &Settings) -> Result<()> {
    let repo = LocalRepo::new(&settings.repo_dir);
    let entries = repo.list()?;
    if entries.is_empty() {
        println!("Local repository {} is empty.", settings.repo_dir.display());
    }
    for line in entries {
        println!("{line}");
    }
    Ok(())
}

pub fn run_repo_files(settings: &Settings) -> Result<()> {
    for name in LocalRepo::new(&settings.repo_dir).files()? {
        println!("{name}");
    }
    Ok(())
}

pub fn run_repo_rm(settings: &Settings, name: &str, component_type: &str) -> Result<()> {
    let report = LocalRepo::new(&settings.repo_dir).remove(name, component_type)?;
    if report.is_empty() {
        println!("No entries found for name {name} and type {component_type}");
        return Ok(());
    }
    print_report(&report);
    Ok(())
}

pub fn run_repo_clean(settings: &Settings) -> Result<()> {
    let report = LocalRepo::new(&settings.repo_dir).clean()?;
    print_report(&report);
    println!("Cleaned {}", settings.repo_dir.display());
    Ok(())
}

fn print_report(report: &RemoveReport) {
    for name in &report.removed {
        println!("rm {name}");
    }
    for (name, message) in &report.failed {
        println!("could not remove {name}: {message}");
    }
}
