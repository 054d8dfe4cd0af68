//! CLI for apptool, the local cache of Data Flow app artifacts.

mod commands;

use anyhow::Result;
use apptool_core::binder::Binder;
use apptool_core::config::{self, AppToolConfig};
use apptool_core::resolver::WILDCARD;
use apptool_core::retry::RetryPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{
    run_completions, run_get_custom, run_get_stream_apps, run_get_task_apps, run_list_stream_apps,
    run_list_task_apps, run_repo_clean, run_repo_files, run_repo_import, run_repo_list,
    run_repo_rm,
};

/// Top-level CLI for apptool.
#[derive(Debug, Parser)]
#[command(name = "apptool")]
#[command(about = "apptool: download and manage Spring Cloud Data Flow app artifacts locally", long_about = None)]
pub struct Cli {
    /// Local repository directory (overrides `local_repo_directory` in config).
    #[arg(long, global = true, value_name = "DIR")]
    pub repo_dir: Option<PathBuf>,

    /// Maven repository base URL for `maven://` coordinates.
    #[arg(long, global = true, value_name = "URL")]
    pub maven_repo_url: Option<String>,

    /// Messaging binder (kafka or rabbit) selecting the stream app catalog.
    #[arg(long, global = true, value_name = "BINDER")]
    pub binder: Option<Binder>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download apps into the local repository.
    Get {
        #[command(subcommand)]
        what: GetCommand,
    },

    /// List apps available for download.
    List {
        #[command(subcommand)]
        what: ListCommand,
    },

    /// Inspect or maintain the local repository.
    Repo {
        #[command(subcommand)]
        action: RepoCommand,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Debug, Subcommand)]
pub enum GetCommand {
    /// Download stream apps from the binder's catalog.
    StreamApps {
        /// App name, `*` globs allowed.
        #[arg(short, long, default_value = WILDCARD)]
        name: String,
        /// Component type: `*` or one of source, processor, sink.
        #[arg(short = 't', long = "type", default_value = WILDCARD)]
        component_type: String,
    },

    /// Download task apps from the task catalog.
    TaskApps {
        /// App name, `*` globs allowed.
        #[arg(short, long, default_value = WILDCARD)]
        name: String,
    },

    /// Download an app given by URL, plus its metadata jar if one exists.
    Custom {
        /// Component type of the app.
        #[arg(short = 't', long = "type")]
        component_type: String,
        /// App name.
        #[arg(short, long)]
        name: String,
        /// Location of the app artifact.
        url: String,
        /// Metadata artifact location; derived from the app URL when omitted.
        #[arg(long, value_name = "URL")]
        metadata_url: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ListCommand {
    /// Stream apps in the binder's catalog, as `type:name`.
    StreamApps,
    /// Task apps in the task catalog.
    TaskApps,
}

#[derive(Debug, Subcommand)]
pub enum RepoCommand {
    /// Show the index entries of the local repository.
    #[command(visible_alias = "ls")]
    List,

    /// Show the artifact files present in the local repository.
    Files,

    /// Remove apps and their index entries.
    Rm {
        /// App name, `*` globs allowed.
        #[arg(short, long)]
        name: String,
        /// Component type: `*` or one of source, processor, sink, task, app.
        #[arg(short = 't', long = "type", default_value = WILDCARD)]
        component_type: String,
    },

    /// Delete every file in the local repository, index included.
    Clean,

    /// Write an app import file pointing at the repository served over HTTP.
    Import {
        /// Base URL the repository directory is served from.
        #[arg(long, value_name = "URL")]
        base_url: Option<String>,
        /// Host used to build the base URL when `--base-url` is not given.
        #[arg(long, default_value = "localhost")]
        host: String,
        /// Port used to build the base URL when `--base-url` is not given.
        #[arg(long, default_value_t = 80)]
        port: u16,
        /// Output file; `-` prints to stdout.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Effective settings: config file values overridden by global flags.
#[derive(Debug, Clone)]
pub struct Settings {
    pub repo_dir: PathBuf,
    pub maven_repo_url: String,
    pub catalog_dir: PathBuf,
    pub binder: Option<Binder>,
    pub retry: RetryPolicy,
}

impl Settings {
    pub fn resolve(cli: &Cli, cfg: &AppToolConfig) -> Result<Self> {
        let repo_dir = match &cli.repo_dir {
            Some(dir) => dir.clone(),
            None => cfg.repo_dir()?,
        };
        Ok(Self {
            repo_dir,
            maven_repo_url: cli
                .maven_repo_url
                .clone()
                .unwrap_or_else(|| cfg.maven_repo_url.clone()),
            catalog_dir: cfg.catalog_dir.clone(),
            binder: cli.binder.or(cfg.binder),
            retry: cfg.retry_policy(),
        })
    }
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        if let CliCommand::Completions { shell } = &cli.command {
            return run_completions(*shell);
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let settings = Settings::resolve(&cli, &cfg)?;

        match cli.command {
            CliCommand::Get { what } => match what {
                GetCommand::StreamApps {
                    name,
                    component_type,
                } => run_get_stream_apps(&settings, &name, &component_type)?,
                GetCommand::TaskApps { name } => run_get_task_apps(&settings, &name)?,
                GetCommand::Custom {
                    component_type,
                    name,
                    url,
                    metadata_url,
                } => run_get_custom(
                    &settings,
                    &component_type,
                    &name,
                    &url,
                    metadata_url.as_deref(),
                )?,
            },
            CliCommand::List { what } => match what {
                ListCommand::StreamApps => run_list_stream_apps(&settings)?,
                ListCommand::TaskApps => run_list_task_apps(&settings)?,
            },
            CliCommand::Repo { action } => match action {
                RepoCommand::List => run_repo_list(&settings)?,
                RepoCommand::Files => run_repo_files(&settings)?,
                RepoCommand::Rm {
                    name,
                    component_type,
                } => run_repo_rm(&settings, &name, &component_type)?,
                RepoCommand::Clean => run_repo_clean(&settings)?,
                RepoCommand::Import {
                    base_url,
                    host,
                    port,
                    output,
                } => run_repo_import(&settings, base_url.as_deref(), &host, port, output.as_deref())?,
            },
            // Handled before the config is loaded.
            CliCommand::Completions { .. } => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
