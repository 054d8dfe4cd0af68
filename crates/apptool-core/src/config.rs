use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::binder::Binder;
use crate::retry::RetryPolicy;

/// Default Maven repository used to resolve `maven://` coordinates.
pub const DEFAULT_MAVEN_REPO_URL: &str = "https://repo.maven.apache.org/maven2";

/// Default directory holding the `*-apps.properties` catalogs.
pub const DEFAULT_CATALOG_DIR: &str = "config";

/// Retry policy parameters for downloads (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per artifact (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.5 = 500ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 0.5,
            max_delay_secs: 10,
        }
    }
}

/// Global configuration loaded from `~/.config/apptool/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppToolConfig {
    /// Directory where downloaded artifacts and `app-info.properties` live.
    /// When unset, `~/.local/share/apptool/repo` is used.
    #[serde(default)]
    pub local_repo_directory: Option<PathBuf>,
    /// Base URL of the Maven repository used for `maven://` coordinates.
    pub maven_repo_url: String,
    /// Directory containing `<binder>-stream-apps.properties` and `task-apps.properties`.
    pub catalog_dir: PathBuf,
    /// Binder used for stream apps when `--binder` is not given.
    #[serde(default)]
    pub binder: Option<Binder>,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for AppToolConfig {
    fn default() -> Self {
        Self {
            local_repo_directory: None,
            maven_repo_url: DEFAULT_MAVEN_REPO_URL.to_string(),
            catalog_dir: PathBuf::from(DEFAULT_CATALOG_DIR),
            binder: None,
            retry: None,
        }
    }
}

impl AppToolConfig {
    /// Local repository directory, falling back to the XDG data dir.
    pub fn repo_dir(&self) -> Result<PathBuf> {
        match &self.local_repo_directory {
            Some(dir) => Ok(dir.clone()),
            None => default_repo_dir(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryPolicy::from_config)
            .unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("apptool")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// `~/.local/share/apptool/repo`.
pub fn default_repo_dir() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("apptool")?;
    Ok(xdg_dirs.get_data_home().join("apptool").join("repo"))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<AppToolConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] but for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<AppToolConfig> {
    if !path.exists() {
        let default_cfg = AppToolConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: AppToolConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
