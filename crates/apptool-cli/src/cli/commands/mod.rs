//! CLI command handlers, one file per command group.

mod completions;
mod get;
mod import;
mod list;
mod repo;

pub use completions::run_completions;
pub use get::{run_get_custom, run_get_stream_apps, run_get_task_apps};
pub use import::run_repo_import;
pub use list::{run_list_stream_apps, run_list_task_apps};
pub use repo::{run_repo_clean, run_repo_files, run_repo_list, run_repo_rm};
