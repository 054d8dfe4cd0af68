pub mod config;
pub mod error;
pub mod logging;

pub mod binder;
pub mod catalog;
pub mod component_type;
pub mod downloader;
pub mod fetch;
pub mod import;
pub mod index;
pub mod properties;
pub mod repo;
pub mod resolver;
pub mod retry;
pub mod storage;

pub use error::{AppToolError, Result};
