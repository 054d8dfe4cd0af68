//! Error type shared by the resolver, the app index and the download plumbing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppToolError {
    /// Key is not `<type>.<name>` or `<type>.<name>.<classifier>`.
    #[error("invalid property key [{0}], expected <type>.<name>[.<classifier>]")]
    InvalidKeyFormat(String),

    /// `maven://` value does not follow the coordinate grammar.
    #[error(
        "bad artifact coordinates {0}, expected format is \
         <groupId>:<artifactId>[:<extension>[:<classifier>]]:<version>"
    )]
    InvalidCoordinates(String),

    #[error("invalid URL [{value}]: {reason}")]
    InvalidUrl { value: String, reason: String },

    /// Read or write failure on the persisted app index.
    #[error("app index {}: {source}", .path.display())]
    IndexIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("unsupported binder {given}, supported binders are {supported}")]
    UnsupportedBinder { given: String, supported: String },

    #[error("unsupported component type {given}, supported types are {supported}")]
    UnsupportedComponentType { given: String, supported: String },

    #[error("binder is not defined")]
    BinderNotDefined,

    #[error("cannot read app catalog {}: {source}", .path.display())]
    Catalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} {reason}", .path.display())]
    RepoDirectory { path: PathBuf, reason: String },
}

impl AppToolError {
    pub(crate) fn invalid_url(value: impl Into<String>, reason: impl ToString) -> Self {
        AppToolError::InvalidUrl {
            value: value.into(),
            reason: reason.to_string(),
        }
    }

    /// True for errors caused by bad user input rather than I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppToolError::InvalidKeyFormat(_)
                | AppToolError::InvalidCoordinates(_)
                | AppToolError::InvalidUrl { .. }
                | AppToolError::UnsupportedBinder { .. }
                | AppToolError::UnsupportedComponentType { .. }
                | AppToolError::BinderNotDefined
        )
    }
}

pub type Result<T> = std::result::Result<T, AppToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_error_names_expected_format() {
        let e = AppToolError::InvalidCoordinates("org.example".to_string());
        let msg = e.to_string();
        assert!(msg.contains("org.example"));
        assert!(msg.contains("<groupId>:<artifactId>"));
    }

    #[test]
    fn index_error_includes_path() {
        let e = AppToolError::IndexIo {
            path: PathBuf::from("/repo/app-info.properties"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(e.to_string().contains("/repo/app-info.properties"));
        assert!(!e.is_validation());
    }

    #[test]
    fn validation_errors_are_flagged() {
        assert!(AppToolError::InvalidKeyFormat("x".into()).is_validation());
        assert!(AppToolError::BinderNotDefined.is_validation());
        assert!(!AppToolError::Download {
            url: "https://x".into(),
            reason: "HTTP 404".into()
        }
        .is_validation());
    }
}
