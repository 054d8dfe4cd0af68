//! `maven://groupId:artifactId[:extension[:classifier]]:version` locators.

use url::Url;

use crate::error::{AppToolError, Result};

/// Scheme marker of Maven coordinate values.
pub const MAVEN_SCHEME: &str = "maven://";

/// Extension used when the coordinates omit one (or leave it empty).
pub const DEFAULT_EXTENSION: &str = "jar";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MavenCoordinates {
    pub group_id: String,
    pub artifact_id: String,
    pub extension: String,
    pub classifier: Option<String>,
    pub version: String,
}

impl MavenCoordinates {
    /// Parses `groupId:artifactId[:extension[:classifier]]:version` (no `maven://` prefix).
    ///
    /// Tokens may not contain spaces. Group, artifact, version and a present
    /// classifier must be non-empty; an empty extension means `jar`.
    pub fn parse(coordinates: &str) -> Result<Self> {
        let bad = || AppToolError::InvalidCoordinates(coordinates.to_string());
        if coordinates.contains(' ') {
            return Err(bad());
        }

        let tokens: Vec<&str> = coordinates.split(':').collect();
        let (group_id, artifact_id, extension, classifier, version) = match tokens[..] {
            [g, a, v] => (g, a, "", None, v),
            [g, a, e, v] => (g, a, e, None, v),
            [g, a, e, c, v] if !c.is_empty() => (g, a, e, Some(c), v),
            _ => return Err(bad()),
        };
        if group_id.is_empty() || artifact_id.is_empty() || version.is_empty() {
            return Err(bad());
        }

        Ok(Self {
            group_id: group_id.to_string(),
            artifact_id: artifact_id.to_string(),
            extension: if extension.is_empty() {
                DEFAULT_EXTENSION.to_string()
            } else {
                extension.to_string()
            },
            classifier: classifier.map(str::to_string),
            version: version.to_string(),
        })
    }

    /// `<artifactId>-<version>[-<classifier>].<extension>`
    pub fn filename(&self) -> String {
        match &self.classifier {
            Some(c) => format!(
                "{}-{}-{}.{}",
                self.artifact_id, self.version, c, self.extension
            ),
            None => format!("{}-{}.{}", self.artifact_id, self.version, self.extension),
        }
    }

    /// Repository layout URL under `repo_base`. A trailing `/` on the base is ignored.
    pub fn to_url_string(&self, repo_base: &str) -> String {
        format!(
            "{}/{}/{}/{}/{}",
            repo_base.trim_end_matches('/'),
            self.group_id.replace('.', "/"),
            self.artifact_id,
            self.version,
            self.filename()
        )
    }
}

/// Resolves an app value to its download URL.
///
/// `maven://` values are expanded against `repo_base`; anything else must
/// already be an absolute URL (any scheme, `file://` included) and is
/// returned as parsed.
pub fn resolve_url(value: &str, repo_base: &str) -> Result<Url> {
    match value.strip_prefix(MAVEN_SCHEME) {
        Some(coordinates) => {
            let coordinates = MavenCoordinates::parse(coordinates)?;
            parse_url(&coordinates.to_url_string(repo_base))
        }
        None => parse_url(value),
    }
}

pub(crate) fn parse_url(value: &str) -> Result<Url> {
    Url::parse(value).map_err(|e| AppToolError::invalid_url(value, e))
}
