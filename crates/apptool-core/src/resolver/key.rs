//! Compact artifact keys: `<type>.<name>[.<classifier>]`.

use std::fmt;
use std::str::FromStr;

use super::pattern::Pattern;
use crate::error::{AppToolError, Result};

/// Classifier of the metadata sibling of an app artifact.
pub const METADATA_CLASSIFIER: &str = "metadata";

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArtifactKey {
    pub component_type: String,
    pub name: String,
    pub classifier: Option<String>,
}

impl ArtifactKey {
    /// Builds a key from its tokens. Each token must be non-empty and free of
    /// the `.` and `=` delimiters, whitespace and control characters; the type
    /// must not start with a comment marker. Anything else would not survive a
    /// trip through the index file.
    pub fn from_tokens(component_type: &str, name: &str, classifier: Option<&str>) -> Result<Self> {
        let valid = |t: &str| {
            !t.is_empty()
                && !t
                    .chars()
                    .any(|c| c == '.' || c == '=' || c.is_whitespace() || c.is_control())
        };
        let comment = component_type.starts_with('#') || component_type.starts_with('!');
        if comment || !valid(component_type) || !valid(name) || !classifier.map_or(true, valid) {
            let raw = match classifier {
                Some(c) => format!("{component_type}.{name}.{c}"),
                None => format!("{component_type}.{name}"),
            };
            return Err(AppToolError::InvalidKeyFormat(raw));
        }
        Ok(Self {
            component_type: component_type.to_string(),
            name: name.to_string(),
            classifier: classifier.map(str::to_string),
        })
    }

    /// Parses `type.name` or `type.name.classifier`.
    pub fn parse(raw: &str) -> Result<Self> {
        let tokens: Vec<&str> = raw.split('.').collect();
        match tokens[..] {
            [component_type, name] => Self::from_tokens(component_type, name, None),
            [component_type, name, classifier] => {
                Self::from_tokens(component_type, name, Some(classifier))
            }
            _ => Err(AppToolError::InvalidKeyFormat(raw.to_string())),
        }
    }

    /// Same key with `classifier` set.
    pub fn with_classifier(&self, classifier: &str) -> Result<Self> {
        Self::from_tokens(&self.component_type, &self.name, Some(classifier))
    }

    /// Matches `name_pattern` against the name and `type_pattern` against the
    /// component type. The classifier never takes part in matching.
    pub fn matches(&self, name_pattern: &str, type_pattern: &str) -> bool {
        self.matches_patterns(&Pattern::new(name_pattern), &Pattern::new(type_pattern))
    }

    /// [`matches`](Self::matches) with pre-compiled patterns.
    pub fn matches_patterns(&self, name: &Pattern, component_type: &Pattern) -> bool {
        name.is_match(&self.name) && component_type.is_match(&self.component_type)
    }

    pub fn is_metadata(&self) -> bool {
        self.classifier.as_deref() == Some(METADATA_CLASSIFIER)
    }
}

impl fmt::Display for ArtifactKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component_type, self.name)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ".{classifier}")?;
        }
        Ok(())
    }
}

impl FromStr for ArtifactKey {
    type Err = AppToolError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
