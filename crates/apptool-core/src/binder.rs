//! Messaging binder selection (kafka/rabbit). Only used to choose the stream app catalog.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Binder {
    Kafka,
    Rabbit,
}

impl Binder {
    pub const ALL: [Binder; 2] = [Binder::Kafka, Binder::Rabbit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Binder::Kafka => "kafka",
            Binder::Rabbit => "rabbit",
        }
    }

    /// Catalog file listing the stream apps built for this binder.
    pub fn stream_catalog_filename(&self) -> String {
        format!("{}-stream-apps.properties", self.as_str())
    }

    fn supported() -> String {
        Self::ALL
            .iter()
            .map(Binder::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Binder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Binder {
    type Err = AppToolError;

    /// Case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kafka" => Ok(Binder::Kafka),
            "rabbit" => Ok(Binder::Rabbit),
            _ => Err(AppToolError::UnsupportedBinder {
                given: s.to_string(),
                supported: Binder::supported(),
            }),
        }
    }
}
