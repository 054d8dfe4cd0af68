//! App catalogs: properties files naming the apps available for download.
//!
//! Stream apps live in `<catalog_dir>/<binder>-stream-apps.properties`, task
//! apps in `<catalog_dir>/task-apps.properties`. Values are `maven://`
//! coordinates or literal URLs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::binder::Binder;
use crate::error::{AppToolError, Result};
use crate::properties::load_properties;
use crate::resolver::{AppResource, ArtifactKey, Pattern};

pub const TASK_CATALOG_FILENAME: &str = "task-apps.properties";

#[derive(Debug, Clone)]
pub struct Catalog {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Catalog {
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = load_properties(&path).map_err(|source| AppToolError::Catalog {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), entries = entries.len(), "catalog loaded");
        Ok(Self { path, entries })
    }

    /// Stream app catalog for `binder`. Without a binder there is nothing to pick.
    pub fn stream_apps(catalog_dir: &Path, binder: Option<Binder>) -> Result<Self> {
        let binder = binder.ok_or(AppToolError::BinderNotDefined)?;
        Self::load(catalog_dir.join(binder.stream_catalog_filename()))
    }

    pub fn task_apps(catalog_dir: &Path) -> Result<Self> {
        Self::load(catalog_dir.join(TASK_CATALOG_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Resolves every entry; the first bad key or value fails the whole catalog.
    pub fn resources(&self, repo_base: &str) -> Result<Vec<AppResource>> {
        self.entries
            .iter()
            .map(|(key, value)| AppResource::resolve(key, value, repo_base))
            .collect()
    }

    /// Resolved entries matching the name and type globs. Metadata entries
    /// follow their app since matching ignores the classifier.
    pub fn select(&self, repo_base: &str, name_pattern: &str, type_pattern: &str) -> Result<Vec<AppResource>> {
        let (name, component_type) = (Pattern::new(name_pattern), Pattern::new(type_pattern));
        Ok(self
            .resources(repo_base)?
            .into_iter()
            .filter(|r| r.key().matches_patterns(&name, &component_type))
            .collect())
    }

    /// Sorted `type:name` for each non-metadata entry.
    pub fn list_stream_apps(&self) -> Result<Vec<String>> {
        self.list(|key| format!("{}:{}", key.component_type, key.name))
    }

    /// Sorted app names for each non-metadata entry.
    pub fn list_task_apps(&self) -> Result<Vec<String>> {
        self.list(|key| key.name.clone())
    }

    fn list(&self, label: impl Fn(&ArtifactKey) -> String) -> Result<Vec<String>> {
        let mut out = Vec::new();
        for raw in self.entries.keys() {
            let key = ArtifactKey::parse(raw)?;
            if !key.is_metadata() {
                out.push(label(&key));
            }
        }
        out.sort();
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RABBIT: &str = "\
sink.cassandra=maven://org.springframework.cloud.stream.app:cassandra-sink-rabbit:1.3.1.RELEASE
sink.cassandra.metadata=maven://org.springframework.cloud.stream.app:cassandra-sink-rabbit:jar:metadata:1.3.1.RELEASE
source.time=maven://org.springframework.cloud.stream.app:time-source-rabbit:1.3.1.RELEASE
processor.transform=maven://org.springframework.cloud.stream.app:transform-processor-rabbit:1.3.1.RELEASE
";

    fn catalog_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("rabbit-stream-apps.properties"), RABBIT).unwrap();
        std::fs::write(
            dir.path().join(TASK_CATALOG_FILENAME),
            "task.timestamp=maven://org.springframework.cloud.task.app:timestamp-task:1.3.0.RELEASE\n\
             task.timestamp.metadata=maven://org.springframework.cloud.task.app:timestamp-task:jar:metadata:1.3.0.RELEASE\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn stream_apps_need_a_binder() {
        let dir = catalog_dir();
        assert!(matches!(
            Catalog::stream_apps(dir.path(), None),
            Err(AppToolError::BinderNotDefined)
        ));
    }

    #[test]
    fn missing_catalog_file_is_reported() {
        let dir = catalog_dir();
        let err = Catalog::stream_apps(dir.path(), Some(Binder::Kafka)).unwrap_err();
        assert!(matches!(err, AppToolError::Catalog { .. }));
        assert!(err.to_string().contains("kafka-stream-apps.properties"));
    }

    #[test]
    fn list_stream_apps_sorted_without_metadata() {
        let dir = catalog_dir();
        let catalog = Catalog::stream_apps(dir.path(), Some(Binder::Rabbit)).unwrap();
        assert_eq!(
            catalog.list_stream_apps().unwrap(),
            vec!["processor:transform", "sink:cassandra", "source:time"]
        );
    }

    #[test]
    fn list_task_apps_names_only() {
        let dir = catalog_dir();
        let catalog = Catalog::task_apps(dir.path()).unwrap();
        assert_eq!(catalog.list_task_apps().unwrap(), vec!["timestamp"]);
    }

    #[test]
    fn select_keeps_metadata_with_its_app() {
        let dir = catalog_dir();
        let catalog = Catalog::stream_apps(dir.path(), Some(Binder::Rabbit)).unwrap();
        let picked = catalog.select("https://repo.example", "cass*", "sink").unwrap();
        let names: Vec<_> = picked.iter().map(|r| r.filename().to_string()).collect();
        assert_eq!(
            names,
            vec![
                "cassandra-sink-rabbit-1.3.1.RELEASE.jar",
                "cassandra-sink-rabbit-1.3.1.RELEASE-metadata.jar"
            ]
        );
        assert_eq!(catalog.select("https://repo.example", "*", "*").unwrap().len(), 4);
    }

    #[test]
    fn bad_entry_fails_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(TASK_CATALOG_FILENAME);
        std::fs::write(&path, "task.broken=maven://only:two\n").unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert!(matches!(
            catalog.resources("https://repo.example"),
            Err(AppToolError::InvalidCoordinates(_))
        ));
    }
}
