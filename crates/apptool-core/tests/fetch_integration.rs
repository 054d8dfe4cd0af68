//! Integration test: resolve catalog entries against a local HTTP "maven repo",
//! download them with curl and check what lands in the repository and index.

mod common;

use std::time::Duration;

use apptool_core::downloader::{CurlTransport, Transport};
use apptool_core::fetch::Fetcher;
use apptool_core::repo::LocalRepo;
use apptool_core::resolver::{AppResource, CustomAppResource};
use apptool_core::retry::RetryPolicy;
use common::static_server::{self, Routes};
use tempfile::tempdir;
use url::Url;

const LOG_JAR: &str = "/maven2/org/example/log-sink/1.0/log-sink-1.0.jar";
const LOG_METADATA: &str = "/maven2/org/example/log-sink/1.0/log-sink-1.0-metadata.jar";

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(10),
        max_delay: Duration::from_millis(50),
    }
}

#[test]
fn maven_coordinates_download_and_index() {
    let server = static_server::start(
        Routes::new()
            .with(LOG_JAR, b"log sink jar")
            .with(LOG_METADATA, b"log sink metadata"),
    );
    let repo_base = server.url("maven2");
    let repo_dir = tempdir().unwrap();
    let transport = CurlTransport::new(fast_retry());
    let fetcher = Fetcher::for_repo(repo_dir.path(), &transport).unwrap();

    let resources = vec![
        AppResource::resolve("sink.log", "maven://org.example:log-sink:1.0", &repo_base).unwrap(),
        AppResource::resolve(
            "sink.log.metadata",
            "maven://org.example:log-sink:jar:metadata:1.0",
            &repo_base,
        )
        .unwrap(),
    ];
    let report = fetcher.fetch_all(&resources).unwrap();
    assert!(report.is_clean(), "failures: {:?}", report.failed);

    let jar = std::fs::read(repo_dir.path().join("log-sink-1.0.jar")).unwrap();
    assert_eq!(jar, b"log sink jar");

    let repo = LocalRepo::new(repo_dir.path());
    assert_eq!(
        repo.list().unwrap(),
        vec![
            "sink.log=log-sink-1.0.jar",
            "sink.log.metadata=log-sink-1.0-metadata.jar"
        ]
    );
    assert_eq!(
        repo.files().unwrap(),
        vec!["log-sink-1.0-metadata.jar", "log-sink-1.0.jar"]
    );
}

#[test]
fn missing_artifact_is_isolated_in_a_batch() {
    let server = static_server::start(Routes::new().with(LOG_JAR, b"log sink jar"));
    let repo_base = server.url("maven2");
    let repo_dir = tempdir().unwrap();
    let transport = CurlTransport::new(fast_retry());
    let fetcher = Fetcher::for_repo(repo_dir.path(), &transport).unwrap();

    let resources = vec![
        AppResource::resolve("sink.gone", "maven://org.example:gone-sink:1.0", &repo_base).unwrap(),
        AppResource::resolve("sink.log", "maven://org.example:log-sink:1.0", &repo_base).unwrap(),
    ];
    let report = fetcher.fetch_all(&resources).unwrap();

    assert_eq!(report.fetched, vec!["log-sink-1.0.jar"]);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].1.contains("404"), "{:?}", report.failed);
    // No partial or temp file for the failed artifact.
    assert_eq!(
        LocalRepo::new(repo_dir.path()).files().unwrap(),
        vec!["log-sink-1.0.jar"]
    );
}

#[test]
fn throttled_download_is_retried() {
    let server = static_server::start(Routes::new().with(LOG_JAR, b"eventually").flaky(LOG_JAR, 2));
    let repo_dir = tempdir().unwrap();
    let transport = CurlTransport::new(fast_retry());
    let dest = repo_dir.path().join("log-sink-1.0.jar");

    let bytes = transport.fetch(&Url::parse(&server.url(LOG_JAR)).unwrap(), &dest).unwrap();
    assert_eq!(bytes, 10);
    assert_eq!(std::fs::read(&dest).unwrap(), b"eventually");
    assert_eq!(server.hits(), 3);
}

#[test]
fn no_retry_policy_gives_up_on_first_503() {
    let server = static_server::start(Routes::new().with(LOG_JAR, b"eventually").flaky(LOG_JAR, 1));
    let repo_dir = tempdir().unwrap();
    let transport = CurlTransport::new(RetryPolicy::none());
    let dest = repo_dir.path().join("log-sink-1.0.jar");

    let err = transport
        .fetch(&Url::parse(&server.url(LOG_JAR)).unwrap(), &dest)
        .unwrap_err();
    assert!(err.to_string().contains("503"), "{err}");
    assert!(!dest.exists());
}

#[test]
fn custom_app_metadata_is_found_by_head_probe() {
    let server = static_server::start(
        Routes::new()
            .with("/apps/my-app-1.0.jar", b"app")
            .with("/apps/my-app-1.0-metadata.jar", b"metadata"),
    );
    let transport = CurlTransport::new(RetryPolicy::none());

    let custom = CustomAppResource::new("source", "my-app", &server.url("apps/my-app-1.0.jar")).unwrap();
    let metadata = custom.metadata_resource(&transport).unwrap().expect("metadata exists");
    assert_eq!(metadata.key().to_string(), "source.my-app.metadata");
    assert_eq!(metadata.filename(), "my-app-1.0-metadata.jar");

    let without = CustomAppResource::new("source", "other", &server.url("apps/other-1.0.jar")).unwrap();
    assert!(without.metadata_resource(&transport).unwrap().is_none());
}
