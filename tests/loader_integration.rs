//! Integration tests for the publication loader.
//!
//! Exercises HTTP and file sources through the public API, including the
//! degrade-to-empty behavior on every failure path.

use pubshelf_core::{
    DataSource, FileSource, HttpSource, LoadError, PublicationSource, load_publications,
};
use url::Url;
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, ResponseTemplate};

mod support;
use support::http::mock_server;
use support::{SAMPLE_JSON, write_publications};

fn endpoint(base: &str) -> Url {
    Url::parse(&format!("{base}/data/publications.json")).unwrap()
}

#[tokio::test]
async fn test_http_source_loads_records_in_source_order() {
    let Some(server) = mock_server().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/data/publications.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SAMPLE_JSON, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpSource::new(endpoint(&server.uri())).unwrap();
    let outcome = load_publications(&source).await;

    assert!(!outcome.is_failed());
    let titles: Vec<_> = outcome
        .publications
        .iter()
        .map(|p| p.title.as_str())
        .collect();
    assert_eq!(
        titles,
        ["Beta Networks", "Alpha Graphs", "Gamma Survey", "Undated Draft"]
    );
}

#[tokio::test]
async fn test_http_source_requests_uncached_copy() {
    let Some(server) = mock_server().await else {
        return;
    };
    Mock::given(method("GET"))
        .and(path("/data/publications.json"))
        .and(header_regex("cache-control", "no-cache"))
        .and(header_regex("pragma", "^no-cache$"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let source = HttpSource::new(endpoint(&server.uri())).unwrap();
    let outcome = load_publications(&source).await;

    assert!(!outcome.is_failed(), "no-cache headers should match the mock");
    assert!(outcome.publications.is_empty());
}

#[tokio::test]
async fn test_http_error_status_degrades_to_empty_list() {
    let Some(server) = mock_server().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpSource::new(endpoint(&server.uri())).unwrap();
    let outcome = load_publications(&source).await;

    assert!(outcome.publications.is_empty());
    assert!(matches!(
        outcome.error,
        Some(LoadError::HttpStatus { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_http_malformed_payload_degrades_to_empty_list() {
    let Some(server) = mock_server().await else {
        return;
    };
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("{\"not\": \"a list\"", "application/json"),
        )
        .mount(&server)
        .await;

    let source = HttpSource::new(endpoint(&server.uri())).unwrap();
    let outcome = load_publications(&source).await;

    assert!(outcome.publications.is_empty());
    assert!(matches!(outcome.error, Some(LoadError::Decode { .. })));
}

#[tokio::test]
async fn test_connection_refused_degrades_to_empty_list() {
    // Port 9 (discard) is almost never listening on localhost.
    let source = HttpSource::with_connect_timeout(
        Url::parse("http://127.0.0.1:9/data/publications.json").unwrap(),
        2,
    )
    .unwrap();
    let outcome = load_publications(&source).await;

    assert!(outcome.publications.is_empty());
    assert!(matches!(outcome.error, Some(LoadError::Network { .. })));
}

#[tokio::test]
async fn test_file_source_loads_records() {
    let (_dir, file) = write_publications(SAMPLE_JSON);
    let source = FileSource::new(&file);

    let outcome = load_publications(&source).await;

    assert!(!outcome.is_failed());
    assert_eq!(outcome.publications.len(), 4);
    assert_eq!(outcome.publications[3].year, None);
    assert_eq!(source.describe(), file.display().to_string());
}

#[tokio::test]
async fn test_missing_file_degrades_to_empty_list() {
    let (dir, _file) = write_publications("[]");
    let source = FileSource::new(dir.path().join("missing.json"));

    let outcome = load_publications(&source).await;

    assert!(outcome.publications.is_empty());
    assert!(matches!(outcome.error, Some(LoadError::Io { .. })));
}

#[tokio::test]
async fn test_data_source_dispatches_to_file_reader() {
    let (_dir, file) = write_publications(SAMPLE_JSON);
    let source = DataSource::parse(file.to_str().unwrap())
        .unwrap()
        .into_source(5)
        .unwrap();

    let outcome = load_publications(source.as_ref()).await;
    assert_eq!(outcome.publications.len(), 4);
}

#[test]
fn test_data_source_rejects_unsupported_scheme() {
    let err = DataSource::parse("ftp://example.com/pubs.json").unwrap_err();
    assert!(matches!(err, LoadError::InvalidSource { .. }));
    assert!(err.to_string().contains("ftp"));
}
