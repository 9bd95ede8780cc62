//! End-to-end tests: batch file → run_batch → local HTTP server.

use std::io::Write as _;
use std::time::Duration;

use axum::http::{HeaderMap, Method, Uri};
use axum::Router;
use http_batch::{run_batch, Config};
use tokio::net::TcpListener;

/// Starts a server that answers every request with
/// `<method> <path> x-id=<header> body=<body>`.
async fn start_echo_server() -> String {
    let app = Router::new().fallback(
        |method: Method, uri: Uri, headers: HeaderMap, body: String| async move {
            let id = headers
                .get("x-id")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("-")
                .to_string();
            format!("{method} {} x-id={id} body={body}", uri.path())
        },
    );

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    // Give server time to start
    tokio::time::sleep(Duration::from_millis(100)).await;

    format!("127.0.0.1:{}", addr.port())
}

fn batch_file(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("Failed to write batch");
    file
}

#[tokio::test]
async fn test_batch_is_sent_in_order() {
    let host = start_echo_server().await;
    let file = batch_file(&format!(
        "@host = {host}\n\
         \n\
         GET http://{{{{host}}}}/first\n\
         X-Id: one\n\
         \n\
         \n\
         POST http://{{{{host}}}}/second\n\
         X-Id: two\n\
         \n\
         hello\n"
    ));
    let config = Config {
        file: file.path().to_path_buf(),
        ..Default::default()
    };
    let mut out = Vec::new();

    let report = run_batch(&config, &mut out).await.expect("batch should succeed");

    assert_eq!(report.requests, 2);
    let text = String::from_utf8(out).unwrap();
    let first = text.find("GET /first x-id=one body=").expect("first response");
    let second = text
        .find("POST /second x-id=two body=hello\n")
        .expect("second response");
    assert!(first < second);
    assert!(!text.contains("HTTP/1.1 200 OK"));
}

#[tokio::test]
async fn test_include_prints_response_head() {
    let host = start_echo_server().await;
    let file = batch_file(&format!("GET http://{host}/x\n"));
    let config = Config {
        file: file.path().to_path_buf(),
        include: true,
        ..Default::default()
    };
    let mut out = Vec::new();

    run_batch(&config, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
    assert!(text.contains("GET /x x-id=- body="));
}

#[tokio::test]
async fn test_verbose_prints_request_and_response_banners() {
    let host = start_echo_server().await;
    let file = batch_file(&format!("PUT http://{host}/v\nX-Id: 9\n"));
    let config = Config {
        file: file.path().to_path_buf(),
        verbose: true,
        ..Default::default()
    };
    let mut out = Vec::new();

    run_batch(&config, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("----- Request -----\n\nPUT /v HTTP/1.1\r\n"));
    assert!(text.contains("----- Response -----\n\nHTTP/1.1 200 OK\r\n"));
    assert!(text.contains("PUT /v x-id=9 body="));
}

#[tokio::test]
async fn test_transport_failure_stops_run() {
    // Reserve a port, then free it so nothing listens there
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let file = batch_file(&format!(
        "GET http://127.0.0.1:{port}/a\n\n\nGET http://127.0.0.1:{port}/b\n"
    ));
    let config = Config {
        file: file.path().to_path_buf(),
        timeout_seconds: 5,
        ..Default::default()
    };
    let mut out = Vec::new();

    let err = run_batch(&config, &mut out).await.unwrap_err();

    assert!(format!("{err:#}").contains("GET http://127.0.0.1"));
    assert!(out.is_empty());
}
