// vme-core/tests/storage_tests.rs
//
// Transfers against a one-shot HTTP server on localhost standing in for an
// S3-compatible endpoint.

use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use tempfile::tempdir;
use vme_core::*;

/// What the server saw: the request head and the request body.
struct Captured {
    head: String,
    body: Vec<u8>,
}

/// Answers exactly one request with `200 OK` and `response_body`.
fn serve_once(response_body: &'static [u8]) -> (String, JoinHandle<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut received = Vec::new();
        let mut buf = [0u8; 4096];

        let head_end = loop {
            if let Some(pos) = received.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
            let n = stream.read(&mut buf).unwrap();
            assert!(n > 0, "connection closed before request head");
            received.extend_from_slice(&buf[..n]);
        };

        let head = String::from_utf8_lossy(&received[..head_end]).into_owned();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);
        while received.len() < head_end + content_length {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\n\
             ETag: \"0123456789abcdef\"\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            response_body.len()
        );
        stream.write_all(response.as_bytes()).unwrap();
        stream.write_all(response_body).unwrap();
        stream.flush().unwrap();

        Captured {
            head,
            body: received[head_end..].to_vec(),
        }
    });

    (endpoint, handle)
}

fn client_for(endpoint: String) -> S3Client {
    let config = S3Config::new("media")
        .with_endpoint(Some(endpoint))
        .with_ssl(false)
        .with_credentials(S3Credentials::new("test-access", "test-secret"));
    S3Client::new(config).unwrap()
}

/// Executor that checks the downloaded file is in place, then fails.
struct RejectingExecutor;

impl ProbeExecutor for RejectingExecutor {
    fn probe(&self, input_path: &Path) -> CoreResult<RawProbeResult> {
        assert!(input_path.is_file());
        Err(CoreError::ProbeExecution(
            "Invalid data found when processing input".to_string(),
        ))
    }
}

#[test]
fn test_download_names_file_after_key() {
    let (endpoint, server) = serve_once(b"fake mp4 bytes");
    let client = client_for(endpoint);

    let download = client.download("2024/01/movie.mp4").unwrap();
    let path = download.path().to_path_buf();
    assert_eq!(path.file_name().unwrap(), "movie.mp4");
    assert_eq!(fs::read(&path).unwrap(), b"fake mp4 bytes");

    let captured = server.join().unwrap();
    let request_line = captured.head.lines().next().unwrap();
    assert!(
        request_line.starts_with("GET /media/2024/01/movie.mp4"),
        "path-style request expected, got {request_line}"
    );
    assert!(captured.head.contains("AWS4-HMAC-SHA256 Credential=test-access/"));
    assert!(!captured.head.contains("test-secret"));

    let dir: PathBuf = path.parent().unwrap().to_path_buf();
    drop(download);
    assert!(!path.exists());
    assert!(!dir.exists());
}

#[test]
fn test_download_is_removed_when_extraction_fails() {
    let (endpoint, server) = serve_once(b"not really media");
    let client = client_for(endpoint);

    let download = client.download("clip.mp4").unwrap();
    let path = download.path().to_path_buf();
    let dir = path.parent().unwrap().to_path_buf();

    let result = extract_metadata(&RejectingExecutor, download.path(), ExtractionLevel::Full);
    assert!(matches!(result, Err(CoreError::ProbeExecution(_))));

    drop(download);
    assert!(!dir.exists());
    server.join().unwrap();
}

#[test]
fn test_upload_sends_file_body() {
    let (endpoint, server) = serve_once(b"");
    let client = client_for(endpoint);

    let dir = tempdir().unwrap();
    let export = dir.path().join("clip.mp4-metadata.json");
    fs::write(&export, "{\"fileInfo\":{}}\n").unwrap();

    client.upload(&export, "clip.mp4-metadata.json").unwrap();

    let captured = server.join().unwrap();
    assert!(
        captured
            .head
            .starts_with("PUT /media/clip.mp4-metadata.json"),
        "unexpected request: {}",
        captured.head
    );
    assert_eq!(captured.body, b"{\"fileInfo\":{}}\n");
}
