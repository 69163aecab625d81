//! End-to-end pipeline tests against in-process fake GitHub/Zenodo servers.
//!
//! Both API clients take a configurable base URL, so a minimal HTTP/1.1
//! responder on a loopback port stands in for the real services. Handlers
//! route on method + path and count the requests they see, which lets the
//! tests assert not just outcomes but which external calls happened.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use base64::{Engine as _, engine::general_purpose::STANDARD};
use pretty_assertions::assert_eq;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use fair_core::entities::StoredToken;
use fair_core::enums::DepositionStatus;
use fair_db::FairDb;
use fair_github::{GithubClient, ReleaseAsset};
use fair_release::{Publisher, ReleaseError, parse_publish_command, transfer, upload_plan};
use fair_zenodo::ZenodoClient;

type Handler = Arc<dyn Fn(&str, &str) -> (u16, String) + Send + Sync>;

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    (listener, base)
}

/// Accept loop: parse the request line, drain the body, answer with the
/// handler's canned response, close the connection.
fn serve(listener: TcpListener, handler: Handler) {
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                break;
            };
            let handler = Arc::clone(&handler);
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 8192];
                let header_end = loop {
                    let Ok(n) = stream.read(&mut chunk).await else {
                        return;
                    };
                    if n == 0 {
                        return;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                    if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                        break pos + 4;
                    }
                };

                let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
                let mut request_line = head.lines().next().unwrap_or_default().split_whitespace();
                let method = request_line.next().unwrap_or_default().to_string();
                let path = request_line.next().unwrap_or_default().to_string();

                let content_length = head
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        if name.eq_ignore_ascii_case("content-length") {
                            value.trim().parse::<usize>().ok()
                        } else {
                            None
                        }
                    })
                    .unwrap_or(0);
                let mut body_read = buf.len() - header_end;
                while body_read < content_length {
                    let Ok(n) = stream.read(&mut chunk).await else {
                        return;
                    };
                    if n == 0 {
                        break;
                    }
                    body_read += n;
                }

                let (status, body) = handler(&method, &path);
                let response = format!(
                    "HTTP/1.1 {status} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            });
        }
    });
}

fn contents_file(path: &str, content: &str) -> String {
    serde_json::json!({
        "path": path,
        "sha": "blob-sha-1",
        "content": STANDARD.encode(content),
    })
    .to_string()
}

fn citation_yaml() -> &'static str {
    "cff-version: 1.2.0\ntitle: fairtool\nauthors:\n  - family-names: Lovelace\n"
}

fn codemeta_json(license_url: &str) -> String {
    serde_json::json!({
        "name": "fairtool",
        "description": "A tool for FAIR software.",
        "license": license_url,
        "author": [{"givenName": "Ada", "familyName": "Lovelace"}],
    })
    .to_string()
}

async fn db_with_token() -> FairDb {
    let db = FairDb::open_local(":memory:").await.unwrap();
    db.put_token(&StoredToken {
        username: "alice".to_string(),
        token: "zenodo-secret".to_string(),
    })
    .await
    .unwrap();
    db
}

#[tokio::test]
async fn custom_license_aborts_before_any_zenodo_call() {
    let (gh_listener, gh_base) = bind().await;
    serve(
        gh_listener,
        Arc::new(move |method, path| match (method, path) {
            ("GET", "/repos/alice/fairtool/contents/CITATION.cff") => {
                (200, contents_file("CITATION.cff", citation_yaml()))
            }
            ("GET", "/repos/alice/fairtool/contents/codemeta.json") => (
                200,
                contents_file(
                    "codemeta.json",
                    &codemeta_json("https://spdx.org/licenses/Custom"),
                ),
            ),
            _ => (404, "{}".to_string()),
        }),
    );

    let zenodo_calls = Arc::new(AtomicUsize::new(0));
    let (zen_listener, zen_base) = bind().await;
    let calls = Arc::clone(&zenodo_calls);
    serve(
        zen_listener,
        Arc::new(move |_, _| {
            calls.fetch_add(1, Ordering::SeqCst);
            (200, "{}".to_string())
        }),
    );

    let db = db_with_token().await;
    let github = GithubClient::new(&gh_base, "ghs_test", "alice", "fairtool");
    let publisher = Publisher::new(&db, github, format!("{zen_base}/api"), 42, "fairtool");
    let command =
        parse_publish_command("<!-- @codefair-bot publish-zenodo new 9 v1.0.0 alice -->").unwrap();

    let err = publisher.publish(&command).await.unwrap_err();
    assert!(matches!(err, ReleaseError::CustomLicense));

    // Validation rejected the run before Zenodo saw a single request.
    assert_eq!(zenodo_calls.load(Ordering::SeqCst), 0);

    let record = db.get_deposition(42).await.unwrap().unwrap();
    assert_eq!(record.status, DepositionStatus::Error);
}

#[tokio::test]
async fn publish_pipeline_end_to_end() {
    let release_published = Arc::new(AtomicUsize::new(0));
    let (gh_listener, gh_base) = bind().await;
    let published = Arc::clone(&release_published);
    serve(
        gh_listener,
        Arc::new(move |method, path| match (method, path) {
            ("GET", "/repos/alice/fairtool/contents/CITATION.cff") => {
                (200, contents_file("CITATION.cff", citation_yaml()))
            }
            ("GET", "/repos/alice/fairtool/contents/codemeta.json") => (
                200,
                contents_file(
                    "codemeta.json",
                    &codemeta_json("https://spdx.org/licenses/MIT"),
                ),
            ),
            ("PUT", p) if p.starts_with("/repos/alice/fairtool/contents/") => {
                (200, "{}".to_string())
            }
            ("GET", "/repos/alice/fairtool/releases/9") => (
                200,
                serde_json::json!({
                    "id": 9,
                    "tag_name": "v1.0.0",
                    "draft": true,
                    "assets": [{"id": 7, "name": "fairtool.tar.gz", "size": 3}],
                })
                .to_string(),
            ),
            ("GET", "/repos/alice/fairtool/releases/assets/7") => (200, "bin".to_string()),
            ("GET", "/repos/alice/fairtool/zipball/v1.0.0") => (200, "zip".to_string()),
            ("PATCH", "/repos/alice/fairtool/releases/9") => {
                published.fetch_add(1, Ordering::SeqCst);
                (
                    200,
                    serde_json::json!({"id": 9, "tag_name": "v1.0.0", "draft": false})
                        .to_string(),
                )
            }
            _ => (404, "{}".to_string()),
        }),
    );

    let (zen_listener, zen_base) = bind().await;
    let bucket = format!("{zen_base}/files/bkt");
    serve(
        zen_listener,
        Arc::new(move |method, path| match (method, path) {
            ("GET", "/api/deposit/depositions") => (200, "[]".to_string()),
            ("POST", "/api/deposit/depositions") => (
                201,
                serde_json::json!({
                    "id": 100,
                    "submitted": false,
                    "files": [],
                    "links": {"bucket": bucket},
                    "metadata": {"prereserve_doi": {"doi": "10.5281/zenodo.100"}},
                })
                .to_string(),
            ),
            ("PUT", "/api/deposit/depositions/100") => (
                200,
                serde_json::json!({
                    "id": 100,
                    "metadata": {"upload_type": "software", "title": "fairtool"},
                })
                .to_string(),
            ),
            ("PUT", p) if p.starts_with("/files/bkt/") => (201, "{}".to_string()),
            ("POST", "/api/deposit/depositions/100/actions/publish") => (
                202,
                serde_json::json!({"id": 100, "submitted": true}).to_string(),
            ),
            _ => (404, "{}".to_string()),
        }),
    );

    let db = db_with_token().await;
    let github = GithubClient::new(&gh_base, "ghs_test", "alice", "fairtool");
    let publisher = Publisher::new(&db, github, format!("{zen_base}/api"), 42, "fairtool");
    let command =
        parse_publish_command("<!-- @codefair-bot publish-zenodo new 9 v1.0.0 alice -->").unwrap();

    let doi = publisher.publish(&command).await.unwrap();
    assert_eq!(doi, "10.5281/zenodo.100");
    assert_eq!(release_published.load(Ordering::SeqCst), 1);

    let record = db.get_deposition(42).await.unwrap().unwrap();
    assert_eq!(record.status, DepositionStatus::Published);
    assert_eq!(record.last_published_doi.as_deref(), Some("10.5281/zenodo.100"));
    assert_eq!(record.zenodo_id, Some(100));
    assert_eq!(record.github_tag_name.as_deref(), Some("v1.0.0"));
}

#[tokio::test]
async fn failing_upload_aborts_remaining_transfers() {
    let asset_downloads = Arc::new(AtomicUsize::new(0));
    let (gh_listener, gh_base) = bind().await;
    let downloads = Arc::clone(&asset_downloads);
    serve(
        gh_listener,
        Arc::new(move |method, path| match (method, path) {
            ("GET", p) if p.starts_with("/repos/alice/fairtool/releases/assets/") => {
                downloads.fetch_add(1, Ordering::SeqCst);
                (200, "bin".to_string())
            }
            _ => (404, "{}".to_string()),
        }),
    );

    let bucket_puts = Arc::new(AtomicUsize::new(0));
    let (zen_listener, zen_base) = bind().await;
    let puts = Arc::clone(&bucket_puts);
    serve(
        zen_listener,
        Arc::new(move |method, path| match (method, path) {
            ("PUT", "/bkt/b.bin") => {
                puts.fetch_add(1, Ordering::SeqCst);
                (500, r#"{"message": "bucket unavailable"}"#.to_string())
            }
            ("PUT", p) if p.starts_with("/bkt/") => {
                puts.fetch_add(1, Ordering::SeqCst);
                (201, "{}".to_string())
            }
            _ => (404, "{}".to_string()),
        }),
    );

    let github = GithubClient::new(&gh_base, "ghs_test", "alice", "fairtool");
    let zenodo = ZenodoClient::new(&zen_base, "zenodo-secret");
    let assets = vec![
        ReleaseAsset { id: 1, name: "a.bin".to_string(), size: 3 },
        ReleaseAsset { id: 2, name: "b.bin".to_string(), size: 3 },
        ReleaseAsset { id: 3, name: "c.bin".to_string(), size: 3 },
    ];
    let plan = upload_plan(&assets, "fairtool", "v1.0.0");

    let err = transfer(&github, &zenodo, &format!("{zen_base}/bkt"), &plan)
        .await
        .unwrap_err();
    match err {
        ReleaseError::AssetTransfer { asset, .. } => assert_eq!(asset, "b.bin"),
        other => panic!("unexpected error: {other}"),
    }

    // The failing upload is the last call made: two PUTs (a.bin, b.bin),
    // two downloads, and c.bin plus the archive never start.
    assert_eq!(bucket_puts.load(Ordering::SeqCst), 2);
    assert_eq!(asset_downloads.load(Ordering::SeqCst), 2);
}
