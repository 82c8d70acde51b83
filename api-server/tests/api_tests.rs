//! End-to-end tests: real router, real reqwest bridge, local upstream

use api_server::{DurationResponse, ErrorBody, DURATION_PATH};
use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use core_metadata::fixtures::{not_audio, synthetic_mp3, FRAMES_PER_TEN_SECONDS};
use core_metadata::MetadataExtractor;
use core_runtime::config::ServiceConfig;
use core_service::round_to_hundredths;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const FRAMES: usize = FRAMES_PER_TEN_SECONDS * 3;

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn spawn_upstream() -> SocketAddr {
    let app = Router::new()
        .route("/missing.mp3", get(|| async { StatusCode::NOT_FOUND }))
        .route("/private.mp3", get(|| async { StatusCode::FORBIDDEN }))
        .route(
            "/broken.mp3",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
        .route(
            "/page.html",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
                    "<html></html>",
                )
            }),
        )
        .route(
            "/episode.mp3",
            get(|| async { ([(header::CONTENT_TYPE, "audio/mpeg")], synthetic_mp3(FRAMES)) }),
        )
        .route(
            "/untyped.mp3",
            get(|| async { Response::new(Body::from(synthetic_mp3(FRAMES))) }),
        )
        .route(
            "/latin1.mp3",
            get(|| async {
                (
                    [(
                        header::CONTENT_TYPE,
                        HeaderValue::from_bytes(b"text/html; title=caf\xe9").unwrap(),
                    )],
                    synthetic_mp3(FRAMES),
                )
            }),
        )
        .route(
            "/garbage.mp3",
            get(|| async { ([(header::CONTENT_TYPE, "audio/mpeg")], not_audio()) }),
        );
    serve(app).await
}

/// Upstream replying with a hand-written status line and no body.
async fn spawn_raw_upstream(status_line: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let mut read = 0;
                while read < buf.len() {
                    let n = socket.read(&mut buf[read..]).await.unwrap_or(0);
                    if n == 0 {
                        break;
                    }
                    read += n;
                    if buf[..read].windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let response =
                    format!("{status_line}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });
    addr
}

async fn spawn_api() -> SocketAddr {
    let config = ServiceConfig::builder().build().unwrap();
    let service = core_service::bootstrap_desktop(&config).unwrap();
    serve(api_server::router(Arc::new(service))).await
}

struct Harness {
    api: SocketAddr,
    upstream: SocketAddr,
    client: reqwest::Client,
}

impl Harness {
    async fn start() -> Self {
        Self {
            api: spawn_api().await,
            upstream: spawn_upstream().await,
            client: reqwest::Client::new(),
        }
    }

    fn upstream_url(&self, path: &str) -> String {
        format!("http://{}{}", self.upstream, path)
    }

    fn endpoint(&self) -> String {
        format!("http://{}{}", self.api, DURATION_PATH)
    }

    async fn post_json(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn lookup(&self, path: &str) -> reqwest::Response {
        self.post_json(serde_json::json!({ "url": self.upstream_url(path) }))
            .await
    }
}

fn expected_seconds(frames: usize) -> f64 {
    let properties = MetadataExtractor::new()
        .extract_from_bytes(&synthetic_mp3(frames))
        .unwrap();
    round_to_hundredths(properties.duration_secs().unwrap())
}

fn assert_cors(response: &reqwest::Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

#[tokio::test]
async fn test_reports_duration() {
    let harness = Harness::start().await;

    let response = harness.lookup("/episode.mp3").await;

    assert_eq!(response.status(), 200);
    assert_cors(&response);
    let body: DurationResponse = response.json().await.unwrap();
    assert_eq!(body.duration, expected_seconds(FRAMES));
    assert!((body.duration - 30.0).abs() < 1.0);
}

#[tokio::test]
async fn test_missing_content_type_accepted() {
    let harness = Harness::start().await;

    let response = harness.lookup("/untyped.mp3").await;

    assert_eq!(response.status(), 200);
    let body: DurationResponse = response.json().await.unwrap();
    assert_eq!(body.duration, expected_seconds(FRAMES));
}

#[tokio::test]
async fn test_repeated_requests_agree() {
    let harness = Harness::start().await;

    let first: DurationResponse = harness.lookup("/episode.mp3").await.json().await.unwrap();
    let second: DurationResponse = harness.lookup("/episode.mp3").await.json().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_url_required() {
    let harness = Harness::start().await;

    for body in [
        serde_json::json!({}),
        serde_json::json!({ "url": "" }),
        serde_json::json!({ "url": null }),
    ] {
        let response = harness.post_json(body).await;
        assert_eq!(response.status(), 400);
        assert_cors(&response);
        let text = response.text().await.unwrap();
        assert_eq!(text, r#"{"error":"URL is required"}"#);
    }
}

#[tokio::test]
async fn test_invalid_url() {
    let harness = Harness::start().await;

    let response = harness
        .post_json(serde_json::json!({ "url": "not-a-url" }))
        .await;

    assert_eq!(response.status(), 400);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Invalid URL format");
    assert_eq!(body.message, None);
}

#[tokio::test]
async fn test_upstream_not_found() {
    let harness = Harness::start().await;

    let response = harness.lookup("/missing.mp3").await;

    assert_eq!(response.status(), 404);
    assert_cors(&response);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Audio file not found");
}

#[tokio::test]
async fn test_upstream_forbidden() {
    let harness = Harness::start().await;

    let response = harness.lookup("/private.mp3").await;

    assert_eq!(response.status(), 403);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Access denied to audio file");
}

#[tokio::test]
async fn test_upstream_status_passthrough() {
    let harness = Harness::start().await;

    let response = harness.lookup("/broken.mp3").await;

    assert_eq!(response.status(), 500);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(
        body.error,
        "Failed to fetch audio file: 500 Internal Server Error"
    );
}

#[tokio::test]
async fn test_upstream_reason_phrase_reported_verbatim() {
    let harness = Harness::start().await;
    let upstream = spawn_raw_upstream("HTTP/1.1 500 Upstream Exploded").await;

    let response = harness
        .post_json(serde_json::json!({ "url": format!("http://{upstream}/episode.mp3") }))
        .await;

    assert_eq!(response.status(), 500);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Failed to fetch audio file: 500 Upstream Exploded");
}

#[tokio::test]
async fn test_non_ascii_content_type_still_gated() {
    let harness = Harness::start().await;

    let response = harness.lookup("/latin1.mp3").await;

    assert_eq!(response.status(), 415);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "URL does not point to an audio file");
}

#[tokio::test]
async fn test_rejects_non_audio() {
    let harness = Harness::start().await;

    let response = harness.lookup("/page.html").await;

    assert_eq!(response.status(), 415);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "URL does not point to an audio file");
}

#[tokio::test]
async fn test_unparseable_audio() {
    let harness = Harness::start().await;

    let response = harness.lookup("/garbage.mp3").await;

    assert_eq!(response.status(), 500);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Failed to parse audio metadata");
    assert!(body.message.is_some());
}

#[tokio::test]
async fn test_unreachable_upstream() {
    let harness = Harness::start().await;

    let response = harness
        .post_json(serde_json::json!({ "url": "http://127.0.0.1:1/episode.mp3" }))
        .await;

    assert_eq!(response.status(), 500);
    assert_cors(&response);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Failed to fetch audio file");
    assert!(!body.message.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_body() {
    let harness = Harness::start().await;

    let response = harness
        .client
        .post(harness.endpoint())
        .header(header::CONTENT_TYPE.as_str(), "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_cors(&response);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Internal server error");
    assert!(body.message.is_some());
}

#[tokio::test]
async fn test_null_body() {
    let harness = Harness::start().await;

    let response = harness.post_json(serde_json::Value::Null).await;

    assert_eq!(response.status(), 500);
    assert_cors(&response);
    let body: ErrorBody = response.json().await.unwrap();
    assert_eq!(body.error, "Internal server error");
    assert!(body.message.unwrap().contains("null"));
}

#[tokio::test]
async fn test_body_parsed_regardless_of_content_type() {
    let harness = Harness::start().await;

    let response = harness
        .client
        .post(harness.endpoint())
        .header(header::CONTENT_TYPE.as_str(), "text/plain")
        .body(format!(
            r#"{{"url":"{}"}}"#,
            harness.upstream_url("/episode.mp3")
        ))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_preflight() {
    let harness = Harness::start().await;

    let response = harness
        .client
        .request(reqwest::Method::OPTIONS, harness.endpoint())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_cors(&response);
    assert!(response.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_not_allowed_on_endpoint() {
    let harness = Harness::start().await;

    let response = harness.client.get(harness.endpoint()).send().await.unwrap();

    assert_eq!(response.status(), 405);
}

#[tokio::test]
async fn test_serves_harness_page() {
    let harness = Harness::start().await;

    let response = harness
        .client
        .get(format!("http://{}/", harness.api))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let content_type = response.headers()[header::CONTENT_TYPE.as_str()]
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let page = response.text().await.unwrap();
    assert!(page.contains(DURATION_PATH));
}
