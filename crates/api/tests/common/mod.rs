//! Shared harness for HTTP-level integration tests.
//!
//! Builds the full application router with the same middleware stack as
//! the binary, plus small request/response helpers and a hand-rolled
//! multipart body builder for the upload endpoints.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use vitrine_api::auth::jwt::JwtConfig;
use vitrine_api::config::ServerConfig;
use vitrine_api::routes;
use vitrine_api::state::AppState;

/// Create a fresh upload directory under the system temp dir.
///
/// The backing `TempDir` is forgotten so the directory survives for the
/// whole test run; the OS temp cleaner reclaims it eventually.
pub fn test_upload_dir() -> PathBuf {
    let dir = tempfile::tempdir().expect("Failed to create temp upload dir");
    let path = dir.path().to_path_buf();
    std::mem::forget(dir);
    path
}

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout, and a throwaway upload directory.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        upload_dir: test_upload_dir(),
        featured_product_count: 6,
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery, body limit) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_config(pool, test_config())
}

/// Like [`build_test_app`] but with a caller-supplied config, for tests
/// that need to pin the upload directory or the featured-product count.
pub fn build_test_app_with_config(pool: PgPool, config: ServerConfig) -> Router {
    let upload_dir = config.upload_dir.clone();

    let state = AppState {
        pool,
        config: Arc::new(config),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600));

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::app_routes())
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PATCH request with a JSON body.
pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PATCH)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request to the app.
pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).expect("Response body should be valid JSON")
}

// ---------------------------------------------------------------------------
// Multipart builder
// ---------------------------------------------------------------------------

pub const MULTIPART_BOUNDARY: &str = "test-boundary-7MA4YWxkTrZu0gW";

/// Incrementally builds a `multipart/form-data` body for upload endpoints.
pub struct MultipartBody {
    buf: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Add a plain text field.
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.buf
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        self.buf.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
        );
        self.buf.extend_from_slice(value.as_bytes());
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    /// Add a file field with the given filename and bytes.
    pub fn file(mut self, name: &str, filename: &str, contents: &[u8]) -> Self {
        self.buf
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        self.buf.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        self.buf
            .extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        self.buf.extend_from_slice(contents);
        self.buf.extend_from_slice(b"\r\n");
        self
    }

    pub fn build(mut self) -> Vec<u8> {
        self.buf
            .extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
        self.buf
    }
}

/// Send a multipart request (POST or PATCH) to the app.
pub async fn send_multipart(
    app: Router,
    method: Method,
    uri: &str,
    body: MultipartBody,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .body(Body::from(body.build()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a multipart POST request.
pub async fn post_multipart(app: Router, uri: &str, body: MultipartBody) -> Response<Body> {
    send_multipart(app, Method::POST, uri, body).await
}

/// Send a multipart PATCH request.
pub async fn patch_multipart(app: Router, uri: &str, body: MultipartBody) -> Response<Body> {
    send_multipart(app, Method::PATCH, uri, body).await
}

// ---------------------------------------------------------------------------
// Seed helpers
// ---------------------------------------------------------------------------

/// Create a section through the API; returns the created JSON.
pub async fn seed_section(pool: &PgPool, config: &ServerConfig, name: &str) -> serde_json::Value {
    let app = build_test_app_with_config(pool.clone(), config.clone());
    let body = MultipartBody::new()
        .text("name", name)
        .file("thumbnail", "thumb.png", b"fake png bytes");
    let response = post_multipart(app, "/sections", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Create a product type through the API; returns the created JSON.
pub async fn seed_type(
    pool: &PgPool,
    config: &ServerConfig,
    section_id: i64,
    name: &str,
) -> serde_json::Value {
    let app = build_test_app_with_config(pool.clone(), config.clone());
    let body = MultipartBody::new()
        .text("name", name)
        .text("section_id", &section_id.to_string())
        .file("thumbnail", "type.png", b"fake png bytes");
    let response = post_multipart(app, "/types", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

/// Create a product through the API (via `POST /products`); returns the
/// created JSON.
pub async fn seed_product(
    pool: &PgPool,
    config: &ServerConfig,
    type_id: i64,
    name: &str,
) -> serde_json::Value {
    let app = build_test_app_with_config(pool.clone(), config.clone());
    let body = MultipartBody::new()
        .text("type_id", &type_id.to_string())
        .text("name", name)
        .text("price", "19.99")
        .text("quantity", "5")
        .text("characteristics", r#"[{"name":"color","value":"red"}]"#)
        .text("descriptions", "A test product")
        .file("thumbnail", "product.png", b"fake png bytes");
    let response = post_multipart(app, "/products", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
