// Each integration test file is a separate binary; helpers not used in every
// binary would otherwise trigger dead_code warnings from clippy.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use yt_audio_server::{
    config::{ResolverConfig, SearchConfig},
    error::{ResolveError, ResolveResult},
    models::ResolvedAudio,
    resolver::{AudioResolver, YtDlp},
    search::YouTubeSearch,
    server,
    state::AppState,
};

// ── Test doubles ─────────────────────────────────────────────────────────────

/// In-process resolver that records every URL it is asked to resolve and
/// answers with the output a real resolver would have produced.
#[derive(Default)]
pub struct RecordingResolver {
    calls: Mutex<Vec<String>>,
    stdout: Option<String>,
    stderr: Option<String>,
}

impl RecordingResolver {
    /// Behaves like a resolver that exits 0 and prints `stdout`.
    pub fn succeeding(stdout: &str) -> Self {
        Self {
            stdout: Some(stdout.to_string()),
            ..Self::default()
        }
    }

    /// Behaves like a resolver that exits non-zero and prints `stderr`.
    pub fn failing(stderr: &str) -> Self {
        Self {
            stderr: Some(stderr.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioResolver for RecordingResolver {
    async fn resolve(&self, url: &str) -> ResolveResult<ResolvedAudio> {
        self.calls.lock().unwrap().push(url.to_string());
        if let Some(stderr) = &self.stderr {
            return Err(ResolveError::Failed {
                stderr: stderr.clone(),
            });
        }
        let stdout = self.stdout.as_deref().unwrap_or_default();
        yt_audio_server::resolver::ytdlp::parse_metadata(stdout.as_bytes())
    }

    async fn version(&self) -> ResolveResult<String> {
        Ok("2024.01.01-stub".into())
    }
}

/// Resolver that echoes the requested URL back in every field, after a delay.
pub struct EchoResolver {
    pub delay: Duration,
}

#[async_trait]
impl AudioResolver for EchoResolver {
    async fn resolve(&self, url: &str) -> ResolveResult<ResolvedAudio> {
        tokio::time::sleep(self.delay).await;
        Ok(ResolvedAudio {
            title: Value::from(format!("title for {url}")),
            thumbnail: Value::from(format!("{url}/thumb.jpg")),
            download_url: Value::from(format!("{url}/audio.m4a")),
        })
    }

    async fn version(&self) -> ResolveResult<String> {
        Ok("echo".into())
    }
}

// ── Stub resolver scripts ────────────────────────────────────────────────────

/// A throwaway directory holding an executable `sh` script that stands in
/// for `yt-dlp`. The script receives exactly the argv a real resolver would.
pub struct StubScript {
    pub dir: TempDir,
    pub path: String,
}

#[cfg(unix)]
pub fn stub_script(body: &str) -> StubScript {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("yt-dlp-stub");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    StubScript {
        path: path.to_string_lossy().into_owned(),
        dir,
    }
}

pub fn resolver_config(program: &str) -> ResolverConfig {
    ResolverConfig {
        program: program.to_string(),
        timeout: Duration::from_secs(10),
        ..ResolverConfig::default()
    }
}

// ── App builders ─────────────────────────────────────────────────────────────

pub fn create_test_app(resolver: Arc<dyn AudioResolver>) -> Router {
    server::router(AppState::new(resolver))
}

pub fn create_script_app(config: &ResolverConfig) -> Router {
    create_test_app(Arc::new(YtDlp::new(config)))
}

/// Router whose search client talks to `api_base` with `keys`.
pub fn create_search_app(api_base: &str, keys: &[&str]) -> Router {
    let search = YouTubeSearch::new(&SearchConfig {
        api_base: api_base.to_string(),
        api_keys: keys.iter().map(|k| k.to_string()).collect(),
    });
    let state = AppState::new(Arc::new(RecordingResolver::default())).with_search(search);
    server::router(state)
}

// ── Request helpers ──────────────────────────────────────────────────────────

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, "application/json", body.to_string()).await
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: impl Into<Body>,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap();
    send(app, req).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// POST `{"url": url}` to `/api/yt`.
pub async fn resolve(app: Router, url: &str) -> (StatusCode, Value) {
    post_json(app, "/api/yt", serde_json::json!({ "url": url })).await
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
