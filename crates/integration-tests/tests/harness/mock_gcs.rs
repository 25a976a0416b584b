//! Mock Cloud Storage JSON API for integration tests
//!
//! Implements the media upload endpoint and keeps every object in memory

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, HeaderName, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router, routing};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Mock Cloud Storage server
pub struct MockGcs {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGcsState>,
}

/// One stored object
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub content_type: Option<String>,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

struct MockGcsState {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    request_count: AtomicU32,
    /// Status returned instead of storing, if set
    fail_with: Option<StatusCode>,
}

impl MockGcs {
    /// Start the mock server, returning immediately
    pub async fn start() -> anyhow::Result<Self> {
        Self::start_inner(None).await
    }

    /// Start a mock server rejecting every upload with `status`
    pub async fn start_failing(status: StatusCode) -> anyhow::Result<Self> {
        Self::start_inner(Some(status)).await
    }

    async fn start_inner(fail_with: Option<StatusCode>) -> anyhow::Result<Self> {
        let state = Arc::new(MockGcsState {
            objects: Mutex::new(HashMap::new()),
            request_count: AtomicU32::new(0),
            fail_with,
        });

        let app = Router::new()
            .route("/upload/storage/v1/b/{bucket}/o", routing::post(handle_media_upload))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Endpoint to configure the uploader with
    pub fn endpoint(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).unwrap()
    }

    /// Object stored under `bucket`/`name`
    pub fn object(&self, bucket: &str, name: &str) -> Option<StoredObject> {
        self.state
            .objects
            .lock()
            .unwrap()
            .get(&(bucket.to_owned(), name.to_owned()))
            .cloned()
    }

    /// Names of every stored object, sorted
    pub fn object_names(&self) -> Vec<String> {
        let mut names: Vec<_> = self
            .state
            .objects
            .lock()
            .unwrap()
            .keys()
            .map(|(bucket, name)| format!("{bucket}/{name}"))
            .collect();
        names.sort();
        names
    }

    /// Number of upload requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockGcs {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_media_upload(
    State(state): State<Arc<MockGcsState>>,
    Path(bucket): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if let Some(status) = state.fail_with {
        return (status, Json(serde_json::json!({"error": {"message": "upload rejected"}})));
    }

    if query.get("uploadType").map(String::as_str) != Some("media") {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": {"message": "uploadType must be media"}})),
        );
    }
    let Some(name) = query.get("name").cloned() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": {"message": "missing object name"}})),
        );
    };
    let Ok(parsed) = serde_json::from_slice(&body) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": {"message": "body is not JSON"}})),
        );
    };

    let header_value = |key: HeaderName| headers.get(key).and_then(|v| v.to_str().ok()).map(str::to_owned);
    let object = StoredObject {
        content_type: header_value(header::CONTENT_TYPE),
        authorization: header_value(header::AUTHORIZATION),
        body: parsed,
    };

    state
        .objects
        .lock()
        .unwrap()
        .insert((bucket.clone(), name.clone()), object);

    (
        StatusCode::OK,
        Json(serde_json::json!({"kind": "storage#object", "bucket": bucket, "name": name})),
    )
}
