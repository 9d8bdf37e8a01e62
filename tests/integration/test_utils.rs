//! Test utilities for integration tests.
//!
//! Provides an in-memory file source with read tracking and helpers for
//! driving the router.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use bytes::Bytes;
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

use slice_viewer::error::IoError;
use slice_viewer::io::FileSource;
use slice_viewer::server::{create_router, RouterConfig};
use slice_viewer::slice::SliceService;

// =============================================================================
// Mock File Source
// =============================================================================

/// In-memory file source that counts reads per file.
#[derive(Clone, Default)]
pub struct MockFileSource {
    files: HashMap<String, Bytes>,
    reads: Arc<std::sync::Mutex<HashMap<String, usize>>>,
    total_reads: Arc<AtomicUsize>,
}

impl MockFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.files.insert(name.into(), Bytes::from(data.into()));
        self
    }

    /// Number of reads that reached the source for `name`.
    pub fn read_count(&self, name: &str) -> usize {
        self.reads
            .lock()
            .unwrap()
            .get(name)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_reads(&self) -> usize {
        self.total_reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FileSource for MockFileSource {
    async fn read(&self, filename: &str) -> Result<Bytes, IoError> {
        self.total_reads.fetch_add(1, Ordering::SeqCst);
        *self
            .reads
            .lock()
            .unwrap()
            .entry(filename.to_string())
            .or_insert(0) += 1;

        self.files
            .get(filename)
            .cloned()
            .ok_or_else(|| IoError::NotFound(filename.to_string()))
    }

    async fn list(&self) -> Result<Vec<String>, IoError> {
        let mut names: Vec<String> = self.files.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// A source that fails every read with a filesystem error.
pub struct FailingFileSource;

#[async_trait]
impl FileSource for FailingFileSource {
    async fn read(&self, filename: &str) -> Result<Bytes, IoError> {
        Err(IoError::Read {
            path: format!("/srv/private/{}", filename),
            message: "Permission denied (os error 13)".to_string(),
        })
    }

    async fn list(&self) -> Result<Vec<String>, IoError> {
        Ok(Vec::new())
    }
}

// =============================================================================
// Router Helpers
// =============================================================================

/// Build a router over `source` with default configuration and tracing off.
pub fn router_for<S: FileSource + 'static>(service: SliceService<S>) -> Router {
    create_router(service, RouterConfig::new().with_tracing(false))
}

/// Send a GET request to the router.
pub async fn get(router: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap()
}

/// Collect a response body as a UTF-8 string.
pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Extract the text inside the first `<pre>` block.
pub fn pre_content(page: &str) -> &str {
    let start = page.find("<pre>").expect("page has <pre>") + "<pre>".len();
    let end = page[start..].find("</pre>").expect("page has </pre>") + start;
    &page[start..end]
}

/// Extract the text inside the error box.
pub fn error_message(page: &str) -> &str {
    let marker = r#"<div class="error">"#;
    let start = page.find(marker).expect("page has error box") + marker.len();
    let end = page[start..].find("</div>").expect("error box closes") + start;
    &page[start..end]
}
