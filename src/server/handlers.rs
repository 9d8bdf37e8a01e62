//! HTTP request handlers for the slice viewer.
//!
//! # Endpoints
//!
//! - `GET /` - View the default file
//! - `GET /{filename}` - View a file, optionally limited to a line range
//! - `GET /static_files/{*path}` - Raw file bytes
//! - `GET /health` - Health check endpoint
//!
//! Unmatched paths and malformed request parts are answered with the same
//! HTML error page as every other failure.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{header, request::Parts, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::error::SliceError;
use crate::io::FileSource;
use crate::slice::{LineRange, SliceRequest, SliceService};

use super::pages::{render_error_page, render_file_page};

/// File shown at `/` unless configured otherwise.
pub const DEFAULT_FILENAME: &str = "file1.txt";

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the slice service.
///
/// This is passed to all handlers via Axum's State extractor.
pub struct AppState<S: FileSource> {
    /// The slice service for reading files
    pub slice_service: Arc<SliceService<S>>,

    /// File shown when no name is given
    pub default_file: Arc<str>,
}

impl<S: FileSource> AppState<S> {
    /// Create a new application state with the default file name.
    pub fn new(slice_service: SliceService<S>) -> Self {
        Self {
            slice_service: Arc::new(slice_service),
            default_file: Arc::from(DEFAULT_FILENAME),
        }
    }

    /// Set the file shown at `/`.
    pub fn with_default_file(mut self, default_file: impl Into<Arc<str>>) -> Self {
        self.default_file = default_file.into();
        self
    }
}

impl<S: FileSource> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            slice_service: Arc::clone(&self.slice_service),
            default_file: Arc::clone(&self.default_file),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for file views.
///
/// Values are kept as strings so that malformed numbers surface as a
/// validation message on the error page instead of a bare extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ViewQueryParams {
    /// First line to show (zero-indexed, inclusive)
    #[serde(default)]
    pub start_line: Option<String>,

    /// Last line to show (zero-indexed, inclusive)
    #[serde(default)]
    pub end_line: Option<String>,
}

impl ViewQueryParams {
    /// Collect the view parameters from decoded query pairs.
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "start_line" => &mut params.start_line,
                "end_line" => &mut params.end_line,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }

    /// Parse and validate the requested line range.
    pub fn line_range(&self) -> Result<LineRange, SliceError> {
        LineRange::from_query(self.start_line.as_deref(), self.end_line.as_deref())
    }
}

impl<S> FromRequestParts<S> for ViewQueryParams
where
    S: Send + Sync,
{
    type Rejection = SliceError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) =
            Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(|rejection| {
                debug!(%rejection, "Rejected query string");
                SliceError::validation("Invalid query string.")
            })?;

        Ok(Self::from_pairs(pairs))
    }
}

/// File name captured from the request path.
///
/// A path segment that cannot be decoded names no file, so a rejection is
/// reported as [`SliceError::NotFound`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestedFile(pub String);

impl<S> FromRequestParts<S> for RequestedFile
where
    S: Send + Sync,
{
    type Rejection = SliceError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(filename)) => Ok(Self(filename)),
            Err(rejection) => {
                debug!(%rejection, path = parts.uri.path(), "Rejected file name");
                Err(SliceError::NotFound {
                    filename: parts.uri.path().to_string(),
                })
            }
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Convert SliceError to an HTML error page.
///
/// - 4xx errors are logged at WARN level (404 at DEBUG)
/// - 5xx errors are logged at ERROR level with the internal detail, which is
///   never rendered
impl IntoResponse for SliceError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            SliceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            SliceError::Validation { .. } => (StatusCode::BAD_REQUEST, "validation_error"),
            SliceError::StartOutOfRange { .. } => (StatusCode::BAD_REQUEST, "range_error"),
            SliceError::EmptyRange { .. } => (StatusCode::BAD_REQUEST, "empty_range"),
            SliceError::Decode { .. } => (StatusCode::UNSUPPORTED_MEDIA_TYPE, "decode_error"),
            SliceError::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        let message = self.to_string();

        match &self {
            SliceError::Internal { detail } => {
                error!(
                    error_type = error_type,
                    status = status.as_u16(),
                    detail = %detail,
                    "Server error: {}",
                    message
                );
            }
            SliceError::NotFound { filename } => {
                debug!(
                    error_type = error_type,
                    status = status.as_u16(),
                    filename = %filename,
                    "Resource not found"
                );
            }
            _ => {
                warn!(
                    error_type = error_type,
                    status = status.as_u16(),
                    "Client error: {}",
                    message
                );
            }
        }

        (status, Html(render_error_page(&message))).into_response()
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle requests for the default file.
///
/// # Endpoint
///
/// `GET /`
///
/// Behaves exactly like `GET /{default_file}`.
pub async fn index_handler<S: FileSource>(
    State(state): State<AppState<S>>,
    query: ViewQueryParams,
) -> Result<Response, SliceError> {
    let filename = state.default_file.to_string();
    render_slice(&state, filename, &query).await
}

/// Handle file view requests.
///
/// # Endpoint
///
/// `GET /{filename}`
///
/// # Query Parameters
///
/// - `start_line`: first line to show, zero-indexed, inclusive
/// - `end_line`: last line to show, zero-indexed, inclusive
///
/// # Response
///
/// - `200 OK`: HTML page with the selected content
/// - `400 Bad Request`: malformed or contradictory range, start past the end,
///   or a range containing only whitespace
/// - `404 Not Found`: file missing
/// - `415 Unsupported Media Type`: content not decodable
/// - `500 Internal Server Error`: read failure
///
/// Every error status carries an HTML error page.
///
/// # Headers
///
/// - `X-Slice-Cache-Hit: true|false`
/// - `X-Slice-Encoding: <encoding name>`
pub async fn view_handler<S: FileSource>(
    State(state): State<AppState<S>>,
    RequestedFile(filename): RequestedFile,
    query: ViewQueryParams,
) -> Result<Response, SliceError> {
    render_slice(&state, filename, &query).await
}

async fn render_slice<S: FileSource>(
    state: &AppState<S>,
    filename: String,
    query: &ViewQueryParams,
) -> Result<Response, SliceError> {
    let range = query.line_range()?;
    let request = SliceRequest::with_range(filename, range);

    let response = state.slice_service.read(&request).await?;
    let page = render_file_page(&response.slice);

    Ok((
        [
            ("x-slice-cache-hit", response.cache_hit.to_string()),
            ("x-slice-encoding", response.slice.encoding.to_string()),
        ],
        Html(page),
    )
        .into_response())
}

/// Handle raw file requests.
///
/// # Endpoint
///
/// `GET /static_files/{*path}`
///
/// Nested paths are allowed; they are still resolved inside the serving
/// root by the file source.
///
/// # Response
///
/// `200 OK` with the unmodified file bytes as `text/plain`, or the HTML
/// error page when the file cannot be read.
pub async fn raw_handler<S: FileSource>(
    State(state): State<AppState<S>>,
    RequestedFile(filename): RequestedFile,
) -> Result<Response, SliceError> {
    let data = state.slice_service.source().read(&filename).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain"),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        ],
        data,
    )
        .into_response())
}

/// Answer unmatched routes with the not-found page.
pub async fn not_found_handler(uri: Uri) -> SliceError {
    SliceError::NotFound {
        filename: uri.path().to_string(),
    }
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// =============================================================================
// Tests
// =============================================================================
