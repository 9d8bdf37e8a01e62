//! Router configuration for the slice viewer.
//!
//! # Route Structure
//!
//! ```text
//! /health                        - Health check
//! /static_files/{*path}          - Raw file bytes
//! /                              - Default file view
//! /{filename}?start_line&end_line - File view
//! ```
//!
//! # Example
//!
//! ```ignore
//! use slice_viewer::io::LocalFileSource;
//! use slice_viewer::server::routes::{create_router, RouterConfig};
//! use slice_viewer::slice::SliceService;
//!
//! let source = LocalFileSource::new("static_files")?;
//! let service = SliceService::new(source);
//!
//! let config = RouterConfig::new().with_default_file("readme.txt");
//! let router = create_router(service, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{routing::get, Router};
use http::header::CONTENT_TYPE;
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    health_handler, index_handler, not_found_handler, raw_handler, view_handler, AppState,
    DEFAULT_FILENAME,
};
use crate::io::FileSource;
use crate::slice::SliceService;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// File shown at `/`
    pub default_file: String,

    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a router configuration with defaults.
    ///
    /// By default:
    /// - `/` shows `file1.txt`
    /// - CORS allows any origin
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            default_file: DEFAULT_FILENAME.to_string(),
            cors_origins: None,
            enable_tracing: true,
        }
    }

    /// Set the file shown at `/`.
    pub fn with_default_file(mut self, default_file: impl Into<String>) -> Self {
        self.default_file = default_file.into();
        self
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the application router.
///
/// # Arguments
///
/// * `slice_service` - The service answering file view requests
/// * `config` - Router configuration
pub fn create_router<S>(slice_service: SliceService<S>, config: RouterConfig) -> Router
where
    S: FileSource + 'static,
{
    let app_state =
        AppState::new(slice_service).with_default_file(config.default_file.as_str());

    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/static_files/{*path}", get(raw_handler::<S>))
        .route("/", get(index_handler::<S>))
        .route("/{filename}", get(view_handler::<S>))
        .fallback(not_found_handler)
        .with_state(app_state)
        .layer(cors);

    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(86400));

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => cors,
        Some(origins) => {
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
