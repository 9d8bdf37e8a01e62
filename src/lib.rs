//! # Slice Viewer
//!
//! A small web viewer for text files kept in a single serving directory.
//!
//! A request names a file and, optionally, an inclusive zero-indexed line
//! range (`?start_line=1&end_line=2`). The file's encoding is detected from
//! its bytes, the text is decoded without replacement characters, the
//! requested lines are selected, and the result is rendered as an HTML page.
//! Every failure is rendered as an HTML error page with a matching status
//! code.
//!
//! ## Architecture
//!
//! - [`io`] - File sources with serving-root containment
//! - [`encoding`] - Pluggable encoding detection and lossless decoding
//! - [`slice`] - Line ranges, the slice service, and its LRU cache
//! - [`server`] - Axum handlers, HTML pages, and router configuration
//! - [`config`] - CLI and configuration types
//!
//! ## Example
//!
//! ```rust,no_run
//! use slice_viewer::{create_router, LocalFileSource, RouterConfig, SliceService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = LocalFileSource::new("static_files")?;
//!     let service = SliceService::with_cache_capacity(source, 128);
//!     let router = create_router(service, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//!     axum::serve(listener, router).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod encoding;
pub mod error;
pub mod io;
pub mod server;
pub mod slice;

// Re-export commonly used types
pub use config::{CheckConfig, Cli, Command, ServeConfig};
pub use encoding::{decode_text, ChardetDetector, DecodedText, EncodingDetector, FixedEncoding};
pub use error::{IoError, SliceError};
pub use io::{FileSource, LocalFileSource};
pub use server::{
    create_router, health_handler, index_handler, not_found_handler, raw_handler,
    render_error_page, render_file_page, view_handler, AppState, HealthResponse, RequestedFile,
    RouterConfig, ViewQueryParams,
};
pub use slice::{
    FileSlice, LineRange, SliceCache, SliceCacheKey, SliceRequest, SliceResponse, SliceService,
    DEFAULT_SLICE_CACHE_CAPACITY,
};
