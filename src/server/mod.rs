//! HTTP server layer for the slice viewer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │            GET /{filename}?start_line=..&end_line=..            │
//! │                                                                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────────┐  │
//! │  │  handlers   │  │    pages    │  │        routes           │  │
//! │  │ (requests)  │  │   (HTML)    │  │  (router config)        │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod pages;
pub mod routes;

pub use handlers::{
    health_handler, index_handler, not_found_handler, raw_handler, view_handler, AppState,
    HealthResponse, RequestedFile, ViewQueryParams, DEFAULT_FILENAME,
};
pub use pages::{html_escape, render_error_page, render_file_page};
pub use routes::{create_router, RouterConfig};
