//! File slice layer.
//!
//! This module turns a file name and an optional line range into decoded text.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              HTTP Handlers              │
//! └────────────────────┬────────────────────┘
//!                      │  SliceRequest
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │              SliceService               │
//! │  ┌──────────────┐  ┌─────────────────┐  │
//! │  │  SliceCache  │  │   LineRange     │  │
//! │  │  (LRU of     │  │   (validate,    │  │
//! │  │   slices)    │  │    select)      │  │
//! │  └──────────────┘  └─────────────────┘  │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │        FileSource + EncodingDetector    │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use slice_viewer::io::LocalFileSource;
//! use slice_viewer::slice::{LineRange, SliceRequest, SliceService};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = LocalFileSource::new("static_files")?;
//!     let service = SliceService::new(source);
//!
//!     let range = LineRange::from_query(Some("1"), Some("2"))?;
//!     let response = service
//!         .read(&SliceRequest::with_range("file1.txt", range))
//!         .await?;
//!
//!     println!("{}", response.slice.content);
//!     Ok(())
//! }
//! ```

mod cache;
mod range;
mod service;

pub use cache::{SliceCache, SliceCacheKey, DEFAULT_SLICE_CACHE_CAPACITY};
pub use range::{parse_line_param, LineRange, SelectedLines};
pub use service::{FileSlice, SliceRequest, SliceResponse, SliceService};
