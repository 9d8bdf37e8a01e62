//! Slice service: the read path from file name to selected text.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       SliceService                         │
//! │  read()                                                    │
//! │   1. Check cache       3. Detect + decode                  │
//! │   2. Read bytes        4. Select lines, cache, return      │
//! │        │                      │                   │        │
//! │        ▼                      ▼                   ▼        │
//! │  ┌────────────┐     ┌──────────────────┐    ┌───────────┐  │
//! │  │ FileSource │     │ EncodingDetector │    │SliceCache │  │
//! │  └────────────┘     └──────────────────┘    └───────────┘  │
//! └────────────────────────────────────────────────────────────┘
//! ```

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::debug;

use crate::encoding::{decode_text, ChardetDetector, EncodingDetector};
use crate::error::SliceError;
use crate::io::FileSource;

use super::cache::{SliceCache, SliceCacheKey};
use super::range::LineRange;

// =============================================================================
// Request / Response
// =============================================================================

/// A request for part of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceRequest {
    /// File name relative to the serving root
    pub filename: String,

    /// Validated line range
    pub range: LineRange,
}

impl SliceRequest {
    /// Request the whole file.
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            range: LineRange::full(),
        }
    }

    /// Request a line range of the file.
    pub fn with_range(filename: impl Into<String>, range: LineRange) -> Self {
        Self {
            filename: filename.into(),
            range,
        }
    }
}

/// The decoded, selected content of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlice {
    /// File name relative to the serving root
    pub filename: String,

    /// Range that produced this slice
    pub range: LineRange,

    /// Selected lines joined with `\n`
    pub content: String,

    /// Name of the encoding used to decode the file
    pub encoding: &'static str,

    /// Line count of the whole file
    pub total_lines: usize,
}

/// Response from the slice service.
#[derive(Debug, Clone)]
pub struct SliceResponse {
    /// The slice
    pub slice: Arc<FileSlice>,

    /// Whether the slice came from the cache
    pub cache_hit: bool,
}

// =============================================================================
// Slice Service
// =============================================================================

/// Service that reads, decodes, and slices files from a [`FileSource`].
///
/// The cache is optional and owned by the service; build it with
/// [`SliceService::without_cache`] to force every request to hit the source.
pub struct SliceService<S: FileSource> {
    source: S,
    detector: Box<dyn EncodingDetector>,
    cache: Option<SliceCache>,
}

impl<S: FileSource> SliceService<S> {
    /// Create a service with heuristic detection and the default cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            detector: Box::new(ChardetDetector::new()),
            cache: Some(SliceCache::new()),
        }
    }

    /// Create a service with a cache of `entries` slices; `0` disables caching.
    pub fn with_cache_capacity(source: S, entries: usize) -> Self {
        Self {
            cache: NonZeroUsize::new(entries).map(SliceCache::with_capacity),
            ..Self::new(source)
        }
    }

    /// Create a service that never caches.
    pub fn without_cache(source: S) -> Self {
        Self::with_cache_capacity(source, 0)
    }

    /// Replace the encoding detector.
    pub fn with_detector(mut self, detector: impl EncodingDetector + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    /// Get a reference to the file source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Get a reference to the cache, if enabled.
    pub fn cache(&self) -> Option<&SliceCache> {
        self.cache.as_ref()
    }

    /// Read the requested slice.
    ///
    /// # Errors
    ///
    /// - [`SliceError::NotFound`]: file missing from the source
    /// - [`SliceError::Decode`]: bytes invalid under the detected encoding
    /// - [`SliceError::StartOutOfRange`]: start-only range past the last line
    /// - [`SliceError::EmptyRange`]: explicit range selected only whitespace
    /// - [`SliceError::Internal`]: any other read failure
    pub async fn read(&self, request: &SliceRequest) -> Result<SliceResponse, SliceError> {
        let key = SliceCacheKey::new(request.filename.as_str(), request.range);

        if let Some(cache) = &self.cache {
            if let Some(slice) = cache.get(&key).await {
                debug!(filename = %request.filename, "Slice cache hit");
                return Ok(SliceResponse {
                    slice,
                    cache_hit: true,
                });
            }
        }

        let bytes = self.source.read(&request.filename).await?;
        let decoded = decode_text(&bytes, self.detector.as_ref())?;
        let selected = request.range.select(&decoded.text)?;

        debug!(
            filename = %request.filename,
            encoding = decoded.encoding.name(),
            total_lines = selected.total_lines,
            "Slice read from source"
        );

        let slice = Arc::new(FileSlice {
            filename: request.filename.clone(),
            range: request.range,
            content: selected.content,
            encoding: decoded.encoding.name(),
            total_lines: selected.total_lines,
        });

        if let Some(cache) = &self.cache {
            cache.put(key, Arc::clone(&slice)).await;
        }

        Ok(SliceResponse {
            slice,
            cache_hit: false,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
