//! Read-through cache for decoded file slices.
//!
//! Slices are cached by `(filename, start_line, end_line)`. Files under the
//! serving root are treated as immutable for the lifetime of the process, so
//! entries are never invalidated; they only leave the cache through LRU
//! eviction once the entry limit is reached.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use tokio::sync::RwLock;

use super::range::LineRange;
use super::service::FileSlice;

/// Default number of cached slices.
pub const DEFAULT_SLICE_CACHE_CAPACITY: usize = 128;

// =============================================================================
// Cache Key
// =============================================================================

/// Cache key for a decoded slice.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SliceCacheKey {
    /// File name relative to the serving root
    pub filename: Arc<str>,

    /// Requested first line
    pub start_line: Option<usize>,

    /// Requested last line
    pub end_line: Option<usize>,
}

impl SliceCacheKey {
    /// Create a new cache key.
    pub fn new(filename: impl Into<Arc<str>>, range: LineRange) -> Self {
        Self {
            filename: filename.into(),
            start_line: range.start,
            end_line: range.end,
        }
    }
}

// =============================================================================
// Slice Cache
// =============================================================================

/// Bounded LRU cache of successful slice reads.
///
/// # Thread Safety
///
/// The cache is shared across request handlers; all mutation happens under
/// the write lock, so concurrent inserts of the same key are harmless.
pub struct SliceCache {
    cache: RwLock<LruCache<SliceCacheKey, Arc<FileSlice>>>,
    capacity: NonZeroUsize,
}

impl SliceCache {
    /// Create a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(
            NonZeroUsize::new(DEFAULT_SLICE_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN),
        )
    }

    /// Create a cache holding at most `capacity` slices.
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
            capacity,
        }
    }

    /// Get a slice, marking it as recently used.
    pub async fn get(&self, key: &SliceCacheKey) -> Option<Arc<FileSlice>> {
        let mut cache = self.cache.write().await;
        cache.get(key).cloned()
    }

    /// Check for a slice without touching LRU order.
    pub async fn contains(&self, key: &SliceCacheKey) -> bool {
        let cache = self.cache.read().await;
        cache.contains(key)
    }

    /// Store a slice, evicting the least-recently-used entry if full.
    pub async fn put(&self, key: SliceCacheKey, slice: Arc<FileSlice>) {
        let mut cache = self.cache.write().await;
        cache.put(key, slice);
    }

    /// Number of cached slices.
    pub async fn len(&self) -> usize {
        let cache = self.cache.read().await;
        cache.len()
    }

    /// Whether the cache holds no slices.
    pub async fn is_empty(&self) -> bool {
        let cache = self.cache.read().await;
        cache.is_empty()
    }

    /// Maximum number of slices.
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }
}

impl Default for SliceCache {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
