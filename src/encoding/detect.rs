//! Encoding detection strategies.
//!
//! - [`ChardetDetector`]: confidence-based guess over the common web/legacy
//!   encodings using `chardetng`, falling back to a default for pure ASCII
//! - [`FixedEncoding`]: always reports the same encoding

use encoding_rs::{Encoding, UTF_8};

// =============================================================================
// EncodingDetector Trait
// =============================================================================

/// Strategy for guessing the encoding of a byte buffer.
///
/// Implementations must be cheap to share across requests.
pub trait EncodingDetector: Send + Sync {
    /// Guess the encoding of `bytes`.
    ///
    /// `bytes` never starts with a byte order mark; BOM handling happens
    /// before the detector is consulted.
    fn detect(&self, bytes: &[u8]) -> &'static Encoding;
}

/// Look up an encoding by its WHATWG label (e.g. "utf-8", "latin1", "sjis").
pub fn encoding_for_label(label: &str) -> Option<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes())
}

// =============================================================================
// ChardetDetector
// =============================================================================

/// Heuristic detector backed by `chardetng`.
#[derive(Debug, Clone, Copy)]
pub struct ChardetDetector {
    /// Encoding reported when the content gives no signal (empty or ASCII)
    fallback: &'static Encoding,
}

impl ChardetDetector {
    /// Create a detector that falls back to UTF-8.
    pub fn new() -> Self {
        Self { fallback: UTF_8 }
    }

    /// Create a detector with a custom fallback encoding.
    pub fn with_fallback(fallback: &'static Encoding) -> Self {
        Self { fallback }
    }

    /// The encoding reported for inconclusive input.
    pub fn fallback(&self) -> &'static Encoding {
        self.fallback
    }
}

impl Default for ChardetDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl EncodingDetector for ChardetDetector {
    fn detect(&self, bytes: &[u8]) -> &'static Encoding {
        // ASCII decodes identically under every candidate
        if bytes.is_ascii() {
            return self.fallback;
        }

        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(bytes, true);
        detector.guess(None, true)
    }
}

// =============================================================================
// FixedEncoding
// =============================================================================

/// Detector that always reports one encoding.
#[derive(Debug, Clone, Copy)]
pub struct FixedEncoding(pub &'static Encoding);

impl EncodingDetector for FixedEncoding {
    fn detect(&self, _bytes: &[u8]) -> &'static Encoding {
        self.0
    }
}

// =============================================================================
// Tests
// =============================================================================
