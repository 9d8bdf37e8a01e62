//! Text encoding detection and decoding.
//!
//! Files in the serving root carry no charset metadata, so the encoding is
//! guessed from the bytes themselves:
//!
//! 1. A byte order mark, when present, is authoritative and is stripped
//! 2. Otherwise an [`EncodingDetector`] picks an encoding from the content
//! 3. The bytes are decoded without replacement characters; any malformed
//!    sequence is reported as [`SliceError::Decode`](crate::error::SliceError::Decode)
//!
//! The detector is a strategy object so deployments (and tests) can swap the
//! heuristic for a fixed encoding without touching the slicing logic.

pub mod decode;
pub mod detect;

pub use decode::{decode_text, DecodedText};
pub use detect::{encoding_for_label, ChardetDetector, EncodingDetector, FixedEncoding};
