//! Lossless decoding of file bytes into text.

use encoding_rs::Encoding;
use tracing::debug;

use crate::error::SliceError;

use super::detect::EncodingDetector;

/// Text decoded from a file, with the encoding that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedText {
    /// Decoded content, BOM removed
    pub text: String,

    /// Encoding used for decoding
    pub encoding: &'static Encoding,
}

/// Detect the encoding of `bytes` and decode them.
///
/// A leading byte order mark wins over the detector. Decoding never inserts
/// replacement characters: malformed input yields [`SliceError::Decode`]
/// naming the encoding that was attempted.
pub fn decode_text(
    bytes: &[u8],
    detector: &dyn EncodingDetector,
) -> Result<DecodedText, SliceError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (detector.detect(bytes), bytes),
    };

    debug!(encoding = encoding.name(), len = bytes.len(), "Decoding file");

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or(SliceError::Decode {
            encoding: encoding.name(),
        })?;

    Ok(DecodedText {
        text: text.into_owned(),
        encoding,
    })
}
