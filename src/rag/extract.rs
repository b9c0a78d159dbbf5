//! Text extraction from uploaded images
//!
//! Reserved extension point: when a request carries an image, any text
//! extracted from it is appended to the query before embedding. OCR itself
//! is not implemented; the default extractor produces nothing, which leaves
//! the query unchanged.

use crate::errors::Result;

/// Extracts text from an opaque (base64-encoded) image payload.
pub trait TextExtractor: Send + Sync {
    /// Returns `Ok(None)` when no text could be extracted.
    fn extract(&self, image: &str) -> Result<Option<String>>;
}

/// Default extractor: never extracts anything.
pub struct NoopTextExtractor;

impl TextExtractor for NoopTextExtractor {
    fn extract(&self, _image: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_extractor_produces_nothing() {
        let extractor = NoopTextExtractor;
        assert!(extractor.extract("aGVsbG8=").unwrap().is_none());
    }
}
