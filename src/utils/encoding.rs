//! Strict text decoding for ingestion artifacts.
//!
//! Artifacts are expected to be UTF-8. Anything else is an error rather than
//! a lossy decode, so character counts are never computed over replacement
//! characters.

use crate::error::{IngestError, Result};
use chardetng::EncodingDetector;
use encoding_rs::UTF_8;
use std::path::Path;

const DEFAULT_SAMPLE_SIZE: usize = 8192;

/// Read `path` as UTF-8 without BOM stripping or replacement.
///
/// A leading BOM is kept as a character, matching what a plain UTF-8 decode
/// of the file would produce.
pub fn read_text_strict(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    decode_strict(&bytes, path)
}

pub fn decode_strict(bytes: &[u8], path: &Path) -> Result<String> {
    match UTF_8.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok(text.into_owned()),
        None => Err(IngestError::Encoding {
            path: path.to_path_buf(),
            detected: guess_encoding(bytes),
        }),
    }
}

/// Best guess at what a non-UTF-8 buffer actually is, for error messages.
fn guess_encoding(bytes: &[u8]) -> String {
    let sample = &bytes[..bytes.len().min(DEFAULT_SAMPLE_SIZE)];
    if sample.starts_with(&[0xff, 0xfe]) {
        return "utf-16-le".to_string();
    }
    if sample.starts_with(&[0xfe, 0xff]) {
        return "utf-16-be".to_string();
    }
    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    detector.guess(None, true).name().to_lowercase()
}
