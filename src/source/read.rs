// Reader: decode a file as UTF-8, falling back to Latin-1.
//
// Latin-1 maps every byte to exactly one char, so the fallback never fails
// and never drops bytes. OCR output from older tooling is often cp1250 or
// Latin-1; the diacritics come out wrong but ASCII keywords still match.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which decoding produced the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextEncoding {
    Utf8,
    Latin1,
}

#[derive(Debug, Clone)]
pub struct DecodedText {
    pub text: String,
    pub encoding: TextEncoding,
    /// SHA-256 of the raw bytes, hex encoded
    pub content_hash: String,
}

/// Decode raw bytes, preferring UTF-8.
pub fn decode(bytes: Vec<u8>) -> (String, TextEncoding) {
    match String::from_utf8(bytes) {
        Ok(text) => (text, TextEncoding::Utf8),
        Err(e) => {
            let text = e.as_bytes().iter().map(|&b| char::from(b)).collect();
            (text, TextEncoding::Latin1)
        }
    }
}

/// Read a whole file into memory and decode it.
pub fn read_text(path: &Path) -> std::io::Result<DecodedText> {
    let bytes = fs::read(path)?;
    let content_hash = crate::ledger::content_hash(&bytes);
    let (text, encoding) = decode(bytes);
    if encoding == TextEncoding::Latin1 {
        debug!(path = %path.display(), "Not valid UTF-8, decoded as Latin-1");
    }
    Ok(DecodedText {
        text,
        encoding,
        content_hash,
    })
}
