//! # Base64 Encoding/Decoding
//!
//! Standard (padded) base64, the alphabet realtime token MACs are exchanged in.

use base64::{Engine as _, engine::general_purpose};

/// Encode bytes to a standard base64 string.
pub fn b64_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::STANDARD.encode(content)
}

/// Decode a standard base64 string to bytes.
pub fn b64_decode(b64: &str) -> Result<Vec<u8>, Error> {
    general_purpose::STANDARD
        .decode(b64)
        .map_err(|_| Error::FailToB64Decode)
}

// region:    --- Error
#[derive(Debug)]
pub enum Error {
    FailToB64Decode,
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
