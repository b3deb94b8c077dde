//! # Base64url
//!
//! URL-safe, unpadded base64 as used by compact tokens and stored credentials.

use base64::{engine::general_purpose, Engine as _};

/// Encode bytes to a base64url string (no padding).
pub fn b64u_encode(content: impl AsRef<[u8]>) -> String {
    general_purpose::URL_SAFE_NO_PAD.encode(content)
}

/// Decode a base64url string to bytes.
pub fn b64u_decode(b64u: &str) -> Result<Vec<u8>, Error> {
    general_purpose::URL_SAFE_NO_PAD
        .decode(b64u)
        .map_err(|_| Error::FailToB64uDecode)
}

/// Decode a base64url string into a fixed-size array.
///
/// Fails if the decoded length is not exactly `N`.
pub fn b64u_decode_array<const N: usize>(b64u: &str) -> Result<[u8; N], Error> {
    let bytes = b64u_decode(b64u)?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| Error::WrongLength { expected: N, actual })
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    FailToB64uDecode,
    WrongLength { expected: usize, actual: usize },
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
