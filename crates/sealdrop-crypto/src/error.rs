//! Error types for the sealdrop-crypto crate

use thiserror::Error;

/// Result type alias using `CryptoError`
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur during cryptographic operations
#[derive(Error, Debug)]
pub enum CryptoError {
    /// The key does not carry the export capability
    #[error("key is not exportable")]
    KeyNotExportable,

    /// Key string is not valid base64url or has the wrong length
    #[error("invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// The key does not carry the required usage capability
    #[error("key does not permit {0}")]
    UsageNotPermitted(&'static str),

    /// Invalid nonce
    #[error("invalid nonce: {0}")]
    InvalidNonce(String),

    /// Encryption failed (cipher setup or RNG fault, not expected in practice)
    #[error("encryption failed: {0}")]
    Encryption(String),

    /// GCM tag did not verify. Deliberately undifferentiated: a wrong key,
    /// a wrong nonce, and tampered ciphertext must be indistinguishable.
    #[error("authentication failure")]
    AuthenticationFailure,

    /// Share link has no fragment, so no key material
    #[error("share link is missing the key fragment")]
    MissingKey,

    /// Share link does not match the expected URL shape
    #[error("invalid share link: {0}")]
    InvalidLink(String),
}
