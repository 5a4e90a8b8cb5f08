//! Common types for the client sessions

use bytes::Bytes;
use sealdrop_crypto::Nonce;

/// A caller-supplied file to be shared
#[derive(Clone, Debug)]
pub struct FilePayload {
    /// Original filename, carried to the server alongside the ciphertext
    pub name: String,
    /// Plaintext bytes
    pub data: Bytes,
}

impl FilePayload {
    /// Create a payload from a name and bytes
    pub fn new(name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
        }
    }
}

/// The encrypted form of a file, ready for upload
#[derive(Clone, Debug)]
pub struct EncryptionEnvelope {
    /// Ciphertext: plaintext length plus the 16-byte authentication tag
    pub ciphertext: Bytes,
    /// Fresh per-encryption IV; public, but required for decryption
    pub iv: Nonce,
    /// Original filename
    pub filename: String,
    /// Declared plaintext size in bytes
    pub declared_size: u64,
}

/// Server-assigned identifier returned once per successful upload
#[derive(Clone, Debug)]
pub struct UploadResult {
    /// Identifier the share link is keyed by
    pub file_id: String,
}

/// A retrieved object, headers already decoded
#[derive(Clone, Debug)]
pub struct DownloadedObject {
    /// Ciphertext body
    pub ciphertext: Bytes,
    /// IV recovered from the `x-iv` response header
    pub iv: Nonce,
    /// Original filename, `.encrypted` suffix stripped
    pub filename: String,
}

/// The decrypted file exposed to the caller for local persistence
#[derive(Clone, Debug)]
pub struct RecoveredFile {
    /// Original filename
    pub name: String,
    /// Recovered plaintext bytes
    pub data: Bytes,
}
