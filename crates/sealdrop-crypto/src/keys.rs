//! Key management for sealdrop transfers
//!
//! Every transfer uses a single 256-bit AES-GCM key. The key is created at
//! the start of an upload session and its only persistent trace is the
//! base64url string embedded in the share link fragment; a download session
//! re-imports that string into a fresh key object.

use crate::{CryptoError, Result, entropy::{EntropySource, OsEntropy}};
use base64::Engine;
use std::sync::Arc;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of a symmetric key in bytes (256 bits)
pub const KEY_SIZE: usize = 32;

/// Size of a nonce in bytes (96 bits for AES-GCM)
pub const NONCE_SIZE: usize = 12;

/// An opaque 256-bit AES-GCM key with explicit capability flags
///
/// The raw bytes are zeroized on drop; the key is never serialized,
/// persisted, or logged.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey {
    key: [u8; KEY_SIZE],
    exportable: bool,
    can_encrypt: bool,
    can_decrypt: bool,
}

impl SymmetricKey {
    fn new(key: [u8; KEY_SIZE]) -> Self {
        Self {
            key,
            exportable: true,
            can_encrypt: true,
            can_decrypt: true,
        }
    }

    /// Get the key bytes
    pub(crate) fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.key
    }

    /// Whether the key may be exported to a string
    pub fn is_exportable(&self) -> bool {
        self.exportable
    }

    /// Whether the key may be used for encryption
    pub fn can_encrypt(&self) -> bool {
        self.can_encrypt
    }

    /// Whether the key may be used for decryption
    pub fn can_decrypt(&self) -> bool {
        self.can_decrypt
    }

    /// Return a copy of this key with the export capability removed
    pub fn without_export(mut self) -> Self {
        self.exportable = false;
        self
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key bytes
        f.debug_struct("SymmetricKey")
            .field("exportable", &self.exportable)
            .field("can_encrypt", &self.can_encrypt)
            .field("can_decrypt", &self.can_decrypt)
            .finish_non_exhaustive()
    }
}

/// Generates and (de)serializes symmetric keys
pub struct KeyManager {
    entropy: Arc<dyn EntropySource>,
}

impl KeyManager {
    /// Create a key manager over the given entropy source
    pub fn new(entropy: Arc<dyn EntropySource>) -> Self {
        Self { entropy }
    }

    /// Generate a fresh random key, exportable and usable for
    /// both encryption and decryption
    pub fn generate(&self) -> SymmetricKey {
        let mut key = [0u8; KEY_SIZE];
        self.entropy.fill(&mut key);
        SymmetricKey::new(key)
    }

    /// Serialize the raw key bytes to a URL-safe base64 string
    ///
    /// The string is what ends up in the share link fragment.
    pub fn export(&self, key: &SymmetricKey) -> Result<String> {
        if !key.is_exportable() {
            return Err(CryptoError::KeyNotExportable);
        }
        Ok(base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(key.as_bytes()))
    }

    /// Reverse of [`export`](Self::export)
    ///
    /// Imported keys carry full capabilities, matching the keys produced by
    /// [`generate`](Self::generate).
    pub fn import(&self, key_string: &str) -> Result<SymmetricKey> {
        let bytes = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(key_string)
            .map_err(|e| CryptoError::InvalidKeyFormat(format!("invalid base64url: {e}")))?;
        if bytes.len() != KEY_SIZE {
            return Err(CryptoError::InvalidKeyFormat(format!(
                "key must be {} bytes, got {}",
                KEY_SIZE,
                bytes.len()
            )));
        }
        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(&bytes);
        Ok(SymmetricKey::new(key))
    }
}

impl Default for KeyManager {
    fn default() -> Self {
        Self::new(Arc::new(OsEntropy))
    }
}
