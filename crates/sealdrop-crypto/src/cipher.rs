//! Authenticated file encryption using AES-256-GCM
//!
//! A file is encrypted in one shot under a per-transfer key and a fresh
//! 96-bit nonce. The nonce is public and travels with the ciphertext; it
//! must never be reused under the same key, which is why a failed upload
//! always restarts with a newly generated key.

use crate::{
    CryptoError, Result,
    entropy::{EntropySource, OsEntropy},
    keys::{NONCE_SIZE, SymmetricKey},
};
use aes_gcm::{Aes256Gcm, KeyInit, aead::Aead as AeadTrait};
use std::sync::Arc;

/// Size of the GCM authentication tag appended to every ciphertext
pub const TAG_SIZE: usize = 16;

/// A 96-bit nonce (IV) for AES-GCM
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nonce {
    bytes: [u8; NONCE_SIZE],
}

impl Nonce {
    /// Create from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != NONCE_SIZE {
            return Err(CryptoError::InvalidNonce(format!(
                "nonce must be {} bytes, got {}",
                NONCE_SIZE,
                bytes.len()
            )));
        }
        let mut arr = [0u8; NONCE_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// Get the nonce bytes
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.bytes
    }

    /// Encode as the storage collaborator's textual convention:
    /// comma-separated decimal bytes, e.g. `"12,0,255,..."`
    pub fn to_byte_list(&self) -> String {
        self.bytes
            .iter()
            .map(|b| b.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decode from a comma-separated decimal byte list
    pub fn from_byte_list(s: &str) -> Result<Self> {
        let bytes = s
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<std::result::Result<Vec<u8>, _>>()
            .map_err(|e| CryptoError::InvalidNonce(format!("invalid byte list: {e}")))?;
        Self::from_bytes(&bytes)
    }
}

/// Performs authenticated encryption and decryption of file bytes
pub struct FileCipher {
    entropy: Arc<dyn EntropySource>,
}

impl FileCipher {
    /// Create a cipher over the given entropy source
    pub fn new(entropy: Arc<dyn EntropySource>) -> Self {
        Self { entropy }
    }

    /// Encrypt `plaintext` under `key` with a freshly sampled nonce
    ///
    /// Returns the ciphertext (plaintext length plus the 16-byte tag) and
    /// the nonce used. The caller must keep the nonce alongside the
    /// ciphertext; it is not secret but is required for decryption.
    pub fn encrypt(&self, plaintext: &[u8], key: &SymmetricKey) -> Result<(Vec<u8>, Nonce)> {
        if !key.can_encrypt() {
            return Err(CryptoError::UsageNotPermitted("encrypt"));
        }
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        self.entropy.fill(&mut nonce_bytes);
        let nonce = Nonce { bytes: nonce_bytes };

        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        let ciphertext = cipher
            .encrypt(aes_gcm::Nonce::from_slice(nonce.as_bytes()), plaintext)
            .map_err(|e| CryptoError::Encryption(e.to_string()))?;
        Ok((ciphertext, nonce))
    }

    /// Decrypt `ciphertext` under `key` with the supplied nonce
    ///
    /// Any tag mismatch maps to the single undifferentiated
    /// [`CryptoError::AuthenticationFailure`]: wrong key, wrong nonce, and
    /// tampering are indistinguishable to the caller.
    pub fn decrypt(
        &self,
        ciphertext: &[u8],
        key: &SymmetricKey,
        nonce: &Nonce,
    ) -> Result<Vec<u8>> {
        if !key.can_decrypt() {
            return Err(CryptoError::UsageNotPermitted("decrypt"));
        }
        let cipher = Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| CryptoError::AuthenticationFailure)?;
        cipher
            .decrypt(aes_gcm::Nonce::from_slice(nonce.as_bytes()), ciphertext)
            .map_err(|_| CryptoError::AuthenticationFailure)
    }
}

impl Default for FileCipher {
    fn default() -> Self {
        Self::new(Arc::new(OsEntropy))
    }
}
