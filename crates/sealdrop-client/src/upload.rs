//! Upload session state machine
//!
//! Sequences KeyManager -> FileCipher -> storage upload -> ShareLink:
//!
//! ```text
//! Idle -> Encrypting -> Uploading -> Done
//!              |            |
//!              +--> Failed <+
//! ```
//!
//! A session is single-use. On any failure the key is dropped (and
//! zeroized); a retry must start a wholly new session, which regenerates the
//! key and re-encrypts — key+IV pairs from a failed attempt are never
//! reused.

use crate::{
    ClientError, Result, StorageClient,
    types::{EncryptionEnvelope, FilePayload},
};
use bytes::Bytes;
use sealdrop_crypto::{FileCipher, KeyManager, ShareLink, SymmetricKey};
use tracing::{debug, instrument};

/// Observable state of an upload session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadState {
    /// Waiting for a payload
    Idle,
    /// Generating the key and encrypting; purely local, no network
    Encrypting,
    /// Transfer request in flight
    Uploading,
    /// Share link produced
    Done,
    /// Terminal failure; the key has been discarded
    Failed {
        /// Stable error category (spec taxonomy)
        category: &'static str,
        /// User-safe message
        message: String,
    },
}

/// Encrypted payload still holding its session key, pre-upload
struct SealedPayload {
    envelope: EncryptionEnvelope,
    key: SymmetricKey,
}

/// Drives one file from plaintext to a shareable link
pub struct UploadOrchestrator {
    keys: KeyManager,
    cipher: FileCipher,
    storage: StorageClient,
    state: UploadState,
}

impl UploadOrchestrator {
    /// Create a session over the given storage client, using OS entropy
    pub fn new(storage: StorageClient) -> Self {
        Self::with_crypto(storage, KeyManager::default(), FileCipher::default())
    }

    /// Create a session with explicit crypto collaborators (test seam)
    pub fn with_crypto(storage: StorageClient, keys: KeyManager, cipher: FileCipher) -> Self {
        Self {
            keys,
            cipher,
            storage,
            state: UploadState::Idle,
        }
    }

    /// Current session state
    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Run the session to completion
    ///
    /// Consumes the session logically: a second call fails with
    /// [`ClientError::SessionConsumed`].
    #[instrument(skip(self, file), fields(filename = %file.name, size = file.data.len()))]
    pub async fn run(&mut self, file: FilePayload) -> Result<ShareLink> {
        if self.state != UploadState::Idle {
            return Err(ClientError::SessionConsumed);
        }

        // Idle -> Encrypting
        self.state = UploadState::Encrypting;
        let sealed = match self.encrypt(&file) {
            Ok(sealed) => sealed,
            Err(e) => return Err(self.fail(e)),
        };

        // Encrypting -> Uploading
        self.state = UploadState::Uploading;
        let uploaded = match self.storage.upload(&sealed.envelope).await {
            Ok(result) => result,
            Err(e) => return Err(self.fail(e)),
        };
        debug!(file_id = %uploaded.file_id, "upload accepted");

        // Uploading -> Done
        let key_string = match self.keys.export(&sealed.key) {
            Ok(s) => s,
            Err(e) => return Err(self.fail(e.into())),
        };
        let link = ShareLink::new(
            self.storage.config().endpoint.clone(),
            uploaded.file_id,
            key_string,
        );
        self.state = UploadState::Done;
        Ok(link)
    }

    fn encrypt(&self, file: &FilePayload) -> Result<SealedPayload> {
        let key = self.keys.generate();
        let (ciphertext, iv) = self.cipher.encrypt(&file.data, &key)?;
        Ok(SealedPayload {
            envelope: EncryptionEnvelope {
                ciphertext: Bytes::from(ciphertext),
                iv,
                filename: file.name.clone(),
                declared_size: file.data.len() as u64,
            },
            key,
        })
    }

    /// Record the terminal state and hand the error back to the caller.
    /// Key material (if any) is dropped with the call frame above.
    fn fail(&mut self, err: ClientError) -> ClientError {
        self.state = UploadState::Failed {
            category: err.category(),
            message: err.user_message(),
        };
        err
    }
}
