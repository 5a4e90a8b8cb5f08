//! Download session state machine
//!
//! Sequences ShareLink -> storage fetch -> key import -> decrypt:
//!
//! ```text
//! Idle -> Downloading -> Decrypting -> Success
//!              |              |
//!              +--> Failed <--+
//! ```
//!
//! The fetch triggers burn-on-read on the server, so a given link works at
//! most once; a second attempt surfaces `ResourceNotFound`. The imported key
//! dies with the session after its single decrypt call.

use crate::{ClientError, Result, StorageClient, types::RecoveredFile};
use sealdrop_crypto::{FileCipher, KeyManager, ShareLink};
use tracing::{debug, instrument};

/// Observable state of a download session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DownloadState {
    /// Waiting for a link
    Idle,
    /// Link parsed; fetch in flight
    Downloading,
    /// Ciphertext in hand; importing the key and decrypting
    Decrypting,
    /// Plaintext recovered
    Success,
    /// Terminal failure
    Failed {
        /// Stable error category (spec taxonomy)
        category: &'static str,
        /// User-safe message; never reveals whether the key or the
        /// ciphertext was at fault
        message: String,
    },
}

/// Drives one share link from URL to recovered plaintext
pub struct DownloadOrchestrator {
    keys: KeyManager,
    cipher: FileCipher,
    storage: StorageClient,
    state: DownloadState,
}

impl DownloadOrchestrator {
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
            state: DownloadState::Idle,
        }
    }

    /// Current session state
    pub fn state(&self) -> &DownloadState {
        &self.state
    }

    /// Run the session to completion
    ///
    /// Consumes the session logically: a second call fails with
    /// [`ClientError::SessionConsumed`].
    #[instrument(skip(self, url))]
    pub async fn run(&mut self, url: &str) -> Result<RecoveredFile> {
        if self.state != DownloadState::Idle {
            return Err(ClientError::SessionConsumed);
        }

        // Idle -> Downloading
        self.state = DownloadState::Downloading;
        let link = match ShareLink::parse(url) {
            Ok(link) => link,
            Err(e) => return Err(self.fail(e.into())),
        };
        let object = match self.storage.download(&link.file_id).await {
            Ok(object) => object,
            Err(e) => return Err(self.fail(e)),
        };
        debug!(filename = %object.filename, size = object.ciphertext.len(), "ciphertext retrieved");

        // Downloading -> Decrypting
        self.state = DownloadState::Decrypting;
        let plaintext = match self.decrypt(&link, &object.ciphertext, &object.iv) {
            Ok(plaintext) => plaintext,
            Err(e) => return Err(self.fail(e)),
        };

        // Decrypting -> Success
        self.state = DownloadState::Success;
        Ok(RecoveredFile {
            name: object.filename,
            data: plaintext.into(),
        })
    }

    fn decrypt(
        &self,
        link: &ShareLink,
        ciphertext: &[u8],
        iv: &sealdrop_crypto::Nonce,
    ) -> Result<Vec<u8>> {
        let key = self.keys.import(&link.key_string)?;
        Ok(self.cipher.decrypt(ciphertext, &key, iv)?)
    }

    fn fail(&mut self, err: ClientError) -> ClientError {
        self.state = DownloadState::Failed {
            category: err.category(),
            message: err.user_message(),
        };
        err
    }
}
