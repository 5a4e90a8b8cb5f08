//! # Sealdrop Client
//!
//! Client sessions for sealdrop burn-on-read file sharing.
//!
//! The storage server is untrusted: it receives ciphertext, returns an
//! identifier, and deletes the object on first retrieval. This crate
//! sequences the cryptographic core from `sealdrop-crypto` around that
//! collaborator as two single-use session state machines.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sealdrop_client::{Config, DownloadOrchestrator, FilePayload, StorageClient, UploadOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sealdrop_client::ClientError> {
//!     let config = Config::new("https://drop.example");
//!
//!     // Share a file; the key never leaves this process except in the fragment
//!     let mut upload = UploadOrchestrator::new(StorageClient::new(config.clone())?);
//!     let link = upload.run(FilePayload::new("hello.txt", &b"hi there!!"[..])).await?;
//!     println!("share this (once): {}", link.to_url());
//!
//!     // Elsewhere, with that link
//!     let mut download = DownloadOrchestrator::new(StorageClient::new(config)?);
//!     let file = download.run(&link.to_url()).await?;
//!     assert_eq!(&file.data[..], b"hi there!!");
//!     Ok(())
//! }
//! ```

mod config;
mod download;
mod error;
mod storage;
mod types;
mod upload;

pub use config::Config;
pub use download::{DownloadOrchestrator, DownloadState};
pub use error::{ClientError, Result};
pub use storage::{IV_HEADER, StorageClient};
pub use types::{
    DownloadedObject, EncryptionEnvelope, FilePayload, RecoveredFile, UploadResult,
};
pub use upload::{UploadOrchestrator, UploadState};

// Re-export crypto types callers need at the API surface
pub use sealdrop_crypto::{CryptoError, ShareLink};
