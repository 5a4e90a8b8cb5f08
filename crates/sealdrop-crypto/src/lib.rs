//! # Sealdrop Crypto
//!
//! Cryptographic core for sealdrop burn-on-read file sharing.
//!
//! This crate provides:
//! - **Key management**: per-transfer 256-bit AES-GCM keys with explicit
//!   export/encrypt/decrypt capability flags
//! - **File encryption**: one-shot AES-256-GCM authenticated encryption
//! - **Share links**: URL composition and parsing with the key confined to
//!   the fragment
//!
//! ## Security Model
//!
//! The storage server never observes the key or the plaintext:
//! - All encryption happens client-side
//! - The key travels only in the URL fragment, which browsers and HTTP
//!   clients never transmit
//! - A key lives for exactly one session and is zeroized on drop
//!
//! ## Example
//!
//! ```rust
//! use sealdrop_crypto::{FileCipher, KeyManager, ShareLink};
//!
//! let keys = KeyManager::default();
//! let cipher = FileCipher::default();
//!
//! let key = keys.generate();
//! let (ciphertext, iv) = cipher.encrypt(b"attack at dawn", &key)?;
//!
//! let link = ShareLink::new("https://host.example", "file-id", keys.export(&key)?);
//!
//! let parsed = ShareLink::parse(&link.to_url())?;
//! let key = keys.import(&parsed.key_string)?;
//! let plaintext = cipher.decrypt(&ciphertext, &key, &iv)?;
//! assert_eq!(plaintext, b"attack at dawn");
//! # Ok::<(), sealdrop_crypto::CryptoError>(())
//! ```

pub mod cipher;
pub mod entropy;
pub mod error;
pub mod keys;
pub mod link;

pub use cipher::{FileCipher, Nonce, TAG_SIZE};
pub use entropy::{EntropySource, OsEntropy};
pub use error::{CryptoError, Result};
pub use keys::{KEY_SIZE, KeyManager, NONCE_SIZE, SymmetricKey};
pub use link::{DOWNLOAD_PATH_PREFIX, ShareLink};
