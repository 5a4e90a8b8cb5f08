//! Share link codec
//!
//! A share link has the format:
//! ```text
//! https://host.example/download/<file-id>#<base64url-key>
//! ```
//!
//! The server-assigned file identifier sits in the path; the key string sits
//! in the URL fragment. Fragments are never transmitted to servers by
//! standard HTTP fetch semantics, which is the sole basis for the
//! zero-knowledge property: the storage server sees `/download/<file-id>`
//! and nothing else.

use crate::{CryptoError, Result};

/// Path segment that precedes the file identifier in a share link
pub const DOWNLOAD_PATH_PREFIX: &str = "/download/";

/// A parsed or freshly composed share link
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareLink {
    /// Base URL of the service (e.g. `https://host.example`)
    pub base_url: String,
    /// Server-assigned file identifier (visible to the server)
    pub file_id: String,
    /// base64url-encoded key string (fragment only, never sent)
    pub key_string: String,
}

impl ShareLink {
    /// Compose a share link from its parts
    pub fn new(
        base_url: impl Into<String>,
        file_id: impl Into<String>,
        key_string: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            file_id: file_id.into(),
            key_string: key_string.into(),
        }
    }

    /// Render the full URL
    pub fn to_url(&self) -> String {
        format!(
            "{}{}{}#{}",
            self.base_url, DOWNLOAD_PATH_PREFIX, self.file_id, self.key_string
        )
    }

    /// Parse a share link URL into its parts
    ///
    /// Fails with [`CryptoError::MissingKey`] when the fragment is empty or
    /// absent, and [`CryptoError::InvalidLink`] when the download path
    /// segment is missing.
    pub fn parse(url: &str) -> Result<Self> {
        let (base, fragment) = match url.split_once('#') {
            Some((base, fragment)) if !fragment.is_empty() => (base, fragment),
            _ => return Err(CryptoError::MissingKey),
        };

        let idx = base.find(DOWNLOAD_PATH_PREFIX).ok_or_else(|| {
            CryptoError::InvalidLink(format!(
                "link must contain path prefix {DOWNLOAD_PATH_PREFIX}"
            ))
        })?;
        let base_url = base[..idx].to_string();
        let file_id = base[idx + DOWNLOAD_PATH_PREFIX.len()..].to_string();
        if file_id.is_empty() {
            return Err(CryptoError::InvalidLink(
                "missing file identifier".to_string(),
            ));
        }

        Ok(Self {
            base_url,
            file_id,
            key_string: fragment.to_string(),
        })
    }
}
