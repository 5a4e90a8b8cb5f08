//! Client error types
//!
//! Every failure is local-terminal: it moves its session to `Failed` with a
//! categorized, user-safe message, and nothing is silently retried.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, ClientError>;

/// Client errors
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport-level failure (connection refused, timeout, ...)
    #[error("network failure: {0}")]
    Http(#[from] reqwest::Error),

    /// Cryptographic failure
    #[error(transparent)]
    Crypto(#[from] sealdrop_crypto::CryptoError),

    /// Object absent: never existed or already consumed by a prior retrieval
    #[error("file not found: {file_id}")]
    ResourceNotFound { file_id: String },

    /// Non-2xx response from the storage server
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// Response was missing or garbled a required field
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The session already reached a terminal state
    #[error("session already consumed; start a new session")]
    SessionConsumed,
}

impl ClientError {
    /// Short stable category label, used for `Failed` session states
    pub fn category(&self) -> &'static str {
        match self {
            Self::Http(_) => "NetworkFailure",
            Self::Crypto(e) => match e {
                sealdrop_crypto::CryptoError::KeyNotExportable => "KeyNotExportable",
                sealdrop_crypto::CryptoError::InvalidKeyFormat(_) => "InvalidKeyFormat",
                sealdrop_crypto::CryptoError::AuthenticationFailure => "AuthenticationFailure",
                sealdrop_crypto::CryptoError::MissingKey => "MissingKey",
                _ => "CryptoFailure",
            },
            Self::ResourceNotFound { .. } => "ResourceNotFound",
            Self::Server { .. } => "ServerError",
            Self::InvalidResponse(_) => "InvalidResponse",
            Self::SessionConsumed => "SessionConsumed",
        }
    }

    /// Message safe to show a user
    ///
    /// Authentication failures deliberately do not reveal whether the key or
    /// the ciphertext was at fault.
    pub fn user_message(&self) -> String {
        match self {
            Self::Crypto(sealdrop_crypto::CryptoError::AuthenticationFailure) => {
                "the file could not be decrypted".to_string()
            }
            Self::ResourceNotFound { .. } => {
                "the file was not found; it may already have been downloaded".to_string()
            }
            other => other.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sealdrop_crypto::CryptoError;

    #[test]
    fn test_categories() {
        let err = ClientError::Crypto(CryptoError::AuthenticationFailure);
        assert_eq!(err.category(), "AuthenticationFailure");

        let err = ClientError::Server {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.category(), "ServerError");

        let err = ClientError::ResourceNotFound {
            file_id: "abc".to_string(),
        };
        assert_eq!(err.category(), "ResourceNotFound");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_auth_failure_message_reveals_nothing() {
        let msg = ClientError::Crypto(CryptoError::AuthenticationFailure).user_message();
        assert!(!msg.contains("key"));
        assert!(!msg.contains("tag"));
        assert!(!msg.contains("cipher"));
    }
}
