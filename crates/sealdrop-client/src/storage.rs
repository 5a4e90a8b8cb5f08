//! HTTP storage collaborator
//!
//! Thin client for the untrusted storage service. It only ever sees
//! ciphertext, the public IV, and the filename; the key stays in the URL
//! fragment on the other side of the confidentiality boundary.
//!
//! Wire contract:
//! - `POST /api/upload` — multipart form with a `file` part (ciphertext,
//!   filename suffixed `.encrypted`) and an `iv` text part (comma-separated
//!   decimal bytes); returns `{"id": "..."}` on success.
//! - `GET /api/download/{id}` — ciphertext body; IV in the `x-iv` header;
//!   filename in `Content-Disposition`. The object is deleted server-side
//!   upon this retrieval, so a second fetch returns 404.

use crate::{
    ClientError, Config, Result,
    types::{DownloadedObject, EncryptionEnvelope, UploadResult},
};
use reqwest::{Client, StatusCode, header, multipart};
use sealdrop_crypto::Nonce;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Response header carrying the IV as a comma-separated byte list
pub const IV_HEADER: &str = "x-iv";

/// Suffix the server appends to stored filenames
const ENCRYPTED_SUFFIX: &str = ".encrypted";

#[derive(Debug, Deserialize)]
struct UploadResponse {
    id: String,
}

/// Storage service client
pub struct StorageClient {
    config: Config,
    http: Client,
}

impl StorageClient {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Ok(agent) = config.user_agent.parse() {
            headers.insert(header::USER_AGENT, agent);
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Http)?;

        Ok(Self { config, http })
    }

    /// Create with endpoint URL
    pub fn with_endpoint(endpoint: &str) -> Result<Self> {
        Self::new(Config::new(endpoint))
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Submit an encrypted envelope; returns the server-assigned identifier
    #[instrument(skip(self, envelope), fields(filename = %envelope.filename, size = envelope.ciphertext.len()))]
    pub async fn upload(&self, envelope: &EncryptionEnvelope) -> Result<UploadResult> {
        let url = format!("{}/api/upload", self.config.endpoint);

        let file_part = multipart::Part::bytes(envelope.ciphertext.to_vec())
            .file_name(format!("{}{}", envelope.filename, ENCRYPTED_SUFFIX))
            .mime_str("application/octet-stream")
            .map_err(ClientError::Http)?;
        let form = multipart::Form::new()
            .part("file", file_part)
            .text("iv", envelope.iv.to_byte_list());

        debug!("uploading ciphertext to {}", url);
        let response = self.http.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("upload body: {e}")))?;
        Ok(UploadResult { file_id: body.id })
    }

    /// Fetch the ciphertext for a file identifier
    ///
    /// This triggers burn-on-read server-side: the client treats the object
    /// as consumed as soon as a success status is received.
    #[instrument(skip(self))]
    pub async fn download(&self, file_id: &str) -> Result<DownloadedObject> {
        let url = format!("{}/api/download/{}", self.config.endpoint, file_id);

        debug!("fetching ciphertext from {}", url);
        let response = self.http.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::ResourceNotFound {
                file_id: file_id.to_string(),
            });
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let iv_header = response
            .headers()
            .get(IV_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ClientError::InvalidResponse(format!("missing {IV_HEADER} header")))?;
        let iv = Nonce::from_byte_list(iv_header)
            .map_err(|e| ClientError::InvalidResponse(format!("bad {IV_HEADER} header: {e}")))?;

        let filename = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_disposition_filename)
            .unwrap_or_else(|| "downloaded_file".to_string());

        let ciphertext = response.bytes().await?;

        Ok(DownloadedObject {
            ciphertext,
            iv,
            filename,
        })
    }
}

/// Extract the filename from a content-disposition header, stripping the
/// server's `.encrypted` suffix
fn parse_disposition_filename(disposition: &str) -> Option<String> {
    let (_, rest) = disposition.split_once("filename=\"")?;
    let (name, _) = rest.split_once('"')?;
    let name = name.strip_suffix(ENCRYPTED_SUFFIX).unwrap_or(name);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}
