//! Google Drive storage implementation.
//!
//! Thin calls over the Drive v3 REST API with a bearer access token. Token
//! acquisition and refresh are the operator's concern; uploads rely on the
//! API's atomic per-call semantics.

use reqwest::{Client, Response, StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::storage::BlobStorage;

const API_BASE: &str = "https://www.googleapis.com/drive/v3";
const UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";

/// Environment variable holding the OAuth access token.
pub const TOKEN_ENV: &str = "DRIVE_ACCESS_TOKEN";

const CSV_MIME: &str = "text/csv";

/// Google Drive storage backend.
pub struct DriveStorage {
    client: Client,
    token: String,
}

/// Subset of Drive file metadata we read back.
#[derive(Debug, Deserialize)]
struct FileMetadata {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
}

/// Metadata body for file creation.
#[derive(Serialize)]
struct CreateRequest<'a> {
    name: &'a str,
    #[serde(rename = "mimeType")]
    mime_type: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parents: Option<Vec<&'a str>>,
}

impl DriveStorage {
    /// Create a new Drive storage instance.
    pub fn new(client: Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
        }
    }

    /// Create Drive storage from environment configuration.
    pub fn from_env(client: Client) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV)
            .map_err(|_| AppError::config(format!("{TOKEN_ENV} is not set")))?;
        Ok(Self::new(client, token))
    }

    /// Turn a non-success response into a Drive error with status and body.
    async fn check(response: Response, context: &str) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Drive(format!("{context}: {status}: {body}")))
    }

    /// Upload bytes as a file's content via a media upload.
    async fn upload_media(&self, id: &str, bytes: Vec<u8>) -> Result<()> {
        let response = self
            .client
            .patch(format!("{UPLOAD_BASE}/files/{id}"))
            .query(&[("uploadType", "media")])
            .bearer_auth(&self.token)
            .header(header::CONTENT_TYPE, CSV_MIME)
            .body(bytes)
            .send()
            .await?;
        Self::check(response, "media upload").await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl BlobStorage for DriveStorage {
    async fn download(&self, id: &str) -> Result<Option<Vec<u8>>> {
        let response = self
            .client
            .get(format!("{API_BASE}/files/{id}"))
            .query(&[("alt", "media")])
            .bearer_auth(&self.token)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            log::info!("No existing Drive file {id}");
            return Ok(None);
        }

        let response = Self::check(response, "download").await?;
        Ok(Some(response.bytes().await?.to_vec()))
    }

    async fn metadata_name(&self, id: &str) -> Result<String> {
        let response = self
            .client
            .get(format!("{API_BASE}/files/{id}"))
            .query(&[("fields", "name")])
            .bearer_auth(&self.token)
            .send()
            .await?;

        let response = Self::check(response, "metadata").await?;
        let metadata: FileMetadata = response.json().await?;
        Ok(metadata.name)
    }

    async fn overwrite(&self, id: &str, bytes: Vec<u8>, name: &str) -> Result<()> {
        let size = bytes.len();
        self.upload_media(id, bytes).await?;

        // Re-assert the display name so the media update cannot drop it.
        let response = self
            .client
            .patch(format!("{API_BASE}/files/{id}"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "name": name }))
            .send()
            .await?;
        Self::check(response, "rename").await?;

        log::info!("Wrote {size} bytes to Drive file {id} ({name})");
        Ok(())
    }

    async fn create(&self, name: &str, bytes: Vec<u8>, folder_id: Option<&str>) -> Result<String> {
        let metadata = CreateRequest {
            name,
            mime_type: CSV_MIME,
            parents: folder_id.map(|f| vec![f]),
        };

        let response = self
            .client
            .post(format!("{API_BASE}/files"))
            .bearer_auth(&self.token)
            .json(&metadata)
            .send()
            .await?;
        let response = Self::check(response, "create").await?;
        let created: FileMetadata = response.json().await?;

        if created.id.is_empty() {
            return Err(AppError::Drive(format!(
                "create returned no file id for {name}"
            )));
        }

        let size = bytes.len();
        self.upload_media(&created.id, bytes).await?;

        log::info!("Created Drive file {} ({name}, {size} bytes)", created.id);
        Ok(created.id)
    }
}
