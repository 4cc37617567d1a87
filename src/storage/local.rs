//! Local filesystem storage implementation.
//!
//! Ids are file names under a root directory. Intended for development and
//! tests; production runs use [`DriveStorage`](crate::storage::DriveStorage).

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::storage::BlobStorage;

/// Local filesystem storage backend.
#[derive(Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a file id.
    fn path(&self, id: &str) -> PathBuf {
        self.root_dir.join(id)
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, id: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path(id);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let tmp = path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl BlobStorage for LocalStorage {
    async fn download(&self, id: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path(id)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }

    async fn metadata_name(&self, id: &str) -> Result<String> {
        // The id doubles as the name, whether or not the file exists yet.
        Ok(id.to_string())
    }

    async fn overwrite(&self, id: &str, bytes: Vec<u8>, _name: &str) -> Result<()> {
        // The id is the name here; the display name only matters remotely.
        self.write_bytes(id, &bytes).await?;
        log::info!("Wrote {} bytes to {}", bytes.len(), self.path(id).display());
        Ok(())
    }

    async fn create(&self, name: &str, bytes: Vec<u8>, folder_id: Option<&str>) -> Result<String> {
        let id = match folder_id {
            Some(folder) => format!("{folder}/{name}"),
            None => name.to_string(),
        };
        self.write_bytes(&id, &bytes).await?;
        log::info!("Created {} ({} bytes)", self.path(&id).display(), bytes.len());
        Ok(id)
    }
}
