//! Storage abstractions for the tracked CSV log.
//!
//! The pipeline talks to a narrow blob interface; the Drive backend is the
//! production target and the local backend serves development and tests.

pub mod drive;
pub mod local;

use async_trait::async_trait;

use crate::error::Result;

// Re-export for convenience
pub use drive::DriveStorage;
pub use local::LocalStorage;

/// Trait for CSV blob storage backends.
///
/// The backend owns auth and transfer mechanics; callers treat ids as
/// opaque. Upload semantics are expected to be atomic per call, so a failed
/// write leaves no partial destination state behind.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Download a file's bytes. `None` means the file does not exist.
    async fn download(&self, id: &str) -> Result<Option<Vec<u8>>>;

    /// Fetch a file's current display name.
    async fn metadata_name(&self, id: &str) -> Result<String>;

    /// Replace a file's content, keeping `name` as its display name.
    async fn overwrite(&self, id: &str, bytes: Vec<u8>, name: &str) -> Result<()>;

    /// Create a new file, optionally inside a parent folder.
    ///
    /// Returns the id of the created file.
    async fn create(&self, name: &str, bytes: Vec<u8>, folder_id: Option<&str>) -> Result<String>;
}
