//! Blob storage for certification documents.
//!
//! Narrow interface: store opaque bytes, get back a retrievable
//! locator. Registration persists the certification document through
//! this before any identity row is created.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};

/// Blob store trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist the bytes and return a locator for later retrieval.
    async fn store(&self, bytes: Vec<u8>, content_type: &str) -> AppResult<String>;
}

/// Filesystem-backed blob store.
///
/// Files land under the configured upload directory with a random
/// name; the returned locator is the relative path.
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn store(&self, bytes: Vec<u8>, content_type: &str) -> AppResult<String> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::storage(format!("create upload dir: {}", e)))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension_for(content_type));
        let path = self.root.join(&file_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::storage(format!("write {}: {}", path.display(), e)))?;

        Ok(path.to_string_lossy().into_owned())
    }
}

/// Derive a file extension from a MIME type, e.g. "application/pdf" -> "pdf".
fn extension_for(content_type: &str) -> &str {
    content_type
        .rsplit('/')
        .next()
        .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("bin")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_from_mime_type() {
        assert_eq!(extension_for("application/pdf"), "pdf");
        assert_eq!(extension_for("image/png"), "png");
        assert_eq!(extension_for("not-a-mime"), "bin");
        assert_eq!(extension_for(""), "bin");
    }

    #[tokio::test]
    async fn test_store_writes_file_and_returns_locator() {
        let dir = std::env::temp_dir().join(format!("blob-test-{}", Uuid::new_v4()));
        let store = FsBlobStore::new(&dir);

        let locator = store
            .store(b"certificate bytes".to_vec(), "application/pdf")
            .await
            .unwrap();

        assert!(locator.ends_with(".pdf"));
        let stored = tokio::fs::read(&locator).await.unwrap();
        assert_eq!(stored, b"certificate bytes");

        tokio::fs::remove_dir_all(&dir).await.ok();
    }
}
