use std::path::PathBuf;

use chrono::Utc;

use crate::config::ASSET_ROUTE_PREFIX;
use crate::utils::gen_random_string;

use super::errors::AssetError;

/// Directory of opaque photo files, addressed by generated references
///
/// A reference is a bare file name of the form
/// `{timestamp_millis}-{random}.{ext}`. Every save draws a fresh
/// timestamp and random suffix, so a name in use is never overwritten.
/// The store knows nothing about which row owns a file.
#[derive(Clone, Debug)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create the storage root if it does not exist yet.
    pub async fn init(&self) -> Result<(), AssetError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AssetError::Storage(format!("Failed to create storage root: {e}")))?;

        tracing::info!("Asset store ready at {}", self.root.display());
        Ok(())
    }

    /// Write `bytes` under a freshly generated name and return the
    /// reference, usable for later retrieval and deletion.
    pub async fn save(&self, bytes: &[u8], extension: &str) -> Result<String, AssetError> {
        let extension = extension.trim_start_matches('.').to_lowercase();
        if extension.is_empty()
            || extension.contains('/')
            || extension.contains('\\')
            || extension.contains("..")
        {
            return Err(AssetError::InvalidReference(format!(
                "extension '{extension}'"
            )));
        }

        let reference = format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            gen_random_string(9)?,
            extension
        );

        let path = self.root.join(&reference);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AssetError::Storage(format!("Failed to write {reference}: {e}")))?;

        tracing::debug!("Saved asset {} ({} bytes)", reference, bytes.len());
        Ok(reference)
    }

    /// Remove the referenced file. An already-absent file counts as
    /// success, so compensation paths can race manual cleanup safely.
    pub async fn delete(&self, reference: &str) -> Result<(), AssetError> {
        let path = self.resolve(reference)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!("Deleted asset {}", reference);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AssetError::Storage(format!(
                "Failed to delete {reference}: {e}"
            ))),
        }
    }

    /// URL path under which the HTTP layer serves this reference. Pure.
    pub fn serving_path(reference: &str) -> String {
        format!("{}/{}", ASSET_ROUTE_PREFIX.as_str(), reference)
    }

    /// Filesystem location of a reference inside the storage root.
    pub fn file_path(&self, reference: &str) -> Result<PathBuf, AssetError> {
        self.resolve(reference)
    }

    /// Whether the referenced file is currently present.
    pub async fn exists(&self, reference: &str) -> bool {
        match self.resolve(reference) {
            Ok(path) => tokio::fs::metadata(path).await.is_ok(),
            Err(_) => false,
        }
    }

    // A reference is a bare file name; anything that could climb out of
    // the storage root is rejected.
    fn resolve(&self, reference: &str) -> Result<PathBuf, AssetError> {
        if reference.is_empty()
            || reference == "."
            || reference == ".."
            || reference.contains('/')
            || reference.contains('\\')
        {
            return Err(AssetError::InvalidReference(reference.to_string()));
        }
        Ok(self.root.join(reference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::test_asset_store;

    #[tokio::test]
    async fn test_save_creates_file_with_extension() {
        let store = test_asset_store().await;

        let reference = store
            .save(b"fake image bytes", "jpg")
            .await
            .expect("Failed to save asset");

        assert!(reference.ends_with(".jpg"));
        assert!(store.exists(&reference).await);

        let path = store.file_path(&reference).expect("Reference should resolve");
        let bytes = tokio::fs::read(path).await.expect("Failed to read back");
        assert_eq!(bytes, b"fake image bytes");
    }

    #[tokio::test]
    async fn test_save_normalizes_extension() {
        let store = test_asset_store().await;

        let reference = store
            .save(b"bytes", ".PNG")
            .await
            .expect("Failed to save asset");

        assert!(reference.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_save_generates_distinct_references() {
        let store = test_asset_store().await;

        let a = store.save(b"one", "png").await.expect("Failed to save");
        let b = store.save(b"two", "png").await.expect("Failed to save");

        assert_ne!(a, b);
        assert!(store.exists(&a).await);
        assert!(store.exists(&b).await);
    }

    #[tokio::test]
    async fn test_save_rejects_extension_with_separator() {
        let store = test_asset_store().await;

        let result = store.save(b"bytes", "png/../../evil").await;
        assert!(matches!(result, Err(AssetError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = test_asset_store().await;

        let reference = store.save(b"bytes", "gif").await.expect("Failed to save");

        store.delete(&reference).await.expect("First delete failed");
        assert!(!store.exists(&reference).await);

        // Deleting an already-absent file succeeds
        store.delete(&reference).await.expect("Second delete failed");
    }

    #[tokio::test]
    async fn test_delete_rejects_traversal_reference() {
        let store = test_asset_store().await;

        let result = store.delete("../outside.jpg").await;
        assert!(matches!(result, Err(AssetError::InvalidReference(_))));

        let result = store.delete("nested/inside.jpg").await;
        assert!(matches!(result, Err(AssetError::InvalidReference(_))));
    }

    #[tokio::test]
    async fn test_serving_path_mapping() {
        let reference = "1700000000000-abc123def456.jpg";
        assert_eq!(
            AssetStore::serving_path(reference),
            format!("{}/{}", ASSET_ROUTE_PREFIX.as_str(), reference)
        );
    }
}
