//! Image file storage.
//!
//! Uploaded files land in a single directory with uuid-prefixed names and
//! are served back via `ServeDir` under `/uploads`. Writes are not atomic
//! with the database insert: a failure between the two leaves either an
//! orphaned file or a rowless path. That gap is accepted; there is no
//! compensating cleanup.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Errors from image storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failure.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Stores uploaded images on the local filesystem.
#[derive(Debug, Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory uploads are written to.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write an uploaded file, returning the stored filename.
    ///
    /// The name is a fresh uuid with the original extension preserved, so
    /// concurrent uploads of identically-named files never collide.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the write fails.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let filename = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .map_or_else(
                || Uuid::new_v4().to_string(),
                |ext| format!("{}.{ext}", Uuid::new_v4()),
            );

        tokio::fs::write(self.root.join(&filename), bytes).await?;

        Ok(filename)
    }

    /// Remove a stored file by its filename.
    ///
    /// A missing file is tolerated: the row is already gone and the goal is
    /// a best-effort unlink.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` for failures other than `NotFound`.
    pub async fn remove(&self, filename: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.root.join(filename)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> ImageStore {
        let dir = std::env::temp_dir().join(format!("haven-store-{}", Uuid::new_v4()));
        ImageStore::new(dir).expect("create store")
    }

    #[tokio::test]
    async fn test_save_preserves_extension() {
        let store = temp_store();
        let name = store.save("photo.png", b"fake png bytes").await.expect("save");

        assert!(name.ends_with(".png"));
        let on_disk = tokio::fs::read(store.root().join(&name)).await.expect("read back");
        assert_eq!(on_disk, b"fake png bytes");
    }

    #[tokio::test]
    async fn test_save_without_extension() {
        let store = temp_store();
        let name = store.save("noext", b"data").await.expect("save");
        assert!(!name.contains('.'));
    }

    #[tokio::test]
    async fn test_remove_existing_and_missing() {
        let store = temp_store();
        let name = store.save("a.jpg", b"bytes").await.expect("save");

        store.remove(&name).await.expect("remove existing");
        assert!(!store.root().join(&name).exists());

        // Second removal is a no-op, not an error.
        store.remove(&name).await.expect("remove missing");
    }

    #[tokio::test]
    async fn test_identical_names_do_not_collide() {
        let store = temp_store();
        let a = store.save("photo.jpg", b"one").await.expect("save");
        let b = store.save("photo.jpg", b"two").await.expect("save");
        assert_ne!(a, b);
    }
}
