//! Local-disk [`ObjectStore`] for uploaded images.

use std::path::PathBuf;

use async_trait::async_trait;
use nzwalks_core::error::CoreError;
use nzwalks_core::image::{ObjectStore, StoredReference};

/// Writes uploads to a directory that the router serves at `/images`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn store(
        &self,
        bytes: &[u8],
        file_name: &str,
        extension: &str,
    ) -> Result<StoredReference, CoreError> {
        let stored_name = format!("{file_name}{extension}");
        let path = self.root.join(&stored_name);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CoreError::Internal(format!("create {}: {e}", self.root.display())))?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CoreError::Internal(format!("write {}: {e}", path.display())))?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Stored image");

        Ok(StoredReference {
            url: format!(
                "{}/images/{}",
                self.public_base_url,
                urlencoding::encode(&stored_name)
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path().join("nested"), "https://walks.example.com");

        let stored = store.store(b"png-bytes", "summit", ".png").await.unwrap();

        assert_eq!(stored.url, "https://walks.example.com/images/summit.png");
        let written = std::fs::read(dir.path().join("nested").join("summit.png")).unwrap();
        assert_eq!(written, b"png-bytes");
    }

    #[tokio::test]
    async fn url_encodes_reserved_characters() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalObjectStore::new(dir.path(), "https://walks.example.com");

        let stored = store.store(b"x", "lake #2 view?", ".jpg").await.unwrap();

        assert_eq!(
            stored.url,
            "https://walks.example.com/images/lake%20%232%20view%3F.jpg"
        );
        assert!(dir.path().join("lake #2 view?.jpg").exists());
    }
}
