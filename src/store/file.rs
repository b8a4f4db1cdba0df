use std::path::PathBuf;

use async_trait::async_trait;

use crate::types::book::Book;

use super::{BookStore, StoreError};

/// A [`BookStore`] backed by a single JSON array file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl BookStore for FileStore {
    #[tracing::instrument(name = "file_store_read", skip_all, fields(path = %self.path.display()))]
    async fn read(&self) -> Result<Vec<Book>, StoreError> {
        let content = match tokio::fs::read(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Books file does not exist yet");

                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let books = serde_json::from_slice(&content)?;

        Ok(books)
    }

    #[tracing::instrument(name = "file_store_write", skip_all, fields(path = %self.path.display(), count = books.len()))]
    async fn write(&self, books: &[Book]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let content = serde_json::to_vec_pretty(books)?;

        tokio::fs::write(&self.path, content).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_book() -> Book {
        Book {
            author: "Hans Christian Andersen".to_string(),
            country: "Denmark".to_string(),
            image_link: "images/fairy-tales.jpg".to_string(),
            language: "Danish".to_string(),
            link: "https://en.wikipedia.org/wiki/Fairy_Tales_Told_for_Children".to_string(),
            pages: 784,
            title: "Fairy tales".to_string(),
            year: 1836,
        }
    }

    #[tokio::test]
    async fn absent_file_reads_as_empty_collection() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path().join("books.json"));

        let books = store.read().await.expect("Read failed");

        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn written_collection_reads_back() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path().join("books.json"));

        store.write(&[a_book()]).await.expect("Write failed");
        let books = store.read().await.expect("Read failed");

        assert_eq!(books, vec![a_book()]);
    }

    #[tokio::test]
    async fn write_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let store = FileStore::new(dir.path().join("source").join("books.json"));

        store.write(&[a_book()]).await.expect("Write failed");
        let books = store.read().await.expect("Read failed");

        assert_eq!(books.len(), 1);
    }

    #[tokio::test]
    async fn malformed_file_is_a_store_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("books.json");
        tokio::fs::write(&path, b"not json").await.expect("Write failed");

        let store = FileStore::new(path);

        assert!(matches!(store.read().await, Err(StoreError::Malformed(_))));
    }
}
