use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::types::book::Book;

use super::{BookStore, StoreError};

/// An in-memory [`BookStore`] for deterministic tests.
///
/// A poisoned store fails every operation with an I/O fault, which makes
/// the storage-fault responses testable without touching the filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    books: RwLock<Vec<Book>>,
    poisoned: RwLock<bool>,
}

impl MemoryStore {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: RwLock::new(books),
            poisoned: RwLock::new(false),
        }
    }

    /// Makes every subsequent read and write fail.
    pub async fn poison(&self) {
        *self.poisoned.write().await = true;
    }

    async fn fault(&self) -> Result<(), StoreError> {
        if *self.poisoned.read().await {
            return Err(StoreError::Io(std::io::Error::other("Store poisoned")));
        }

        Ok(())
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn read(&self) -> Result<Vec<Book>, StoreError> {
        self.fault().await?;

        Ok(self.books.read().await.clone())
    }

    async fn write(&self, books: &[Book]) -> Result<(), StoreError> {
        self.fault().await?;

        *self.books.write().await = books.to_vec();

        Ok(())
    }
}
