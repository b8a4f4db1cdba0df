use async_trait::async_trait;

use crate::types::book::Book;

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to access the book collection: {0}")]
    Io(#[from] std::io::Error),
    #[error("The book collection is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The persistence seam of the catalog.
///
/// Every mutation is read-all/modify/write-all. There is no locking around
/// that cycle, so two concurrent mutations race and the last writer wins.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Loads the full collection. An absent resource is an empty collection,
    /// unreadable or malformed content is a [`StoreError`].
    async fn read(&self) -> Result<Vec<Book>, StoreError>;

    /// Replaces the stored collection entirely.
    async fn write(&self, books: &[Book]) -> Result<(), StoreError>;
}

/// Shared handles delegate, which lets tests keep a handle to a store that
/// was injected into the server state.
#[async_trait]
impl<T: BookStore + ?Sized> BookStore for std::sync::Arc<T> {
    async fn read(&self) -> Result<Vec<Book>, StoreError> {
        (**self).read().await
    }

    async fn write(&self, books: &[Book]) -> Result<(), StoreError> {
        (**self).write(books).await
    }
}
