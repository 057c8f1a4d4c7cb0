use async_trait::async_trait;
use shelf_types::{Author, Book};

use crate::error::StoreResult;

/// Persistence for [`Author`] records.
///
/// Implementations must be thread-safe: one instance is shared by every
/// request handled by the server.
#[async_trait]
pub trait AuthorStore: Send + Sync {
    /// Insert a new author and return the record as stored.
    async fn create(&self, author: &Author) -> StoreResult<Author>;

    /// Overwrite the author at `id` with the fields of `author`.
    ///
    /// Returns `StoreError::NotFound` if no row has this id.
    async fn update(&self, id: i64, author: &Author) -> StoreResult<Author>;

    /// Delete the author at `id` and return the number of rows removed.
    async fn delete(&self, id: i64) -> StoreResult<u64>;

    /// Look up an author by id.
    ///
    /// Returns `Ok(None)` if the author does not exist.
    async fn get(&self, id: i64) -> StoreResult<Option<Author>>;

    /// Check whether an author with this id is stored.
    ///
    /// Default implementation calls `get()`. Backends may override with a
    /// cheaper query.
    async fn exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.get(id).await?.is_some())
    }
}

/// Persistence for [`Book`] records.
///
/// Only `author_id` is persisted; the embedded `author` of an incoming
/// record is ignored and every read returns `author: None`.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Insert a new book and return the record it was given.
    async fn create(&self, book: &Book) -> StoreResult<Book>;

    /// Overwrite the book at `id` with the fields of `book`.
    ///
    /// Returns `StoreError::NotFound` if no row has this id.
    async fn update(&self, id: i64, book: &Book) -> StoreResult<Book>;

    /// Delete the book at `id` and return the number of rows removed.
    async fn delete(&self, id: i64) -> StoreResult<u64>;

    /// Fetch a book by id. Returns `Ok(None)` if it does not exist.
    async fn get(&self, id: i64) -> StoreResult<Option<Book>>;

    /// All books, ordered by id.
    async fn list(&self) -> StoreResult<Vec<Book>>;

    /// Books whose title is exactly `title`, ordered by id.
    async fn list_by_title(&self, title: &str) -> StoreResult<Vec<Book>>;

    /// Check whether a book with this id is stored.
    async fn exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.get(id).await?.is_some())
    }
}
