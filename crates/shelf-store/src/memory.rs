use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use shelf_types::{Author, Book, Entity};

use crate::error::{StoreError, StoreResult};
use crate::traits::{AuthorStore, BookStore};

/// A `BTreeMap` keyed by record id behind a `RwLock`.
///
/// Ordered keys give `list()` its id ordering for free.
struct Table<T> {
    rows: RwLock<BTreeMap<i64, T>>,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
        }
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, BTreeMap<i64, T>>> {
        self.rows.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, BTreeMap<i64, T>>> {
        self.rows.write().map_err(|_| StoreError::Poisoned)
    }

    fn len(&self) -> usize {
        self.rows.read().map(|rows| rows.len()).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

/// In-memory author table.
///
/// Intended for tests and for running the server without a database.
pub struct InMemoryAuthorStore {
    table: Table<Author>,
}

impl InMemoryAuthorStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    /// Number of authors currently stored.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryAuthorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorStore for InMemoryAuthorStore {
    async fn create(&self, author: &Author) -> StoreResult<Author> {
        let mut rows = self.table.write()?;
        if rows.contains_key(&author.id) {
            return Err(StoreError::Duplicate {
                entity: Entity::Author,
                id: author.id,
            });
        }
        rows.insert(author.id, author.clone());
        Ok(author.clone())
    }

    async fn update(&self, id: i64, author: &Author) -> StoreResult<Author> {
        let mut rows = self.table.write()?;
        let row = rows.get_mut(&id).ok_or(StoreError::NotFound {
            entity: Entity::Author,
            id,
        })?;
        *row = author.clone().with_id(id);
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let mut rows = self.table.write()?;
        Ok(rows.remove(&id).map_or(0, |_| 1))
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Author>> {
        Ok(self.table.read()?.get(&id).cloned())
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.table.read()?.contains_key(&id))
    }
}

impl std::fmt::Debug for InMemoryAuthorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryAuthorStore")
            .field("author_count", &self.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

/// In-memory book table.
///
/// Rows are stored without their embedded author, exactly like the SQLite
/// backend, so callers see the same read shape from both.
pub struct InMemoryBookStore {
    table: Table<Book>,
}

impl InMemoryBookStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }

    /// Number of books currently stored.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryBookStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn create(&self, book: &Book) -> StoreResult<Book> {
        let mut rows = self.table.write()?;
        if rows.contains_key(&book.id) {
            return Err(StoreError::Duplicate {
                entity: Entity::Book,
                id: book.id,
            });
        }
        rows.insert(book.id, book.without_author());
        Ok(book.clone())
    }

    async fn update(&self, id: i64, book: &Book) -> StoreResult<Book> {
        let mut rows = self.table.write()?;
        let row = rows.get_mut(&id).ok_or(StoreError::NotFound {
            entity: Entity::Book,
            id,
        })?;
        *row = book.without_author().with_id(id);
        Ok(book.clone().with_id(id))
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let mut rows = self.table.write()?;
        Ok(rows.remove(&id).map_or(0, |_| 1))
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Book>> {
        Ok(self.table.read()?.get(&id).cloned())
    }

    async fn list(&self) -> StoreResult<Vec<Book>> {
        Ok(self.table.read()?.values().cloned().collect())
    }

    async fn list_by_title(&self, title: &str) -> StoreResult<Vec<Book>> {
        Ok(self
            .table
            .read()?
            .values()
            .filter(|book| book.title == title)
            .cloned()
            .collect())
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        Ok(self.table.read()?.contains_key(&id))
    }
}

impl std::fmt::Debug for InMemoryBookStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryBookStore")
            .field("book_count", &self.len())
            .finish()
    }
}
