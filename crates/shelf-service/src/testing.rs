//! Recording storage doubles for service tests.
//!
//! Each double wraps an in-memory store, logs every call it receives as
//! `"<op>:<id>"`, and can be told to fail specific operations.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use shelf_store::{
    AuthorStore, BookStore, InMemoryAuthorStore, InMemoryBookStore, StoreError, StoreResult,
};
use shelf_types::{Author, Book};

fn injected(op: &str) -> StoreError {
    StoreError::Database(format!("injected {op} failure"))
}

#[derive(Default)]
pub struct RecordingAuthorStore {
    inner: InMemoryAuthorStore,
    calls: Mutex<Vec<String>>,
    failing_gets: Mutex<HashSet<i64>>,
}

impl RecordingAuthorStore {
    /// Insert without recording a call.
    pub async fn seed(&self, author: Author) {
        self.inner.create(&author).await.unwrap();
    }

    /// Make `get(id)` return a database error.
    pub fn fail_get(&self, id: i64) {
        self.failing_gets.lock().unwrap().insert(id);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, op: &str, id: i64) {
        self.calls.lock().unwrap().push(format!("{op}:{id}"));
    }
}

#[async_trait]
impl AuthorStore for RecordingAuthorStore {
    async fn create(&self, author: &Author) -> StoreResult<Author> {
        self.record("create", author.id);
        self.inner.create(author).await
    }

    async fn update(&self, id: i64, author: &Author) -> StoreResult<Author> {
        self.record("update", id);
        self.inner.update(id, author).await
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        self.record("delete", id);
        self.inner.delete(id).await
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Author>> {
        self.record("get", id);
        let failing = self.failing_gets.lock().unwrap().contains(&id);
        if failing {
            return Err(injected("get"));
        }
        self.inner.get(id).await
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        self.record("exists", id);
        self.inner.exists(id).await
    }
}

#[derive(Default)]
pub struct RecordingBookStore {
    inner: InMemoryBookStore,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<Book>>,
    fail_lists: Mutex<bool>,
}

impl RecordingBookStore {
    /// Insert without recording a call.
    pub async fn seed(&self, book: Book) {
        self.inner.create(&book).await.unwrap();
    }

    /// Make `list()` and `list_by_title()` return a database error.
    pub fn fail_lists(&self) {
        *self.fail_lists.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Every record handed to `create()`, in call order.
    pub fn created(&self) -> Vec<Book> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, op: &str, id: i64) {
        self.calls.lock().unwrap().push(format!("{op}:{id}"));
    }

    fn lists_fail(&self) -> bool {
        *self.fail_lists.lock().unwrap()
    }
}

#[async_trait]
impl BookStore for RecordingBookStore {
    async fn create(&self, book: &Book) -> StoreResult<Book> {
        self.record("create", book.id);
        self.created.lock().unwrap().push(book.clone());
        self.inner.create(book).await
    }

    async fn update(&self, id: i64, book: &Book) -> StoreResult<Book> {
        self.record("update", id);
        self.inner.update(id, book).await
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        self.record("delete", id);
        self.inner.delete(id).await
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Book>> {
        self.record("get", id);
        self.inner.get(id).await
    }

    async fn list(&self) -> StoreResult<Vec<Book>> {
        self.calls.lock().unwrap().push("list".into());
        if self.lists_fail() {
            return Err(injected("list"));
        }
        self.inner.list().await
    }

    async fn list_by_title(&self, title: &str) -> StoreResult<Vec<Book>> {
        self.calls.lock().unwrap().push(format!("list_by_title:{title}"));
        if self.lists_fail() {
            return Err(injected("list_by_title"));
        }
        self.inner.list_by_title(title).await
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        self.record("exists", id);
        self.inner.exists(id).await
    }
}
