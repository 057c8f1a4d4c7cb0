//! Storage port and backends for the Shelf catalogue.
//!
//! The service layer never talks to a database directly. It holds
//! `Arc<dyn AuthorStore>` and `Arc<dyn BookStore>` handles and issues one
//! storage call at a time; whatever sits behind those traits owns the durable
//! records.
//!
//! # Storage Backends
//!
//! - [`InMemoryAuthorStore`] / [`InMemoryBookStore`] -- `BTreeMap`-based
//!   stores for tests, embedding, and running without a database
//! - [`SqliteAuthorStore`] / [`SqliteBookStore`] -- relational backend over a
//!   shared `sqlx` SQLite pool (see [`sqlite::connect`])
//!
//! # Design Rules
//!
//! 1. Books are persisted without their embedded author; reads return
//!    `author: None`.
//! 2. Create and update hand back the record they were given (with the
//!    addressed id), not a re-read of the row.
//! 3. Deleting a missing row is not an error: it affects zero rows.
//! 4. Backend errors are propagated, never silently ignored.

pub mod error;
pub mod memory;
pub mod sqlite;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use memory::{InMemoryAuthorStore, InMemoryBookStore};
pub use sqlite::{SqliteAuthorStore, SqliteBookStore};
pub use traits::{AuthorStore, BookStore};
