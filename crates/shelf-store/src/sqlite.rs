//! SQLite backend over a shared `sqlx` pool.
//!
//! Both stores borrow the same [`SqlitePool`]; [`connect`] opens it and makes
//! sure the two tables exist. There is no migration machinery beyond
//! `CREATE TABLE IF NOT EXISTS`.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info, warn};

use shelf_types::{Author, Book, Entity};

use crate::error::{StoreError, StoreResult};
use crate::traits::{AuthorStore, BookStore};

const CREATE_AUTHOR_TABLE: &str = "CREATE TABLE IF NOT EXISTS author (
    author_id  INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name  TEXT NOT NULL,
    dob        TEXT NOT NULL,
    pen_name   TEXT NOT NULL
)";

const CREATE_BOOK_TABLE: &str = "CREATE TABLE IF NOT EXISTS book (
    book_id        INTEGER PRIMARY KEY,
    title          TEXT NOT NULL,
    author_id      INTEGER NOT NULL,
    publication    TEXT NOT NULL,
    published_date TEXT NOT NULL
)";

type AuthorRow = (i64, String, String, String, String);
type BookRow = (i64, String, i64, String, String);

/// Open a pool for `url` (e.g. `sqlite://shelf.db` or `sqlite::memory:`) and
/// create the tables if they are missing.
///
/// An in-memory database lives only as long as its connection, so for
/// `:memory:` URLs the pool is pinned to a single connection that is never
/// recycled.
pub async fn connect(url: &str) -> StoreResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
    let mut pool_options = SqlitePoolOptions::new();
    if url.contains(":memory:") {
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }
    let pool = pool_options.connect_with(options).await?;
    ensure_schema(&pool).await?;
    info!(url, "sqlite store ready");
    Ok(pool)
}

/// Create the `author` and `book` tables if they do not exist yet.
pub async fn ensure_schema(pool: &SqlitePool) -> StoreResult<()> {
    sqlx::query(CREATE_AUTHOR_TABLE).execute(pool).await?;
    sqlx::query(CREATE_BOOK_TABLE).execute(pool).await?;
    Ok(())
}

/// Map a driver error, turning primary-key collisions into `Duplicate`.
fn insert_error(err: sqlx::Error, entity: Entity, id: i64) -> StoreError {
    let unique = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if unique {
        warn!(entity = entity.as_str(), id, "duplicate key on insert");
        StoreError::Duplicate { entity, id }
    } else {
        StoreError::from(err)
    }
}

fn author_from_row((id, first_name, last_name, dob, pen_name): AuthorRow) -> Author {
    Author {
        id,
        first_name,
        last_name,
        dob,
        pen_name,
    }
}

fn book_from_row((id, title, author_id, publication, published_date): BookRow) -> Book {
    Book {
        id,
        author_id,
        author: None,
        title,
        publication,
        published_date,
    }
}

// ---------------------------------------------------------------------------
// Authors
// ---------------------------------------------------------------------------

/// Author table in a SQLite database.
#[derive(Clone, Debug)]
pub struct SqliteAuthorStore {
    pool: SqlitePool,
}

impl SqliteAuthorStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorStore for SqliteAuthorStore {
    async fn create(&self, author: &Author) -> StoreResult<Author> {
        sqlx::query(
            "INSERT INTO author (author_id, first_name, last_name, dob, pen_name) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(author.id)
        .bind(author.first_name.as_str())
        .bind(author.last_name.as_str())
        .bind(author.dob.as_str())
        .bind(author.pen_name.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, Entity::Author, author.id))?;
        debug!(id = author.id, "author row inserted");
        Ok(author.clone())
    }

    async fn update(&self, id: i64, author: &Author) -> StoreResult<Author> {
        let result = sqlx::query(
            "UPDATE author SET first_name = ?, last_name = ?, dob = ?, pen_name = ? \
             WHERE author_id = ?",
        )
        .bind(author.first_name.as_str())
        .bind(author.last_name.as_str())
        .bind(author.dob.as_str())
        .bind(author.pen_name.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: Entity::Author,
                id,
            });
        }
        Ok(author.clone().with_id(id))
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM author WHERE author_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Author>> {
        let row = sqlx::query_as::<_, AuthorRow>(
            "SELECT author_id, first_name, last_name, dob, pen_name \
             FROM author WHERE author_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(author_from_row))
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM author WHERE author_id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

/// Book table in a SQLite database.
#[derive(Clone, Debug)]
pub struct SqliteBookStore {
    pool: SqlitePool,
}

impl SqliteBookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookStore for SqliteBookStore {
    async fn create(&self, book: &Book) -> StoreResult<Book> {
        sqlx::query(
            "INSERT INTO book (book_id, title, author_id, publication, published_date) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(book.id)
        .bind(book.title.as_str())
        .bind(book.author_id)
        .bind(book.publication.as_str())
        .bind(book.published_date.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| insert_error(e, Entity::Book, book.id))?;
        debug!(id = book.id, author_id = book.author_id, "book row inserted");
        Ok(book.clone())
    }

    async fn update(&self, id: i64, book: &Book) -> StoreResult<Book> {
        let result = sqlx::query(
            "UPDATE book SET title = ?, author_id = ?, publication = ?, published_date = ? \
             WHERE book_id = ?",
        )
        .bind(book.title.as_str())
        .bind(book.author_id)
        .bind(book.publication.as_str())
        .bind(book.published_date.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: Entity::Book,
                id,
            });
        }
        Ok(book.clone().with_id(id))
    }

    async fn delete(&self, id: i64) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM book WHERE book_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn get(&self, id: i64) -> StoreResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(
            "SELECT book_id, title, author_id, publication, published_date \
             FROM book WHERE book_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(book_from_row))
    }

    async fn list(&self) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            "SELECT book_id, title, author_id, publication, published_date \
             FROM book ORDER BY book_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(book_from_row).collect())
    }

    async fn list_by_title(&self, title: &str) -> StoreResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(
            "SELECT book_id, title, author_id, publication, published_date \
             FROM book WHERE title = ? ORDER BY book_id",
        )
        .bind(title)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(book_from_row).collect())
    }

    async fn exists(&self, id: i64) -> StoreResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT 1 FROM book WHERE book_id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
}
