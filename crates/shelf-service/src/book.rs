use std::sync::Arc;

use tracing::{debug, warn};

use shelf_store::{AuthorStore, BookStore};
use shelf_types::{Author, Book, Entity};

use crate::error::{ServiceError, ServiceResult};
use crate::validation::{check_id, validate_book};

/// Value of the `includeAuthor` filter that turns on author enrichment.
/// Compared as a string; any other value leaves books unenriched.
pub const INCLUDE_AUTHOR: &str = "true";

/// Business rules for books, including the book→author reference check.
///
/// Mutations run in this order and stop at the first failure:
///
/// 1. id must be positive
/// 2. title, publication and published date must be present
/// 3. published date must be in range
/// 4. publication must be an accepted publisher
/// 5. (update only) the book must exist
/// 6. the referenced author must resolve
///
/// The resolved author is embedded in the record handed to storage and in
/// the response.
#[derive(Clone)]
pub struct BookService {
    books: Arc<dyn BookStore>,
    authors: Arc<dyn AuthorStore>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>, authors: Arc<dyn AuthorStore>) -> Self {
        Self { books, authors }
    }

    /// Create a book referencing an existing author.
    pub async fn post(&self, book: Book) -> ServiceResult<Book> {
        check_id(book.id)
            .and_then(|()| validate_book(&book))
            .inspect_err(|err| warn!(id = book.id, %err, "book create rejected"))?;

        let author = self.resolve_author(book.author_id).await?;
        let created = self.books.create(&book.with_author(author)).await?;
        debug!(id = created.id, author_id = created.author_id, "book created");
        Ok(created)
    }

    /// Fetch a single book. The embedded author is not resolved.
    pub async fn get_by_id(&self, id: i64) -> ServiceResult<Book> {
        check_id(id)?;
        self.ensure_exists(id).await?;

        // The row can vanish between the existence check and the fetch.
        self.books
            .get(id)
            .await?
            .ok_or(ServiceError::not_found(Entity::Book, id))
    }

    /// Replace the book at `id`, re-resolving its author.
    pub async fn update(&self, id: i64, book: Book) -> ServiceResult<Book> {
        check_id(id)
            .and_then(|()| validate_book(&book))
            .inspect_err(|err| warn!(id, %err, "book update rejected"))?;
        self.ensure_exists(id).await?;

        let author = self.resolve_author(book.author_id).await?;
        let updated = self.books.update(id, &book.with_author(author)).await?;
        debug!(id, author_id = updated.author_id, "book updated");
        Ok(updated)
    }

    /// Delete the book at `id`, returning the number of rows removed.
    pub async fn delete(&self, id: i64) -> ServiceResult<u64> {
        check_id(id).inspect_err(|err| warn!(id, %err, "book delete rejected"))?;
        self.ensure_exists(id).await?;

        let rows = self.books.delete(id).await?;
        debug!(id, rows, "book deleted");
        Ok(rows)
    }

    /// List books, optionally filtered by exact title.
    ///
    /// When `include_author` is [`INCLUDE_AUTHOR`] every book gets its author
    /// embedded. A single failed lookup fails the whole call; no partial
    /// list is ever returned.
    pub async fn get_all(&self, title: &str, include_author: &str) -> ServiceResult<Vec<Book>> {
        let mut books = if title.is_empty() {
            self.books.list().await?
        } else {
            self.books.list_by_title(title).await?
        };

        if include_author == INCLUDE_AUTHOR {
            for book in &mut books {
                let author = self
                    .authors
                    .get(book.author_id)
                    .await?
                    .ok_or(ServiceError::not_found(Entity::Author, book.author_id))?;
                book.author = Some(author);
            }
        }

        debug!(title, count = books.len(), include_author, "books listed");
        Ok(books)
    }

    async fn ensure_exists(&self, id: i64) -> ServiceResult<()> {
        if !self.books.exists(id).await? {
            warn!(entity = Entity::Book.as_str(), id, "record not found");
            return Err(ServiceError::not_found(Entity::Book, id));
        }
        Ok(())
    }

    /// Look up the referenced author. Any lookup failure, including a storage
    /// error, is reported as the author being absent.
    async fn resolve_author(&self, author_id: i64) -> ServiceResult<Author> {
        match self.authors.get(author_id).await {
            Ok(Some(author)) => Ok(author),
            Ok(None) => {
                warn!(author_id, "referenced author not found");
                Err(ServiceError::not_found(Entity::Author, author_id))
            }
            Err(err) => {
                warn!(author_id, %err, "referenced author lookup failed");
                Err(ServiceError::not_found(Entity::Author, author_id))
            }
        }
    }
}
