use std::sync::Arc;

use shelf_service::{AuthorService, BookService};
use shelf_store::{
    sqlite, AuthorStore, BookStore, InMemoryAuthorStore, InMemoryBookStore, SqliteAuthorStore,
    SqliteBookStore,
};

use crate::config::DatabaseConfig;
use crate::error::ServerResult;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub authors: AuthorService,
    pub books: BookService,
}

impl AppState {
    /// Wire both services to the given stores. The book service shares the
    /// author store for reference checks and enrichment.
    pub fn new(authors: Arc<dyn AuthorStore>, books: Arc<dyn BookStore>) -> Self {
        Self {
            authors: AuthorService::new(authors.clone()),
            books: BookService::new(books, authors),
        }
    }

    /// State backed by fresh in-memory tables.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryAuthorStore::new()),
            Arc::new(InMemoryBookStore::new()),
        )
    }

    /// Open the backend described by `config`.
    pub async fn from_config(config: &DatabaseConfig) -> ServerResult<Self> {
        match config {
            DatabaseConfig::Memory => Ok(Self::in_memory()),
            DatabaseConfig::Sqlite { url } => {
                let pool = sqlite::connect(url).await?;
                Ok(Self::new(
                    Arc::new(SqliteAuthorStore::new(pool.clone())),
                    Arc::new(SqliteBookStore::new(pool)),
                ))
            }
        }
    }
}
