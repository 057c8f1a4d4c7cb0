use shelf_types::Entity;

/// Errors from storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The addressed row does not exist.
    #[error("{entity} {id} not found in store")]
    NotFound { entity: Entity, id: i64 },

    /// A row with this primary key already exists.
    #[error("{entity} {id} already exists")]
    Duplicate { entity: Entity, id: i64 },

    /// Any failure reported by the database driver (connectivity, constraint,
    /// decoding).
    #[error("database error: {0}")]
    Database(String),

    /// An in-memory store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    Poisoned,
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
