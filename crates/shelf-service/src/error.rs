use shelf_store::StoreError;
use shelf_types::Entity;

/// Reasons a service call is rejected.
///
/// Everything except [`ServiceError::Storage`] is decided by the service
/// itself before or between storage calls.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The identifier is zero or negative.
    #[error("invalid id: {0}")]
    InvalidId(i64),

    /// One or more required fields are empty. Carries wire field names.
    #[error("missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// The published date is not `day/month/year` within range.
    #[error("invalid publishedDate: {0:?}")]
    InvalidDate(String),

    /// The publication is not one of the accepted publishers.
    #[error("invalid publication: {0:?}")]
    InvalidPublication(String),

    /// A referenced or addressed record does not exist.
    #[error("{entity} with id {id} not found")]
    EntityNotFound { entity: Entity, id: i64 },

    /// Opaque failure from the storage port, passed through unchanged.
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ServiceError {
    pub fn not_found(entity: Entity, id: i64) -> Self {
        Self::EntityNotFound { entity, id }
    }

    /// `true` for rejections caused by the request itself rather than by
    /// storage.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
