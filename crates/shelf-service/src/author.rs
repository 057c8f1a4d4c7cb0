use std::sync::Arc;

use tracing::{debug, warn};

use shelf_store::AuthorStore;
use shelf_types::{Author, Entity};

use crate::error::{ServiceError, ServiceResult};
use crate::validation::{check_id, validate_author};

/// Business rules for author mutations.
///
/// Checks run in a fixed order and the first failure is returned; storage is
/// only called once every local check has passed.
#[derive(Clone)]
pub struct AuthorService {
    store: Arc<dyn AuthorStore>,
}

impl AuthorService {
    pub fn new(store: Arc<dyn AuthorStore>) -> Self {
        Self { store }
    }

    /// Create an author.
    ///
    /// Rejects non-positive ids and empty required fields; otherwise the
    /// stored record is returned as-is.
    pub async fn post(&self, author: Author) -> ServiceResult<Author> {
        check_id(author.id)
            .and_then(|()| validate_author(&author))
            .inspect_err(|err| warn!(id = author.id, %err, "author create rejected"))?;

        let created = self.store.create(&author).await?;
        debug!(id = created.id, "author created");
        Ok(created)
    }

    /// Replace the author at `id`.
    pub async fn update(&self, id: i64, author: Author) -> ServiceResult<Author> {
        check_id(id)
            .and_then(|()| validate_author(&author))
            .inspect_err(|err| warn!(id, %err, "author update rejected"))?;
        self.ensure_exists(id).await?;

        let updated = self.store.update(id, &author).await?;
        debug!(id, "author updated");
        Ok(updated)
    }

    /// Delete the author at `id`, returning the number of rows removed.
    pub async fn delete(&self, id: i64) -> ServiceResult<u64> {
        check_id(id).inspect_err(|err| warn!(id, %err, "author delete rejected"))?;
        self.ensure_exists(id).await?;

        let rows = self.store.delete(id).await?;
        debug!(id, rows, "author deleted");
        Ok(rows)
    }

    async fn ensure_exists(&self, id: i64) -> ServiceResult<()> {
        if !self.store.exists(id).await? {
            warn!(entity = Entity::Author.as_str(), id, "record not found");
            return Err(ServiceError::not_found(Entity::Author, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingAuthorStore;
    use proptest::prelude::*;

    fn chetan() -> Author {
        Author::new(1, "Chetan", "Bhagat", "06/04/2001", "Chetan")
    }

    fn service() -> (AuthorService, Arc<RecordingAuthorStore>) {
        let store = Arc::new(RecordingAuthorStore::default());
        (AuthorService::new(store.clone()), store)
    }

    fn block_on<F: std::future::Future>(future: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
            .block_on(future)
    }

    // -----------------------------------------------------------------------
    // Post
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn post_stores_valid_author() {
        let (service, store) = service();
        let created = service.post(chetan()).await.unwrap();
        assert_eq!(created, chetan());
        assert_eq!(store.calls(), vec!["create:1"]);
    }

    #[tokio::test]
    async fn post_rejects_missing_fields_before_storage() {
        let (service, store) = service();
        let mut author = chetan();
        author.dob.clear();
        let err = service.post(author).await.unwrap_err();
        assert!(matches!(err, ServiceError::MissingFields(ref f) if f == &vec!["dob"]));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn post_propagates_storage_error() {
        let (service, store) = service();
        store.seed(chetan()).await;
        let err = service.post(chetan()).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Storage(shelf_store::StoreError::Duplicate { id: 1, .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Update
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn update_existing_author() {
        let (service, store) = service();
        store.seed(chetan()).await;

        let changed = Author::new(1, "Ruskin", "Bond", "19/05/1934", "Ruskin");
        let updated = service.update(1, changed.clone()).await.unwrap();
        assert_eq!(updated, changed);
        assert_eq!(store.calls(), vec!["exists:1", "update:1"]);
    }

    #[tokio::test]
    async fn update_missing_author_is_not_found() {
        let (service, store) = service();
        let err = service.update(3, chetan()).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::EntityNotFound {
                entity: Entity::Author,
                id: 3
            }
        ));
        assert_eq!(store.calls(), vec!["exists:3"]);
    }

    #[tokio::test]
    async fn update_checks_fields_before_existence() {
        let (service, store) = service();
        let mut author = chetan();
        author.pen_name.clear();
        author.last_name.clear();
        let err = service.update(1, author).await.unwrap_err();
        assert!(matches!(
            err,
            ServiceError::MissingFields(ref f) if f == &vec!["lastName", "penName"]
        ));
        assert!(store.calls().is_empty());
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn delete_existing_author() {
        let (service, store) = service();
        store.seed(chetan()).await;
        assert_eq!(service.delete(1).await.unwrap(), 1);
        assert_eq!(store.calls(), vec!["exists:1", "delete:1"]);
    }

    #[tokio::test]
    async fn delete_missing_author_skips_storage_delete() {
        let (service, store) = service();
        let err = service.delete(11).await.unwrap_err();
        assert!(matches!(err, ServiceError::EntityNotFound { id: 11, .. }));
        assert_eq!(store.calls(), vec!["exists:11"]);
    }

    proptest! {
        #[test]
        fn non_positive_ids_never_reach_storage(id in i64::MIN..=0) {
            let (service, store) = service();
            block_on(async {
                let post = service.post(chetan().with_id(id)).await;
                let update = service.update(id, chetan()).await;
                let delete = service.delete(id).await;
                prop_assert!(matches!(post, Err(ServiceError::InvalidId(got)) if got == id));
                prop_assert!(matches!(update, Err(ServiceError::InvalidId(got)) if got == id));
                prop_assert!(matches!(delete, Err(ServiceError::InvalidId(got)) if got == id));
                Ok(())
            })?;
            prop_assert!(store.calls().is_empty());
        }

        #[test]
        fn any_empty_required_field_is_rejected(field in 0usize..4) {
            let (service, store) = service();
            let mut author = chetan();
            match field {
                0 => author.first_name.clear(),
                1 => author.last_name.clear(),
                2 => author.dob.clear(),
                _ => author.pen_name.clear(),
            }
            block_on(async {
                let post = service.post(author.clone()).await;
                let update = service.update(1, author).await;
                prop_assert!(matches!(post, Err(ServiceError::MissingFields(_))));
                prop_assert!(matches!(update, Err(ServiceError::MissingFields(_))));
                Ok(())
            })?;
            prop_assert!(store.calls().is_empty());
        }
    }
}
