//! Validation and consistency engine for the Shelf catalogue.
//!
//! Every mutation coming from the delivery layer passes through one of the
//! services here before it reaches storage. A service runs its checks in a
//! fixed order and stops at the first failure; only an accepted request is
//! handed to the storage port.
//!
//! - [`AuthorService`] -- id and required-field checks, existence checks for
//!   update and delete
//! - [`BookService`] -- the same, plus published-date and publication rules,
//!   the book→author reference check, and author enrichment of responses
//!
//! Services hold no state of their own besides their injected stores, so a
//! single instance can be cloned into every request handler.
//!
//! ```rust
//! use std::sync::Arc;
//! use shelf_service::{AuthorService, ServiceError};
//! use shelf_store::InMemoryAuthorStore;
//! use shelf_types::Author;
//!
//! # tokio_test_block(async {
//! let service = AuthorService::new(Arc::new(InMemoryAuthorStore::new()));
//! let err = service.post(Author::new(0, "A", "B", "01/01/1990", "C")).await.unwrap_err();
//! assert!(matches!(err, ServiceError::InvalidId(0)));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod author;
pub mod book;
pub mod error;
pub mod validation;

#[cfg(test)]
mod testing;

pub use author::AuthorService;
pub use book::{BookService, INCLUDE_AUTHOR};
pub use error::{ServiceError, ServiceResult};
