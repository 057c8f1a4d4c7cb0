//! Entity records for the Shelf catalogue service.
//!
//! This crate provides the plain data holders exchanged between the HTTP
//! delivery layer, the validation engine, and the storage backends. Every
//! other Shelf crate depends on `shelf-types`.
//!
//! # Key Types
//!
//! - [`Author`] — a writer, identified by a positive integer id
//! - [`Book`] — a title referencing an [`Author`] by id, optionally carrying
//!   a denormalized copy of that author
//! - [`Entity`] — which kind of record an error or log line refers to

pub mod author;
pub mod book;
pub mod entity;

pub use author::Author;
pub use book::Book;
pub use entity::Entity;
