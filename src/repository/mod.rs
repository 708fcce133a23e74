//! Collection access layer - CRUD over one collection of the document.
//!
//! Ids are assigned here (smallest unused positive integer), the per-collection
//! cap is enforced here, and every mutation writes the whole document back
//! through the [`DocumentStore`](crate::store::DocumentStore).

mod collection_repository;
mod error;

pub use collection_repository::{CollectionRepository, MAX_RECORDS_PER_COLLECTION};
pub use error::RepositoryError;
