//! shop_analytics: a small-business dashboard over a JSON document store.
//!
//! The document holds five collections (products, customers, sales,
//! employees, inventory). [`CollectionRepository`] provides CRUD over them,
//! the [`analytics`] module derives descriptive, predictive and prescriptive
//! reports from a snapshot, and (with the `http` feature) [`http`] serves a
//! JSON API plus server-rendered pages.

pub mod analytics;
mod collection;
pub mod config;
mod repository;
mod store;

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "http")]
pub mod presentation;

pub use collection::{record_id, Collection, Record, RecordExt, Snapshot, UnknownCollection};
pub use config::{Config, ConfigError};
pub use repository::{CollectionRepository, RepositoryError, MAX_RECORDS_PER_COLLECTION};
pub use store::{DocumentStore, InMemoryDocumentStore, JsonFileStore, StoreError};
