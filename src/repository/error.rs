use std::fmt;

use crate::collection::Collection;
use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    NotFound {
        collection: Collection,
        id: i64,
    },
    CapacityExceeded {
        collection: Collection,
        limit: usize,
    },
    LockPoisoned(&'static str),
    Store(StoreError),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::NotFound { collection, id } => {
                write!(f, "No record found in {} with id {}", collection, id)
            }
            RepositoryError::CapacityExceeded { collection, limit } => write!(
                f,
                "Cannot add more than {} records to {}. Delete a record first.",
                limit, collection
            ),
            RepositoryError::LockPoisoned(operation) => {
                write!(f, "repository lock poisoned during {}", operation)
            }
            RepositoryError::Store(err) => write!(f, "store error: {}", err),
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepositoryError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        RepositoryError::Store(err)
    }
}
