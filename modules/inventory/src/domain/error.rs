use crate::domain::source::FetchError;

/// Domain-level errors for the inventory
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("{0} does not exist")]
    NotFound(String),

    #[error("invalid input: {0}")]
    Validation(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
