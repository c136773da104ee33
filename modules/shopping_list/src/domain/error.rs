use thiserror::Error;
use uuid::Uuid;

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Item not found: {id}")]
    ItemNotFound { id: Uuid },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn item_not_found(id: Uuid) -> Self {
        Self::ItemNotFound { id }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
