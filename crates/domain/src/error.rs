use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid phone number: {0}")]
    InvalidPhoneNumber(String),

    #[error("Invalid tag name: {0}")]
    InvalidTagName(String),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Tag already exists: {0}")]
    TagAlreadyExists(String),

    #[error("Old and new tag names are the same: {0}")]
    SameTagName(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Failures reported by external collaborators (roster, transport)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("Collaborator call failed: {0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
