//! Character operation errors.

use charsheet_domain::{CharacterError, DomainError};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur during character operations.
#[derive(Debug, thiserror::Error)]
pub enum CharacterOpError {
    #[error("Character not found: {0}")]
    NotFound(String),
    #[error("Character already exists: {0}")]
    AlreadyExists(String),
    #[error("Unsupported sheet format: {0}")]
    UnsupportedFormat(String),
    #[error("{0}")]
    Rules(#[from] CharacterError),
    #[error("Validation error: {0}")]
    Validation(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl CharacterOpError {
    /// Rule violation behind this error, if any.
    pub fn rule(&self) -> Option<&CharacterError> {
        match self {
            Self::Rules(err) => Some(err),
            _ => None,
        }
    }
}
