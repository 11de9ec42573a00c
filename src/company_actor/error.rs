use thiserror::Error;
use crate::actor_framework::FrameworkError;
use crate::user_actor::UserError;

/// Errors that can occur during company operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CompanyError {
    #[error("Company not found: {0}")]
    NotFound(String),
    #[error("Company already exists: {0}")]
    AlreadyExists(String),
    #[error("Company validation error: {0}")]
    ValidationError(String),
    #[error("Admin user rejected: {0}")]
    AdminRejected(UserError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CompanyError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => Self::NotFound(id),
            FrameworkError::Conflict(what) => Self::AlreadyExists(what),
            other => Self::ActorCommunicationError(other.to_string()),
        }
    }
}
