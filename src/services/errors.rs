use thiserror::Error;

use crate::forms::validation::ValidationError;
use crate::repository::RepositoryError;

/// Generic error type used by service layer functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The caller is not authorized to perform the operation.
    #[error("unauthorized")]
    Unauthorized,
    /// Requested resource was not found.
    #[error("not found")]
    NotFound,
    /// Submitted content is incomplete or invalid.
    #[error(transparent)]
    Validation(ValidationError),
    /// The request body could not be interpreted.
    #[error("invalid request: {0}")]
    Form(String),
    /// An unexpected internal error occurred.
    #[error("internal error")]
    Internal,
}

/// Convenient alias for results returned from service functions.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Map a repository failure, logging anything the caller cannot act on.
    pub(crate) fn from_repository(action: &str, error: RepositoryError) -> Self {
        match error {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            RepositoryError::Validation(err) => ServiceError::Validation(err),
            other => {
                log::error!("Failed to {action}: {other}");
                ServiceError::Internal
            }
        }
    }
}
