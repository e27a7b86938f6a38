use thiserror::Error;

use crate::forms::validation::ValidationError;

/// Failure talking to the data service: network error, unexpected HTTP
/// status or a `{ "success": false }` envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}{}", .details.as_ref().map(|d| format!(" ({d})")).unwrap_or_default())]
pub struct TransportError {
    pub status: Option<u16>,
    pub message: String,
    pub details: Option<String>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    /// Content rejected before reaching the store.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Stored data violates a value-object constraint.
    #[error("invalid stored value: {0}")]
    TypeConstraint(String),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    #[error("payload serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;
