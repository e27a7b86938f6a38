//! Error conversion glue between layers.
//!
//! The domain and form layers must not depend on service/repository error
//! types, so the `From` impls connecting them live here.

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::{AddCategoryFormError, UpdateCategoryFormError};
use crate::forms::content::{DeleteFormError, SetActiveFormError, UpdateContentFormError};
use crate::repository::RepositoryError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::TypeConstraint(val.to_string())
    }
}

impl From<UpdateContentFormError> for ServiceError {
    fn from(val: UpdateContentFormError) -> Self {
        match val {
            UpdateContentFormError::Content(err) => ServiceError::Validation(err),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

impl From<SetActiveFormError> for ServiceError {
    fn from(val: SetActiveFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<DeleteFormError> for ServiceError {
    fn from(val: DeleteFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<AddCategoryFormError> for ServiceError {
    fn from(val: AddCategoryFormError) -> Self {
        match val {
            AddCategoryFormError::Validation(err) => ServiceError::Validation(err),
        }
    }
}

impl From<UpdateCategoryFormError> for ServiceError {
    fn from(val: UpdateCategoryFormError) -> Self {
        match val {
            UpdateCategoryFormError::Content(err) => ServiceError::Validation(err),
            other => ServiceError::Form(other.to_string()),
        }
    }
}

#[cfg(feature = "server")]
impl From<crate::forms::uploads::UploadError> for ServiceError {
    fn from(val: crate::forms::uploads::UploadError) -> Self {
        use crate::forms::uploads::UploadError;

        match val {
            UploadError::StoreFailed => {
                log::error!("Failed to store uploaded file");
                ServiceError::Internal
            }
            other => ServiceError::Form(other.to_string()),
        }
    }
}
