pub mod categories;
pub mod content;
pub mod errors;
#[cfg(feature = "server")]
pub mod media;

pub use errors::{ServiceError, ServiceResult};

use crate::domain::auth::Viewer;

/// Confirms the caller presented an administrator credential.
pub fn verify_credential(viewer: Viewer) -> ServiceResult<()> {
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }
    Ok(())
}
