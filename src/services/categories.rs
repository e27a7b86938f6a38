use crate::domain::auth::Viewer;
use crate::domain::category::Category;
use crate::domain::types::{CategoryId, CategoryKind};
use crate::forms::categories::{AddCategoryFormPayload, UpdateCategoryFormPayload};
use crate::forms::content::{DeleteFormPayload, SetActiveFormPayload};
use crate::repository::{CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

/// Categories of one kind. Anonymous callers only see active ones.
pub fn show_categories<R>(kind: CategoryKind, viewer: Viewer, repo: &R) -> ServiceResult<Vec<Category>>
where
    R: CategoryReader,
{
    let mut categories = repo
        .list_categories(kind)
        .map_err(|e| ServiceError::from_repository("list categories", e))?;
    if !viewer.is_admin() {
        categories.retain(|c| c.is_active);
    }
    Ok(categories)
}

pub fn add_category<R>(payload: AddCategoryFormPayload, viewer: Viewer, repo: &R) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let category = repo
        .create_category(&payload.category)
        .map_err(|e| ServiceError::from_repository("create category", e))?;
    log::info!("Created {} category {}", category.kind, category.id);
    Ok(category)
}

pub fn update_category<R>(
    payload: UpdateCategoryFormPayload,
    viewer: Viewer,
    repo: &R,
) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    repo.update_category(&payload.id, &payload.category)
        .map_err(|e| ServiceError::from_repository("update category", e))
}

/// Removes the category only from the `kind` collection it was addressed
/// through. Entries keep referring to the deleted id.
pub fn delete_category<R>(
    kind: CategoryKind,
    payload: DeleteFormPayload,
    viewer: Viewer,
    repo: &R,
) -> ServiceResult<()>
where
    R: CategoryWriter,
{
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let id = CategoryId::new(payload.id).map_err(|e| ServiceError::Form(e.to_string()))?;

    repo.delete_category(kind, &id)
        .map_err(|e| ServiceError::from_repository("delete category", e))?;
    log::info!("Deleted {kind} category {id}");
    Ok(())
}

pub fn set_category_active<R>(
    kind: CategoryKind,
    payload: SetActiveFormPayload,
    viewer: Viewer,
    repo: &R,
) -> ServiceResult<Category>
where
    R: CategoryWriter,
{
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let id = CategoryId::new(payload.id.as_str()).map_err(|e| ServiceError::Form(e.to_string()))?;

    repo.set_category_active(kind, &id, payload.is_active)
        .map_err(|e| ServiceError::from_repository("change category status", e))
}
