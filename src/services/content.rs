//! Content entry use cases shared by all six entity types.

use chrono::Utc;

use crate::domain::auth::Viewer;
use crate::domain::content::{Content, Record};
use crate::domain::types::{EntityId, Page};
use crate::forms::content::{DeleteFormPayload, SetActiveFormPayload, UpdateContentFormPayload};
use crate::forms::validation::validate_content;
use crate::repository::{ContentListQuery, ContentReader, ContentWriter};

use super::{ServiceError, ServiceResult};

/// Narrowing applied to a public listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListFilter {
    pub page: Option<Page>,
    pub featured_only: bool,
}

/// Administrators see the full collection; everyone else the public subset.
pub fn list_entries<D, R>(viewer: Viewer, filter: ListFilter, repo: &R) -> ServiceResult<Vec<Record<D>>>
where
    D: Content,
    R: ContentReader,
{
    let mut query = if viewer.is_admin() {
        ContentListQuery::all()
    } else {
        ContentListQuery::public()
    };
    if let Some(page) = filter.page {
        query = query.page(page);
    }
    if filter.featured_only {
        query = query.featured();
    }

    repo.list_entries::<D>(&query)
        .map_err(|e| ServiceError::from_repository("list entries", e))
}

pub fn create_entry<D, R>(content: D, viewer: Viewer, repo: &R) -> ServiceResult<Record<D>>
where
    D: Content,
    R: ContentWriter,
{
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let mut content = content;
    content.normalize();
    validate_content(&content).map_err(ServiceError::Validation)?;
    content.prepare_for_save(None, Utc::now().naive_utc());

    let record = repo
        .create_entry(&content)
        .map_err(|e| ServiceError::from_repository("create entry", e))?;
    log::info!("Created {} {}", D::KIND, record.id);
    Ok(record)
}

pub fn update_entry<D, R>(
    payload: UpdateContentFormPayload<D>,
    viewer: Viewer,
    repo: &R,
) -> ServiceResult<Record<D>>
where
    D: Content,
    R: ContentReader + ContentWriter,
{
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let existing = repo
        .get_entry::<D>(&payload.id)
        .map_err(|e| ServiceError::from_repository("load entry", e))?
        .ok_or(ServiceError::NotFound)?;

    let mut content = payload.content;
    content.prepare_for_save(Some(&existing.content), Utc::now().naive_utc());

    repo.update_entry(&payload.id, &content)
        .map_err(|e| ServiceError::from_repository("update entry", e))
}

pub fn delete_entry<D, R>(payload: DeleteFormPayload, viewer: Viewer, repo: &R) -> ServiceResult<()>
where
    D: Content,
    R: ContentWriter,
{
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let id = EntityId::new(payload.id).map_err(|e| ServiceError::Form(e.to_string()))?;
    repo.delete_entry::<D>(&id)
        .map_err(|e| ServiceError::from_repository("delete entry", e))?;
    log::info!("Deleted {} {id}", D::KIND);
    Ok(())
}

pub fn set_entry_active<D, R>(
    payload: SetActiveFormPayload,
    viewer: Viewer,
    repo: &R,
) -> ServiceResult<Record<D>>
where
    D: Content,
    R: ContentWriter,
{
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    repo.set_entry_active::<D>(&payload.id, payload.is_active)
        .map_err(|e| ServiceError::from_repository("change entry status", e))
}
