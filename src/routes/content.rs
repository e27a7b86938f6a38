use actix_web::http::StatusCode;
use actix_web::{Responder, web};
use serde::Deserialize;

use crate::domain::auth::Viewer;
use crate::domain::content::Content;
use crate::domain::types::Page;
use crate::forms::content::{
    DeleteForm, DeleteFormPayload, SetActiveForm, SetActiveFormPayload, UpdateContentForm,
    UpdateContentFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::{authorized, respond};
use crate::services::ServiceError;
use crate::services::content::{
    ListFilter, create_entry as create_entry_service, delete_entry as delete_entry_service,
    list_entries as list_entries_service, set_entry_active as set_entry_active_service,
    update_entry as update_entry_service,
};

#[derive(Deserialize, Debug)]
pub struct ListParams {
    page: Option<Page>,
    featured: Option<bool>,
}

pub async fn list_entries<D: Content>(
    viewer: Viewer,
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let filter = ListFilter {
        page: params.page,
        featured_only: params.featured.unwrap_or(false),
    };
    respond(
        list_entries_service::<D, _>(viewer, filter, repo.get_ref()),
        StatusCode::OK,
    )
}

pub async fn create_entry<D: Content>(
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
    web::Json(content): web::Json<D>,
) -> impl Responder {
    respond(
        create_entry_service(content, viewer, repo.get_ref()),
        StatusCode::CREATED,
    )
}

pub async fn update_entry<D: Content>(
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateContentForm<D>>,
) -> impl Responder {
    let result = authorized(viewer, || {
        UpdateContentFormPayload::try_from(form)
            .map_err(ServiceError::from)
            .and_then(|payload| update_entry_service(payload, viewer, repo.get_ref()))
    });
    respond(result, StatusCode::OK)
}

pub async fn delete_entry<D: Content>(
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
    web::Query(form): web::Query<DeleteForm>,
) -> impl Responder {
    let result = authorized(viewer, || {
        DeleteFormPayload::try_from(form)
            .map_err(ServiceError::from)
            .and_then(|payload| delete_entry_service::<D, _>(payload, viewer, repo.get_ref()))
    });
    respond(result, StatusCode::OK)
}

pub async fn set_entry_active<D: Content>(
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SetActiveForm>,
) -> impl Responder {
    let result = authorized(viewer, || {
        SetActiveFormPayload::try_from(form)
            .map_err(ServiceError::from)
            .and_then(|payload| set_entry_active_service::<D, _>(payload, viewer, repo.get_ref()))
    });
    respond(result, StatusCode::OK)
}
