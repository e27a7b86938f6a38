use actix_web::http::StatusCode;
use actix_web::{Responder, web};

use crate::domain::auth::Viewer;
use crate::domain::types::CategoryKind;
use crate::forms::categories::{AddCategoryForm, UpdateCategoryForm};
use crate::forms::content::{DeleteForm, DeleteFormPayload, SetActiveForm, SetActiveFormPayload};
use crate::repository::DieselRepository;
use crate::routes::{authorized, respond};
use crate::services::ServiceError;
use crate::services::categories::{
    add_category as add_category_service, delete_category as delete_category_service,
    set_category_active as set_category_active_service,
    show_categories as show_categories_service, update_category as update_category_service,
};

// Each category collection registers its `CategoryKind` as resource data.

pub async fn show_categories(
    viewer: Viewer,
    kind: web::Data<CategoryKind>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    respond(
        show_categories_service(**kind, viewer, repo.get_ref()),
        StatusCode::OK,
    )
}

pub async fn add_category(
    viewer: Viewer,
    kind: web::Data<CategoryKind>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<AddCategoryForm>,
) -> impl Responder {
    let result = authorized(viewer, || {
        form.into_payload(**kind)
            .map_err(ServiceError::from)
            .and_then(|payload| add_category_service(payload, viewer, repo.get_ref()))
    });
    respond(result, StatusCode::CREATED)
}

pub async fn update_category(
    viewer: Viewer,
    kind: web::Data<CategoryKind>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<UpdateCategoryForm>,
) -> impl Responder {
    let result = authorized(viewer, || {
        form.into_payload(**kind)
            .map_err(ServiceError::from)
            .and_then(|payload| update_category_service(payload, viewer, repo.get_ref()))
    });
    respond(result, StatusCode::OK)
}

pub async fn delete_category(
    viewer: Viewer,
    kind: web::Data<CategoryKind>,
    repo: web::Data<DieselRepository>,
    web::Query(form): web::Query<DeleteForm>,
) -> impl Responder {
    let result = authorized(viewer, || {
        DeleteFormPayload::try_from(form)
            .map_err(ServiceError::from)
            .and_then(|payload| delete_category_service(**kind, payload, viewer, repo.get_ref()))
    });
    respond(result, StatusCode::OK)
}

pub async fn set_category_active(
    viewer: Viewer,
    kind: web::Data<CategoryKind>,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<SetActiveForm>,
) -> impl Responder {
    let result = authorized(viewer, || {
        SetActiveFormPayload::try_from(form)
            .map_err(ServiceError::from)
            .and_then(|payload| {
                set_category_active_service(**kind, payload, viewer, repo.get_ref())
            })
    });
    respond(result, StatusCode::OK)
}
