//! JSON API of the data service, mounted under `/api`.

use std::convert::Infallible;
use std::future::{Ready, ready};

use actix_multipart::form::MultipartFormConfig;
use actix_web::dev::Payload;
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::domain::auth::Viewer;
use crate::domain::banner::BannerImage;
use crate::domain::blog::BlogPost;
use crate::domain::content::Content;
use crate::domain::internal_link::InternalLink;
use crate::domain::project::Project;
use crate::domain::seo::SeoSetting;
use crate::domain::service::Service;
use crate::domain::types::CategoryKind;
use crate::dto::envelope::Envelope;
use crate::models::config::ServerConfig;
use crate::services::{ServiceError, ServiceResult, verify_credential};

pub mod auth;
pub mod categories;
pub mod content;
pub mod media;

impl FromRequest for Viewer {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::warn!("Server config missing from app data; treating request as anonymous");
            return ready(Ok(Viewer::Anonymous));
        };

        let token = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        let viewer = match token {
            Some(token) if config.accepts_token(token) => Viewer::Administrator,
            _ => Viewer::Anonymous,
        };
        ready(Ok(viewer))
    }
}

fn failure(status: StatusCode, error: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(Envelope::<()>::failure(error, None))
}

/// Render a service result as an envelope.
pub fn respond<T: Serialize>(result: ServiceResult<T>, success: StatusCode) -> HttpResponse {
    match result {
        Ok(data) => HttpResponse::build(success).json(Envelope::ok(data)),
        Err(ServiceError::Unauthorized) => failure(StatusCode::UNAUTHORIZED, "unauthorized"),
        Err(ServiceError::NotFound) => failure(StatusCode::NOT_FOUND, "not found"),
        Err(ServiceError::Validation(err)) => HttpResponse::UnprocessableEntity()
            .json(Envelope::<()>::failure("validation failed", Some((&err).into()))),
        Err(ServiceError::Form(message)) => failure(StatusCode::BAD_REQUEST, message),
        Err(ServiceError::Internal) => {
            failure(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

/// Runs `handle` for administrators only. Anonymous writes are refused
/// before their body is converted or validated.
pub fn authorized<T>(viewer: Viewer, handle: impl FnOnce() -> ServiceResult<T>) -> ServiceResult<T> {
    verify_credential(viewer).and_then(|()| handle())
}

fn bad_request<E>(err: E, _req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let response = failure(StatusCode::BAD_REQUEST, err.to_string());
    actix_web::error::InternalError::from_response(err, response).into()
}

fn entity<D: Content>(cfg: &mut web::ServiceConfig) {
    let resource = format!("/{}", D::KIND.resource());
    cfg.service(
        web::resource(format!("{resource}/status"))
            .route(web::put().to(content::set_entry_active::<D>)),
    );

    let collection = web::resource(resource)
        .route(web::get().to(content::list_entries::<D>))
        .route(web::put().to(content::update_entry::<D>))
        .route(web::delete().to(content::delete_entry::<D>));

    // Banners carry an image file and are created through multipart.
    if D::KIND == BannerImage::KIND {
        cfg.service(collection.route(web::post().to(media::create_banner)));
    } else {
        cfg.service(collection.route(web::post().to(content::create_entry::<D>)));
    }
}

fn category(kind: CategoryKind, cfg: &mut web::ServiceConfig) {
    let resource = format!("/{}", kind.resource());
    cfg.service(
        web::resource(format!("{resource}/status"))
            .app_data(web::Data::new(kind))
            .route(web::put().to(categories::set_category_active)),
    );
    cfg.service(
        web::resource(resource)
            .app_data(web::Data::new(kind))
            .route(web::get().to(categories::show_categories))
            .route(web::post().to(categories::add_category))
            .route(web::put().to(categories::update_category))
            .route(web::delete().to(categories::delete_category)),
    );
}

/// Register the `/api` scope. Expects `web::Data<DieselRepository>` and
/// `web::Data<ServerConfig>` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(bad_request))
            .app_data(web::QueryConfig::default().error_handler(bad_request))
            .app_data(MultipartFormConfig::default().error_handler(bad_request))
            .configure(entity::<BannerImage>)
            .configure(entity::<Service>)
            .configure(entity::<Project>)
            .configure(entity::<BlogPost>)
            .configure(entity::<SeoSetting>)
            .configure(entity::<InternalLink>)
            .configure(|cfg| {
                for kind in CategoryKind::ALL {
                    category(*kind, cfg);
                }
            })
            .route("/media", web::post().to(media::upload_media))
            .route("/auth/verify", web::get().to(auth::verify_credential)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_write_never_reaches_its_handler() {
        let result: ServiceResult<()> = authorized(Viewer::Anonymous, || {
            panic!("handler must not run for anonymous callers")
        });
        assert_eq!(result, Err(ServiceError::Unauthorized));

        assert_eq!(authorized(Viewer::Administrator, || Ok(7)), Ok(7));
    }
}
