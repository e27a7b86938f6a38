use std::path::Path;

use actix_multipart::form::MultipartForm;
use actix_web::http::StatusCode;
use actix_web::{Responder, web};

use crate::domain::auth::Viewer;
use crate::dto::content::MediaUploaded;
use crate::forms::uploads::{BannerUploadForm, MediaUploadForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::respond;
use crate::services::media::{
    create_banner as create_banner_service, upload_media as upload_media_service,
};

/// `POST /api/banners`: multipart with a `data` JSON part and an optional
/// `image` file.
pub async fn create_banner(
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<BannerUploadForm>,
) -> impl Responder {
    let upload_dir = Path::new(&server_config.upload_dir);
    respond(
        create_banner_service(form, upload_dir, viewer, repo.get_ref()),
        StatusCode::CREATED,
    )
}

/// `POST /api/media`: stores one file and returns its public URL.
pub async fn upload_media(
    viewer: Viewer,
    server_config: web::Data<ServerConfig>,
    MultipartForm(form): MultipartForm<MediaUploadForm>,
) -> impl Responder {
    let upload_dir = Path::new(&server_config.upload_dir);
    let result = upload_media_service(form, upload_dir, viewer).map(|url| MediaUploaded {
        url: url.into(),
    });
    respond(result, StatusCode::CREATED)
}

/// Static service for stored uploads under `/uploads`.
pub fn uploads(upload_dir: &str) -> actix_files::Files {
    actix_files::Files::new(crate::forms::uploads::UPLOADS_PREFIX, upload_dir)
}
