use actix_web::Responder;
use actix_web::http::StatusCode;

use crate::domain::auth::Viewer;
use crate::routes::respond;
use crate::services::verify_credential as verify_credential_service;

/// `GET /api/auth/verify`: succeeds only for a configured bearer token.
pub async fn verify_credential(viewer: Viewer) -> impl Responder {
    respond(verify_credential_service(viewer), StatusCode::OK)
}
