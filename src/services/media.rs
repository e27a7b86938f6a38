//! File-bearing use cases: media uploads and multipart banner creation.

use std::path::Path;

use crate::domain::auth::Viewer;
use crate::domain::banner::Banner;
use crate::domain::content::Content;
use crate::domain::types::MediaUrl;
use crate::forms::uploads::{
    BannerUploadForm, MediaType, MediaUploadForm, remove_upload, store_upload,
};
use crate::forms::validation::validate_content;
use crate::repository::ContentWriter;

use super::{ServiceError, ServiceResult, content};

pub fn upload_media(form: MediaUploadForm, upload_dir: &Path, viewer: Viewer) -> ServiceResult<MediaUrl> {
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let url = store_upload(&form.file, &[MediaType::Image, MediaType::Pdf], upload_dir)?;
    log::info!("Stored upload {url}");
    Ok(url)
}

/// Creates a banner from its multipart form. The image is stored only once
/// the banner fields are valid, and removed again if the insert fails.
pub fn create_banner<R>(
    form: BannerUploadForm,
    upload_dir: &Path,
    viewer: Viewer,
    repo: &R,
) -> ServiceResult<Banner>
where
    R: ContentWriter,
{
    if !viewer.is_admin() {
        return Err(ServiceError::Unauthorized);
    }

    let mut banner = form.banner()?;
    banner.normalize();
    if let Err(err) = validate_content(&banner) {
        // An attached image supplies the missing `imageUrl`.
        match form.image {
            Some(_) => err.ignoring("imageUrl"),
            None => Err(err),
        }
        .map_err(ServiceError::Validation)?;
    }

    let Some(image) = &form.image else {
        return content::create_entry(banner, viewer, repo);
    };

    let url = store_upload(image, &[MediaType::Image], upload_dir)?;
    banner.image_url = url.to_string();
    content::create_entry(banner, viewer, repo).inspect_err(|_| {
        if let Err(e) = remove_upload(&url, upload_dir) {
            log::warn!("Failed to remove orphaned upload {url}: {e}");
        }
    })
}
