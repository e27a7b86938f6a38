//! Multipart forms for file-bearing submissions.

use std::path::Path;

use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use thiserror::Error;

use crate::domain::banner::BannerImage;
use crate::domain::types::{EntityId, MediaUrl};

/// URL prefix under which stored uploads are served.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Banner creation: JSON fields in `data`, image file in `image`.
///
/// The image may be omitted when `data.imageUrl` already points at an
/// uploaded or external file.
#[derive(MultipartForm)]
pub struct BannerUploadForm {
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
    pub data: Text<String>,
}

/// Stand-alone media upload (PDF brochures, gallery images).
#[derive(MultipartForm)]
pub struct MediaUploadForm {
    #[multipart(limit = "25MB")]
    pub file: TempFile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Image,
    Pdf,
}

impl MediaType {
    fn from_extension(extension: &str) -> Option<(Self, &'static str)> {
        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some((Self::Image, "jpg")),
            "png" => Some((Self::Image, "png")),
            "webp" => Some((Self::Image, "webp")),
            "gif" => Some((Self::Image, "gif")),
            "svg" => Some((Self::Image, "svg")),
            "pdf" => Some((Self::Pdf, "pdf")),
            _ => None,
        }
    }

    fn accepts_content_type(self, content_type: &str) -> bool {
        match self {
            Self::Image => content_type.starts_with("image/"),
            Self::Pdf => content_type == "application/pdf",
        }
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("uploaded file is missing")]
    MissingFile,
    #[error("uploaded file is empty")]
    EmptyFile,
    #[error("unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("uploaded file content type does not match its extension")]
    ContentTypeMismatch,
    #[error("failed to store uploaded file")]
    StoreFailed,
    #[error("invalid banner data: {0}")]
    InvalidData(String),
}

impl From<std::io::Error> for UploadError {
    fn from(_: std::io::Error) -> Self {
        Self::StoreFailed
    }
}

/// Checks size, extension and declared content type against the allowed media types.
pub fn validate_file_meta(
    file: &TempFile,
    allowed: &[MediaType],
) -> Result<(MediaType, &'static str), UploadError> {
    if file.size == 0 {
        return Err(UploadError::EmptyFile);
    }

    let file_name = file.file_name.as_deref().unwrap_or_default();
    let extension = Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    let (media_type, extension) = MediaType::from_extension(extension)
        .filter(|(media_type, _)| allowed.contains(media_type))
        .ok_or_else(|| UploadError::UnsupportedType(file_name.to_string()))?;

    if let Some(content_type) = &file.content_type {
        let essence = content_type.essence_str();
        if essence != "application/octet-stream" && !media_type.accepts_content_type(essence) {
            return Err(UploadError::ContentTypeMismatch);
        }
    }

    Ok((media_type, extension))
}

/// Copies a validated upload into `upload_dir` under a fresh name and
/// returns the public URL.
pub fn store_upload(
    file: &TempFile,
    allowed: &[MediaType],
    upload_dir: &Path,
) -> Result<MediaUrl, UploadError> {
    let (_, extension) = validate_file_meta(file, allowed)?;
    std::fs::create_dir_all(upload_dir)?;

    let stored_name = format!("{}.{extension}", EntityId::generate());
    std::fs::copy(file.file.path(), upload_dir.join(&stored_name))?;

    MediaUrl::new(format!("{UPLOADS_PREFIX}/{stored_name}"))
        .map_err(|e| UploadError::InvalidData(e.to_string()))
}

/// Deletes a file previously returned by [`store_upload`]. URLs outside
/// [`UPLOADS_PREFIX`] are left alone.
pub fn remove_upload(url: &MediaUrl, upload_dir: &Path) -> std::io::Result<()> {
    let Some(stored_name) = url
        .as_str()
        .strip_prefix(UPLOADS_PREFIX)
        .map(|name| name.trim_start_matches('/'))
        .filter(|name| !name.is_empty() && !name.contains('/'))
    else {
        return Ok(());
    };
    std::fs::remove_file(upload_dir.join(stored_name))
}

impl BannerUploadForm {
    /// Parses the JSON `data` part. The attached image is not stored yet.
    pub fn banner(&self) -> Result<BannerImage, UploadError> {
        serde_json::from_str(&self.data).map_err(|e| UploadError::InvalidData(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_extensions() {
        assert_eq!(
            MediaType::from_extension("JPEG"),
            Some((MediaType::Image, "jpg"))
        );
        assert_eq!(MediaType::from_extension("pdf"), Some((MediaType::Pdf, "pdf")));
        assert_eq!(MediaType::from_extension("exe"), None);
    }

    #[test]
    fn remove_upload_deletes_only_stored_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), b"png").unwrap();

        remove_upload(&MediaUrl::new("https://cdn.example.com/a.png").unwrap(), dir.path()).unwrap();
        assert!(dir.path().join("a.png").exists());

        remove_upload(&MediaUrl::new("/uploads/a.png").unwrap(), dir.path()).unwrap();
        assert!(!dir.path().join("a.png").exists());
    }

    #[test]
    fn content_type_must_match_media_type() {
        assert!(MediaType::Image.accepts_content_type("image/png"));
        assert!(!MediaType::Image.accepts_content_type("application/pdf"));
        assert!(MediaType::Pdf.accepts_content_type("application/pdf"));
    }
}
