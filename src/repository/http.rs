//! Repository client speaking the JSON envelope API of the data service.

use std::time::Duration;

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::domain::banner::{Banner, BannerImage};
use crate::domain::category::{Category, NewCategory};
use crate::domain::content::{Content, Record};
use crate::domain::types::{CategoryId, CategoryKind, Credential, EntityId, EntityKind, MediaUrl};
use crate::dto::categories::{CategoryStatusBody, CategoryUpdateBody};
use crate::dto::content::{EntryStatusBody, EntryUpdateBody, MediaUploaded};
use crate::dto::envelope::Envelope;
use crate::forms::validation::{validate_category, validate_content};
use crate::repository::{
    CategoryReader, CategoryWriter, ContentListQuery, ContentReader, ContentWriter,
    RepositoryError, RepositoryResult, TransportError, Visibility,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A file attached to a multipart submission.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    fn mime(&self) -> &'static str {
        let extension = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "svg" => "image/svg+xml",
            "pdf" => "application/pdf",
            _ => "application/octet-stream",
        }
    }

    fn into_part(self) -> RepositoryResult<Part> {
        let mime = self.mime();
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(mime)
            .map_err(transport)
    }
}

fn transport(error: reqwest::Error) -> RepositoryError {
    let mut err = TransportError::new(error.to_string());
    if let Some(status) = error.status() {
        err = err.with_status(status.as_u16());
    }
    err.into()
}

/// Repository backed by the data service's `/api` endpoints.
///
/// Drafts are validated locally first; an incomplete entity never leaves the
/// process.
#[derive(Clone)]
pub struct HttpRepository {
    client: Client,
    base_url: String,
    credential: Option<Credential>,
}

impl HttpRepository {
    pub fn new(base_url: impl Into<String>) -> RepositoryResult<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credential: None,
        })
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn set_credential(&mut self, credential: Option<Credential>) {
        self.credential = credential;
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.base_url)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.credential {
            Some(credential) => builder.bearer_auth(credential.as_str()),
            None => builder,
        }
    }

    fn exchange<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<Envelope<T>> {
        let response = request.send().map_err(transport)?;
        let status = response.status();
        let text = response.text().map_err(transport)?;

        let envelope: Envelope<T> = serde_json::from_str(&text).map_err(|e| {
            TransportError::new(format!("unexpected response body: {e}")).with_status(status.as_u16())
        })?;

        if envelope.success && status.is_success() {
            return Ok(envelope);
        }

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(RepositoryError::Unauthorized),
            StatusCode::NOT_FOUND => Err(RepositoryError::NotFound),
            _ => {
                let message = envelope
                    .error
                    .clone()
                    .unwrap_or_else(|| format!("request failed with status {status}"));
                Err(TransportError::new(message)
                    .with_status(status.as_u16())
                    .with_details(envelope.details_line())
                    .into())
            }
        }
    }

    fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> RepositoryResult<T> {
        self.exchange::<T>(request)?
            .into_data()
            .ok_or_else(|| TransportError::new("response carried no data").into())
    }

    fn send_empty(&self, request: RequestBuilder) -> RepositoryResult<()> {
        self.exchange::<serde_json::Value>(request).map(|_| ())
    }

    /// Checks the configured credential against `GET /api/auth/verify`.
    pub fn verify_credential(&self) -> RepositoryResult<()> {
        if self.credential.is_none() {
            return Err(RepositoryError::Unauthorized);
        }
        self.send_empty(self.request(Method::GET, "auth/verify"))
    }

    /// Uploads a media file and returns its public URL.
    pub fn upload_media(&self, file: Attachment) -> RepositoryResult<MediaUrl> {
        let form = Form::new().part("file", file.into_part()?);
        let uploaded: MediaUploaded = self.send(self.request(Method::POST, "media").multipart(form))?;
        Ok(MediaUrl::new(uploaded.url)?)
    }

    /// Creates a banner, uploading `image` alongside the JSON fields. When an
    /// image is attached the stored file replaces `imageUrl`.
    pub fn create_banner(&self, banner: &BannerImage, image: Option<Attachment>) -> RepositoryResult<Banner> {
        if let Err(err) = validate_content(banner) {
            match image {
                Some(_) => err.ignoring("imageUrl")?,
                None => return Err(err.into()),
            }
        }

        let mut form = Form::new().text("data", serde_json::to_string(banner)?);
        if let Some(image) = image {
            form = form.part("image", image.into_part()?);
        }
        self.send(
            self.request(Method::POST, EntityKind::Banner.resource())
                .multipart(form),
        )
    }
}

impl ContentReader for HttpRepository {
    fn list_entries<D: Content>(&self, query: &ContentListQuery) -> RepositoryResult<Vec<Record<D>>> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(page) = query.page {
            params.push(("page", page.as_str()));
        }
        if query.featured_only {
            params.push(("featured", "true"));
        }

        let request = match query.visibility {
            Visibility::All => self.request(Method::GET, D::KIND.resource()),
            Visibility::Public => self.client.get(self.url(D::KIND.resource())),
        };
        let items: Vec<Record<D>> = self.send(request.query(&params))?;

        Ok(items.into_iter().filter(|r| query.matches(&r.content)).collect())
    }

    fn get_entry<D: Content>(&self, id: &EntityId) -> RepositoryResult<Option<Record<D>>> {
        let items = self.list_entries::<D>(&ContentListQuery::all())?;
        Ok(items.into_iter().find(|r| &r.id == id))
    }
}

impl ContentWriter for HttpRepository {
    fn create_entry<D: Content>(&self, content: &D) -> RepositoryResult<Record<D>> {
        validate_content(content)?;

        let request = if D::KIND == EntityKind::Banner {
            let form = Form::new().text("data", serde_json::to_string(content)?);
            self.request(Method::POST, D::KIND.resource()).multipart(form)
        } else {
            self.request(Method::POST, D::KIND.resource()).json(content)
        };
        self.send(request)
    }

    fn update_entry<D: Content>(&self, id: &EntityId, content: &D) -> RepositoryResult<Record<D>> {
        validate_content(content)?;

        let body = EntryUpdateBody { id, content };
        self.send(self.request(Method::PUT, D::KIND.resource()).json(&body))
    }

    fn delete_entry<D: Content>(&self, id: &EntityId) -> RepositoryResult<()> {
        self.send_empty(
            self.request(Method::DELETE, D::KIND.resource())
                .query(&[("id", id.as_str())]),
        )
    }

    fn set_entry_active<D: Content>(&self, id: &EntityId, active: bool) -> RepositoryResult<Record<D>> {
        let body = EntryStatusBody {
            id,
            is_active: active,
        };
        let path = format!("{}/status", D::KIND.resource());
        self.send(self.request(Method::PUT, &path).json(&body))
    }
}

impl CategoryReader for HttpRepository {
    fn list_categories(&self, kind: CategoryKind) -> RepositoryResult<Vec<Category>> {
        self.send(self.request(Method::GET, kind.resource()))
    }

    fn get_category_by_id(&self, id: &CategoryId) -> RepositoryResult<Option<Category>> {
        for kind in CategoryKind::ALL {
            if let Some(category) = self.list_categories(*kind)?.into_iter().find(|c| &c.id == id) {
                return Ok(Some(category));
            }
        }
        Ok(None)
    }
}

impl CategoryWriter for HttpRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        validate_category(category)?;
        self.send(self.request(Method::POST, category.kind.resource()).json(category))
    }

    fn update_category(&self, id: &CategoryId, category: &NewCategory) -> RepositoryResult<Category> {
        validate_category(category)?;
        let body = CategoryUpdateBody { id, category };
        self.send(self.request(Method::PUT, category.kind.resource()).json(&body))
    }

    fn delete_category(&self, kind: CategoryKind, id: &CategoryId) -> RepositoryResult<()> {
        self.send_empty(
            self.request(Method::DELETE, kind.resource())
                .query(&[("id", id.as_str())]),
        )
    }

    fn set_category_active(
        &self,
        kind: CategoryKind,
        id: &CategoryId,
        active: bool,
    ) -> RepositoryResult<Category> {
        let body = CategoryStatusBody {
            id,
            is_active: active,
        };
        let path = format!("{}/status", kind.resource());
        self.send(self.request(Method::PUT, &path).json(&body))
    }
}
