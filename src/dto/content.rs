use serde::{Deserialize, Serialize};

use crate::domain::content::Content;
use crate::domain::types::EntityId;

/// `PUT /api/{resource}` body: the full entity plus its id.
#[derive(Debug, Serialize)]
pub struct EntryUpdateBody<'a, D: Content> {
    pub id: &'a EntityId,
    #[serde(flatten)]
    pub content: &'a D,
}

/// `PUT /api/{resource}/status` body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryStatusBody<'a> {
    pub id: &'a EntityId,
    pub is_active: bool,
}

/// `POST /api/media` response data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaUploaded {
    pub url: String,
}
